use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::error::{CashMeError, Result};
use crate::rest::CashMeHttpClient;
use crate::session::{Session, SessionController};
use crate::types::{LoanApplication, LoanStatus, RoleSet, UserProfile, Wallet};

/// Whether `actor` may delete a user holding `target` roles.
/// Owners are never deletable; only owners may delete admins.
pub fn can_delete(actor: &Session, target: &RoleSet) -> bool {
    actor.is_admin && !target.is_owner() && (actor.is_owner || !target.is_admin())
}

/// Whether `actor` may grant admin to a user holding `target` roles.
pub fn can_promote(actor: &Session, target: &RoleSet) -> bool {
    actor.is_admin && !target.is_owner() && !target.is_admin()
}

/// Whether `actor` may revoke admin from a user holding `target` roles.
/// Only owners demote, and never another owner.
pub fn can_demote(actor: &Session, target: &RoleSet) -> bool {
    actor.is_owner && !target.is_owner() && target.is_admin()
}

/// Admin console operations.
///
/// Every call re-checks the live session, so a handle obtained while admin
/// stops working after logout.
pub struct CashMeAdmin {
    http: Arc<CashMeHttpClient>,
    session: Arc<SessionController>,
}

impl CashMeAdmin {
    /// Create an admin handle; fails unless the current session is admin.
    pub fn new(http: Arc<CashMeHttpClient>, session: Arc<SessionController>) -> Result<Self> {
        let admin = Self { http, session };
        admin.actor()?;
        Ok(admin)
    }

    fn actor(&self) -> Result<Session> {
        match self.session.current().session() {
            Some(s) if s.is_admin => Ok(s.clone()),
            Some(_) => Err(CashMeError::Forbidden("admin role required".into())),
            None => Err(CashMeError::Forbidden("not logged in".into())),
        }
    }

    async fn run<T>(&self, fut: impl std::future::Future<Output = Result<T>>) -> Result<T> {
        let result = fut.await;
        if let Err(e) = &result {
            self.session.invalidate_on(e);
        }
        result
    }

    pub async fn users(&self) -> Result<Vec<UserProfile>> {
        self.actor()?;
        self.run(self.http.get_all_users()).await
    }

    pub async fn delete_user(&self, target: &UserProfile) -> Result<Value> {
        let actor = self.actor()?;
        if !can_delete(&actor, &target.roles) {
            return Err(CashMeError::Forbidden(format!(
                "cannot delete user {}",
                target.user_name
            )));
        }
        info!(target_id = target.id, "deleting user");
        self.run(self.http.delete_user(target.id)).await
    }

    pub async fn promote(&self, target: &UserProfile) -> Result<Value> {
        let actor = self.actor()?;
        if !can_promote(&actor, &target.roles) {
            return Err(CashMeError::Forbidden(format!(
                "cannot promote user {}",
                target.user_name
            )));
        }
        info!(target_id = target.id, "promoting user");
        self.run(self.http.promote_user(target.id)).await
    }

    pub async fn demote(&self, target: &UserProfile) -> Result<Value> {
        let actor = self.actor()?;
        if !can_demote(&actor, &target.roles) {
            return Err(CashMeError::Forbidden(format!(
                "cannot demote user {}",
                target.user_name
            )));
        }
        info!(target_id = target.id, "demoting user");
        self.run(self.http.demote_user(target.id)).await
    }

    pub async fn wallets(&self) -> Result<Vec<Wallet>> {
        self.actor()?;
        self.run(self.http.get_all_wallets()).await
    }

    pub async fn update_wallet_status(&self, wallet_id: u64, status: &str) -> Result<Value> {
        self.actor()?;
        self.run(self.http.update_wallet_status(wallet_id, status))
            .await
    }

    pub async fn loans(&self) -> Result<Vec<LoanApplication>> {
        self.actor()?;
        self.run(self.http.get_all_loans()).await
    }

    pub async fn update_loan_status(&self, loan_id: u64, status: LoanStatus) -> Result<Value> {
        self.actor()?;
        info!(loan_id, %status, "updating loan status");
        self.run(self.http.update_loan_status(loan_id, status))
            .await
    }

    pub async fn delete_loan(&self, loan_id: u64) -> Result<Value> {
        self.actor()?;
        self.run(self.http.delete_loan(loan_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(roles: &[&str]) -> Session {
        Session::from_profile(UserProfile {
            id: 1,
            user_name: "actor".into(),
            email: "actor@x.com".into(),
            first_name: None,
            last_name: None,
            roles: RoleSet::from_labels(roles),
            wallets: vec![],
            created_at: None,
        })
    }

    #[test]
    fn test_owner_permissions() {
        let owner = session(&["Owner"]);
        let member = RoleSet::from_labels(["Member"]);
        let admin = RoleSet::from_labels(["Admin"]);
        let other_owner = RoleSet::from_labels(["Owner"]);

        assert!(can_delete(&owner, &member));
        assert!(can_delete(&owner, &admin));
        assert!(!can_delete(&owner, &other_owner));
        assert!(can_promote(&owner, &member));
        assert!(can_demote(&owner, &admin));
        assert!(!can_demote(&owner, &other_owner));
    }

    #[test]
    fn test_admin_permissions() {
        let admin = session(&["Admin"]);
        let member = RoleSet::from_labels(["Member"]);
        let other_admin = RoleSet::from_labels(["ADMIN"]);

        assert!(can_delete(&admin, &member));
        assert!(!can_delete(&admin, &other_admin));
        assert!(can_promote(&admin, &member));
        assert!(!can_promote(&admin, &other_admin));
        assert!(!can_demote(&admin, &other_admin));
    }

    #[test]
    fn test_member_has_no_permissions() {
        let member = session(&["Member"]);
        let target = RoleSet::from_labels(["Member"]);
        assert!(!can_delete(&member, &target));
        assert!(!can_promote(&member, &target));
        assert!(!can_demote(&member, &target));
    }
}
