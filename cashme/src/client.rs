use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::admin::CashMeAdmin;
use crate::config::CashMeConfig;
use crate::error::{CashMeError, Result};
use crate::rest::CashMeHttpClient;
use crate::session::{RestoreOutcome, Session, SessionController};
use crate::token_store::{FileTokenStore, TokenStore};
use crate::transfer::{TransferAttempt, TransferForm};
use crate::types::*;

/// A wallet together with its transaction history.
#[derive(Debug, Clone, Serialize)]
pub struct WalletDetails {
    pub wallet: Wallet,
    pub transactions: Vec<Transaction>,
}

/// A support ticket together with its replies.
#[derive(Debug, Clone, Serialize)]
pub struct TicketDetails {
    pub ticket: Ticket,
    pub responses: Vec<TicketResponse>,
}

/// Main CashMe client.
///
/// Built once per process and handed to every consumer. Calls that need a
/// user fail with [`CashMeError::Forbidden`] while the session is not
/// authenticated, and a 401 from any call ends the session.
pub struct CashMe {
    pub config: CashMeConfig,
    pub http: Arc<CashMeHttpClient>,
    pub session: Arc<SessionController>,
}

impl CashMe {
    /// Create a client whose credential lives in `config.token_dir`.
    pub fn new(config: CashMeConfig) -> Result<Self> {
        let tokens = Arc::new(FileTokenStore::new(&config.token_dir));
        Self::with_token_store(config, tokens)
    }

    pub fn with_token_store(config: CashMeConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let http = Arc::new(CashMeHttpClient::new(&config, tokens)?);
        let session = Arc::new(SessionController::new(Arc::clone(&http)));
        Ok(Self {
            config,
            http,
            session,
        })
    }

    /// Rebuild the session from the stored credential.
    pub async fn restore(&self) -> RestoreOutcome {
        self.session.restore().await
    }

    /// The authenticated session, or `Forbidden`.
    pub fn require_session(&self) -> Result<Session> {
        self.session
            .current()
            .session()
            .cloned()
            .ok_or_else(|| CashMeError::Forbidden("not logged in".into()))
    }

    /// Admin console handle; fails unless the session is admin.
    pub fn admin(&self) -> Result<CashMeAdmin> {
        CashMeAdmin::new(Arc::clone(&self.http), Arc::clone(&self.session))
    }

    async fn call<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        self.require_session()?;
        let result = fut.await;
        if let Err(e) = &result {
            self.session.invalidate_on(e);
        }
        result
    }

    // --- Transfers ---

    /// Open a transfer form: one attempt, one idempotency key.
    pub fn open_transfer(&self) -> Result<TransferAttempt> {
        self.require_session()?;
        Ok(TransferAttempt::new())
    }

    /// Submit `form` under `attempt`'s key.
    pub async fn submit_transfer(
        &self,
        attempt: &mut TransferAttempt,
        form: &TransferForm,
    ) -> Result<Option<Transaction>> {
        self.call(attempt.submit(&self.http, form)).await
    }

    // --- Wallets ---

    pub async fn my_wallets(&self) -> Result<Vec<Wallet>> {
        self.call(self.http.get_my_wallets()).await
    }

    /// Wallet and its transactions, fetched concurrently.
    pub async fn wallet_details(&self, wallet_id: u64) -> Result<WalletDetails> {
        self.call(async {
            let (wallet, transactions) = tokio::try_join!(
                self.http.get_wallet(wallet_id),
                self.http.get_wallet_transactions(wallet_id)
            )?;
            Ok(WalletDetails {
                wallet,
                transactions,
            })
        })
        .await
    }

    pub async fn create_wallet(&self, request: &CreateWalletRequest) -> Result<Wallet> {
        self.call(self.http.create_wallet(request)).await
    }

    pub async fn deactivate_wallet(&self, wallet_id: u64) -> Result<Value> {
        self.call(self.http.deactivate_wallet(wallet_id)).await
    }

    // --- Transactions ---

    pub async fn my_transactions(&self) -> Result<Vec<Transaction>> {
        self.call(self.http.get_all_user_transactions()).await
    }

    // --- Loans ---

    pub async fn my_loans(&self) -> Result<Vec<LoanApplication>> {
        let user_id = self.require_session()?.user.id;
        self.call(self.http.get_user_loans(user_id)).await
    }

    pub async fn loan(&self, id: u64) -> Result<LoanApplication> {
        self.call(self.http.get_loan_application(id)).await
    }

    pub async fn apply_for_loan(&self, request: &LoanApplicationRequest) -> Result<LoanApplication> {
        self.call(self.http.apply_for_loan(request)).await
    }

    // --- Support ---

    pub async fn my_tickets(&self) -> Result<Vec<Ticket>> {
        let user_id = self.require_session()?.user.id;
        self.call(self.http.get_user_tickets(user_id)).await
    }

    pub async fn ticket_details(&self, ticket_id: u64) -> Result<TicketDetails> {
        self.call(async {
            let (ticket, responses) = tokio::try_join!(
                self.http.get_ticket(ticket_id),
                self.http.get_ticket_responses(ticket_id)
            )?;
            Ok(TicketDetails { ticket, responses })
        })
        .await
    }

    pub async fn create_ticket(&self, request: &TicketRequest) -> Result<Ticket> {
        self.call(self.http.create_ticket(request)).await
    }

    pub async fn respond_to_ticket(&self, ticket_id: u64, message: &str) -> Result<TicketResponse> {
        let request = TicketResponseRequest {
            ticket_id,
            response_message: message.to_string(),
        };
        self.call(self.http.create_ticket_response(&request)).await
    }

    /// Move a ticket to another status. Admin only.
    pub async fn update_ticket_status(&self, ticket_id: u64, status: TicketStatus) -> Result<Ticket> {
        if !self.session.is_admin() {
            return Err(CashMeError::Forbidden("admin role required".into()));
        }
        self.call(self.http.update_ticket_status(ticket_id, status))
            .await
    }

    pub async fn delete_ticket(&self, ticket_id: u64) -> Result<()> {
        self.call(self.http.delete_ticket(ticket_id)).await
    }

    pub async fn delete_ticket_response(&self, response_id: u64) -> Result<()> {
        self.call(self.http.delete_ticket_response(response_id))
            .await
    }

    // --- Account ---

    pub async fn update_password(&self, old_password: &str, new_password: &str) -> Result<Value> {
        let request = UpdatePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.call(self.http.update_password(&request)).await
    }
}
