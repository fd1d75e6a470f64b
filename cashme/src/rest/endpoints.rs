use reqwest::Method;
use serde_json::Value;

use crate::error::Result;
use crate::rest::CashMeHttpClient;
use crate::types::*;

/// Header carrying the client-generated idempotency key on transfers.
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

impl CashMeHttpClient {
    // --- Auth ---

    /// POST /api/v1/auth/register - Create an account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.post("/api/v1/auth/register", request).await
    }

    /// POST /api/v1/auth/login - Exchange credentials for a token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/api/v1/auth/login", &body).await
    }

    /// Browser entry point for identity-provider login, e.g. `google`.
    pub fn oauth2_authorization_url(&self, provider: &str) -> String {
        format!("{}/oauth2/authorization/{provider}", self.base_url())
    }

    // --- User ---

    /// GET /user/api/me - Current user profile.
    pub async fn get_profile(&self) -> Result<UserProfile> {
        self.get("/user/api/me").await
    }

    /// GET /user/api/{user_id} - User profile by ID.
    pub async fn get_user(&self, user_id: u64) -> Result<UserProfile> {
        self.get(&format!("/user/api/{user_id}")).await
    }

    /// POST /user/api/updatePassword - Change the current user's password.
    pub async fn update_password(&self, request: &UpdatePasswordRequest) -> Result<Value> {
        self.post("/user/api/updatePassword", request).await
    }

    // --- Wallets ---

    /// GET /wallets/api/my-wallets - Wallets owned by the current user.
    pub async fn get_my_wallets(&self) -> Result<Vec<Wallet>> {
        self.get("/wallets/api/my-wallets").await
    }

    /// GET /wallets/api/{wallet_id} - Wallet by ID.
    pub async fn get_wallet(&self, wallet_id: u64) -> Result<Wallet> {
        self.get(&format!("/wallets/api/{wallet_id}")).await
    }

    /// GET /wallets/api/user/{user_id}/wallets - Wallets of a given user.
    pub async fn get_user_wallets(&self, user_id: u64) -> Result<Vec<Wallet>> {
        self.get(&format!("/wallets/api/user/{user_id}/wallets"))
            .await
    }

    /// POST /wallets/api/create - Open a new wallet.
    pub async fn create_wallet(&self, request: &CreateWalletRequest) -> Result<Wallet> {
        self.post("/wallets/api/create", request).await
    }

    /// PUT /wallets/api/deactivate/{wallet_id} - Deactivate a wallet.
    pub async fn deactivate_wallet(&self, wallet_id: u64) -> Result<Value> {
        self.put(&format!("/wallets/api/deactivate/{wallet_id}"), None::<&()>)
            .await
    }

    /// DELETE /wallets/api/delete/{wallet_id} - Delete a wallet.
    pub async fn delete_wallet(&self, wallet_id: u64) -> Result<Value> {
        self.delete(&format!("/wallets/api/delete/{wallet_id}"))
            .await
    }

    /// PUT /wallets/api/transfer - Move money to another user.
    ///
    /// `idempotency_key` lets the server deduplicate retried attempts. A 2xx
    /// with an empty body is a completed transfer with no record attached.
    pub async fn transfer(
        &self,
        request: &TransferRequest,
        idempotency_key: &str,
    ) -> Result<Option<Transaction>> {
        self.send(
            Method::PUT,
            "/wallets/api/transfer",
            Some(request),
            &[(IDEMPOTENCY_HEADER, idempotency_key)],
        )
        .await
    }

    // --- Transactions ---

    /// GET /transactions/api/wallet/{wallet_id} - Transactions of a wallet.
    pub async fn get_wallet_transactions(&self, wallet_id: u64) -> Result<Vec<Transaction>> {
        self.get(&format!("/transactions/api/wallet/{wallet_id}"))
            .await
    }

    /// GET /transactions/api/user-All-transactions - Every transaction touching
    /// the current user's wallets.
    pub async fn get_all_user_transactions(&self) -> Result<Vec<Transaction>> {
        self.get("/transactions/api/user-All-transactions").await
    }

    /// GET /transactions/api/all - All transactions (admin).
    pub async fn get_all_transactions(&self) -> Result<Vec<Transaction>> {
        self.get("/transactions/api/all").await
    }

    /// GET /transactions/api/status/{status} - Transactions with a status.
    pub async fn get_transactions_by_status(
        &self,
        status: TransactionStatus,
    ) -> Result<Vec<Transaction>> {
        self.get(&format!("/transactions/api/status/{status}"))
            .await
    }

    /// GET /transactions/api/report/{wallet_id}/{month} - Monthly report,
    /// served as plain text.
    pub async fn get_monthly_report(&self, wallet_id: u64, month: u32) -> Result<String> {
        self.get_text(&format!("/transactions/api/report/{wallet_id}/{month}"))
            .await
    }

    // --- Loan applications ---

    /// POST /loan-applications/api - Apply for a loan.
    pub async fn apply_for_loan(
        &self,
        request: &LoanApplicationRequest,
    ) -> Result<LoanApplication> {
        self.post("/loan-applications/api", request).await
    }

    /// GET /loan-applications/api/{id} - Loan application by ID.
    pub async fn get_loan_application(&self, id: u64) -> Result<LoanApplication> {
        self.get(&format!("/loan-applications/api/{id}")).await
    }

    /// GET /loan-applications/api/user/{user_id} - Applications of a user.
    pub async fn get_user_loans(&self, user_id: u64) -> Result<Vec<LoanApplication>> {
        self.get(&format!("/loan-applications/api/user/{user_id}"))
            .await
    }

    /// GET /loan-applications/api/status/{status} - Applications with a status.
    pub async fn get_loans_by_status(&self, status: LoanStatus) -> Result<Vec<LoanApplication>> {
        self.get(&format!("/loan-applications/api/status/{status}"))
            .await
    }

    /// GET /loan-applications/api/exists/{user_id}/{status}
    pub async fn loan_exists(&self, user_id: u64, status: LoanStatus) -> Result<bool> {
        self.get(&format!("/loan-applications/api/exists/{user_id}/{status}"))
            .await
    }

    /// GET /loan-applications/api/count/{status}
    pub async fn count_loans(&self, status: LoanStatus) -> Result<u64> {
        self.get(&format!("/loan-applications/api/count/{status}"))
            .await
    }

    /// PATCH /loan-applications/api/status - Change an application's status.
    pub async fn update_loan_application_status(
        &self,
        id: u64,
        status: LoanStatus,
    ) -> Result<LoanApplication> {
        self.send(
            Method::PATCH,
            "/loan-applications/api/status",
            Some(&LoanApplicationStatusUpdate { id, status }),
            &[],
        )
        .await
    }

    // --- Support tickets ---

    /// GET /support-tickets/api - All tickets visible to the caller.
    pub async fn get_tickets(&self) -> Result<Vec<Ticket>> {
        self.get("/support-tickets/api").await
    }

    /// GET /support-tickets/api/{ticket_id}
    pub async fn get_ticket(&self, ticket_id: u64) -> Result<Ticket> {
        self.get(&format!("/support-tickets/api/{ticket_id}"))
            .await
    }

    /// GET /support-tickets/api/user/{user_id}
    pub async fn get_user_tickets(&self, user_id: u64) -> Result<Vec<Ticket>> {
        self.get(&format!("/support-tickets/api/user/{user_id}"))
            .await
    }

    /// GET /support-tickets/api/status/{status}
    pub async fn get_tickets_by_status(&self, status: TicketStatus) -> Result<Vec<Ticket>> {
        self.get(&format!("/support-tickets/api/status/{}", status.as_str()))
            .await
    }

    /// GET /support-tickets/api/category/{category}
    pub async fn get_tickets_by_category(&self, category: TicketCategory) -> Result<Vec<Ticket>> {
        self.get(&format!(
            "/support-tickets/api/category/{}",
            category.as_str()
        ))
        .await
    }

    /// POST /support-tickets/api - Open a ticket.
    pub async fn create_ticket(&self, request: &TicketRequest) -> Result<Ticket> {
        self.post("/support-tickets/api", request).await
    }

    /// PATCH /support-tickets/api/{ticket_id}/status?status= - Move a ticket.
    pub async fn update_ticket_status(&self, ticket_id: u64, status: TicketStatus) -> Result<Ticket> {
        self.request(
            Method::PATCH,
            &format!("/support-tickets/api/{ticket_id}/status"),
            &[("status", status.as_str())],
            None::<&()>,
            &[],
        )
        .await
    }

    /// DELETE /support-tickets/api/{ticket_id}
    pub async fn delete_ticket(&self, ticket_id: u64) -> Result<()> {
        self.delete(&format!("/support-tickets/api/{ticket_id}"))
            .await
    }

    // --- Ticket responses ---

    /// POST /support-ticket-responses/api - Reply to a ticket.
    pub async fn create_ticket_response(
        &self,
        request: &TicketResponseRequest,
    ) -> Result<TicketResponse> {
        self.post("/support-ticket-responses/api", request).await
    }

    /// GET /support-ticket-responses/api/{response_id}
    pub async fn get_ticket_response(&self, response_id: u64) -> Result<TicketResponse> {
        self.get(&format!("/support-ticket-responses/api/{response_id}"))
            .await
    }

    /// GET /support-ticket-responses/api/ticket/{ticket_id}
    pub async fn get_ticket_responses(&self, ticket_id: u64) -> Result<Vec<TicketResponse>> {
        self.get(&format!("/support-ticket-responses/api/ticket/{ticket_id}"))
            .await
    }

    /// GET /support-ticket-responses/api/sender/{sender_id}
    pub async fn get_responses_by_sender(&self, sender_id: u64) -> Result<Vec<TicketResponse>> {
        self.get(&format!("/support-ticket-responses/api/sender/{sender_id}"))
            .await
    }

    /// DELETE /support-ticket-responses/api/{response_id}
    pub async fn delete_ticket_response(&self, response_id: u64) -> Result<()> {
        self.delete(&format!("/support-ticket-responses/api/{response_id}"))
            .await
    }

    // --- Admin ---

    /// GET /user/api/all - Every user.
    pub async fn get_all_users(&self) -> Result<Vec<UserProfile>> {
        let list: UserList = self.get("/user/api/all").await?;
        Ok(list.into_users())
    }

    /// DELETE /user/api/{user_id}
    pub async fn delete_user(&self, user_id: u64) -> Result<Value> {
        self.delete(&format!("/user/api/{user_id}")).await
    }

    /// PUT /user/api/promote/{user_id} - Grant admin.
    pub async fn promote_user(&self, user_id: u64) -> Result<Value> {
        self.put(&format!("/user/api/promote/{user_id}"), None::<&()>)
            .await
    }

    /// PUT /user/api/demote/{user_id} - Revoke admin.
    pub async fn demote_user(&self, user_id: u64) -> Result<Value> {
        self.put(&format!("/user/api/demote/{user_id}"), None::<&()>)
            .await
    }

    /// GET /wallets/api/all - Every wallet.
    pub async fn get_all_wallets(&self) -> Result<Vec<Wallet>> {
        self.get("/wallets/api/all").await
    }

    /// PUT /wallets/api/{wallet_id} - Set a wallet's status.
    pub async fn update_wallet_status(&self, wallet_id: u64, status: &str) -> Result<Value> {
        let body = WalletStatusUpdate {
            status: status.to_string(),
        };
        self.put(&format!("/wallets/api/{wallet_id}"), Some(&body))
            .await
    }

    /// GET /loan-applications/api/all - Every loan application.
    pub async fn get_all_loans(&self) -> Result<Vec<LoanApplication>> {
        self.get("/loan-applications/api/all").await
    }

    /// PUT /loans/api/{loan_id} - Approve or reject a loan.
    pub async fn update_loan_status(&self, loan_id: u64, status: LoanStatus) -> Result<Value> {
        self.put(
            &format!("/loans/api/{loan_id}"),
            Some(&LoanStatusUpdate { status }),
        )
        .await
    }

    /// DELETE /loans/api/{loan_id}
    pub async fn delete_loan(&self, loan_id: u64) -> Result<Value> {
        self.delete(&format!("/loans/api/{loan_id}")).await
    }
}
