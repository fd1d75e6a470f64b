pub mod admin;
pub mod client;
pub mod config;
pub mod error;
pub mod rest;
pub mod session;
pub mod token_store;
pub mod transfer;
pub mod types;

// ---- Top-level re-exports for ergonomic usage ----

// Client + admin
pub use admin::CashMeAdmin;
pub use client::{CashMe, TicketDetails, WalletDetails};
pub use config::CashMeConfig;
pub use error::{CashMeError, ErrorKind, RequestError, Result};

// REST client
pub use rest::endpoints::IDEMPOTENCY_HEADER;
pub use rest::CashMeHttpClient;

// Session
pub use session::{RestoreOutcome, Session, SessionController, SessionState};

// Credential storage
pub use token_store::{Credential, FileTokenStore, MemoryTokenStore, TokenStore};

// Transfers
pub use transfer::{AttemptState, IdempotencyKey, TransferAttempt, TransferForm};

// Roles
pub use types::{Role, RoleSet};

// Payloads
pub use types::{
    AuthResponse, CreateWalletRequest, LoanApplication, LoanApplicationRequest, RegisterRequest,
    Ticket, TicketRequest, TicketResponse, Transaction, TransferRequest, UserList, UserProfile,
    Wallet,
};

// Enums
pub use types::{Currency, LoanStatus, TicketCategory, TicketStatus, TransactionStatus};
