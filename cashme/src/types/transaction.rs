use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{Currency, TransactionStatus};

/// Body of `PUT /wallets/api/transfer`.
///
/// `amount` is serialized as a decimal string so no precision is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub sender_wallet_id: u64,
    pub receiver_user_name: String,
    pub amount: Decimal,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub sender_wallet_id: Option<u64>,
    #[serde(default)]
    pub sender_user_name: Option<String>,
    #[serde(default)]
    pub receiver_user_name: Option<String>,
    pub currency: Currency,
    pub amount: Decimal,
    pub status: TransactionStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}
