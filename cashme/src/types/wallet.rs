use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::Currency;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub currency: Currency,
    pub balance: Decimal,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    pub currency: Currency,
    pub initial_balance: Decimal,
    pub active: bool,
}

impl Default for CreateWalletRequest {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            initial_balance: Decimal::ZERO,
            active: true,
        }
    }
}

/// Body of the admin wallet status update.
#[derive(Debug, Clone, Serialize)]
pub struct WalletStatusUpdate {
    pub status: String,
}
