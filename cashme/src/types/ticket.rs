use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::{TicketCategory, TicketStatus};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRequest {
    pub subject: String,
    pub description: String,
    pub ticket_category: TicketCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub subject: String,
    pub description: String,
    pub ticket_status: TicketStatus,
    pub ticket_category: TicketCategory,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponseRequest {
    pub ticket_id: u64,
    pub response_message: String,
}

/// A reply posted on a support ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub id: u64,
    pub ticket_id: u64,
    #[serde(default)]
    pub sender_id: Option<u64>,
    #[serde(default)]
    pub sender_user_name: Option<String>,
    pub response_message: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}
