use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Wallet currency.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    AUD,
    CAD,
    CHF,
    CNY,
    SEK,
    NZD,
    EGP,
}

impl Currency {
    pub const ALL: [Currency; 11] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::AUD,
        Currency::CAD,
        Currency::CHF,
        Currency::CNY,
        Currency::SEK,
        Currency::NZD,
        Currency::EGP,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::CHF => "CHF",
            Currency::CNY => "CNY",
            Currency::SEK => "SEK",
            Currency::NZD => "NZD",
            Currency::EGP => "EGP",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Currency::USD => "US Dollar",
            Currency::EUR => "Euro",
            Currency::GBP => "British Pound",
            Currency::JPY => "Japanese Yen",
            Currency::AUD => "Australian Dollar",
            Currency::CAD => "Canadian Dollar",
            Currency::CHF => "Swiss Franc",
            Currency::CNY => "Chinese Yuan",
            Currency::SEK => "Swedish Krona",
            Currency::NZD => "New Zealand Dollar",
            Currency::EGP => "Egyptian Pound",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown currency: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoanStatus::Pending => "PENDING",
            LoanStatus::Approved => "APPROVED",
            LoanStatus::Rejected => "REJECTED",
            LoanStatus::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

impl FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(LoanStatus::Pending),
            "APPROVED" => Ok(LoanStatus::Approved),
            "REJECTED" => Ok(LoanStatus::Rejected),
            _ => Err(format!("unknown loan status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "OPEN",
            TicketStatus::InProgress => "IN_PROGRESS",
            TicketStatus::Resolved => "RESOLVED",
            TicketStatus::Closed => "CLOSED",
        }
    }

    /// Name for display, e.g. `In Progress`.
    pub fn display_name(self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
        }
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace(['-', ' '], "_").as_str() {
            "OPEN" => Ok(TicketStatus::Open),
            "IN_PROGRESS" => Ok(TicketStatus::InProgress),
            "RESOLVED" => Ok(TicketStatus::Resolved),
            "CLOSED" => Ok(TicketStatus::Closed),
            _ => Err(format!("unknown ticket status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketCategory {
    AccountIssue,
    TransactionProblem,
    TechnicalSupport,
    BillingInquiry,
    SecurityConcern,
    GeneralQuestion,
    FeatureRequest,
    Other,
}

impl TicketCategory {
    pub const ALL: [TicketCategory; 8] = [
        TicketCategory::AccountIssue,
        TicketCategory::TransactionProblem,
        TicketCategory::TechnicalSupport,
        TicketCategory::BillingInquiry,
        TicketCategory::SecurityConcern,
        TicketCategory::GeneralQuestion,
        TicketCategory::FeatureRequest,
        TicketCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketCategory::AccountIssue => "ACCOUNT_ISSUE",
            TicketCategory::TransactionProblem => "TRANSACTION_PROBLEM",
            TicketCategory::TechnicalSupport => "TECHNICAL_SUPPORT",
            TicketCategory::BillingInquiry => "BILLING_INQUIRY",
            TicketCategory::SecurityConcern => "SECURITY_CONCERN",
            TicketCategory::GeneralQuestion => "GENERAL_QUESTION",
            TicketCategory::FeatureRequest => "FEATURE_REQUEST",
            TicketCategory::Other => "OTHER",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TicketCategory::AccountIssue => "Account Issue",
            TicketCategory::TransactionProblem => "Transaction Problem",
            TicketCategory::TechnicalSupport => "Technical Support",
            TicketCategory::BillingInquiry => "Billing Inquiry",
            TicketCategory::SecurityConcern => "Security Concern",
            TicketCategory::GeneralQuestion => "General Question",
            TicketCategory::FeatureRequest => "Feature Request",
            TicketCategory::Other => "Other",
        }
    }
}

impl FromStr for TicketCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_uppercase().replace(['-', ' '], "_");
        TicketCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("unknown ticket category: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_parse_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!(" EGP ".parse::<Currency>().unwrap(), Currency::EGP);
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn test_ticket_display_names() {
        assert_eq!(TicketStatus::InProgress.display_name(), "In Progress");
        assert_eq!(
            TicketCategory::TransactionProblem.display_name(),
            "Transaction Problem"
        );
    }

    #[test]
    fn test_ticket_parse() {
        assert_eq!(
            "in progress".parse::<TicketStatus>().unwrap(),
            TicketStatus::InProgress
        );
        assert_eq!(
            "security-concern".parse::<TicketCategory>().unwrap(),
            TicketCategory::SecurityConcern
        );
    }

    #[test]
    fn test_unknown_statuses_deserialize() {
        let s: TransactionStatus = serde_json::from_str(r#""REVERSED""#).unwrap();
        assert_eq!(s, TransactionStatus::Unknown);
        let s: LoanStatus = serde_json::from_str(r#""APPROVED""#).unwrap();
        assert_eq!(s, LoanStatus::Approved);
    }
}
