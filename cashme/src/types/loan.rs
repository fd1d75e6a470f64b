use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::LoanStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplicationRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    pub marital_status: String,
    pub employment_status: String,
    pub monthly_income: Decimal,
    pub employer_name: String,
    pub years_at_current_job: String,
    pub loan_purpose: String,
    pub requested_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub employment_status: Option<String>,
    #[serde(default)]
    pub monthly_income: Option<Decimal>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub years_at_current_job: Option<String>,
    #[serde(default)]
    pub loan_purpose: Option<String>,
    pub requested_amount: Decimal,
    pub status: LoanStatus,
    #[serde(default)]
    pub applied_at: Option<NaiveDateTime>,
}

/// Body of `PATCH /loan-applications/api/status`.
#[derive(Debug, Clone, Serialize)]
pub struct LoanApplicationStatusUpdate {
    pub id: u64,
    pub status: LoanStatus,
}

/// Body of the admin `PUT /loans/api/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct LoanStatusUpdate {
    pub status: LoanStatus,
}
