//! Money transfer submission with at-most-once semantics.
//!
//! A [`TransferAttempt`] stands for one user intent to send money. It mints a
//! single idempotency key when created and sends that key with every
//! submission, so a resubmission after an ambiguous failure (timeout,
//! dropped connection) can be deduplicated by the server. A new intent gets a
//! new attempt and therefore a new key.
//!
//! ```text
//!   Idle --submit--> Submitting --ok--> Succeeded (terminal)
//!                        |
//!                        +--err--> Failed --submit--> Submitting (same key)
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{CashMeError, RequestError, Result};
use crate::rest::CashMeHttpClient;
use crate::types::{Currency, Transaction, TransferRequest};

/// Client-generated deduplication token: 128 random bits rendered as a
/// hyphenated UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(Uuid);

impl IdempotencyKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Raw transfer form input, before validation.
#[derive(Debug, Clone, Default)]
pub struct TransferForm {
    pub sender_wallet_id: String,
    pub receiver_user_name: String,
    /// Decimal string, e.g. `"12.50"`.
    pub amount: String,
    pub currency: String,
}

impl TransferForm {
    /// Check presence and shape of every field. Business rules (funds,
    /// ownership, wallet status) are left to the server.
    pub fn validate(&self) -> Result<TransferRequest> {
        let sender = required("sender wallet id", &self.sender_wallet_id)?;
        let sender_wallet_id = sender
            .parse::<u64>()
            .map_err(|_| invalid(format!("sender wallet id must be a number: {sender}")))?;

        let receiver_user_name = required("receiver username", &self.receiver_user_name)?.to_string();

        let amount = required("amount", &self.amount)?;
        let amount = Decimal::from_str(amount)
            .map_err(|_| invalid(format!("amount is not a decimal number: {amount}")))?;
        if amount <= Decimal::ZERO {
            return Err(invalid("amount must be positive"));
        }

        let currency = required("currency", &self.currency)?;
        let currency = Currency::from_str(currency).map_err(invalid)?;

        Ok(TransferRequest {
            sender_wallet_id,
            receiver_user_name,
            amount,
            currency,
        })
    }
}

fn required<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(invalid(format!("{name} is required")))
    } else {
        Ok(value)
    }
}

fn invalid(msg: impl Into<String>) -> CashMeError {
    CashMeError::Validation(msg.into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// One open transfer intent and its idempotency key.
#[derive(Debug)]
pub struct TransferAttempt {
    key: IdempotencyKey,
    state: AttemptState,
    last_error: Option<RequestError>,
    result: Option<Transaction>,
}

impl Default for TransferAttempt {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferAttempt {
    /// Open a new attempt with a freshly generated key.
    pub fn new() -> Self {
        Self {
            key: IdempotencyKey::generate(),
            state: AttemptState::Idle,
            last_error: None,
            result: None,
        }
    }

    pub fn key(&self) -> IdempotencyKey {
        self.key
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    /// Error of the most recent failed submission, if it reached the gateway.
    pub fn last_error(&self) -> Option<&RequestError> {
        self.last_error.as_ref()
    }

    /// The server's result once the attempt has succeeded.
    pub fn result(&self) -> Option<&Transaction> {
        self.result.as_ref()
    }

    /// Validate `form` and submit it under this attempt's key.
    ///
    /// A completed attempt refuses before looking at the form. Invalid input
    /// is rejected without contacting the server and leaves the state
    /// unchanged. After a failure the same key is reused by the next call.
    /// A dropped submission leaves the attempt in `Submitting`; submitting
    /// again is allowed and reuses the key as well.
    ///
    /// Any 2xx completes the attempt. The server may answer with an empty
    /// body, in which case no transaction record is returned.
    pub async fn submit(
        &mut self,
        http: &CashMeHttpClient,
        form: &TransferForm,
    ) -> Result<Option<Transaction>> {
        if self.state == AttemptState::Succeeded {
            return Err(CashMeError::AttemptCompleted);
        }
        let request = form.validate()?;
        self.submit_request(http, &request).await
    }

    /// Submit an already-validated request under this attempt's key.
    pub async fn submit_request(
        &mut self,
        http: &CashMeHttpClient,
        request: &TransferRequest,
    ) -> Result<Option<Transaction>> {
        if self.state == AttemptState::Succeeded {
            return Err(CashMeError::AttemptCompleted);
        }

        let key = self.key.to_string();
        let retry = self.state != AttemptState::Idle;
        self.state = AttemptState::Submitting;

        match http.transfer(request, &key).await {
            Ok(tx) => {
                info!(
                    key = %key,
                    retry,
                    sender_wallet_id = request.sender_wallet_id,
                    amount = %request.amount,
                    currency = %request.currency,
                    recorded = tx.is_some(),
                    "transfer succeeded"
                );
                self.state = AttemptState::Succeeded;
                self.last_error = None;
                self.result = tx.clone();
                Ok(tx)
            }
            Err(e) => {
                warn!(key = %key, retry, error = %e, "transfer failed");
                self.state = AttemptState::Failed;
                self.last_error = e.request().cloned();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rust_decimal_macros::dec;

    use super::*;

    fn form(sender: &str, receiver: &str, amount: &str, currency: &str) -> TransferForm {
        TransferForm {
            sender_wallet_id: sender.into(),
            receiver_user_name: receiver.into(),
            amount: amount.into(),
            currency: currency.into(),
        }
    }

    #[test]
    fn test_validate_ok() {
        let req = form(" 7 ", "bob", "12.50", "usd").validate().unwrap();
        assert_eq!(req.sender_wallet_id, 7);
        assert_eq!(req.receiver_user_name, "bob");
        assert_eq!(req.amount, dec!(12.50));
        assert_eq!(req.currency, Currency::USD);
    }

    #[test]
    fn test_validate_missing_fields() {
        for f in [
            form("", "bob", "1", "USD"),
            form("1", "  ", "1", "USD"),
            form("1", "bob", "", "USD"),
            form("1", "bob", "1", ""),
        ] {
            assert!(matches!(f.validate(), Err(CashMeError::Validation(_))));
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        assert!(form("1", "bob", "0", "USD").validate().is_err());
        assert!(form("1", "bob", "-5.00", "USD").validate().is_err());
        assert!(form("1", "bob", "abc", "USD").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_wallet_and_currency() {
        assert!(form("wallet-1", "bob", "1", "USD").validate().is_err());
        assert!(form("1", "bob", "1", "DOGE").validate().is_err());
    }

    #[test]
    fn test_amount_keeps_precision() {
        let req = form("1", "bob", "0.10000000000000000001", "EUR")
            .validate()
            .unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["amount"], "0.10000000000000000001");
        assert_eq!(json["senderWalletId"], 1);
        assert_eq!(json["receiverUserName"], "bob");
        assert_eq!(json["currency"], "EUR");
    }

    #[test]
    fn test_new_attempt_is_idle() {
        let attempt = TransferAttempt::new();
        assert_eq!(attempt.state(), AttemptState::Idle);
        assert!(attempt.last_error().is_none());
        assert!(attempt.result().is_none());
    }

    #[test]
    fn test_key_format() {
        let key = IdempotencyKey::generate().to_string();
        assert_eq!(key.len(), 36);
        assert_eq!(key.matches('-').count(), 4);
        assert_eq!(Uuid::parse_str(&key).unwrap().get_version_num(), 4);
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<_> = (0..10_000)
            .map(|_| TransferAttempt::new().key())
            .collect();
        assert_eq!(keys.len(), 10_000);
    }
}
