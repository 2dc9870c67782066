use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Maximum length of the free-text settlement note.
pub const SETTLEMENT_NOTE_MAX_LEN: usize = 500;

/// Input of a "settle up" action: `payer_user_id` pays `amount` to
/// `receiver_user_id`, moving money from `payer_account_id` into
/// `receiver_account_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_distinct_parties"))]
pub struct SettlementRequest {
    pub household_id: Uuid,
    pub payer_user_id: Uuid,
    pub receiver_user_id: Uuid,
    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: Decimal,
    pub payer_account_id: Uuid,
    pub receiver_account_id: Uuid,
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

impl SettlementRequest {
    pub fn new(
        household_id: Uuid,
        payer_user_id: Uuid,
        receiver_user_id: Uuid,
        amount: Decimal,
        payer_account_id: Uuid,
        receiver_account_id: Uuid,
    ) -> Self {
        Self {
            household_id,
            payer_user_id,
            receiver_user_id,
            amount,
            payer_account_id,
            receiver_account_id,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        return Err(ValidationError::new("amount_must_be_positive"));
    }
    if amount.scale() > 2 && amount.round_dp(2) != *amount {
        return Err(ValidationError::new("amount_has_sub_cent_precision"));
    }
    Ok(())
}

fn validate_distinct_parties(request: &SettlementRequest) -> Result<(), ValidationError> {
    if request.payer_user_id == request.receiver_user_id {
        return Err(ValidationError::new("payer_equals_receiver"));
    }
    if request.payer_account_id == request.receiver_account_id {
        return Err(ValidationError::new("payer_account_equals_receiver_account"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(amount: Decimal) -> SettlementRequest {
        SettlementRequest::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            amount,
            Uuid::new_v4(),
            Uuid::new_v4(),
        )
    }

    #[test]
    fn test_valid_request() {
        assert!(request(dec!(60.00)).validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        assert!(request(dec!(0)).validate().is_err());
        assert!(request(dec!(-5)).validate().is_err());
        assert!(request(dec!(1.005)).validate().is_err());
    }

    #[test]
    fn test_rejects_self_settlement() {
        let mut req = request(dec!(10));
        req.receiver_user_id = req.payer_user_id;
        assert!(req.validate().is_err());

        let mut req = request(dec!(10));
        req.receiver_account_id = req.payer_account_id;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rejects_long_note() {
        let req = request(dec!(10)).with_note("x".repeat(SETTLEMENT_NOTE_MAX_LEN + 1));
        assert!(req.validate().is_err());
    }
}
