// src/models/amount.rs

use rust_decimal::Decimal;
use validator::ValidationError;

/// Fractional digits kept by a NUMERIC(20, 9) column
pub const AMOUNT_SCALE: u32 = 9;

/// Digits left of the decimal point in a NUMERIC(20, 9) column
pub const AMOUNT_INTEGER_DIGITS: u32 = 11;

/// Reject amounts PostgreSQL would round or refuse to store.
/// Trailing zeros do not count towards the scale.
pub fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.normalize().scale() > AMOUNT_SCALE {
        let mut err = ValidationError::new("amount_scale");
        err.message = Some("amount has more than 9 decimal places".into());
        return Err(err);
    }

    let limit = Decimal::from(10i64.pow(AMOUNT_INTEGER_DIGITS));
    if amount.abs() >= limit {
        let mut err = ValidationError::new("amount_range");
        err.message = Some("amount has more than 11 integer digits".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_accepts_column_precision() {
        assert!(validate_amount(&Decimal::from_str("99999999999.999999999").unwrap()).is_ok());
        assert!(validate_amount(&Decimal::from_str("-12.5").unwrap()).is_ok());
        assert!(validate_amount(&Decimal::from_str("1.5000000000").unwrap()).is_ok());
    }

    #[test]
    fn test_rejects_tenth_decimal_place() {
        let err = validate_amount(&Decimal::from_str("0.0000000001").unwrap()).unwrap_err();
        assert_eq!(err.code, "amount_scale");
    }

    #[test]
    fn test_rejects_twelve_integer_digits() {
        let err = validate_amount(&Decimal::from_str("100000000000").unwrap()).unwrap_err();
        assert_eq!(err.code, "amount_range");

        let err = validate_amount(&Decimal::from_str("-100000000000.5").unwrap()).unwrap_err();
        assert_eq!(err.code, "amount_range");
    }
}
