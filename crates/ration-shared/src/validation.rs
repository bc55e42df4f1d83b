//! Form rules enforced by the command layer before it calls into a store.
//! The stores themselves accept any input.

use crate::constants::{MAX_QUANTITY, MIN_PASSWORD_LEN, UNIT_OPTIONS};
use crate::error::ValidationError;

/// Reject empty or whitespace-only required fields.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Registration password rules: minimum length, then confirmation match.
pub fn check_new_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

pub fn check_unit(unit: &str) -> Result<(), ValidationError> {
    if UNIT_OPTIONS.contains(&unit) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedUnit(unit.to_string()))
    }
}

pub fn check_price(mrp: f64) -> Result<(), ValidationError> {
    if mrp.is_finite() && mrp >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidPrice)
    }
}

pub fn check_min_quantity(quantity: i64, min: i64) -> Result<(), ValidationError> {
    if quantity < min {
        return Err(ValidationError::QuantityTooSmall { min });
    }
    Ok(())
}

/// Upper bound shared by every quantity field.
pub fn check_max_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity > MAX_QUANTITY {
        return Err(ValidationError::QuantityTooLarge { max: MAX_QUANTITY });
    }
    Ok(())
}

pub fn check_within_stock(requested: i64, available: i64) -> Result<(), ValidationError> {
    if requested > available {
        return Err(ValidationError::QuantityExceedsStock {
            requested,
            available,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_blank() {
        assert!(require("name", "Rice").is_ok());
        assert_eq!(
            require("name", "   "),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn test_password_rules() {
        assert!(check_new_password("secret1", "secret1").is_ok());
        assert_eq!(
            check_new_password("secret1", "secret2"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            check_new_password("abc", "abc"),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn test_units_and_prices() {
        assert!(check_unit("liter").is_ok());
        assert!(check_unit("gallon").is_err());
        assert!(check_price(0.0).is_ok());
        assert!(check_price(-1.0).is_err());
        assert!(check_price(f64::NAN).is_err());
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(check_min_quantity(1, 1).is_ok());
        assert!(check_min_quantity(0, 1).is_err());
        assert!(check_max_quantity(MAX_QUANTITY).is_ok());
        assert_eq!(
            check_max_quantity(MAX_QUANTITY + 1),
            Err(ValidationError::QuantityTooLarge { max: MAX_QUANTITY })
        );
        assert!(check_within_stock(10, 10).is_ok());
        assert_eq!(
            check_within_stock(11, 10),
            Err(ValidationError::QuantityExceedsStock {
                requested: 11,
                available: 10
            })
        );
    }
}
