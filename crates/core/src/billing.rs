//! Mentorship billing arithmetic.
//!
//! Payments credit hours, completed sessions debit hours, and the balance is
//! the plain difference. Nothing here clamps, rounds below the cent or
//! converts currencies.

use rust_decimal::Decimal;
use serde::Serialize;

/// Minutes in one billable hour. Sessions are booked in whole hours.
pub const MINUTES_PER_HOUR: i32 = 60;

/// Smallest accepted money amount (0.01).
pub fn min_amount() -> Decimal {
    Decimal::new(1, 2)
}

/// Largest value a `NUMERIC(10,2)` column holds (99,999,999.99).
pub fn max_numeric() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Validate a money amount (payment amount or hourly rate): at least 0.01
/// and no more than [`max_numeric`].
pub fn validate_amount(field: &str, amount: Decimal) -> Result<(), String> {
    if amount < min_amount() {
        return Err(format!("{field} must be at least 0.01"));
    }
    if amount > max_numeric() {
        return Err(format!("{field} must be at most {}", max_numeric()));
    }
    Ok(())
}

/// Validate payment hours, supplied or derived.
pub fn validate_hours(hours: Decimal) -> Result<(), String> {
    if hours < Decimal::ZERO {
        return Err("hours must not be negative".to_string());
    }
    if hours > max_numeric() {
        return Err(format!("hours must be at most {}", max_numeric()));
    }
    Ok(())
}

/// Validate a mentorship session duration: a positive multiple of 60.
pub fn validate_session_duration(duration_minutes: i32) -> Result<(), String> {
    if duration_minutes < 1 {
        return Err("duration_minutes must be at least 1".to_string());
    }
    if duration_minutes % MINUTES_PER_HOUR != 0 {
        return Err(format!(
            "duration_minutes must be a multiple of {MINUTES_PER_HOUR} (got {duration_minutes})"
        ));
    }
    Ok(())
}

/// Hours consumed by a completed session.
pub fn debit_hours(duration_minutes: i32) -> Decimal {
    Decimal::from(duration_minutes / MINUTES_PER_HOUR)
}

/// Hours credited by a payment when the caller does not state them:
/// `amount / hourly_rate`, rounded to two decimal places. The result is
/// held to the same bounds as supplied hours.
pub fn hours_for_payment(amount: Decimal, hourly_rate: Decimal) -> Result<Decimal, String> {
    if hourly_rate <= Decimal::ZERO {
        return Err("hourly_rate must be positive to derive payment hours".to_string());
    }
    let hours = amount
        .checked_div(hourly_rate)
        .ok_or_else(|| "derived hours are out of range".to_string())?
        .round_dp(2);
    validate_hours(hours)?;
    Ok(hours)
}

/// Hour balance of a mentorship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourBalance {
    pub credited_hours: Decimal,
    pub debited_hours: Decimal,
    /// `credited_hours - debited_hours`; negative when sessions outran payments.
    pub balance_hours: Decimal,
}

impl HourBalance {
    pub fn new(credited_hours: Decimal, debited_hours: Decimal) -> Self {
        Self {
            credited_hours,
            debited_hours,
            balance_hours: credited_hours - debited_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amount_is_rejected() {
        assert!(validate_amount("amount", Decimal::ZERO).is_err());
    }

    #[test]
    fn one_cent_is_accepted() {
        assert!(validate_amount("amount", Decimal::new(1, 2)).is_ok());
        assert!(validate_amount("amount", Decimal::new(9, 3)).is_err());
    }

    #[test]
    fn amounts_beyond_numeric_column_are_rejected() {
        assert!(validate_amount("amount", max_numeric()).is_ok());
        let err = validate_amount("amount", Decimal::new(100_000_000_000, 2)).unwrap_err();
        assert!(err.contains("at most 99999999.99"));
        assert!(validate_amount("hourly_rate", Decimal::from(1_000_000_000)).is_err());
    }

    #[test]
    fn oversized_hours_are_rejected() {
        assert!(validate_hours(max_numeric()).is_ok());
        assert!(validate_hours(Decimal::from(100_000_000)).is_err());
    }

    #[test]
    fn derived_hours_must_fit_the_column() {
        let err = hours_for_payment(Decimal::from(10_000_000), Decimal::new(1, 2)).unwrap_err();
        assert!(err.contains("hours must be at most"));
    }

    #[test]
    fn ninety_minutes_is_rejected() {
        let err = validate_session_duration(90).unwrap_err();
        assert!(err.contains("multiple of 60"));
    }

    #[test]
    fn whole_hours_are_accepted() {
        for minutes in [60, 120, 180] {
            assert!(validate_session_duration(minutes).is_ok());
        }
        assert!(validate_session_duration(0).is_err());
        assert!(validate_session_duration(-60).is_err());
    }

    #[test]
    fn debit_hours_from_duration() {
        assert_eq!(debit_hours(60), Decimal::from(1));
        assert_eq!(debit_hours(180), Decimal::from(3));
    }

    #[test]
    fn payment_hours_derive_from_rate() {
        let hours = hours_for_payment(Decimal::new(10000, 2), Decimal::new(2500, 2)).unwrap();
        assert_eq!(hours, Decimal::from(4));

        let hours = hours_for_payment(Decimal::from(100), Decimal::from(30)).unwrap();
        assert_eq!(hours, Decimal::new(333, 2));
    }

    #[test]
    fn payment_hours_need_positive_rate() {
        assert!(hours_for_payment(Decimal::from(100), Decimal::ZERO).is_err());
    }

    #[test]
    fn negative_hours_are_rejected() {
        assert!(validate_hours(Decimal::from(-1)).is_err());
        assert!(validate_hours(Decimal::ZERO).is_ok());
    }

    #[test]
    fn balance_is_not_clamped() {
        let balance = HourBalance::new(Decimal::from(2), Decimal::from(5));
        assert_eq!(balance.balance_hours, Decimal::from(-3));
    }
}
