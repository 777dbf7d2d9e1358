//! Share and fee arithmetic

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::constants::{DAYS_PER_YEAR, DISPLAY_DECIMAL_PRECISION, MIN_TRAILING_FEE};
use crate::errors::ValidationError;
use crate::holdings::holdings_model::ShareClass;

const HUNDRED: Decimal = dec!(100);

/// Shares bought for `amount` at `purchase_nav`.
///
/// Front-load classes deduct the purchase fee before dividing; trailing
/// classes invest the full amount. Shares keep full precision so that
/// `shares * nav` reconstructs the net amount.
pub fn compute_shares(
    amount: Decimal,
    purchase_nav: Decimal,
    share_class: ShareClass,
    front_load_rate_pct: Decimal,
) -> Result<Decimal, ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(
            "purchase amount must be positive".to_string(),
        ));
    }
    if purchase_nav <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(
            "purchase net value must be positive".to_string(),
        ));
    }

    let net_amount = match share_class {
        ShareClass::FrontLoad => amount - amount * front_load_rate_pct / HUNDRED,
        ShareClass::TrailingFee => amount,
    };

    Ok(net_amount / purchase_nav)
}

/// Front-load fee deducted at purchase
pub fn front_load_fee(amount: Decimal, share_class: ShareClass, rate_pct: Decimal) -> Decimal {
    match share_class {
        ShareClass::FrontLoad => (amount * rate_pct / HUNDRED).round_dp_with_strategy(
            DISPLAY_DECIMAL_PRECISION,
            RoundingStrategy::MidpointAwayFromZero,
        ),
        ShareClass::TrailingFee => Decimal::ZERO,
    }
}

/// One day of C-class trailing fee: `shares * nav * (rate% / 365)`.
///
/// A positive fee below 0.01 is floored up to the minimum 0.01 charge;
/// anything else is rounded to 2 decimals. Pure in its inputs, so accruing
/// twice with identical inputs yields the identical fee.
pub fn daily_trailing_fee(shares: Decimal, nav: Decimal, annual_rate_pct: Decimal) -> Decimal {
    let raw = shares * nav * (annual_rate_pct / HUNDRED) / DAYS_PER_YEAR;

    if raw <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if raw < MIN_TRAILING_FEE {
        return MIN_TRAILING_FEE;
    }
    raw.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_without_fee_reconstruct_amount() {
        let shares =
            compute_shares(dec!(1000), dec!(1.25), ShareClass::TrailingFee, Decimal::ZERO)
                .unwrap();
        assert_eq!(shares, dec!(800));
        assert_eq!(shares * dec!(1.25), dec!(1000));
    }

    #[test]
    fn test_front_load_deduction() {
        // 0.15% front load on 10000 at nav 2.0
        let shares =
            compute_shares(dec!(10000), dec!(2.0), ShareClass::FrontLoad, dec!(0.15)).unwrap();
        assert_eq!(shares, dec!(4992.5));
        assert_eq!(
            front_load_fee(dec!(10000), ShareClass::FrontLoad, dec!(0.15)),
            dec!(15.00)
        );
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(compute_shares(dec!(0), dec!(1), ShareClass::TrailingFee, dec!(0)).is_err());
        assert!(compute_shares(dec!(100), dec!(0), ShareClass::TrailingFee, dec!(0)).is_err());
        assert!(compute_shares(dec!(-5), dec!(1), ShareClass::FrontLoad, dec!(0)).is_err());
    }

    #[test]
    fn test_daily_fee_above_minimum_is_rounded() {
        // 1000 * 1.5 * 0.4% / 365 = 0.01643... -> 0.02, not floored
        let fee = daily_trailing_fee(dec!(1000), dec!(1.5), dec!(0.4));
        assert_eq!(fee, dec!(0.02));
    }

    #[test]
    fn test_tiny_positive_fee_floored_to_minimum() {
        // 10 * 1.0 * 0.1% / 365 = 0.0000027... -> floored to 0.01
        let fee = daily_trailing_fee(dec!(10), dec!(1.0), dec!(0.1));
        assert_eq!(fee, dec!(0.01));
    }

    #[test]
    fn test_floor_applies_only_below_minimum() {
        // Raw exactly at 0.01 keeps its value: 912.5 * 1.0 * 0.4% / 365 = 0.01
        let fee = daily_trailing_fee(dec!(912.5), dec!(1.0), dec!(0.4));
        assert_eq!(fee, dec!(0.01));

        // And just above it rounds normally
        let fee = daily_trailing_fee(dec!(1825), dec!(1.0), dec!(0.4));
        assert_eq!(fee, dec!(0.02));
    }

    #[test]
    fn test_zero_rate_yields_zero_fee() {
        assert_eq!(
            daily_trailing_fee(dec!(1000), dec!(1.5), Decimal::ZERO),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_fee_is_idempotent_per_inputs() {
        let a = daily_trailing_fee(dec!(1234.56), dec!(1.789), dec!(0.4));
        let b = daily_trailing_fee(dec!(1234.56), dec!(1.789), dec!(0.4));
        assert_eq!(a, b);
    }
}
