// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Base currency normalization.
//!
//! Each transaction carries the rate it was recorded at. The base amount is
//! fixed when the record is built and is never recomputed from later rates,
//! so historical reports stay stable.

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::Currency;

/// `amount` expressed in the base currency at `rate`.
pub fn base_amount(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate
}

pub fn validate_rate(currency: Currency, rate: Decimal) -> Result<()> {
    if rate <= Decimal::ZERO {
        return Err(Error::InvalidRate(rate));
    }
    if currency.is_base() && rate != Decimal::ONE {
        return Err(Error::InvalidRate(rate));
    }
    Ok(())
}

/// Formats a base amount for report output, e.g. `€1234.50`.
pub fn fmt_base(d: Decimal) -> String {
    format!("{}{:.2}", Currency::BASE.symbol(), d.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_with_rate() {
        // 100 USD at 0.92 EUR per USD
        let res = base_amount(Decimal::new(-100, 0), Decimal::new(92, 2));
        assert_eq!(res, Decimal::new(-92, 0));
    }

    #[test]
    fn rejects_non_positive_rates() {
        assert!(validate_rate(Currency::Usd, Decimal::ZERO).is_err());
        assert!(validate_rate(Currency::Gbp, Decimal::new(-1, 0)).is_err());
        assert!(validate_rate(Currency::Gbp, Decimal::new(117, 2)).is_ok());
    }

    #[test]
    fn base_currency_requires_unit_rate() {
        assert!(validate_rate(Currency::Eur, Decimal::ONE).is_ok());
        assert!(validate_rate(Currency::Eur, Decimal::new(11, 1)).is_err());
    }

    #[test]
    fn formats_two_places() {
        assert_eq!(fmt_base(Decimal::new(12345, 1)), "€1234.50");
    }
}
