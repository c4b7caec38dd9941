// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! History view filters. All of them keep the input order.

use crate::models::{Currency, Transaction};

/// Keeps transactions whose description, category or unsigned amount contains
/// `term`, case-insensitively. A blank term keeps everything.
pub fn search_transactions<'a>(list: &[&'a Transaction], term: &str) -> Vec<&'a Transaction> {
    if term.trim().is_empty() {
        return list.to_vec();
    }
    let needle = term.to_lowercase();
    list.iter()
        .copied()
        .filter(|t| matches(t, &needle))
        .collect()
}

fn matches(t: &Transaction, needle: &str) -> bool {
    t.description.to_lowercase().contains(needle)
        || t.category.to_lowercase().contains(needle)
        || amount_text(t).contains(needle)
}

/// `12.50` is searchable as `12.5`, `-50.00` as `50`.
fn amount_text(t: &Transaction) -> String {
    t.amount.abs().normalize().to_string()
}

/// An empty selection means no payment method filter.
pub fn filter_payment_methods<'a>(
    list: &[&'a Transaction],
    selected: &[String],
) -> Vec<&'a Transaction> {
    if selected.is_empty() {
        return list.to_vec();
    }
    list.iter()
        .copied()
        .filter(|t| selected.iter().any(|m| *m == t.payment_method))
        .collect()
}

/// Displaying in the base currency shows every record; any other display
/// currency restricts the list to records in that currency.
pub fn filter_currency<'a>(list: &[&'a Transaction], display: Currency) -> Vec<&'a Transaction> {
    if display.is_base() {
        return list.to_vec();
    }
    list.iter()
        .copied()
        .filter(|t| t.currency == display)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tx;
    use rust_decimal::Decimal;

    fn fixture() -> Vec<Transaction> {
        let mut a = tx(1, Decimal::new(-1250, 2), "Lunch at Tasca", "Meals Out");
        a.payment_method = "Debit Card".into();
        let mut b = tx(2, Decimal::new(2000, 0), "March salary", "Income");
        b.currency = Currency::Usd;
        let c = tx(3, Decimal::new(-5000, 2), "Electricity bill", "Utilities");
        vec![a, b, c]
    }

    #[test]
    fn blank_term_is_identity() {
        let data = fixture();
        let refs: Vec<&Transaction> = data.iter().collect();
        assert_eq!(search_transactions(&refs, ""), refs);
        assert_eq!(search_transactions(&refs, "   "), refs);
    }

    #[test]
    fn matches_description_category_and_amount() {
        let data = fixture();
        let refs: Vec<&Transaction> = data.iter().collect();
        let ids = |v: Vec<&Transaction>| v.iter().map(|t| t.id).collect::<Vec<_>>();
        assert_eq!(ids(search_transactions(&refs, "LUNCH")), vec![1]);
        assert_eq!(ids(search_transactions(&refs, "util")), vec![3]);
        assert_eq!(ids(search_transactions(&refs, "12.5")), vec![1]);
        assert_eq!(ids(search_transactions(&refs, "50")), vec![3]);
        assert_eq!(ids(search_transactions(&refs, "-50")), Vec::<i64>::new());
        assert_eq!(ids(search_transactions(&refs, "l")), vec![1, 2, 3]);
    }

    #[test]
    fn search_is_idempotent() {
        let data = fixture();
        let refs: Vec<&Transaction> = data.iter().collect();
        let once = search_transactions(&refs, "ar");
        let twice = search_transactions(&once, "ar");
        assert_eq!(once, twice);
    }

    #[test]
    fn payment_method_and_currency_filters() {
        let data = fixture();
        let refs: Vec<&Transaction> = data.iter().collect();
        assert_eq!(filter_payment_methods(&refs, &[]).len(), 3);
        let card = filter_payment_methods(&refs, &["Debit Card".to_string()]);
        assert_eq!(card.len(), 1);
        assert_eq!(card[0].id, 1);

        assert_eq!(filter_currency(&refs, Currency::Eur).len(), 3);
        let usd = filter_currency(&refs, Currency::Usd);
        assert_eq!(usd.len(), 1);
        assert_eq!(usd[0].id, 2);
        assert!(filter_currency(&refs, Currency::Gbp).is_empty());
    }
}
