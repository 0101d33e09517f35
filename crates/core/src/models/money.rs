use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary amount to 2 decimal places, half-up.
///
/// The tax pipeline rounds every intermediate figure (gross in USD,
/// withholding, dividend in PLN, tax due) immediately after computing it,
/// and aggregates sum those already-rounded figures. Rounding only once at
/// the end would produce different totals, so callers must round stepwise.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::round2;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_up() {
        assert_eq!(round2(dec!(0.075)), dec!(0.08));
        assert_eq!(round2(dec!(0.074)), dec!(0.07));
        assert_eq!(round2(dec!(2.005)), dec!(2.01));
    }

    #[test]
    fn exact_values_unchanged() {
        assert_eq!(round2(dec!(0.5)), dec!(0.5));
        assert_eq!(round2(dec!(1832)), dec!(1832));
    }

    #[test]
    fn negative_values_round_away_from_zero() {
        assert_eq!(round2(dec!(-0.075)), dec!(-0.08));
    }
}
