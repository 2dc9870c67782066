use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places persisted for every money value (CHF minor units).
pub const MONEY_SCALE: u32 = 2;

/// Rounds a money value to two decimal places, half away from zero.
///
/// Only applied at the boundary of a persisted write; intermediate sums stay
/// unrounded.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a percentage to two decimal places, half away from zero.
pub fn round_percentage(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
