//! Scoring module - per-unit points plus a one-time chain bonus
//!
//! All six games share one formula:
//! - `base = units * per_unit`
//! - `chain_bonus = (waves - 1) * per_extra_wave`, only when `waves > 1`
//!
//! The bonus is added once per move and never compounds per wave.

use crate::types::Cascade;

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points for the units resolved.
    pub base: u32,
    /// Multi-wave bonus on top of `base`.
    pub chain_bonus: u32,
    pub total: u32,
}

impl ScoreResult {
    /// Add a one-off award (such as a clear bonus) to the total.
    pub fn with_bonus(mut self, bonus: u32) -> Self {
        self.total = self.total.saturating_add(bonus);
        self
    }
}

/// Calculate the chain bonus for a cascade.
pub fn calculate_chain_bonus(waves: u32, per_extra_wave: u32) -> u32 {
    if waves <= 1 {
        return 0;
    }
    (waves - 1).saturating_mul(per_extra_wave)
}

/// Calculate complete score for one resolved move.
pub fn calculate_score(cascade: &Cascade, per_unit: u32, per_extra_wave: u32) -> ScoreResult {
    let base = cascade.units.saturating_mul(per_unit);
    let chain_bonus = calculate_chain_bonus(cascade.waves, per_extra_wave);
    ScoreResult {
        base,
        chain_bonus,
        total: base.saturating_add(chain_bonus),
    }
}
