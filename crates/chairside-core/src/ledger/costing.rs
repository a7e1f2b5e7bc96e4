//! Cost and discount resolvers for billing lines.
//!
//! Pure arithmetic over assumed-valid numbers: NaN or malformed input
//! propagates to the output instead of being masked (garbage in, garbage
//! out), so bad upstream data stays visibly wrong.

use crate::models::{AssignedTreatment, DiscountKind};

/// Count the non-empty comma-separated tokens in a tooth list.
///
/// `"7,8,9"` → 3; `"7, 8 ,"` → 2; `""` → 0.
pub fn tooth_count(tooth: &str) -> u32 {
    tooth.split(',').filter(|t| !t.trim().is_empty()).count() as u32
}

/// Effective cost of a single line.
///
/// `cost × tooth count` when the multiplier flag is set and the tooth list
/// has at least one token; plain `cost` otherwise. A zero tooth count means
/// no multiplication, not a zeroed line.
pub fn effective_line_cost(cost: f64, multiply_cost: bool, tooth: Option<&str>) -> f64 {
    if multiply_cost {
        let count = tooth.map(tooth_count).unwrap_or(0);
        if count > 0 {
            return cost * count as f64;
        }
    }
    cost
}

/// Resolve a per-line discount against the line's effective cost.
///
/// `Amount` is flat and deliberately unclamped: it may exceed the line cost.
/// `Percentage` applies to the effective (multiplied) line cost.
pub fn line_discount(
    kind: Option<DiscountKind>,
    value: Option<f64>,
    effective_cost: f64,
) -> f64 {
    match (kind, value) {
        (Some(DiscountKind::Amount), Some(v)) => v,
        (Some(DiscountKind::Percentage), Some(v)) => effective_cost * v / 100.0,
        _ => 0.0,
    }
}

/// Resolve an overall (patient-level) discount.
///
/// `Percentage` applies to the raw per-line cost sum, not the multiplied
/// line costs. This asymmetry with [`line_discount`] matches the recorded
/// product behavior and must not be unified here.
pub fn overall_discount(kind: DiscountKind, value: f64, raw_cost_total: f64) -> f64 {
    match kind {
        DiscountKind::Amount => value,
        DiscountKind::Percentage => raw_cost_total * value / 100.0,
    }
}

/// Sum of raw per-line costs, before multipliers and discounts.
pub fn raw_cost_total(treatments: &[AssignedTreatment]) -> f64 {
    treatments.iter().map(|t| t.cost).sum()
}

/// Sum of effective line costs.
pub fn treatments_cost(treatments: &[AssignedTreatment]) -> f64 {
    treatments.iter().map(|t| t.effective_cost()).sum()
}
