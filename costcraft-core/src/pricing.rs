//! Cost-range and pricing math.
//!
//! Uses the range-multiplier formula: the materials subtotal is scaled by
//! asymmetric uncertainty factors (0.85 low, 1.15 high), labor carries up to
//! 20% overrun and other costs up to 10%, and both bounds are rounded to the
//! nearest integer currency unit.

use costcraft_schemas::estimation::CostEstimate;
use costcraft_schemas::material::Material;
use std::ops::RangeInclusive;

const MATERIALS_LOW: f64 = 0.85;
const MATERIALS_HIGH: f64 = 1.15;
const LABOR_HIGH: f64 = 1.2;
const OTHER_HIGH: f64 = 1.1;

/// Allowed profit margin percentages.
pub const PROFIT_MARGIN_RANGE: RangeInclusive<u32> = 10..=100;

/// Treats non-finite or negative input as zero. Bad numeric input is never
/// fatal here; the workflow owns stricter sanitization.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Sum of `quantity * cost_per_unit` over the bill of materials.
pub fn materials_subtotal(materials: &[Material]) -> f64 {
    materials
        .iter()
        .map(|m| sanitize(m.quantity) * sanitize(m.cost_per_unit))
        .sum()
}

/// Computes the estimated cost range for a bill of materials plus labor and
/// other costs.
///
/// Monotone in every input, and `min <= max` always holds: each high-side
/// multiplier dominates its low-side counterpart and inputs are clamped to
/// be non-negative before use.
pub fn estimate(materials: &[Material], labor_cost: f64, other_costs: f64) -> CostEstimate {
    let materials_sum = materials_subtotal(materials);
    let labor = sanitize(labor_cost);
    let other = sanitize(other_costs);

    CostEstimate {
        min: (MATERIALS_LOW * materials_sum + labor + other).round(),
        max: (MATERIALS_HIGH * materials_sum + LABOR_HIGH * labor + OTHER_HIGH * other).round(),
    }
}

/// Suggested retail price: the average of the cost range marked up by the
/// profit margin percentage, rounded to the nearest currency unit.
///
/// Out-of-range margins are not rejected; callers clamp with
/// [`clamp_profit_margin`] where the [10, 100] band applies.
pub fn suggested_price(estimate: &CostEstimate, profit_margin: u32) -> f64 {
    (estimate.average() * (1.0 + f64::from(profit_margin) / 100.0)).round()
}

/// Clamps a margin percentage into [`PROFIT_MARGIN_RANGE`].
pub fn clamp_profit_margin(profit_margin: u32) -> u32 {
    profit_margin.clamp(*PROFIT_MARGIN_RANGE.start(), *PROFIT_MARGIN_RANGE.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(name: &str, quantity: f64, cost_per_unit: f64) -> Material {
        Material {
            name: name.to_string(),
            quantity,
            cost_per_unit,
        }
    }

    #[test]
    fn plastic_scenario_matches_formula() {
        // materials_sum = 2 * 5 = 10
        // min = round(0.85 * 10 + 10 + 0) = 19
        // max = round(1.15 * 10 + 1.2 * 10 + 0) = 24 (rounded from 23.5)
        let materials = vec![material("Plastic", 2.0, 5.0)];
        let est = estimate(&materials, 10.0, 0.0);
        assert_eq!(est.min, 19.0);
        assert_eq!(est.max, 24.0);
    }

    #[test]
    fn empty_inputs_estimate_to_zero() {
        let est = estimate(&[], 0.0, 0.0);
        assert_eq!(est.min, 0.0);
        assert_eq!(est.max, 0.0);
        assert_eq!(suggested_price(&est, 30), 0.0);
    }

    #[test]
    fn min_never_exceeds_max() {
        let cases = [
            (vec![], 0.0, 0.0),
            (vec![material("Plastic", 2.0, 5.0)], 10.0, 0.0),
            (vec![material("Metal", 1.0, 1200.0)], 0.0, 75.0),
            (
                vec![
                    material("Wood", 3.5, 600.0),
                    material("Glass", 0.25, 1800.0),
                ],
                2500.0,
                999.0,
            ),
        ];
        for (materials, labor, other) in cases {
            let est = estimate(&materials, labor, other);
            assert!(est.min <= est.max, "min {} > max {}", est.min, est.max);
        }
    }

    #[test]
    fn estimate_is_monotone_in_every_input() {
        let base_materials = vec![material("Plastic", 2.0, 5.0)];
        let base = estimate(&base_materials, 10.0, 5.0);

        let more_quantity = estimate(&[material("Plastic", 3.0, 5.0)], 10.0, 5.0);
        assert!(more_quantity.min >= base.min && more_quantity.max >= base.max);

        let higher_unit_cost = estimate(&[material("Plastic", 2.0, 8.0)], 10.0, 5.0);
        assert!(higher_unit_cost.min >= base.min && higher_unit_cost.max >= base.max);

        let more_labor = estimate(&base_materials, 20.0, 5.0);
        assert!(more_labor.min >= base.min && more_labor.max >= base.max);

        let more_other = estimate(&base_materials, 10.0, 15.0);
        assert!(more_other.min >= base.min && more_other.max >= base.max);
    }

    #[test]
    fn negative_and_non_finite_inputs_are_treated_as_zero() {
        let est = estimate(&[material("Plastic", -2.0, 5.0)], -10.0, f64::NAN);
        assert_eq!(est.min, 0.0);
        assert_eq!(est.max, 0.0);

        let est = estimate(&[material("Plastic", 2.0, f64::INFINITY)], 0.0, 0.0);
        assert_eq!(est.min, 0.0);
        assert_eq!(est.max, 0.0);
    }

    #[test]
    fn suggested_price_uses_average_cost() {
        let est = CostEstimate { min: 19.0, max: 24.0 };
        // avg = 21.5; 21.5 * 1.3 = 27.95 -> 28
        assert_eq!(suggested_price(&est, 30), 28.0);
    }

    #[test]
    fn suggested_price_is_monotone_in_margin() {
        let est = CostEstimate {
            min: 800.0,
            max: 1200.0,
        };
        let mut last = suggested_price(&est, 10);
        for margin in 11..=100 {
            let price = suggested_price(&est, margin);
            assert!(price >= last, "price dropped at margin {}", margin);
            last = price;
        }
    }

    #[test]
    fn profit_margin_clamps_to_band() {
        assert_eq!(clamp_profit_margin(5), 10);
        assert_eq!(clamp_profit_margin(10), 10);
        assert_eq!(clamp_profit_margin(42), 42);
        assert_eq!(clamp_profit_margin(100), 100);
        assert_eq!(clamp_profit_margin(250), 100);
    }
}
