//! Derived-value math for the weight-and-balance report views.
//!
//! Index values entered against a line item are advisory: the backend
//! stores whatever the client sends. These helpers exist so that entry
//! forms and the report detail view agree on one formula and one
//! rounding rule.

use crate::{CrewDetail, GalleyDetail};

/// Reference moment-arm distance (meters) for the modeled aircraft
/// type. Generalizing to another type means supplying a different
/// reference arm via [`compute_index_from`].
pub const REFERENCE_ARM_M: f64 = 18.85;

/// Balance index contributed by `weight` kilograms at `arm` meters:
/// `weight * (arm - REFERENCE_ARM_M) / 1000`.
///
/// Pure and total over finite inputs; callers must treat the index as
/// absent instead of passing a non-finite weight or arm.
pub fn compute_index(weight: f64, arm: f64) -> f64 {
    compute_index_from(weight, arm, REFERENCE_ARM_M)
}

/// [`compute_index`] with an explicit reference arm.
pub fn compute_index_from(weight: f64, arm: f64, reference_arm: f64) -> f64 {
    (weight * (arm - reference_arm)) / 1000.0
}

/// Round to two decimal places for display, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Column totals over the galley table of a report.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GalleyTotals {
    pub domestic_weight_kg: f64,
    pub domestic_index: f64,
    pub international_weight_kg: f64,
    pub international_index: f64,
}

impl GalleyTotals {
    pub fn for_details(details: &[GalleyDetail]) -> Self {
        details.iter().fold(Self::default(), |mut totals, d| {
            totals.domestic_weight_kg += d.domestic_weight_kg;
            totals.domestic_index += d.domestic_index;
            totals.international_weight_kg += d.international_weight_kg;
            totals.international_index += d.international_index;
            totals
        })
    }
}

/// Column totals over the crew table of a report.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CrewTotals {
    pub qty: i64,
    pub weight_kg: f64,
    pub index: f64,
}

impl CrewTotals {
    pub fn for_details(details: &[CrewDetail]) -> Self {
        details.iter().fold(Self::default(), |mut totals, d| {
            totals.qty += d.qty;
            totals.weight_kg += d.weight_kg;
            totals.index += d.index;
            totals
        })
    }
}
