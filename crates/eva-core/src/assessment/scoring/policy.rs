use super::super::domain::Classification;
use super::config::{ClassificationTable, PercentileCurve};

impl PercentileCurve {
    /// Logistic mapping onto 0..1, centered on `center`.
    pub fn logistic01(&self, x: f64) -> f64 {
        let z = -self.steepness * (x - self.center);
        1.0 / (1.0 + z.exp())
    }
}

/// Percentile in 1..99 for an index.
pub fn percentile_for(curve: &PercentileCurve, index: f64) -> u8 {
    let raw = (1.0 + 98.0 * curve.logistic01(index)).round();
    raw.clamp(1.0, 99.0) as u8
}

/// First band whose floor the index reaches; boundary values map to the higher band.
pub fn classify(table: &ClassificationTable, index: f64) -> Classification {
    table
        .bands
        .iter()
        .find(|band| index >= band.min_index)
        .map(|band| band.classification)
        .unwrap_or(table.below)
}
