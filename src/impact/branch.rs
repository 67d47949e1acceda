use serde::Serialize;

/// Ambient-temperature thermal rating of an overhead line.
///
/// `CL = rate1 * alpha * sqrt(T_ref / T_max)`, falling back to `rate1` when the
/// result exceeds the nameplate rating or is negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineRating {
    /// Line rating scale factor (`alpha_l`).
    pub alpha: f64,
    /// °C at which the line carries exactly its nameplate rating (`T_RL`).
    pub reference_temperature: f64,
}

impl Default for LineRating {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            reference_temperature: 35.0,
        }
    }
}

impl LineRating {
    /// Day capacity (MVA) for a line rated `rate1` at `max_temperature`.
    ///
    /// Returns NaN when `max_temperature <= 0`, where the ratio is undefined.
    pub fn capacity(&self, rate1: f64, max_temperature: f64) -> f64 {
        if max_temperature <= 0.0 {
            return f64::NAN;
        }
        let cl = rate1 * self.alpha * (self.reference_temperature / max_temperature).sqrt();
        if cl > rate1 || cl < 0.0 { rate1 } else { cl }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_temperature_gives_nameplate() {
        assert_eq!(LineRating::default().capacity(300.0, 35.0), 300.0);
    }

    #[test]
    fn hotter_day_reduces_capacity() {
        let cl = LineRating::default().capacity(300.0, 40.0);
        assert!((cl - 300.0 * (35.0_f64 / 40.0).sqrt()).abs() < 1e-9);
        assert!(cl < 300.0);
    }

    #[test]
    fn cooler_day_clamps_to_nameplate() {
        assert_eq!(LineRating::default().capacity(300.0, 10.0), 300.0);
    }

    #[test]
    fn non_positive_temperature_is_nan() {
        let rating = LineRating::default();
        assert!(rating.capacity(300.0, 0.0).is_nan());
        assert!(rating.capacity(300.0, -4.0).is_nan());
    }
}
