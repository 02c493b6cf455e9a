use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Linear mapping from a numeric domain onto a pixel range.
///
/// A degenerate domain (`start == end`) maps every value to the middle of the
/// range instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Places a domain value on the pixel range.
    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn maps_domain_onto_offset_range() {
        let scale = LinearScale::new((0.0, 10.0), (100.0, 300.0)).expect("scale");
        assert_eq!(scale.domain_to_pixel(0.0).expect("px"), 100.0);
        assert_eq!(scale.domain_to_pixel(5.0).expect("px"), 200.0);
        assert_eq!(scale.domain_to_pixel(-5.0).expect("px"), 0.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_midpoint() {
        let scale = LinearScale::new((0.0, 0.0), (0.0, 50.0)).expect("scale");
        assert_eq!(scale.domain_to_pixel(0.0).expect("px"), 25.0);
        assert_eq!(scale.domain_to_pixel(12.0).expect("px"), 25.0);
    }

    #[test]
    fn rejects_non_finite_inputs() {
        assert!(LinearScale::new((0.0, f64::INFINITY), (0.0, 1.0)).is_err());
        let scale = LinearScale::new((0.0, 1.0), (0.0, 1.0)).expect("scale");
        assert!(scale.domain_to_pixel(f64::NAN).is_err());
    }
}
