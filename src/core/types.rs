use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Grouping key of a row of data (for example a country name).
pub type EntityName = String;

/// Display name of one stacked series.
pub type SeriesName = String;

/// Discrete time key of a table row (years or day indices).
pub type Time = i64;

/// Axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(0.0, 0.0, 640.0, 480.0)
    }
}

impl Bounds {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    // Padding never produces a negative extent.

    #[must_use]
    pub fn pad_left(self, amount: f64) -> Self {
        let amount = amount.min(self.width);
        Self::new(self.x + amount, self.y, self.width - amount, self.height)
    }

    #[must_use]
    pub fn pad_right(self, amount: f64) -> Self {
        Self::new(self.x, self.y, (self.width - amount).max(0.0), self.height)
    }

    #[must_use]
    pub fn pad_top(self, amount: f64) -> Self {
        let amount = amount.min(self.height);
        Self::new(self.x, self.y + amount, self.width, self.height - amount)
    }

    #[must_use]
    pub fn pad_bottom(self, amount: f64) -> Self {
        Self::new(self.x, self.y, self.width, (self.height - amount).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::Bounds;

    #[test]
    fn padding_shrinks_towards_the_padded_edge() {
        let bounds = Bounds::new(10.0, 20.0, 100.0, 50.0);

        let padded = bounds.pad_left(30.0).pad_right(10.0).pad_top(5.0).pad_bottom(15.0);
        assert_eq!(padded.left(), 40.0);
        assert_eq!(padded.right(), 100.0);
        assert_eq!(padded.top(), 25.0);
        assert_eq!(padded.bottom(), 55.0);
    }

    #[test]
    fn oversized_padding_clamps_to_empty_extent() {
        let bounds = Bounds::from_size(20.0, 10.0);
        assert_eq!(bounds.pad_left(50.0).width, 0.0);
        assert_eq!(bounds.pad_bottom(50.0).height, 0.0);
        assert!(!bounds.pad_top(50.0).is_valid());
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        assert!(Bounds::from_size(0.0, 100.0).validate().is_err());
        assert!(Bounds::from_size(f64::NAN, 100.0).validate().is_err());
        assert!(Bounds::default().validate().is_ok());
    }
}
