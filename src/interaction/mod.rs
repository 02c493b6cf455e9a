use serde::{Deserialize, Serialize};

use crate::core::SeriesName;

/// Which series, if any, is highlighted.
///
/// While a series is focused every bar of another series is drawn faint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusState {
    series_name: Option<SeriesName>,
}

impl FocusState {
    pub fn set_focus(&mut self, series_name: Option<SeriesName>) {
        self.series_name = series_name;
    }

    pub fn clear(&mut self) {
        self.series_name = None;
    }

    #[must_use]
    pub fn focused(&self) -> Option<&str> {
        self.series_name.as_deref()
    }

    #[must_use]
    pub fn is_faint(&self, series_name: &str) -> bool {
        self.series_name
            .as_deref()
            .is_some_and(|focused| focused != series_name)
    }

    #[must_use]
    pub fn opacity(&self, series_name: &str, focused_opacity: f64, faint_opacity: f64) -> f64 {
        if self.is_faint(series_name) {
            faint_opacity
        } else {
            focused_opacity
        }
    }
}
