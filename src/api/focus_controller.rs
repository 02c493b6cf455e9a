use tracing::trace;

use crate::core::SeriesName;
use crate::render::Renderer;

use super::{CategoricalBin, StackedBarChart};

impl<R: Renderer> StackedBarChart<R> {
    /// Highlights one series; `None` clears the highlight.
    ///
    /// Focus only affects opacity, so cached data and layout stay valid.
    pub fn set_focus_series_name(&mut self, series_name: Option<SeriesName>) {
        trace!(series = ?series_name, "set focus series");
        self.focus.set_focus(series_name);
    }

    #[must_use]
    pub fn focus_series_name(&self) -> Option<&str> {
        self.focus.focused()
    }

    pub fn on_legend_mouse_over(&mut self, bin: &CategoricalBin) {
        self.set_focus_series_name(Some(bin.value.clone()));
    }

    pub fn on_legend_mouse_leave(&mut self) {
        self.set_focus_series_name(None);
    }

    /// Whether bars of `series_name` are currently drawn faint.
    #[must_use]
    pub fn is_faint(&self, series_name: &str) -> bool {
        self.focus.is_faint(series_name)
    }

    #[must_use]
    pub fn bar_opacity(&self, series_name: &str) -> f64 {
        self.focus.opacity(
            series_name,
            self.config.focused_opacity,
            self.config.faint_opacity,
        )
    }
}
