use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size_px: f64,
    pub bold: bool,
}

impl TextStyle {
    #[must_use]
    pub const fn new(font_size_px: f64, bold: bool) -> Self {
        Self { font_size_px, bold }
    }
}

/// Measures label text for layout reservation.
///
/// Hosts with a real font stack provide their own implementation; the engine
/// only needs widths and a line height.
pub trait TextMeasurer: std::fmt::Debug {
    fn text_width_px(&self, text: &str, style: TextStyle) -> f64;

    fn line_height_px(&self, style: TextStyle) -> f64 {
        style.font_size_px * 1.2
    }
}

/// Backend-independent width estimate based on character classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn text_width_px(&self, text: &str, style: TextStyle) -> f64 {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' | '\'' | 'i' | 'l' | 'j' => 0.3,
                '-' | '+' | '%' | '(' | ')' => 0.42,
                ' ' => 0.33,
                'm' | 'w' | 'M' | 'W' => 0.86,
                ch if ch.is_uppercase() => 0.68,
                _ => 0.56,
            }
        });
        let weight = if style.bold { 1.06 } else { 1.0 };
        units * style.font_size_px * weight
    }
}

/// Width of the longest label, where "longest" means most characters.
///
/// Returns `0.0` when there are no labels.
pub fn longest_label_width<'a>(
    labels: impl IntoIterator<Item = &'a str>,
    measurer: &dyn TextMeasurer,
    style: TextStyle,
) -> f64 {
    labels
        .into_iter()
        .fold(None, |longest: Option<&str>, label| match longest {
            Some(current) if current.chars().count() >= label.chars().count() => Some(current),
            _ => Some(label),
        })
        .map_or(0.0, |label| measurer.text_width_px(label, style))
}
