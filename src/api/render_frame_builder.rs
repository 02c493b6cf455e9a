use tracing::trace;

use crate::core::Color;
use crate::error::ChartResult;
use crate::render::{RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

use super::StackedBarChart;

const LABEL_COLOR: Color = Color::rgb8(0x55, 0x55, 0x55);
const FAIL_MESSAGE_COLOR: Color = Color::rgb8(0x66, 0x66, 0x66);

impl<R: Renderer> StackedBarChart<R> {
    /// Materializes the current state into backend-agnostic primitives.
    ///
    /// A failed chart yields a frame holding only its centered fail message.
    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        let bounds = self.config.bounds;
        let frame = RenderFrame::new(bounds);

        let data = self.data();
        if data.failure.is_some() {
            return frame.with_text(
                TextPrimitive::new(
                    data.fail_message(),
                    bounds.x + bounds.width / 2.0,
                    bounds.y + bounds.height / 2.0,
                    self.config.base_font_size,
                    FAIL_MESSAGE_COLOR,
                    TextHAlign::Center,
                )
                .bold(),
            );
        }

        let Some(layout) = self.layout() else {
            return frame;
        };

        let mut frame = frame;
        let label_x = layout.baseline_px - self.config.label_to_bar_padding_px;
        for row in &layout.rows {
            if !row.label.is_empty() {
                frame.texts.push(
                    TextPrimitive::new(
                        row.label.clone(),
                        label_x,
                        row.y_center,
                        layout.label_style.font_size_px,
                        LABEL_COLOR,
                        TextHAlign::Right,
                    )
                    .bold(),
                );
            }

            for bar in &row.bars {
                // negative spans extend left of their start
                let (x, width) = if bar.width < 0.0 {
                    (bar.x + bar.width, -bar.width)
                } else {
                    (bar.x, bar.width)
                };
                frame.rects.push(
                    RectPrimitive::new(x, bar.y_top, width, bar.height, bar.color)
                        .with_opacity(self.bar_opacity(&bar.series_name)),
                );
            }
        }

        trace!(
            rects = frame.rects.len(),
            texts = frame.texts.len(),
            "built render frame"
        );
        frame
    }

    /// Builds the current frame and hands it to the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)
    }
}
