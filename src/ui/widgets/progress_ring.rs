// SPDX-License-Identifier: MPL-2.0
//! Circular progress indicator for the current slide, drawn on a Canvas.

use crate::domain::ui::ProgressPercent;
use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};

const STROKE_WIDTH: f32 = 3.0;

/// Ring that fills clockwise from the top as the slide time runs out.
pub struct ProgressRing {
    cache: Cache,
    progress: ProgressPercent,
    color: Color,
    size: f32,
}

impl ProgressRing {
    #[must_use]
    pub fn new(progress: ProgressPercent, color: Color) -> Self {
        Self {
            cache: Cache::default(),
            progress,
            color,
            size: sizing::PROGRESS_RING,
        }
    }

    /// Creates a Canvas widget from this ring.
    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

/// Angles (radians) of the filled arc; 0 points right, the arc starts at the top.
fn arc_angles(progress: ProgressPercent) -> (f32, f32) {
    let start = -PI / 2.0;
    (start, start + TAU * progress.as_fraction())
}

impl<Message> canvas::Program<Message> for ProgressRing {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let radius = frame.width().min(frame.height()) / 2.0 - STROKE_WIDTH;

                let track = Path::circle(center, radius);
                frame.stroke(
                    &track,
                    Stroke::default().with_width(STROKE_WIDTH).with_color(Color {
                        a: 0.25,
                        ..self.color
                    }),
                );

                if self.progress == ProgressPercent::ZERO {
                    return;
                }

                let (start_angle, end_angle) = arc_angles(self.progress);
                let mut arc = canvas::path::Builder::new();
                arc.move_to(Point::new(
                    center.x + radius * start_angle.cos(),
                    center.y + radius * start_angle.sin(),
                ));

                let segments = 60;
                #[allow(clippy::cast_precision_loss)]
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let angle = start_angle + (end_angle - start_angle) * t;
                    arc.line_to(Point::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    ));
                }

                frame.stroke(
                    &arc.build(),
                    Stroke::default()
                        .with_width(STROKE_WIDTH)
                        .with_color(self.color)
                        .with_line_cap(canvas::LineCap::Round),
                );
            });

        vec![geometry]
    }
}
