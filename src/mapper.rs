//! Fit-to-window mapping between display points and image pixels.

use eframe::egui::{Pos2, Rect, Vec2, vec2};

use crate::region::CropRegion;

/// Uniform scale plus centring offset that letterboxes an image inside a canvas.
///
/// Rebuilt from the canvas rectangle on every frame since the window can be
/// resized at any time. Nothing here clamps; out-of-image positions map to
/// out-of-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayTransform {
    origin: Pos2,
    scale: f32,
    image_size: Vec2,
}

impl DisplayTransform {
    pub fn fit(canvas: Rect, image_size: [u32; 2]) -> Self {
        let [width, height] = image_size.map(|v| v.max(1) as f32);
        let display = canvas.size().floor();
        let scale = (display.x / width).min(display.y / height).max(0.0);
        let offset = vec2(
            ((display.x - (width * scale).trunc()) / 2.0).trunc(),
            ((display.y - (height * scale).trunc()) / 2.0).trunc(),
        );
        Self {
            origin: canvas.min + offset,
            scale,
            image_size: vec2(width, height),
        }
    }

    /// True when the canvas has no area, e.g. while the window is minimised.
    pub fn is_degenerate(&self) -> bool {
        !(self.scale.is_finite() && self.scale > 0.0)
    }

    pub fn to_image_space(&self, pos: Pos2) -> Pos2 {
        ((pos - self.origin) / self.scale).to_pos2()
    }

    pub fn to_display_space(&self, region: &CropRegion) -> Rect {
        Rect::from_min_size(
            self.origin
                + vec2(
                    (region.x as f32 * self.scale).trunc(),
                    (region.y as f32 * self.scale).trunc(),
                ),
            vec2(
                (region.w as f32 * self.scale).trunc(),
                (region.h as f32 * self.scale).trunc(),
            ),
        )
    }

    /// Where the whole image lands on the canvas.
    pub fn image_rect(&self) -> Rect {
        Rect::from_min_size(self.origin, (self.image_size * self.scale).floor())
    }
}
