//! Everything drawn on top of the image: the cached 1:1 preview, the dimmed
//! surroundings, the border with its handles, and the coordinate readout.

use eframe::egui::{Pos2, Rect, pos2, vec2};
use image::RgbaImage;
use image::imageops::FilterType;

use crate::constant::{HANDLE_SIZE, HELP_TEXT, PREVIEW_MARGIN, PREVIEW_SIZE};
use crate::mapper::DisplayTransform;
use crate::region::CropRegion;

/// Pixels under the crop region, rebuilt only when the region moves.
#[derive(Debug, Default)]
pub struct PreviewCache {
    key: Option<CropRegion>,
    image: Option<RgbaImage>,
    rebuilds: usize,
}

impl PreviewCache {
    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn is_built(&self) -> bool {
        self.key.is_some()
    }

    /// Re-extracts the preview if `region` differs from the cached one.
    /// Returns true when the preview was replaced.
    pub fn refresh(&mut self, source: &RgbaImage, region: CropRegion) -> bool {
        if self.key == Some(region) {
            return false;
        }
        self.key = Some(region);
        self.image = region.extract(source);
        self.rebuilds += 1;
        log::debug!("preview rebuild #{} for {region:?}", self.rebuilds);
        true
    }
}

/// Screen geometry for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub image: Rect,
    pub crop: Rect,
    /// Top band, bottom band, left of the crop row, right of the crop row.
    pub shades: [Rect; 4],
    /// Top-left, top-right, bottom-left, bottom-right.
    pub handles: [Rect; 4],
    pub preview_box: Rect,
}

impl Overlay {
    pub fn build(canvas: Rect, transform: &DisplayTransform, region: &CropRegion) -> Self {
        let crop = transform.to_display_space(region);
        let shades = [
            Rect::from_min_max(canvas.min, pos2(canvas.max.x, crop.min.y)),
            Rect::from_min_max(pos2(canvas.min.x, crop.max.y), canvas.max),
            Rect::from_min_max(pos2(canvas.min.x, crop.min.y), pos2(crop.min.x, crop.max.y)),
            Rect::from_min_max(pos2(crop.max.x, crop.min.y), pos2(canvas.max.x, crop.max.y)),
        ];
        let handle = |center: Pos2| Rect::from_center_size(center, vec2(HANDLE_SIZE, HANDLE_SIZE));
        let handles = [
            handle(crop.left_top()),
            handle(crop.right_top()),
            handle(crop.left_bottom()),
            handle(crop.right_bottom()),
        ];
        let preview_box = Rect::from_min_size(
            canvas.max - vec2(PREVIEW_SIZE + PREVIEW_MARGIN, PREVIEW_SIZE + PREVIEW_MARGIN),
            vec2(PREVIEW_SIZE, PREVIEW_SIZE),
        );
        Self {
            image: transform.image_rect(),
            crop,
            shades,
            handles,
            preview_box,
        }
    }

    /// Where a `width`×`height` preview sits inside the preview box,
    /// letterboxed to keep its aspect ratio.
    pub fn preview_rect(&self, width: u32, height: u32) -> Rect {
        DisplayTransform::fit(self.preview_box, [width, height]).image_rect()
    }
}

/// Downscaled copy of `image` whose longer side is at most `max_side`, or
/// `None` when it already fits. GPU textures have a size limit; exports and
/// the preview cache keep full resolution.
pub fn fit_texture(image: &RgbaImage, max_side: usize) -> Option<RgbaImage> {
    let max_side = u32::try_from(max_side).unwrap_or(u32::MAX).max(1);
    let (w, h) = image.dimensions();
    if w <= max_side && h <= max_side {
        return None;
    }
    let long = u64::from(w.max(h));
    let shrink = |side: u32| (u64::from(side) * u64::from(max_side) / long).max(1) as u32;
    let (nw, nh) = (shrink(w), shrink(h));
    Some(image::imageops::resize(image, nw, nh, FilterType::Triangle))
}

pub fn overlay_text(region: &CropRegion) -> String {
    format!(
        "X: {}  Y: {}   W: {}  H: {}   ({HELP_TEXT})",
        region.x, region.y, region.w, region.h
    )
}
