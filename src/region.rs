//! The crop rectangle and the rules that keep it inside the image.

use image::RgbaImage;

use crate::constant::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};

/// Image-space rectangle, top-left plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropRegion {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl CropRegion {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && i64::from(self.right()) <= i64::from(width)
            && i64::from(self.bottom()) <= i64::from(height)
    }

    /// Same-size copy of the pixels under the region, or `None` when the
    /// region is empty or reaches outside `source`.
    pub fn extract(&self, source: &RgbaImage) -> Option<RgbaImage> {
        if self.is_empty() || !self.fits_within(source.width(), source.height()) {
            return None;
        }
        Some(
            image::imageops::crop_imm(
                source,
                self.x as u32,
                self.y as u32,
                self.w as u32,
                self.h as u32,
            )
            .to_image(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Owns the authoritative [`CropRegion`] and the image bounds it lives in.
///
/// Every mutator returns whether the region changed. Mutators that cannot
/// honour the bounds either clamp (pointer paths) or do nothing (keyboard
/// paths); they never leave the region outside the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropModel {
    region: CropRegion,
    image_w: i32,
    image_h: i32,
}

impl CropModel {
    /// Centres a default-sized square, shrunk to fit small images.
    pub fn initialize(image_w: u32, image_h: u32) -> Self {
        let image_w = i32::try_from(image_w).unwrap_or(i32::MAX);
        let image_h = i32::try_from(image_h).unwrap_or(i32::MAX);
        let side = DEFAULT_SIZE.min(image_w).min(image_h).max(0);
        Self {
            region: CropRegion::new((image_w - side) / 2, (image_h - side) / 2, side, side),
            image_w,
            image_h,
        }
    }

    pub fn region(&self) -> CropRegion {
        self.region
    }

    fn commit(&mut self, region: CropRegion) -> bool {
        let changed = region != self.region;
        self.region = region;
        changed
    }

    fn in_bounds(&self, r: &CropRegion) -> bool {
        r.x >= 0 && r.y >= 0 && r.right() <= self.image_w && r.bottom() <= self.image_h
    }

    fn pin(&self, x: i32, y: i32, w: i32, h: i32) -> CropRegion {
        CropRegion::new(
            x.clamp(0, (self.image_w - w).max(0)),
            y.clamp(0, (self.image_h - h).max(0)),
            w,
            h,
        )
    }

    /// Moves the top-left corner, pinning the region against the image edges.
    pub fn move_to(&mut self, x: i32, y: i32) -> bool {
        let r = self.region;
        self.commit(self.pin(x, y, r.w, r.h))
    }

    /// Corner-drag resize. Each side is clamped to `MIN_SIZE` and to the room
    /// left before the far edge, then both take the smaller one so the region
    /// stays square.
    pub fn resize_to(&mut self, w: i32, h: i32) -> bool {
        let r = self.region;
        let w = w.max(MIN_SIZE).min(self.image_w - r.x);
        let h = h.max(MIN_SIZE).min(self.image_h - r.y);
        let side = w.min(h);
        self.commit(CropRegion::new(r.x, r.y, side, side))
    }

    fn translate_exact(&mut self, dx: i32, dy: i32) -> bool {
        let r = self.region;
        let moved = CropRegion::new(r.x + dx, r.y + dy, r.w, r.h);
        if !self.in_bounds(&moved) {
            return false;
        }
        self.commit(moved)
    }

    /// One-pixel step. Only the sign of `dx`/`dy` is used.
    pub fn nudge(&mut self, dx: i32, dy: i32) -> bool {
        self.translate_exact(dx.signum(), dy.signum())
    }

    /// Moves by a whole region width (horizontal) or height (vertical), or not
    /// at all when the region would leave the image.
    pub fn jump(&mut self, dx: i32, dy: i32) -> bool {
        let r = self.region;
        self.translate_exact(dx.signum() * r.w, dy.signum() * r.h)
    }

    /// Grows or shrinks a single side, keeping the top-left corner.
    ///
    /// Unlike [`resize_to`](Self::resize_to) this does not keep the region
    /// square.
    pub fn grow_shrink_axis(&mut self, axis: Axis, delta: i32) -> bool {
        let r = self.region;
        let resized = match axis {
            Axis::Horizontal => CropRegion::new(r.x, r.y, r.w + delta, r.h),
            Axis::Vertical => CropRegion::new(r.x, r.y, r.w, r.h + delta),
        };
        let side = match axis {
            Axis::Horizontal => resized.w,
            Axis::Vertical => resized.h,
        };
        if !(MIN_SIZE..=MAX_SIZE).contains(&side) || !self.in_bounds(&resized) {
            return false;
        }
        self.commit(resized)
    }

    /// Grows or shrinks both sides by `delta` around the current centre.
    pub fn grow_shrink_both(&mut self, delta: i32) -> bool {
        let r = self.region;
        let (w, h) = (r.w + delta, r.h + delta);
        let limits = MIN_SIZE..=MAX_SIZE;
        if !limits.contains(&w) || !limits.contains(&h) || w > self.image_w || h > self.image_h {
            return false;
        }
        let cx = r.x + r.w / 2;
        let cy = r.y + r.h / 2;
        self.commit(self.pin(cx - w / 2, cy - h / 2, w, h))
    }
}

/// Rounds half-way values up, so -0.5 becomes 0 and 0.5 becomes 1.
pub fn round_half_up(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}
