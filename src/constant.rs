//! Tool constants. Sizes are in image pixels unless they say otherwise.

use eframe::egui::Color32;

pub const APP_NAME: &str = "Cookie Cutter";

pub const WINDOW_TITLE: &str = "Cookie Cutter - Drag to move, Drag bottom-right corner to resize, S = save, +/- = size, Q/Esc = quit";

pub const WINDOW_SIZE: [f32; 2] = [1280.0, 900.0];

/// Side of the square placed at the image centre on startup.
pub const DEFAULT_SIZE: i32 = 256;

pub const MIN_SIZE: i32 = 32;

pub const MAX_SIZE: i32 = 2048;

pub const RESIZE_STEP: i32 = 16;

pub const AXIS_STEP: i32 = 1;

/// Side of the square around the bottom-right corner that starts a resize.
pub const HIT_ZONE: f32 = 24.0;

pub const HANDLE_SIZE: f32 = 14.0;

// Preview box geometry, in points.
pub const PREVIEW_SIZE: f32 = 256.0;
pub const PREVIEW_MARGIN: f32 = 20.0;

pub const TEXT_OFFSET: [f32; 2] = [16.0, 16.0];
pub const TEXT_SIZE: f32 = 18.0;

pub const HELP_TEXT: &str = "S = save, +/- = resize, arrows = nudge, Ctrl+arrows = jump, Shift+arrows = stretch, Q = quit";

pub const BACKGROUND: Color32 = Color32::from_rgb(30, 30, 40);
// Translucent colours are premultiplied.
pub const SHADE: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 140);
pub const BORDER: Color32 = Color32::from_rgba_premultiplied(69, 220, 104, 220);
pub const HANDLE: Color32 = Color32::from_rgba_premultiplied(220, 207, 52, 220);
pub const PREVIEW_BORDER: Color32 = Color32::from_rgba_premultiplied(173, 173, 190, 220);
pub const TEXT: Color32 = Color32::from_rgb(240, 240, 255);
