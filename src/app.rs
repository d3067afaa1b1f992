use eframe::egui::{
    self, Align2, Color32, ColorImage, FontData, FontDefinitions, FontFamily, FontId, Painter,
    Pos2, Rect, Sense, Stroke, StrokeKind, TextureHandle, TextureOptions, pos2, vec2,
};
use image::RgbaImage;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Cli;
use crate::constant::{
    BACKGROUND, BORDER, HANDLE, PREVIEW_BORDER, SHADE, TEXT, TEXT_OFFSET, TEXT_SIZE,
};
use crate::controller::{Command, Controller, InputEvent};
use crate::export::{Exporter, export};
use crate::mapper::DisplayTransform;
use crate::region::CropModel;
use crate::view::{Overlay, PreviewCache, fit_texture, overlay_text};

const OVERLAY_FONT: &str = "overlay";

#[derive(Debug, Error)]
pub enum FontError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a TTF/OTF font: {0}")]
    Parse(#[from] ab_glyph::InvalidFont),
}

pub struct CookieCutterApp {
    source: RgbaImage,
    /// Uploaded on the first frame, once the GPU texture limit is known.
    texture: Option<TextureHandle>,
    controller: Controller,
    preview: PreviewCache,
    preview_texture: Option<TextureHandle>,
    exporter: Exporter,
}

impl CookieCutterApp {
    pub fn new(cc: &eframe::CreationContext<'_>, source: RgbaImage, cli: &Cli) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        if let Some(path) = &cli.font {
            if let Err(err) = install_font(&cc.egui_ctx, path) {
                log::warn!(
                    "Could not load font {}: {err}; using the built-in font",
                    path.display()
                );
            }
        }

        let model = CropModel::initialize(source.width(), source.height());

        Self {
            texture: None,
            controller: Controller::new(model),
            preview: PreviewCache::default(),
            preview_texture: None,
            exporter: Exporter::new(&cli.output_dir),
            source,
        }
    }

    fn save(&mut self) {
        let region = self.controller.region();
        let path = self.exporter.next_path(&region);
        match export(&self.source, &region, &path) {
            Ok(()) => log::info!("Saved: {}  ({}×{})", path.display(), region.w, region.h),
            Err(err) => log::error!("Failed to save {}: {err}", path.display()),
        }
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_some() {
            return;
        }
        let max_side = ctx.input(|i| i.max_texture_side);
        let image = match fit_texture(&self.source, max_side) {
            Some(scaled) => {
                log::info!(
                    "Image exceeds the {max_side}px texture limit, displaying at {}x{}",
                    scaled.width(),
                    scaled.height()
                );
                to_color_image(&scaled)
            }
            None => to_color_image(&self.source),
        };
        self.texture = Some(ctx.load_texture("source", image, TextureOptions::LINEAR));
    }

    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let stale = self.controller.take_changed() || !self.preview.is_built();
        if stale && self.preview.refresh(&self.source, self.controller.region()) {
            let max_side = ctx.input(|i| i.max_texture_side);
            self.preview_texture = self.preview.image().map(|image| {
                let color_image = match fit_texture(image, max_side) {
                    Some(scaled) => to_color_image(&scaled),
                    None => to_color_image(image),
                };
                ctx.load_texture("preview", color_image, TextureOptions::NEAREST)
            });
        }
    }

    fn paint(&self, painter: &Painter, canvas: Rect, transform: &DisplayTransform) {
        let region = self.controller.region();
        let overlay = Overlay::build(canvas, transform, &region);
        let uv = Rect::from_min_max(Pos2::ZERO, pos2(1.0, 1.0));

        if let Some(texture) = &self.texture {
            painter.image(texture.id(), overlay.image, uv, Color32::WHITE);
        }

        if !region.is_empty() {
            for shade in overlay.shades {
                painter.rect_filled(shade, 0.0, SHADE);
            }
            painter.rect_stroke(
                overlay.crop,
                0.0,
                Stroke::new(1.0, BORDER),
                StrokeKind::Inside,
            );
            for handle in overlay.handles {
                painter.rect_filled(handle, 0.0, HANDLE);
            }
        }

        if let (Some(texture), Some(preview)) = (&self.preview_texture, self.preview.image()) {
            painter.image(
                texture.id(),
                overlay.preview_rect(preview.width(), preview.height()),
                uv,
                Color32::WHITE,
            );
            painter.rect_stroke(
                overlay.preview_box,
                0.0,
                Stroke::new(1.0, PREVIEW_BORDER),
                StrokeKind::Inside,
            );
        }

        painter.text(
            canvas.min + vec2(TEXT_OFFSET[0], TEXT_OFFSET[1]),
            Align2::LEFT_TOP,
            overlay_text(&region),
            FontId::proportional(TEXT_SIZE),
            TEXT,
        );
    }
}

impl eframe::App for CookieCutterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let events = ctx.input(|i| i.events.clone());

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BACKGROUND))
            .show(ctx, |ui| {
                let canvas = ui.max_rect();
                ui.allocate_rect(canvas, Sense::click_and_drag());
                let transform =
                    DisplayTransform::fit(canvas, [self.source.width(), self.source.height()]);

                // Apply all input before reading the region for drawing.
                for event in events.iter().filter_map(InputEvent::from_egui) {
                    match self.controller.handle(event, &transform) {
                        Some(Command::Save) => self.save(),
                        Some(Command::Quit) => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
                        None => {}
                    }
                }

                self.ensure_texture(ctx);
                self.refresh_preview(ctx);
                self.paint(ui.painter(), canvas, &transform);
            });
    }
}

fn to_color_image(image: &RgbaImage) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [image.width() as usize, image.height() as usize],
        image.as_flat_samples().as_slice(),
    )
}

fn install_font(ctx: &egui::Context, path: &Path) -> Result<(), FontError> {
    let bytes = std::fs::read(path)?;
    // egui panics on unparsable font data at the next frame.
    ab_glyph::FontRef::try_from_slice(&bytes)?;
    let mut fonts = FontDefinitions::default();
    fonts.font_data.insert(
        OVERLAY_FONT.to_owned(),
        Arc::new(FontData::from_owned(bytes)),
    );
    fonts
        .families
        .entry(FontFamily::Proportional)
        .or_default()
        .insert(0, OVERLAY_FONT.to_owned());
    ctx.set_fonts(fonts);
    Ok(())
}
