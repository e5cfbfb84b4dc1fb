//! Centered text rendering for the raster painter.
//!
//! Glyphs come from a system sans-serif face located through fontdb
//! and laid out with rusttype. Machines without any usable system
//! font skip text drawing with a single warning.

use std::sync::OnceLock;

use bouncekit_core::Color;
use fontdb::{Database, Family, Query};
use rusttype::{point, Font, Scale};
use tiny_skia::Pixmap;
use tracing::warn;

const FONT_SIZE: f32 = 14.0;

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

fn font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(load_system_font).as_ref()
}

fn load_system_font() -> Option<Font<'static>> {
    let query = Query {
        families: &[Family::SansSerif, Family::Serif, Family::Monospace],
        ..Query::default()
    };
    let id = db().query(&query)?;
    let (source, index) = db().face_source(id)?;
    let bytes = match source {
        fontdb::Source::Binary(data) => data.as_ref().as_ref().to_vec(),
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
            std::fs::read(path).ok()?
        }
    };
    Font::try_from_vec_and_index(bytes, index)
}

/// Draws `text` centered on `(x, y)` in the given color. A no-op with
/// a warning when no system font is available.
pub(crate) fn draw_centered(pixmap: &mut Pixmap, text: &str, x: i32, y: i32, color: Color) {
    let Some(font) = font() else {
        static WARNED: OnceLock<()> = OnceLock::new();
        WARNED.get_or_init(|| warn!("no system font found, text will not be drawn"));
        return;
    };

    let scale = Scale::uniform(FONT_SIZE);
    let v_metrics = font.v_metrics(scale);

    let text_width: f32 = font
        .layout(text, scale, point(0.0, 0.0))
        .filter_map(|g| g.pixel_bounding_box().map(|b| b.max.x as f32))
        .last()
        .unwrap_or(0.0);

    // Center horizontally; place the baseline so the glyph body
    // straddles the requested y, matching ascent against descent.
    let start_x = x as f32 - text_width / 2.0;
    let start_y = y as f32 + (v_metrics.ascent + v_metrics.descent) / 2.0;

    let width = pixmap.width();
    let height = pixmap.height();
    for glyph in font.layout(text, scale, point(start_x, start_y)) {
        let Some(bounding_box) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bounding_box.min.x;
            let py = gy as i32 + bounding_box.min.y;
            if px < 0 || px >= width as i32 || py < 0 || py >= height as i32 {
                return;
            }
            let alpha = (coverage * 255.0) as u32;
            if alpha == 0 {
                return;
            }
            let idx = ((py as u32 * width + px as u32) * 4) as usize;
            let data = pixmap.data_mut();
            // Source-over blend of premultiplied text color.
            let inv = 255 - alpha;
            let blend = |src: u8, dst: u8| ((src as u32 * alpha + dst as u32 * inv) / 255) as u8;
            data[idx] = blend(color.r, data[idx]);
            data[idx + 1] = blend(color.g, data[idx + 1]);
            data[idx + 2] = blend(color.b, data[idx + 2]);
            data[idx + 3] = blend(255, data[idx + 3]);
        });
    }
}
