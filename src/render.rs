use crate::layout::PageLayout;
use crate::{Colour, Font, TxpixError};
use ab_glyph::{point, Font as _, FontRef, GlyphId, PxScale};
use image::{ImageFormat, Rgba, RgbaImage};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Draws laid out pages onto copies of a background canvas
pub struct Renderer<'a> {
    font: &'a Font,
    raster: FontRef<'a>,
    scale: PxScale,
    size: f32,
    colour: Colour,
}

impl<'a> Renderer<'a> {
    /// Prepare to draw `font` at `size` points in `colour`
    pub fn new(font: &'a Font, size: f32, colour: Colour) -> Result<Renderer<'a>, TxpixError> {
        let raster = FontRef::try_from_slice(font.face.as_slice())?;

        // ab_glyph scales relative to ascent - descent, points are relative to the em square
        let units_per_em = raster.units_per_em().unwrap_or(1000.0);
        let scale = PxScale::from(size * raster.height_unscaled() / units_per_em);

        Ok(Renderer {
            font,
            raster,
            scale,
            size,
            colour,
        })
    }

    /// Draw every placement of `page` onto a fresh copy of `background`. The background
    /// itself is left untouched so it can be reused for the next page.
    pub fn render_page(&self, background: &RgbaImage, page: &PageLayout) -> RgbaImage {
        let mut canvas = background.clone();
        for placement in page.placements.iter() {
            let text = format!("{} ", placement.text);
            self.draw_text(&mut canvas, placement.x as f32, placement.y as f32, &text);
        }
        canvas
    }

    /// Draw `text` with its left edge at `x` and its baseline at `baseline`. Anything
    /// falling outside the canvas is clipped.
    pub fn draw_text(&self, canvas: &mut RgbaImage, x: f32, baseline: f32, text: &str) {
        let (width, height) = canvas.dimensions();
        let mut caret = x;

        for (gid, hadv) in self.font.glyph_advances(text, self.size) {
            let glyph = GlyphId(gid).with_scale_and_position(self.scale, point(caret, baseline));
            caret += hadv;

            let Some(outlined) = self.raster.outline_glyph(glyph) else {
                // whitespace has no outline
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                if px < 0 || py < 0 || px >= width as i64 || py >= height as i64 {
                    return;
                }
                blend(
                    canvas.get_pixel_mut(px as u32, py as u32),
                    self.colour,
                    coverage,
                );
            });
        }
    }
}

/// Source-over blend of `colour`, weighted by glyph coverage
fn blend(dst: &mut Rgba<u8>, colour: Colour, coverage: f32) {
    let alpha = coverage.clamp(0.0, 1.0) * colour.a as f32 / 255.0;
    let mix = |src: u8, dst: u8| -> u8 {
        (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8
    };
    let Rgba([r, g, b, a]) = *dst;
    *dst = Rgba([
        mix(colour.r, r),
        mix(colour.g, g),
        mix(colour.b, b),
        mix(255, a),
    ]);
}

/// `base_01.png`, `base_02.png`, ... for 1-based page indices
pub fn page_path(base: &Path, index: usize) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(format!("_{index:02}.png"));
    PathBuf::from(name)
}

/// Encode `image` as a PNG at `path`
pub fn save_page(image: &RgbaImage, path: &Path) -> Result<(), TxpixError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| TxpixError::EncodeWrite {
            path: path.to_owned(),
            source,
        })
}
