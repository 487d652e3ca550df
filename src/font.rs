use crate::TxpixError;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use std::path::Path;

/// DejaVu Sans, used whenever no font file is configured
const EMBEDDED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// A parsed TTF or OTF font. Sizes are given in points and, as images are rendered at
/// 72 DPI, one point maps to one pixel.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, TxpixError> {
        Self::load_named(bytes, "<memory>")
    }

    fn load_named(bytes: Vec<u8>, name: &str) -> Result<Font, TxpixError> {
        let face = OwnedFace::from_vec(bytes, 0).map_err(|source| TxpixError::FontParse {
            name: name.to_string(),
            source,
        })?;

        Ok(Font { face })
    }

    /// Load the font bundled with the crate
    pub fn embedded() -> Result<Font, TxpixError> {
        Self::load_named(EMBEDDED_FONT.to_vec(), "<embedded>")
    }

    /// Read and parse a font file. There is no fallback: an explicitly named font that
    /// can't be read or parsed is an error.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Font, TxpixError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| TxpixError::FontRead {
            path: path.to_owned(),
            source,
        })?;
        Self::load_named(bytes, &path.display().to_string())
    }

    /// Load the configured font file, or the embedded font if none is configured
    pub fn from_config(font_file: Option<&Path>) -> Result<Font, TxpixError> {
        match font_file {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    /// Obtain the family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    fn scaling(&self, size: f32) -> f32 {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: f32) -> f32 {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: f32) -> f32 {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }

    /// Calculate the leading (extra space between lines) for the given font size
    pub fn leading(&self, size: f32) -> f32 {
        self.scaling(size) * self.face.as_face_ref().line_gap() as f32
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: f32) -> f32 {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    /// Glyph used for `ch`. Characters the font can't draw fall back to the
    /// replacement character, then to `.notdef`.
    pub fn glyph_id(&self, ch: char) -> u16 {
        let face = self.face.as_face_ref();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .map(|gid| gid.0)
            .unwrap_or(0)
    }

    /// Glyph ids of `text` paired with their horizontal advance at the given size
    pub fn glyph_advances<'a>(
        &'a self,
        text: &'a str,
        size: f32,
    ) -> impl Iterator<Item = (u16, f32)> + 'a {
        let scaling = self.scaling(size);
        text.chars().map(move |ch| {
            let gid = self.glyph_id(ch);
            let hadv = self
                .face
                .as_face_ref()
                .glyph_hor_advance(GlyphId(gid))
                .unwrap_or_default();
            (gid, scaling * hadv as f32)
        })
    }

    /// Calculate the width of a given string of text given the font size
    pub fn width_of_text(&self, text: &str, size: f32) -> f32 {
        self.glyph_advances(text, size).map(|(_, hadv)| hadv).sum()
    }
}

/// Integer pixel metrics the paginator lays words out with
pub trait TextMeasure {
    /// Vertical distance between two baselines, before any extra line spacing
    fn line_height(&self) -> u32;

    /// Advance width of `text`
    fn measure(&self, text: &str) -> u32;

    /// Advance width of a single space
    fn space_width(&self) -> u32 {
        self.measure(" ")
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn line_height(&self) -> u32 {
        (**self).line_height()
    }

    fn measure(&self, text: &str) -> u32 {
        (**self).measure(text)
    }

    fn space_width(&self) -> u32 {
        (**self).space_width()
    }
}

/// A [Font] bound to a point size
#[derive(Clone, Copy)]
pub struct GlyphMetrics<'a> {
    pub font: &'a Font,
    pub size: f32,
}

impl<'a> GlyphMetrics<'a> {
    pub fn new(font: &'a Font, size: f32) -> GlyphMetrics<'a> {
        GlyphMetrics { font, size }
    }
}

impl TextMeasure for GlyphMetrics<'_> {
    fn line_height(&self) -> u32 {
        self.font.line_height(self.size).ceil() as u32
    }

    fn measure(&self, text: &str) -> u32 {
        self.font.width_of_text(text, self.size).ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_font_loads() {
        let font = Font::embedded().expect("embedded font parses");
        assert_eq!(font.family().as_deref(), Some("DejaVu Sans"));
    }

    #[test]
    fn metrics_scale_with_size() {
        let font = Font::embedded().expect("embedded font parses");
        let small = GlyphMetrics::new(&font, 12.0);
        let large = GlyphMetrics::new(&font, 48.0);

        assert!(small.line_height() > 0);
        assert!(large.line_height() > small.line_height());
        assert!(large.measure("Hello") > small.measure("Hello"));
        assert!(small.space_width() > 0);
    }

    #[test]
    fn measuring_is_deterministic() {
        let font = Font::embedded().expect("embedded font parses");
        let metrics = GlyphMetrics::new(&font, 32.0);
        assert_eq!(metrics.measure("pagination"), metrics.measure("pagination"));
        assert_eq!(metrics.measure(""), 0);
    }

    #[test]
    fn wider_words_measure_wider() {
        let font = Font::embedded().expect("embedded font parses");
        let metrics = GlyphMetrics::new(&font, 24.0);
        assert!(metrics.measure("WWWW") > metrics.measure("iiii"));
    }

    #[test]
    fn missing_font_file_is_an_error() {
        let err = Font::from_path("/definitely/not/a/font.ttf")
            .err()
            .expect("missing file fails");
        assert!(matches!(err, TxpixError::FontRead { .. }));
    }

    #[test]
    fn garbage_font_bytes_are_an_error() {
        let err = Font::load(b"not a font".to_vec()).err().expect("garbage fails");
        assert!(matches!(err, TxpixError::FontParse { .. }));
    }
}
