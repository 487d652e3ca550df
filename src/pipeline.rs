use crate::layout::{LayoutBox, OrphanPolicy, PageLayout, Paginator};
use crate::render::{page_path, save_page, Renderer};
use crate::{Background, Colour, Config, Document, Font, GlyphMetrics, Normalizer, TxpixError};
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything needed to turn documents into page images, prepared once per run from a
/// [Config] and a loaded [Font]
pub struct Pipeline {
    font: Font,
    font_size: f32,
    font_colour: Colour,
    background: Background,
    normalizer: Normalizer,
    layout_box: LayoutBox,
    policy: OrphanPolicy,
}

impl Pipeline {
    /// Validate the config and compile the removal pattern
    pub fn new(config: &Config, font: Font) -> Result<Pipeline, TxpixError> {
        config.validate()?;

        Ok(Pipeline {
            font,
            font_size: config.font_size,
            font_colour: Colour::parse(&config.font_color)?,
            background: Background::from_config(
                &config.background_images,
                &config.background_color,
            )?,
            normalizer: Normalizer::new(&config.preprocess.remove)?,
            layout_box: config.layout_box(),
            policy: OrphanPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: OrphanPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn metrics(&self) -> GlyphMetrics<'_> {
        GlyphMetrics::new(&self.font, self.font_size)
    }

    /// Strip the removal pattern from raw input and split what is left into words
    pub fn document(&self, data: &[u8]) -> Document {
        let cleaned = self.normalizer.apply(data);
        Document::from_text(&String::from_utf8_lossy(&cleaned))
    }

    /// Lay out a whole document without drawing anything
    pub fn paginate<'d>(&self, document: &'d Document) -> Vec<PageLayout<'d>> {
        Paginator::new(document, self.layout_box, self.metrics())
            .with_policy(self.policy)
            .collect()
    }

    /// Render `data` to `<output_base>_01.png`, `<output_base>_02.png`, ... and return
    /// the written paths. One background is chosen for all pages of the document. The
    /// first page that fails to encode or write aborts the document.
    pub fn build<R: Rng + ?Sized>(
        &self,
        data: &[u8],
        output_base: &Path,
        rng: &mut R,
    ) -> Result<Vec<PathBuf>, TxpixError> {
        let document = self.document(data);
        debug!(
            lines = document.lines.len(),
            words = document.word_count(),
            "document prepared"
        );

        let background =
            self.background
                .compose(self.layout_box.width, self.layout_box.height, rng)?;
        let renderer = Renderer::new(&self.font, self.font_size, self.font_colour)?;

        let mut written = Vec::new();
        for (i, page) in self.paginate(&document).iter().enumerate() {
            let canvas = renderer.render_page(&background, page);
            let path = page_path(output_base, i + 1);
            save_page(&canvas, &path)?;
            info!(path = %path.display(), words = page.placements.len(), "image saved");
            written.push(path);
        }

        Ok(written)
    }
}
