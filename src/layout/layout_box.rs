use crate::TxpixError;

/// The pixel geometry text is laid out in. There is no control preventing words from
/// overflowing the box; the margins are guidelines for [`layout_page`](crate::layout::layout_page).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct LayoutBox {
    pub width: u32,
    pub height: u32,
    /// Applied on every side
    pub margin: u32,
    /// Extra space added between lines, on top of the font's line height
    pub line_spacing: u32,
}

impl LayoutBox {
    pub fn new(width: u32, height: u32, margin: u32, line_spacing: u32) -> LayoutBox {
        LayoutBox {
            width,
            height,
            margin,
            line_spacing,
        }
    }

    /// Horizontal limit a word's right edge is compared against
    pub fn max_width(&self) -> u32 {
        self.width.saturating_sub(self.margin.saturating_mul(2))
    }

    /// Vertical limit a line's bottom edge is compared against
    pub fn max_height(&self) -> u32 {
        self.height.saturating_sub(self.margin.saturating_mul(2))
    }

    /// Check that the margins leave room for text in both directions
    pub fn validate(&self) -> Result<(), TxpixError> {
        if self.width <= self.margin.saturating_mul(2) {
            return Err(TxpixError::InvalidConfig(format!(
                "image width {} must exceed twice the margin ({})",
                self.width, self.margin
            )));
        }
        if self.height <= self.margin.saturating_mul(2) {
            return Err(TxpixError::InvalidConfig(format!(
                "image height {} must exceed twice the margin ({})",
                self.height, self.margin
            )));
        }
        Ok(())
    }
}
