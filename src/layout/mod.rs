//! Word-flow layout for fixed-size pages.
//!
//! Words are packed greedily, left to right and top to bottom, into a [`LayoutBox`].
//! Each call to [`layout_page`] lays out a single page and reports where the next page
//! should start, so a document is paginated by calling it again with that cursor
//! until nothing remains. [`Paginator`] wraps that loop as an iterator.
//!
//! # Example
//!
//! ```
//! use txpix::{Document, Font, GlyphMetrics};
//! use txpix::layout::{LayoutBox, Paginator};
//!
//! let font = Font::embedded().expect("can load font");
//! let metrics = GlyphMetrics::new(&font, 32.0);
//! let document = Document::from_text("Hello, world!\nA second line.");
//! let layout_box = LayoutBox::new(1080, 1080, 60, 8);
//!
//! let pages: Vec<_> = Paginator::new(&document, layout_box, &metrics).collect();
//! assert_eq!(pages.len(), 1);
//! assert_eq!(pages[0].placements.len(), 5);
//! ```

mod layout_box;
mod text;

pub use layout_box::*;
pub use text::*;
