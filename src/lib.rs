//! Paginates plain text onto fixed-size PNG "cards".
//!
//! Text is cleaned with a removal pattern, split into lines and words, laid out
//! greedily page by page with real glyph metrics, and each page is drawn onto a copy
//! of a solid colour or image background.

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod background;
pub use background::*;

/// Word-flow layout of documents onto pages
pub mod layout;

mod normalize;
pub use normalize::*;

mod pipeline;
pub use pipeline::*;

/// Drawing laid out pages and writing them as PNGs
pub mod render;

/// Running the pipeline over directories of text files
pub mod batch;

/// Fetching passages from an Airtable table
pub mod airtable;
