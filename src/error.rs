use std::path::PathBuf;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum TxpixError {
    #[error("invalid removal pattern")]
    /// The preprocessing pattern is not a valid regular expression
    Pattern(#[from] regex::Error),

    #[error("invalid colour {input:?}, expected four comma-separated channels \"R,G,B,A\"")]
    /// A colour string did not parse to four 0-255 integers
    ColourFormat { input: String },

    #[error("failed to read font file {}", path.display())]
    /// An explicitly configured font file could not be read
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font {name}")]
    /// [owned_ttf_parser] failed to parse the font
    FontParse {
        name: String,
        #[source]
        source: owned_ttf_parser::FaceParsingError,
    },

    #[error(transparent)]
    /// [ab_glyph] could not build a rasterizer for an already parsed font
    FontRaster(#[from] ab_glyph::InvalidFont),

    #[error("failed to load background image {}", path.display())]
    /// A background image could not be opened or decoded
    BackgroundLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write page image {}", path.display())]
    /// A page could not be encoded or written to disk
    EncodeWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read config {}", path.display())]
    /// The configuration file could not be read
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}", path.display())]
    /// The configuration file is not valid YAML for [crate::Config]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    /// The configuration parsed but describes an unusable layout
    InvalidConfig(String),

    #[error(transparent)]
    /// [reqwest] failed to fetch or decode the remote records
    Fetch(#[from] reqwest::Error),

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),
}
