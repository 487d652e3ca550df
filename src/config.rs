use crate::layout::LayoutBox;
use crate::{Colour, TxpixError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings for a run, read from a YAML file. Field names match the YAML keys.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// When non-empty, each document gets one of these at random and
    /// `background_color` is ignored
    pub background_images: Vec<PathBuf>,
    /// `"R,G,B,A"`
    pub background_color: String,
    pub image_width: u32,
    pub image_height: u32,
    /// In points; one point is one pixel
    pub font_size: f32,
    /// `"R,G,B,A"`
    pub font_color: String,
    /// Falls back to the embedded font when unset
    pub font_file: Option<PathBuf>,
    pub margin: u32,
    pub output_dir: PathBuf,
    pub line_spacing: u32,
    pub airtable: AirtableConfig,
    pub preprocess: PreprocessConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            background_images: Vec::new(),
            background_color: "255,255,255,255".to_string(),
            image_width: 1080,
            image_height: 1080,
            font_size: 32.0,
            font_color: "0,0,0,255".to_string(),
            font_file: None,
            margin: 60,
            output_dir: PathBuf::from("output"),
            line_spacing: 8,
            airtable: AirtableConfig::default(),
            preprocess: PreprocessConfig::default(),
        }
    }
}

/// Where `txpix fetch` reads records from
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AirtableConfig {
    pub api_key: String,
    pub base_id: String,
    pub table_name: String,
    /// Field holding the record's name, used as the output file name
    pub name_id: String,
    /// Field holding the text body
    pub body_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Regular expression; every match is deleted from the input before layout
    pub remove: String,
}

impl Config {
    /// Read and parse a YAML config file. The result is not validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, TxpixError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| TxpixError::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| TxpixError::ConfigParse {
            path: path.to_owned(),
            source,
        })
    }

    /// The layout geometry described by this config
    pub fn layout_box(&self) -> LayoutBox {
        LayoutBox::new(
            self.image_width,
            self.image_height,
            self.margin,
            self.line_spacing,
        )
    }

    /// Check everything that can be checked without touching the filesystem: the
    /// geometry leaves room for text, the font size is usable and the colours parse
    pub fn validate(&self) -> Result<(), TxpixError> {
        self.layout_box().validate()?;

        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(TxpixError::InvalidConfig(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }

        Colour::parse(&self.font_color)?;
        if self.background_images.is_empty() {
            Colour::parse(&self.background_color)?;
        }

        Ok(())
    }
}
