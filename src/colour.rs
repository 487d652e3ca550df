use crate::TxpixError;
use std::str::FromStr;

/// An 8-bit RGBA colour, written in configuration files as `"R,G,B,A"`
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from its four channels, each ranging from 0 to 255
    pub fn new_rgba(r: u8, g: u8, b: u8, a: u8) -> Colour {
        Colour { r, g, b, a }
    }

    /// Parse a `"R,G,B,A"` string of decimal channels. Whitespace around each channel
    /// is ignored; anything other than exactly four channels in 0..=255 is an error.
    pub fn parse(s: &str) -> Result<Colour, TxpixError> {
        let err = || TxpixError::ColourFormat {
            input: s.to_string(),
        };

        let mut channels = [0u8; 4];
        let mut parts = s.split(',');
        for channel in channels.iter_mut() {
            let part = parts.next().ok_or_else(err)?;
            *channel = part.trim().parse().map_err(|_| err())?;
        }
        if parts.next().is_some() {
            return Err(err());
        }

        Ok(Colour::from(channels))
    }
}

impl FromStr for Colour {
    type Err = TxpixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colour::parse(s)
    }
}

impl From<[u8; 4]> for Colour {
    fn from(c: [u8; 4]) -> Self {
        let [r, g, b, a] = c;
        Colour { r, g, b, a }
    }
}

impl From<Colour> for image::Rgba<u8> {
    fn from(c: Colour) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
    pub const WHITE: Colour = Colour {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
    pub const TRANSPARENT: Colour = Colour {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
}
