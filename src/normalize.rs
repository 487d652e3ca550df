use crate::TxpixError;
use regex::bytes::{NoExpand, Regex};

/// Strips every match of a removal pattern from raw input before it is split into
/// words. An empty pattern removes nothing.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    pattern: Option<Regex>,
}

impl Normalizer {
    pub fn new(pattern: &str) -> Result<Normalizer, TxpixError> {
        if pattern.is_empty() {
            return Ok(Normalizer::default());
        }
        Ok(Normalizer {
            pattern: Some(Regex::new(pattern)?),
        })
    }

    /// Delete every non-overlapping match. The replacement is literal, so `$` in the
    /// input is never expanded.
    pub fn apply(&self, data: &[u8]) -> Vec<u8> {
        match &self.pattern {
            Some(re) => re.replace_all(data, NoExpand(b"".as_slice())).into_owned(),
            None => data.to_vec(),
        }
    }
}
