//! Options for joining contents.

use crate::error::{Error, Result};

/// Options controlling when adjacent contents are coalesced.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOptions {
    /// Largest allowed gap between a run's right edge and the next origin
    pub max_gap: f64,

    /// Baseline tolerance used when a content has no owning line
    pub yo_tolerance: f64,

    /// Text inserted between merged texts
    pub separator: String,

    /// Never merge across horizontal buckets
    pub respect_buckets: bool,

    /// Only merge contents that share font, size, flags and color
    pub match_style: bool,
}

impl JoinOptions {
    /// Create new join options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum horizontal gap.
    pub fn with_max_gap(mut self, max_gap: f64) -> Self {
        self.max_gap = max_gap;
        self
    }

    /// Set the baseline tolerance for line-less contents.
    pub fn with_yo_tolerance(mut self, yo_tolerance: f64) -> Self {
        self.yo_tolerance = yo_tolerance;
        self
    }

    /// Set the separator inserted between merged texts.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Enable or disable the bucket boundary check.
    pub fn respect_buckets(mut self, respect: bool) -> Self {
        self.respect_buckets = respect;
        self
    }

    /// Enable or disable the style equality check.
    pub fn match_style(mut self, match_style: bool) -> Self {
        self.match_style = match_style;
        self
    }

    /// Reject tolerances that cannot be compared.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_gap.is_nan() {
            return Err(Error::Configuration("max_gap must be a number".into()));
        }
        if !(self.yo_tolerance >= 0.0) {
            return Err(Error::Configuration(format!(
                "yo_tolerance must be non-negative, got {}",
                self.yo_tolerance
            )));
        }
        Ok(())
    }
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            max_gap: 0.0,
            yo_tolerance: 0.01,
            separator: String::new(),
            respect_buckets: true,
            match_style: false,
        }
    }
}
