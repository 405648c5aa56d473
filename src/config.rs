//! Report configuration
//!
//! A single immutable `ReportConfig` is handed to the tree builder and the
//! renderer. It is validated once, before any input is read.

use crate::error::ConfigError;

pub const DEFAULT_THRESHOLD: f64 = 1.0;
pub const DEFAULT_INDENT: usize = 8;
pub const DEFAULT_PRECISION: usize = 1;

const MAX_INDENT: usize = 64;
const MAX_PRECISION: usize = 12;

/// Configuration for building and rendering a usage report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Minimum percentage of the grand total for a node to be shown
    pub threshold: f64,
    /// Spaces per depth level
    pub indent_width: usize,
    /// Decimal places for sizes printed in gigabytes
    pub precision: usize,
    /// Only count records under this path prefix; the tree is rooted there
    pub path_filter: Option<String>,
    /// Only count records owned by this user
    pub user_filter: Option<String>,
    /// Track per-owner totals and print a breakdown under every node
    pub show_users: bool,
    /// Fold runs of single-child directories without own usage into one line
    pub collapse: bool,
}

impl ReportConfig {
    /// Reject out-of-range values before any processing begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || !(0.0..=100.0).contains(&self.threshold) {
            return Err(ConfigError::Threshold(self.threshold));
        }
        if self.indent_width > MAX_INDENT {
            return Err(ConfigError::IndentWidth {
                got: self.indent_width,
                max: MAX_INDENT,
            });
        }
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::Precision {
                got: self.precision,
                max: MAX_PRECISION,
            });
        }
        if self.path_filter.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(ConfigError::EmptyFilter("path"));
        }
        if self.user_filter.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(ConfigError::EmptyFilter("user"));
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            indent_width: DEFAULT_INDENT,
            precision: DEFAULT_PRECISION,
            path_filter: None,
            user_filter: None,
            show_users: false,
            collapse: true,
        }
    }
}
