//! Report rendering and display
//!
//! - `report` - threshold filtering and largest-first traversal into report lines
//! - `text` - indented, optionally colored text output
//! - `json` - JSON output
//! - `config` - presentation settings
//! - `utils` - size formatting and color helpers

mod config;
mod json;
mod report;
mod text;
mod utils;

pub use config::OutputConfig;
pub use json::{JsonEntry, JsonReport, write_json};
pub use report::{NodeLine, ReportLine, ReportLines, UserLine, percent};
pub use text::{TextFormatter, color_choice};
pub use utils::{format_gb, indent, write_colored};
