//! Derived display metrics.
//!
//! Everything here is a pure function of its inputs: trend classification,
//! the data-quality score, status colors and the value formatters used by
//! the views.

pub mod change;
pub mod format;
pub mod quality;

pub use change::{ChangeResult, Direction, admission_change, percent_change};
pub use format::{format_admission_value, format_number, format_uptime};
pub use quality::{FreshnessRecord, FreshnessStatus, StatusColor, data_quality_score, status_color};
