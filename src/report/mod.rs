//! Report outputs: the CSV table and the length chart.
//!
//! Both writers overwrite existing files without asking and expect a
//! non-empty record list; callers skip export when nothing was retained.

pub mod chart;
pub mod table;

pub use chart::{
    CHART_TITLE, DEFAULT_PLOT_PATH, X_AXIS_LABEL, Y_AXIS_LABEL, chart_order, generate_plot,
    render_chart_svg,
};
pub use table::{DEFAULT_CSV_PATH, export_csv, read_csv};

use crate::error::{OutputError, Result};
use std::path::Path;

/// Creates the parent directory of `path` if it is missing.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| OutputError::WriteFailed {
            path: parent.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}
