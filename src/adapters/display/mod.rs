//! Display Adapter
//!
//! Text rendering of scanner snapshots for the terminal dashboard.

mod dashboard;
mod format;

pub use dashboard::{
    render_alert_card, render_dashboard, render_stats, render_status_line, status_labels,
    DashboardOptions, EMPTY_SUBTITLE, EMPTY_TITLE,
};
pub use format::{format_count, format_number, time_ago};
