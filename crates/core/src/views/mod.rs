pub mod flat;
pub mod line;
pub mod nested;
pub mod table;

pub use flat::{FlatEntry, flat_entries, flat_report};
pub use nested::nested_report;
pub use table::{render_frame_summary, render_report_table};

use crate::model::{ProfilerTree, ReportTree};

/// Build the hierarchical, name-merged report for a sealed frame.
pub fn build_report_tree(tree: &ProfilerTree) -> ReportTree {
    ReportTree::from_tree(tree)
}
