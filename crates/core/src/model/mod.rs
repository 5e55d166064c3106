pub mod profiler_tree;
pub mod report_tree;

pub use profiler_tree::{NodeId, NodeRef, ProfilerNode, ProfilerTree};
pub use report_tree::{ReportNode, ReportRef, ReportTree};
