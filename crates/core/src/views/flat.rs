use std::collections::BTreeMap;

use frame_profiler_protocol::{PrintableReportLine, SortMode};
use serde::Serialize;

use crate::model::ReportTree;
use crate::views::line::{LineStats, build_line};

/// Stats for one span name summed over an entire frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatEntry {
    pub name: String,
    pub call_count: u32,
    pub elapsed_ticks: u64,
    pub self_ticks: u64,
}

/// Aggregate every node of the report by name, regardless of position.
///
/// Rows are sorted descending by the chosen time; equal times keep
/// alphabetical order.
pub fn flat_entries(report: &ReportTree, sort: SortMode) -> Vec<FlatEntry> {
    let mut by_name: BTreeMap<&str, FlatEntry> = BTreeMap::new();

    for (_, node) in report.iter_depth_first() {
        let entry = by_name.entry(node.name()).or_insert_with(|| FlatEntry {
            name: node.name().to_string(),
            call_count: 0,
            elapsed_ticks: 0,
            self_ticks: 0,
        });
        entry.call_count += node.call_count();
        entry.elapsed_ticks += node.elapsed_ticks();
        entry.self_ticks += node.self_ticks();
    }

    let mut entries: Vec<FlatEntry> = by_name.into_values().collect();
    match sort {
        SortMode::SelfTime => entries.sort_by(|a, b| b.self_ticks.cmp(&a.self_ticks)),
        SortMode::TotalTime => entries.sort_by(|a, b| b.elapsed_ticks.cmp(&a.elapsed_ticks)),
    }
    entries
}

/// One printable row per unique span name. Total% is measured against the
/// report root, self% against each row's own elapsed time.
pub fn flat_report(report: &ReportTree, sort: SortMode) -> Vec<PrintableReportLine> {
    let root_elapsed = report.elapsed_ticks();
    flat_entries(report, sort)
        .iter()
        .map(|entry| {
            build_line(
                &LineStats {
                    name: &entry.name,
                    call_count: entry.call_count,
                    elapsed_ticks: entry.elapsed_ticks,
                    self_ticks: entry.self_ticks,
                },
                root_elapsed,
                0,
            )
        })
        .collect()
}
