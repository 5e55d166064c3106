use frame_profiler_protocol::PrintableReportLine;

use crate::model::ReportTree;
use crate::views::line::{LineStats, build_line};

/// One printable row per report node in call-tree order, indented by depth.
pub fn nested_report(report: &ReportTree) -> Vec<PrintableReportLine> {
    let root_elapsed = report.elapsed_ticks();
    report
        .iter_depth_first()
        .map(|(depth, node)| {
            build_line(
                &LineStats {
                    name: node.name(),
                    call_count: node.call_count(),
                    elapsed_ticks: node.elapsed_ticks(),
                    self_ticks: node.self_ticks(),
                },
                root_elapsed,
                depth,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::profiler_tree::tests::build_tree;

    #[test]
    fn indents_by_depth_in_call_order() {
        let tree = build_tree(
            100,
            &[
                ("Game::Update", 0, 25, None),
                ("Physics::Step", 5, 20, Some(0)),
                ("Game::Update", 30, 55, None),
                ("Renderer::Draw", 60, 90, None),
            ],
        );
        let lines = nested_report(&ReportTree::from_tree(&tree));
        let rows: Vec<_> = lines.iter().map(|l| (l.indent, l.name())).collect();
        assert_eq!(
            rows,
            [
                (0, "Frame 1".to_string()),
                (1, "Game::Update".to_string()),
                (2, "Physics::Step".to_string()),
                (1, "Renderer::Draw".to_string()),
            ]
        );

        let update = &lines[1];
        assert_eq!(update.call_count, 2);
        assert_eq!(update.total_percent.int_part, 50);
        assert_eq!(update.self_percent.int_part, 70);

        let physics = &lines[2];
        assert_eq!(physics.total_percent.int_part, 15);
        assert_eq!(physics.self_percent.int_part, 100);
    }
}
