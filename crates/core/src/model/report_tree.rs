use std::collections::HashMap;

use serde::Serialize;

use crate::model::{NodeRef, ProfilerTree};
use crate::timer::ticks_to_seconds;

const ROOT: usize = 0;

/// Aggregated report row. Spans with the same name under the same parent
/// are merged into one node with summed times and a call count.
#[derive(Debug, Clone, Serialize)]
pub struct ReportNode {
    name: String,
    call_count: u32,
    elapsed_ticks: u64,
    self_ticks: u64,
    /// Arena indices, first-seen order.
    children: Vec<usize>,
    #[serde(skip)]
    child_index: HashMap<String, usize>,
}

impl ReportNode {
    fn from_node(node: NodeRef<'_>) -> Self {
        Self {
            name: node.name().to_string(),
            call_count: 1,
            elapsed_ticks: node.elapsed_ticks(),
            self_ticks: node.self_ticks(),
            children: Vec::new(),
            child_index: HashMap::new(),
        }
    }

    fn absorb(&mut self, node: NodeRef<'_>) {
        self.call_count += 1;
        self.elapsed_ticks += node.elapsed_ticks();
        self.self_ticks += node.self_ticks();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call_count(&self) -> u32 {
        self.call_count
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn self_ticks(&self) -> u64 {
        self.self_ticks
    }

    pub fn elapsed_seconds(&self) -> f64 {
        ticks_to_seconds(self.elapsed_ticks)
    }

    pub fn self_seconds(&self) -> f64 {
        ticks_to_seconds(self.self_ticks)
    }
}

/// Hierarchical report for one sealed frame.
///
/// Nodes live in a flat arena like [`ProfilerTree`], so building, walking
/// and dropping a report never recurses however deep the frame nests.
#[derive(Debug, Clone, Serialize)]
pub struct ReportTree {
    frame_number: u64,
    nodes: Vec<ReportNode>,
}

impl ReportTree {
    /// Build the hierarchical report for a sealed frame.
    pub fn from_tree(tree: &ProfilerTree) -> Self {
        let root = tree.root();
        let mut report = Self {
            frame_number: tree.frame_number(),
            nodes: vec![ReportNode::from_node(root)],
        };

        // Pre-order, so merged children keep the order they were first seen in.
        let mut work: Vec<(NodeRef<'_>, usize)> =
            root.children().rev().map(|c| (c, ROOT)).collect();
        while let Some((source, parent)) = work.pop() {
            let idx = report.merge_child(parent, source);
            work.extend(source.children().rev().map(|c| (c, idx)));
        }
        report
    }

    fn merge_child(&mut self, parent: usize, source: NodeRef<'_>) -> usize {
        let existing = self.nodes[parent].child_index.get(source.name()).copied();
        if let Some(idx) = existing {
            self.nodes[idx].absorb(source);
            return idx;
        }

        let idx = self.nodes.len();
        self.nodes.push(ReportNode::from_node(source));
        let parent = &mut self.nodes[parent];
        parent.children.push(idx);
        parent.child_index.insert(source.name().to_string(), idx);
        idx
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn root(&self) -> ReportRef<'_> {
        ReportRef {
            tree: self,
            idx: ROOT,
        }
    }

    /// Number of merged nodes including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.nodes[ROOT].elapsed_ticks
    }

    /// Pre-order walk yielding each node with its depth (root = 0).
    pub fn iter_depth_first(&self) -> impl Iterator<Item = (u32, ReportRef<'_>)> {
        let mut stack = vec![(0u32, self.root())];
        std::iter::from_fn(move || {
            let (depth, node) = stack.pop()?;
            stack.extend(node.children().rev().map(|c| (depth + 1, c)));
            Some((depth, node))
        })
    }
}

/// Borrowed view of one merged node together with its report.
#[derive(Debug, Clone, Copy)]
pub struct ReportRef<'a> {
    tree: &'a ReportTree,
    idx: usize,
}

impl<'a> ReportRef<'a> {
    pub fn node(&self) -> &'a ReportNode {
        &self.tree.nodes[self.idx]
    }

    pub fn is_root(&self) -> bool {
        self.idx == ROOT
    }

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    pub fn call_count(&self) -> u32 {
        self.node().call_count
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.node().elapsed_ticks
    }

    pub fn self_ticks(&self) -> u64 {
        self.node().self_ticks
    }

    pub fn children(
        &self,
    ) -> impl DoubleEndedIterator<Item = ReportRef<'a>> + ExactSizeIterator + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&idx| ReportRef { tree, idx })
    }

    pub fn child(&self, name: &str) -> Option<ReportRef<'a>> {
        self.node()
            .child_index
            .get(name)
            .map(|&idx| ReportRef {
                tree: self.tree,
                idx,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::profiler_tree::tests::build_tree;

    #[test]
    fn merges_same_named_siblings() {
        let tree = build_tree(40, &[("A", 0, 10, None), ("A", 10, 30, None)]);
        let report = ReportTree::from_tree(&tree);
        let root = report.root();

        assert_eq!(root.children().len(), 1);
        let a = root.child("A").expect("merged A");
        assert_eq!(a.call_count(), 2);
        assert_eq!(a.elapsed_ticks(), 30);
        assert_eq!(a.self_ticks(), 30);
        assert_eq!(root.self_ticks(), 10);
    }

    #[test]
    fn merge_recurses_into_grandchildren() {
        // Two calls to `Update`, each calling `Physics` once; the second
        // also calls `Audio`.
        let tree = build_tree(
            100,
            &[
                ("Update", 0, 40, None),
                ("Physics", 5, 25, Some(0)),
                ("Update", 40, 90, None),
                ("Physics", 45, 60, Some(2)),
                ("Audio", 60, 70, Some(2)),
            ],
        );
        let report = ReportTree::from_tree(&tree);
        let update = report.root().child("Update").expect("Update");
        assert_eq!(update.call_count(), 2);
        assert_eq!(update.elapsed_ticks(), 90);
        assert_eq!(update.self_ticks(), 45);

        let names: Vec<_> = update.children().map(|c| c.name()).collect();
        assert_eq!(names, ["Physics", "Audio"]);

        let physics = update.child("Physics").expect("Physics");
        assert_eq!(physics.call_count(), 2);
        assert_eq!(physics.elapsed_ticks(), 35);
        assert_eq!(report.len(), 4);
    }

    #[test]
    fn same_name_at_different_levels_stays_separate() {
        let tree = build_tree(
            50,
            &[("Draw", 0, 20, None), ("Draw", 5, 10, Some(0))],
        );
        let report = ReportTree::from_tree(&tree);
        let outer = report.root().child("Draw").expect("outer Draw");
        assert_eq!(outer.call_count(), 1);
        let inner = outer.child("Draw").expect("inner Draw");
        assert_eq!(inner.call_count(), 1);
        assert_eq!(inner.elapsed_ticks(), 5);
    }

    #[test]
    fn depth_first_walk_reports_depths() {
        let tree = build_tree(
            10,
            &[("A", 0, 5, None), ("B", 1, 2, Some(0)), ("C", 5, 9, None)],
        );
        let report = ReportTree::from_tree(&tree);
        let walk: Vec<_> = report
            .iter_depth_first()
            .map(|(depth, node)| (depth, node.name().to_string()))
            .collect();
        assert_eq!(
            walk,
            [
                (0, "Frame 1".to_string()),
                (1, "A".to_string()),
                (2, "B".to_string()),
                (1, "C".to_string()),
            ]
        );
    }

    #[test]
    fn very_deep_frame_builds_walks_and_drops() {
        const DEPTH: usize = 100_000;
        let rows: Vec<(&str, u64, u64, Option<usize>)> = (0..DEPTH)
            .map(|i| {
                let t = i as u64;
                ("Level", t, 2 * DEPTH as u64 - t, i.checked_sub(1))
            })
            .collect();
        let tree = build_tree(2 * DEPTH as u64 + 1, &rows);
        assert_eq!(tree.depth(), DEPTH);

        let report = ReportTree::from_tree(&tree);
        assert_eq!(report.len(), DEPTH + 1);

        let (max_depth, deepest) = report
            .iter_depth_first()
            .last()
            .map(|(d, n)| (d, n.elapsed_ticks()))
            .expect("walk");
        assert_eq!(max_depth as usize, DEPTH);
        assert_eq!(deepest, 2);
        drop(report);
    }
}
