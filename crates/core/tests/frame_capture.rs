//! Integration test: capture real frames with the monotonic clock and check
//! the sealed trees and the reports built from them.

#![cfg(feature = "enabled")]

use std::collections::HashMap;
use std::thread::sleep;
use std::time::Duration;

use frame_profiler_core::views::{build_report_tree, flat_entries, flat_report, nested_report};
use frame_profiler_core::{ManualClock, Profiler, ProfilerConfig, ProfilerError, ReportTree};
use frame_profiler_protocol::SortMode;

const MS: u64 = 1_000_000;

#[test]
fn nested_spans_end_to_end() {
    let mut profiler = Profiler::new();
    profiler.begin_frame().expect("first frame");

    profiler.push("A").expect("push A");
    profiler.push("B").expect("push B");
    sleep(Duration::from_millis(5));
    profiler.pop().expect("pop B");
    sleep(Duration::from_millis(5));
    profiler.pop().expect("pop A");

    profiler.begin_frame().expect("seal frame 1");
    assert_eq!(profiler.num_previous_trees(), 1);
    assert_eq!(profiler.frame_number(), 2);

    let tree = profiler.previous_tree(0).expect("frame 1 archived");
    let root = tree.root();
    assert_eq!(root.children().len(), 1);

    let a = root.children().next().expect("A");
    assert_eq!(a.name(), "A");
    assert_eq!(a.children().len(), 1);
    let b = a.children().next().expect("B");
    assert_eq!(b.name(), "B");

    assert!(a.elapsed_ticks() >= 10 * MS, "A took {}", a.elapsed_ticks());
    assert!(a.self_ticks() >= 5 * MS, "A self {}", a.self_ticks());
    assert!(b.elapsed_ticks() >= 5 * MS, "B took {}", b.elapsed_ticks());
    assert_eq!(b.self_ticks(), b.elapsed_ticks());
    assert!(root.elapsed_ticks() >= a.elapsed_ticks());

    let report = build_report_tree(tree);
    let flat = flat_report(&report, SortMode::TotalTime);
    assert_eq!(flat.len(), 3);
    assert_eq!(flat[0].name(), "Frame 1");
    assert_eq!(flat[1].name(), "A");
    assert_eq!(flat[2].name(), "B");

    let expected = a.elapsed_ticks() as f64 / root.elapsed_ticks() as f64 * 100.0;
    assert!((flat[1].total_percent.value() - expected).abs() < 1e-6);

    let nested = nested_report(&report);
    let indents: Vec<_> = nested.iter().map(|l| l.indent).collect();
    assert_eq!(indents, [0, 1, 2]);
}

/// A small recursive workload: each level calls `Recurse` twice.
fn recurse(profiler: &mut Profiler, depth: u32) {
    if depth == 0 {
        return;
    }
    profiler
        .time("Recurse", |p| {
            p.time("Leaf", |_| ()).expect("leaf");
            recurse(p, depth - 1);
            recurse(p, depth - 1);
        })
        .expect("recurse");
}

#[test]
fn flat_and_nested_totals_agree() {
    let mut profiler = Profiler::new();
    profiler.begin_frame().expect("frame");
    recurse(&mut profiler, 4);
    profiler.begin_frame().expect("seal");

    let tree = profiler.previous_tree(0).expect("archived");
    let report = ReportTree::from_tree(tree);

    let mut nested_totals: HashMap<String, (u64, u32)> = HashMap::new();
    for (_, node) in report.iter_depth_first() {
        let entry = nested_totals.entry(node.name().to_string()).or_default();
        entry.0 += node.elapsed_ticks();
        entry.1 += node.call_count();
    }

    let flat = flat_entries(&report, SortMode::SelfTime);
    assert_eq!(flat.len(), nested_totals.len());
    for entry in &flat {
        assert_eq!(
            nested_totals.get(&entry.name),
            Some(&(entry.elapsed_ticks, entry.call_count)),
            "{}",
            entry.name
        );
    }

    // 1 + 2 + 4 + 8 calls to `Recurse`, each with one `Leaf`.
    let recurse_row = flat.iter().find(|e| e.name == "Recurse").expect("Recurse row");
    assert_eq!(recurse_row.call_count, 15);
    let leaf_row = flat.iter().find(|e| e.name == "Leaf").expect("Leaf row");
    assert_eq!(leaf_row.call_count, 15);

    for pair in flat.windows(2) {
        assert!(pair[0].self_ticks >= pair[1].self_ticks);
    }
}

#[test]
fn history_is_bounded_and_pause_freezes_it() {
    let mut profiler = Profiler::with_config(ProfilerConfig {
        history_capacity: 3,
        ..ProfilerConfig::default()
    });

    for _ in 0..6 {
        profiler.begin_frame().expect("frame");
        profiler.push("Tick").expect("push");
        profiler.pop().expect("pop");
    }
    profiler.begin_frame().expect("seal");
    let frames: Vec<_> = profiler
        .all_previous_trees()
        .map(|t| t.frame_number())
        .collect();
    assert_eq!(frames, [4, 5, 6]);

    profiler.pause();
    for _ in 0..4 {
        profiler.begin_frame().expect("paused frame");
    }
    assert!(profiler.is_paused());
    assert_eq!(profiler.previous_tree(0).map(|t| t.frame_number()), Some(7));
    assert!(profiler.previous_tree(3).is_none());

    assert_eq!(profiler.pop(), Err(ProfilerError::UnbalancedPop));
}

#[test]
fn deeply_nested_frame_reports_without_overflow() {
    const DEPTH: usize = 100_000;
    let clock = ManualClock::new();
    let mut profiler = Profiler::with_clock(clock.clone(), ProfilerConfig::default());
    profiler.begin_frame().expect("frame");
    for _ in 0..DEPTH {
        profiler.push("Descend").expect("push");
        clock.advance(1);
    }
    for _ in 0..DEPTH {
        clock.advance(1);
        profiler.pop().expect("pop");
    }
    profiler.begin_frame().expect("seal");

    let tree = profiler.previous_tree(0).expect("archived");
    assert_eq!(tree.depth(), DEPTH);

    let report = build_report_tree(tree);
    assert_eq!(report.len(), DEPTH + 1);

    let nested = nested_report(&report);
    assert_eq!(nested.len(), DEPTH + 1);
    assert_eq!(nested.last().map(|l| l.indent as usize), Some(DEPTH));

    let flat = flat_entries(&report, SortMode::TotalTime);
    let descend = flat.iter().find(|e| e.name == "Descend").expect("row");
    assert_eq!(descend.call_count as usize, DEPTH);
    assert_eq!(descend.self_ticks, 2 * DEPTH as u64);
}
