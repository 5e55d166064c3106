use frame_profiler_protocol::{PrintableReportLine, ScaledTime, SplitNumber};

use crate::timer::ticks_to_seconds;

/// Share of the whole frame spent in a row. A zero-length frame counts as
/// fully spent so the column never shows NaN.
pub fn total_percent(elapsed_ticks: u64, root_elapsed_ticks: u64) -> f64 {
    if root_elapsed_ticks == 0 {
        100.0
    } else {
        elapsed_ticks as f64 / root_elapsed_ticks as f64 * 100.0
    }
}

/// Share of a row's own elapsed time not spent in child spans. A zero-length
/// row is defined as 100% self time.
pub fn self_percent(self_ticks: u64, elapsed_ticks: u64) -> f64 {
    if elapsed_ticks == 0 {
        100.0
    } else {
        self_ticks as f64 / elapsed_ticks as f64 * 100.0
    }
}

pub(crate) struct LineStats<'a> {
    pub name: &'a str,
    pub call_count: u32,
    pub elapsed_ticks: u64,
    pub self_ticks: u64,
}

pub(crate) fn build_line(
    stats: &LineStats<'_>,
    root_elapsed_ticks: u64,
    indent: u32,
) -> PrintableReportLine {
    let (name_front, name_back) = PrintableReportLine::split_name(stats.name);
    PrintableReportLine {
        indent,
        name_front,
        name_back,
        call_count: stats.call_count,
        total_percent: SplitNumber::from_value(total_percent(
            stats.elapsed_ticks,
            root_elapsed_ticks,
        )),
        total_time: ScaledTime::from_seconds(ticks_to_seconds(stats.elapsed_ticks)),
        self_percent: SplitNumber::from_value(self_percent(stats.self_ticks, stats.elapsed_ticks)),
        self_time: ScaledTime::from_seconds(ticks_to_seconds(stats.self_ticks)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_profiler_protocol::TimeUnit;

    #[test]
    fn percentages_against_root_and_self() {
        assert!((total_percent(25, 100) - 25.0).abs() < 1e-9);
        assert!((self_percent(10, 25) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn zero_elapsed_is_all_self() {
        assert_eq!(self_percent(0, 0), 100.0);
        assert_eq!(total_percent(0, 0), 100.0);
    }

    #[test]
    fn builds_split_row() {
        let line = build_line(
            &LineStats {
                name: "Renderer::Present",
                call_count: 3,
                elapsed_ticks: 25_000_000,
                self_ticks: 10_000_000,
            },
            100_000_000,
            2,
        );
        assert_eq!(line.indent, 2);
        assert_eq!(line.name_front, "Renderer::");
        assert_eq!(line.name_back, "Present");
        assert_eq!(line.call_count, 3);
        assert_eq!(line.total_percent.int_part, 25);
        assert_eq!(line.self_percent.int_part, 40);
        assert_eq!(line.total_time.int_part, 25);
        assert_eq!(line.total_time.unit, TimeUnit::Milliseconds);
        assert_eq!(line.self_time.int_part, 10);
    }
}
