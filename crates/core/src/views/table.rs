//! Fixed-width text rendering of report rows, for consoles and log files.

use std::fmt::Write as _;

use frame_profiler_protocol::{FrameTiming, PrintableReportLine, ScaledTime, SplitNumber};

pub const INDENT_SIZE: usize = 1;
pub const NAME_SIZE: usize = 72;
pub const CALL_COUNT_SIZE: usize = 8;
pub const TOTAL_PERCENT_SIZE: usize = 10;
pub const TOTAL_TIME_SIZE: usize = 14;
pub const SELF_PERCENT_SIZE: usize = 10;
pub const SELF_TIME_SIZE: usize = 14;

/// `.ff` with the fraction truncated to hundredths.
pub fn format_fraction(frac: f64) -> String {
    let hundredths = ((frac.clamp(0.0, 1.0) * 100.0).floor() as u32).min(99);
    format!(".{hundredths:02}")
}

/// `25.00%`
pub fn format_percent(value: &SplitNumber) -> String {
    format!("{}{}%", value.int_part, format_fraction(value.frac_part))
}

/// `2.50ms`, or `12us` when there is no fractional part.
pub fn format_time(time: &ScaledTime) -> String {
    if time.frac_part == 0.0 {
        format!("{}{}", time.int_part, time.unit)
    } else {
        format!(
            "{}{}{}",
            time.int_part,
            format_fraction(time.frac_part),
            time.unit
        )
    }
}

/// Indented display name, truncated so it never runs into the next column.
pub fn format_name(line: &PrintableReportLine) -> String {
    let indent = " ".repeat(line.indent as usize * INDENT_SIZE);
    let full = format!("{indent}{}{}", line.name_front, line.name_back);
    full.chars().take(NAME_SIZE - 1).collect()
}

/// Render rows under a header as an aligned text table.
pub fn render_report_table(lines: &[PrintableReportLine]) -> String {
    let mut out = String::new();
    push_row(
        &mut out,
        ["FUNCTION NAME", "CALLS", "TOTAL%", "TOTAL TIME", "SELF%", "SELF TIME"],
    );
    for line in lines {
        push_row(
            &mut out,
            [
                &format_name(line),
                &line.call_count.to_string(),
                &format_percent(&line.total_percent),
                &format_time(&line.total_time),
                &format_percent(&line.self_percent),
                &format_time(&line.self_time),
            ],
        );
    }
    out
}

fn push_row(out: &mut String, cells: [&str; 6]) {
    let [name, calls, total_pct, total_time, self_pct, self_time] = cells;
    let row = format!(
        "{name:<w0$}{calls:<w1$}{total_pct:<w2$}{total_time:<w3$}{self_pct:<w4$}{self_time:<w5$}",
        w0 = NAME_SIZE,
        w1 = CALL_COUNT_SIZE,
        w2 = TOTAL_PERCENT_SIZE,
        w3 = TOTAL_TIME_SIZE,
        w4 = SELF_PERCENT_SIZE,
        w5 = SELF_TIME_SIZE,
    );
    let _ = writeln!(out, "{}", row.trim_end());
}

/// `FPS: 60  Frame Time: 16.667 ms`
pub fn render_frame_summary(timing: &FrameTiming) -> String {
    format!(
        "FPS: {}  Frame Time: {:.3} ms",
        timing.fps() as u64,
        timing.seconds * 1000.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_profiler_protocol::TimeUnit;

    fn line(indent: u32, front: &str, back: &str) -> PrintableReportLine {
        PrintableReportLine {
            indent,
            name_front: front.into(),
            name_back: back.into(),
            call_count: 2,
            total_percent: SplitNumber::from_value(25.5),
            total_time: ScaledTime::from_seconds(0.0025),
            self_percent: SplitNumber::from_value(100.0),
            self_time: ScaledTime::from_seconds(0.000_012),
        }
    }

    #[test]
    fn formats_parts() {
        assert_eq!(format_fraction(0.5), ".50");
        assert_eq!(format_fraction(0.999), ".99");
        assert_eq!(format_percent(&SplitNumber::from_value(40.0)), "40.00%");

        let whole = ScaledTime {
            int_part: 12,
            frac_part: 0.0,
            unit: TimeUnit::Microseconds,
        };
        assert_eq!(format_time(&whole), "12us");
        assert_eq!(format_time(&ScaledTime::from_seconds(1.5)), "1.50s");
    }

    #[test]
    fn table_aligns_columns() {
        let text = render_report_table(&[line(0, "Game::", "Update"), line(2, "Tick", "")]);
        let rows: Vec<_> = text.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("FUNCTION NAME"));
        assert_eq!(rows[0].find("CALLS"), Some(NAME_SIZE));
        assert!(rows[1].starts_with("Game::Update"));
        assert!(rows[2].starts_with("  Tick"));

        let calls_col = &rows[1][NAME_SIZE..NAME_SIZE + CALL_COUNT_SIZE];
        assert_eq!(calls_col.trim(), "2");
        assert!(rows[1].contains("25.50%"));
        assert!(rows[1].contains("2.50ms"));
        assert!(rows[1].contains("100.00%"));
        assert!(rows[1].ends_with("12us"));
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "x".repeat(NAME_SIZE * 2);
        let l = line(0, &long, "");
        assert_eq!(format_name(&l).len(), NAME_SIZE - 1);
    }

    #[test]
    fn frame_summary() {
        let timing = FrameTiming {
            frame_number: 9,
            seconds: 0.02,
        };
        assert_eq!(render_frame_summary(&timing), "FPS: 50  Frame Time: 20.000 ms");
    }
}
