use serde::{Deserialize, Serialize};

/// Separator between the namespace part and the leaf part of a span name.
pub const NAME_SEPARATOR: char = ':';

/// Display unit picked by [`ScaledTime::from_seconds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimeUnit {
    /// Maximum number of ×1000 scale-ups applied to a duration.
    pub const MAX_SCALE_STEPS: u32 = 3;

    fn from_scale_steps(steps: u32) -> Self {
        match steps {
            0 => Self::Seconds,
            1 => Self::Milliseconds,
            2 => Self::Microseconds,
            _ => Self::Nanoseconds,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Seconds => "s",
            Self::Milliseconds => "ms",
            Self::Microseconds => "us",
            Self::Nanoseconds => "ns",
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A non-negative value split into its integer and fractional parts so
/// renderers can color and align them separately.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SplitNumber {
    pub int_part: u64,
    pub frac_part: f64,
}

impl SplitNumber {
    pub fn from_value(value: f64) -> Self {
        let value = value.max(0.0);
        let whole = value.trunc();
        Self {
            int_part: whole as u64,
            frac_part: value - whole,
        }
    }

    pub fn value(&self) -> f64 {
        self.int_part as f64 + self.frac_part
    }
}

/// A duration scaled into the largest unit that keeps its integer part
/// non-zero, capped at nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledTime {
    pub int_part: u64,
    /// Kept for seconds and milliseconds only; always zero for the finer units.
    pub frac_part: f64,
    pub unit: TimeUnit,
}

impl ScaledTime {
    pub fn from_seconds(seconds: f64) -> Self {
        let mut value = seconds.max(0.0);
        let mut steps = 0;
        while value < 1.0 {
            value *= 1000.0;
            steps += 1;
            if steps >= TimeUnit::MAX_SCALE_STEPS {
                break;
            }
        }

        let unit = TimeUnit::from_scale_steps(steps);
        let split = SplitNumber::from_value(value);
        let frac_part = match unit {
            TimeUnit::Seconds | TimeUnit::Milliseconds => split.frac_part,
            TimeUnit::Microseconds | TimeUnit::Nanoseconds => 0.0,
        };

        Self {
            int_part: split.int_part,
            frac_part,
            unit,
        }
    }
}

/// How a flat report orders its rows. Both modes sort descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortMode {
    SelfTime,
    #[default]
    TotalTime,
}

impl SortMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::SelfTime => Self::TotalTime,
            Self::TotalTime => Self::SelfTime,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SelfTime => "SELF",
            Self::TotalTime => "TOTAL",
        }
    }
}

/// One row of a flat or nested profiler report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintableReportLine {
    /// Nesting depth; always zero in flat reports.
    pub indent: u32,
    /// Name up to and including the last `:`, or the whole name.
    pub name_front: String,
    /// Remainder after the last `:`.
    pub name_back: String,
    pub call_count: u32,
    pub total_percent: SplitNumber,
    pub total_time: ScaledTime,
    pub self_percent: SplitNumber,
    pub self_time: ScaledTime,
}

impl PrintableReportLine {
    /// Split a span name at its last [`NAME_SEPARATOR`], keeping the
    /// separator on the front half.
    pub fn split_name(name: &str) -> (String, String) {
        match name.rfind(NAME_SEPARATOR) {
            Some(idx) => {
                let (front, back) = name.split_at(idx + NAME_SEPARATOR.len_utf8());
                (front.to_string(), back.to_string())
            }
            None => (name.to_string(), String::new()),
        }
    }

    /// The full span name this row was built from.
    pub fn name(&self) -> String {
        format!("{}{}", self.name_front, self.name_back)
    }
}
