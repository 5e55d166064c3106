pub mod commands;
pub mod frame;
pub mod report;
pub mod theme;

pub use commands::{ProfilerCommand, UnknownCommand};
pub use frame::{FrameCost, FrameTiming};
pub use report::{PrintableReportLine, ScaledTime, SortMode, SplitNumber, TimeUnit};
pub use theme::ThemeToken;
