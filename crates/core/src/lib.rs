//! Frame-based hierarchical profiler.
//!
//! Instrumented code opens and closes named spans every frame; each frame
//! boundary seals the span tree into a bounded history. Sealed trees are
//! turned into name-merged [`ReportTree`]s and from there into flat or
//! nested report rows for display.
//!
//! ```text
//!   push/pop ─▶ ProfilerTree ─▶ history ring ─▶ ReportTree ─▶ PrintableReportLine[] ─▶ text / TUI
//!              (per frame)      (oldest evicted)  (merged)      (flat or nested)
//! ```
//!
//! Building without the default `enabled` feature swaps [`Profiler`] for a
//! zero-sized stub whose operations do nothing.

pub mod config;
pub mod error;
pub mod local;
pub mod model;
pub mod scope;
pub mod timer;
pub mod views;

#[cfg(feature = "enabled")]
mod session;
#[cfg(not(feature = "enabled"))]
#[path = "stub.rs"]
mod session;

pub use config::ProfilerConfig;
pub use error::{ConfigError, ProfilerError};
pub use model::{NodeId, NodeRef, ProfilerNode, ProfilerTree, ReportNode, ReportRef, ReportTree};
pub use scope::{ProfileScope, ScopedLogTimer};
pub use session::Profiler;
pub use timer::{Clock, ManualClock, MonotonicClock};

/// Whether span capture is compiled into this build.
pub const COMPILED_IN: bool = cfg!(feature = "enabled");
