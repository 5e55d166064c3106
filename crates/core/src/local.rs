//! Per-thread profiler instance.
//!
//! Each thread owns its own [`Profiler`] with its own capture stack and
//! history, so instrumented code on different threads never interleaves
//! spans. The closures passed to [`with`] must not call back into this
//! module.

use std::cell::RefCell;

use frame_profiler_protocol::ProfilerCommand;

use crate::config::ProfilerConfig;
use crate::error::ProfilerError;
use crate::session::Profiler;

thread_local! {
    static PROFILER: RefCell<Profiler> = RefCell::new(Profiler::new());
}

/// Borrow this thread's profiler.
pub fn with<R>(f: impl FnOnce(&mut Profiler) -> R) -> R {
    PROFILER.with_borrow_mut(f)
}

/// Replace this thread's profiler with a fresh one built from `config`,
/// dropping its history.
///
/// Must not be called while a [`ProfileScope`](crate::ProfileScope) is open
/// on this thread: the new profiler has no span for the guard to close.
pub fn configure(config: ProfilerConfig) {
    PROFILER.replace(Profiler::with_config(config));
}

pub fn begin_frame() -> Result<(), ProfilerError> {
    with(Profiler::begin_frame)
}

pub fn end_frame() {
    with(Profiler::end_frame);
}

pub fn push(name: impl Into<String>) -> Result<(), ProfilerError> {
    with(|p| p.push(name))
}

pub fn pop() -> Result<(), ProfilerError> {
    with(Profiler::pop)
}

pub fn pause() {
    with(Profiler::pause);
}

pub fn unpause() {
    with(Profiler::unpause);
}

pub fn is_paused() -> bool {
    with(|p| p.is_paused())
}

pub fn execute(command: ProfilerCommand) {
    with(|p| p.execute(command));
}

pub fn frame_number() -> u64 {
    with(|p| p.frame_number())
}

/// Drop this thread's retained history and any open spans.
///
/// Must not be called while a [`ProfileScope`](crate::ProfileScope) is open
/// on this thread.
pub fn destroy() {
    with(Profiler::destroy);
}
