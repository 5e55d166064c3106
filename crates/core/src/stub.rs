//! No-op profiler compiled when the `enabled` feature is off. Every call is
//! an empty inline function so instrumented code costs nothing.

use std::marker::PhantomData;

use frame_profiler_protocol::{FrameTiming, ProfilerCommand};

use crate::config::ProfilerConfig;
use crate::error::ProfilerError;
use crate::model::ProfilerTree;
use crate::timer::{Clock, MonotonicClock};

#[derive(Debug)]
pub struct Profiler<C: Clock = MonotonicClock> {
    clock: PhantomData<fn() -> C>,
}

impl Profiler<MonotonicClock> {
    #[inline]
    pub fn new() -> Self {
        Self { clock: PhantomData }
    }

    #[inline]
    pub fn with_config(_config: ProfilerConfig) -> Self {
        Self::new()
    }
}

impl Default for Profiler<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Profiler<C> {
    #[inline]
    pub fn with_clock(_clock: C, _config: ProfilerConfig) -> Self {
        Self { clock: PhantomData }
    }

    pub const fn is_compiled_in() -> bool {
        false
    }

    #[inline]
    pub fn begin_frame(&mut self) -> Result<(), ProfilerError> {
        Ok(())
    }

    #[inline]
    pub fn end_frame(&mut self) {}

    #[inline]
    pub fn push(&mut self, _name: impl Into<String>) -> Result<(), ProfilerError> {
        Ok(())
    }

    #[inline]
    pub fn pop(&mut self) -> Result<(), ProfilerError> {
        Ok(())
    }

    #[inline]
    pub fn time<R>(
        &mut self,
        _name: impl Into<String>,
        f: impl FnOnce(&mut Self) -> R,
    ) -> Result<R, ProfilerError> {
        Ok(f(self))
    }

    #[inline]
    pub fn stack_depth(&self) -> usize {
        0
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        false
    }

    #[inline]
    pub fn pause(&mut self) {}

    #[inline]
    pub fn unpause(&mut self) {}

    #[inline]
    pub fn execute(&mut self, _command: ProfilerCommand) {}

    #[inline]
    pub fn frame_number(&self) -> u64 {
        0
    }

    #[inline]
    pub fn current_tree(&self) -> Option<&ProfilerTree> {
        None
    }

    #[inline]
    pub fn max_num_previous_trees(&self) -> usize {
        0
    }

    #[inline]
    pub fn num_previous_trees(&self) -> usize {
        0
    }

    #[inline]
    pub fn previous_tree(&self, _frames_ago: usize) -> Option<&ProfilerTree> {
        None
    }

    #[inline]
    pub fn all_previous_trees(
        &self,
    ) -> impl DoubleEndedIterator<Item = &ProfilerTree> + ExactSizeIterator {
        std::iter::empty()
    }

    #[inline]
    pub fn frame_timings(&self) -> Vec<FrameTiming> {
        Vec::new()
    }

    #[inline]
    pub fn destroy(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operation_is_inert() {
        let mut p = Profiler::new();
        p.begin_frame().expect("no-op");
        p.push("A").expect("no-op");
        p.pop().expect("no-op");
        p.pop().expect("unbalanced pops are not tracked");
        p.pause();
        p.begin_frame().expect("no-op");
        assert!(!p.is_paused());
        assert_eq!(p.frame_number(), 0);
        assert!(p.previous_tree(0).is_none());
        assert_eq!(p.all_previous_trees().len(), 0);
        assert!(!Profiler::<MonotonicClock>::is_compiled_in());
        assert_eq!(std::mem::size_of::<Profiler>(), 0);
    }
}
