//! The capture session: push/pop stack, current frame tree, bounded history
//! of sealed frames and deferred pause state.

use std::collections::VecDeque;

use frame_profiler_protocol::{FrameTiming, ProfilerCommand};

use crate::config::ProfilerConfig;
use crate::error::ProfilerError;
use crate::model::{NodeId, ProfilerTree};
use crate::timer::{Clock, MonotonicClock};

/// Frame profiler for one thread of instrumentation.
///
/// Call [`begin_frame`](Self::begin_frame) once per frame and wrap timed
/// regions in matched [`push`](Self::push)/[`pop`](Self::pop) pairs. Each
/// frame boundary seals the previous frame's tree into a bounded history,
/// unless the profiler is paused, in which case the tree is dropped.
#[derive(Debug)]
pub struct Profiler<C: Clock = MonotonicClock> {
    clock: C,
    config: ProfilerConfig,
    /// Oldest first.
    history: VecDeque<ProfilerTree>,
    current: Option<ProfilerTree>,
    stack: Vec<NodeId>,
    frame_number: u64,
    paused: bool,
    /// Pause/unpause request waiting for the next frame boundary.
    toggle_pause_requested: bool,
}

impl Profiler<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_config(ProfilerConfig::default())
    }

    pub fn with_config(config: ProfilerConfig) -> Self {
        Self::with_clock(MonotonicClock, config)
    }
}

impl Default for Profiler<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Profiler<C> {
    pub fn with_clock(clock: C, mut config: ProfilerConfig) -> Self {
        if config.history_capacity == 0 {
            log::warn!("profiler history capacity of 0 raised to 1");
            config.history_capacity = 1;
        }
        Self {
            clock,
            history: VecDeque::with_capacity(config.history_capacity),
            config,
            current: None,
            stack: Vec::new(),
            frame_number: 0,
            paused: false,
            toggle_pause_requested: false,
        }
    }

    pub const fn is_compiled_in() -> bool {
        true
    }

    /// Seal the frame in progress and start a new one.
    ///
    /// Fails without touching any state if a span is still open.
    pub fn begin_frame(&mut self) -> Result<(), ProfilerError> {
        if let Some(&innermost) = self.stack.last() {
            let innermost = self
                .current
                .as_ref()
                .map(|tree| tree.node_name(innermost).to_string())
                .unwrap_or_default();
            let err = ProfilerError::UnbalancedFrame {
                open: self.stack.len(),
                innermost,
            };
            log::error!("{err}");
            return Err(err);
        }

        let now = self.clock.now();
        self.frame_number += 1;

        if let Some(mut tree) = self.current.take() {
            tree.seal(now);
            if self.paused {
                log::trace!("discarded paused frame {}", tree.frame_number());
            } else {
                self.archive(tree);
            }
        }

        let label = self.config.frame_label(self.frame_number);
        self.current = Some(ProfilerTree::new(self.frame_number, label, now));

        if self.toggle_pause_requested {
            self.paused = !self.paused;
            self.toggle_pause_requested = false;
            log::debug!(
                "profiler {} at frame {}",
                if self.paused { "paused" } else { "resumed" },
                self.frame_number
            );
        }

        Ok(())
    }

    fn archive(&mut self, tree: ProfilerTree) {
        if self.history.len() >= self.config.history_capacity
            && let Some(evicted) = self.history.pop_front()
        {
            log::trace!("evicted frame {}", evicted.frame_number());
        }
        log::trace!(
            "archived frame {} ({} spans)",
            tree.frame_number(),
            tree.len()
        );
        self.history.push_back(tree);
    }

    pub fn end_frame(&mut self) {}

    /// Open a span as the child of the innermost open span.
    pub fn push(&mut self, name: impl Into<String>) -> Result<(), ProfilerError> {
        let Some(tree) = self.current.as_mut() else {
            let err = ProfilerError::NoActiveFrame { name: name.into() };
            log::error!("{err}");
            return Err(err);
        };
        let start = self.clock.now();
        let id = tree.open(name.into(), start, self.stack.last().copied());
        self.stack.push(id);
        Ok(())
    }

    /// Close the innermost open span. Closing a top-level span attaches it
    /// to the current frame's root.
    pub fn pop(&mut self) -> Result<(), ProfilerError> {
        let (Some(id), Some(tree)) = (self.stack.pop(), self.current.as_mut()) else {
            log::error!("{}", ProfilerError::UnbalancedPop);
            return Err(ProfilerError::UnbalancedPop);
        };
        tree.close(id, self.clock.now());
        if self.stack.is_empty() {
            tree.attach_to_root(id);
        }
        Ok(())
    }

    /// Run `f` inside a span named `name`.
    pub fn time<R>(
        &mut self,
        name: impl Into<String>,
        f: impl FnOnce(&mut Self) -> R,
    ) -> Result<R, ProfilerError> {
        self.push(name)?;
        let out = f(self);
        self.pop()?;
        Ok(out)
    }

    /// Number of currently open spans.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop archiving from the next frame boundary on. No-op when already paused.
    pub fn pause(&mut self) {
        if !self.paused {
            self.toggle_pause_requested = true;
        }
    }

    /// Resume archiving from the next frame boundary on. No-op when not paused.
    pub fn unpause(&mut self) {
        if self.paused {
            self.toggle_pause_requested = true;
        }
    }

    pub fn execute(&mut self, command: ProfilerCommand) {
        match command {
            ProfilerCommand::Pause => self.pause(),
            ProfilerCommand::Unpause => self.unpause(),
        }
    }

    /// Frames begun since the profiler was created.
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// The frame still being captured, if any.
    pub fn current_tree(&self) -> Option<&ProfilerTree> {
        self.current.as_ref()
    }

    pub fn max_num_previous_trees(&self) -> usize {
        self.config.history_capacity
    }

    pub fn num_previous_trees(&self) -> usize {
        self.history.len()
    }

    /// The archived tree `frames_ago` frames older than the newest one
    /// (0 = newest), or `None` when history is not that deep.
    pub fn previous_tree(&self, frames_ago: usize) -> Option<&ProfilerTree> {
        let idx = self.history.len().checked_sub(1)?.checked_sub(frames_ago)?;
        self.history.get(idx)
    }

    /// Every archived tree, oldest first.
    pub fn all_previous_trees(
        &self,
    ) -> impl DoubleEndedIterator<Item = &ProfilerTree> + ExactSizeIterator {
        self.history.iter()
    }

    /// Root elapsed time of every archived frame, oldest first.
    pub fn frame_timings(&self) -> Vec<FrameTiming> {
        self.history
            .iter()
            .map(|tree| FrameTiming {
                frame_number: tree.frame_number(),
                seconds: tree.elapsed_seconds(),
            })
            .collect()
    }

    /// Drop all retained history and any frame in progress.
    ///
    /// Open spans are discarded too, so no [`ProfileScope`](crate::ProfileScope)
    /// may be alive when this is called: its later pop fails as unbalanced.
    pub fn destroy(&mut self) {
        self.history.clear();
        self.current = None;
        self.stack.clear();
    }
}
