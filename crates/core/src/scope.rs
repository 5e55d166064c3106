use std::marker::PhantomData;

use crate::local;
use crate::timer::{now, ticks_to_seconds};

/// Opens a span on this thread's profiler and closes it when dropped.
///
/// Usually created through [`profile_scope!`](crate::profile_scope) or
/// [`profile_function!`](crate::profile_function).
#[must_use = "the span closes as soon as the guard is dropped"]
pub struct ProfileScope {
    open: bool,
    // The span lives on this thread's stack.
    _not_send: PhantomData<*const ()>,
}

impl ProfileScope {
    /// Open a span named `name`. Before this thread's first frame there is
    /// nothing to record into: the guard is inert and only a warning is logged.
    pub fn new(name: impl Into<String>) -> Self {
        let open = match local::push(name) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("span not recorded: {err}");
                false
            }
        };
        Self {
            open,
            _not_send: PhantomData,
        }
    }
}

impl Drop for ProfileScope {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        let result = local::pop();
        if let Err(err) = &result {
            log::error!("profile scope closed an unbalanced stack: {err}");
        }
        debug_assert!(result.is_ok(), "unbalanced profiler push/pop");
    }
}

/// Logs how long it lived when dropped, without touching any profiler tree.
#[must_use = "the timer logs as soon as it is dropped"]
pub struct ScopedLogTimer {
    name: &'static str,
    start: u64,
}

impl ScopedLogTimer {
    pub fn new(name: &'static str) -> Self {
        Self { name, start: now() }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        ticks_to_seconds(now().saturating_sub(self.start))
    }
}

impl Drop for ScopedLogTimer {
    fn drop(&mut self) {
        log::debug!(
            "{} elapsed time = {:.3}ms",
            self.name,
            self.elapsed_seconds() * 1000.0
        );
    }
}

/// Path of the enclosing function, e.g. `my_crate::world::update`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.strip_suffix("::f").unwrap_or(name)
    }};
}

/// Time the rest of the enclosing block under `name`.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        let _profile_scope = $crate::ProfileScope::new($name);
    };
}

/// Time the rest of the enclosing function under its path.
#[macro_export]
macro_rules! profile_function {
    () => {
        $crate::profile_scope!($crate::function_name!());
    };
}

/// Log the time spent in the rest of the enclosing block.
#[macro_export]
macro_rules! profile_log_scope {
    ($name:expr) => {
        let _profile_log_scope = $crate::ScopedLogTimer::new($name);
    };
}

#[cfg(all(test, feature = "enabled"))]
mod tests {
    use crate::local;

    fn instrumented_step() {
        crate::profile_function!();
        crate::profile_scope!("Inner");
    }

    #[test]
    fn scopes_nest_and_close_in_order() {
        local::begin_frame().expect("frame");
        {
            crate::profile_scope!("Outer");
            instrumented_step();
            instrumented_step();
            assert_eq!(local::with(|p| p.stack_depth()), 1);
        }
        assert_eq!(local::with(|p| p.stack_depth()), 0);
        local::begin_frame().expect("seal");

        let rows: Vec<(String, usize)> = local::with(|p| {
            let Some(tree) = p.previous_tree(0) else {
                return Vec::new();
            };
            tree.iter()
                .map(|n| (n.name().to_string(), n.children().len()))
                .collect()
        });
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[1], ("Outer".to_string(), 2));
        assert!(rows[2].0.ends_with("scope::tests::instrumented_step"));
        assert_eq!(rows[3], ("Inner".to_string(), 0));
    }

    #[test]
    fn scope_without_frame_is_skipped() {
        {
            let guard = crate::ProfileScope::new("Orphan");
            assert!(!guard.open);
            assert_eq!(local::with(|p| p.stack_depth()), 0);
        }
        assert_eq!(local::with(|p| p.stack_depth()), 0);
        assert!(local::with(|p| p.current_tree().is_none()));
    }

    #[test]
    fn log_timer_measures_its_lifetime() {
        let timer = crate::ScopedLogTimer::new("load");
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(timer.elapsed_seconds() >= 0.002);
    }
}
