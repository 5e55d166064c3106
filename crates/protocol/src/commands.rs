use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A developer-console command understood by the profiler.
///
/// Commands are parsed from their console names (case-insensitive) and
/// applied by the core, so any console front end can drive pause state
/// without knowing the profiler's API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfilerCommand {
    /// Request that archiving stops at the next frame boundary.
    Pause,
    /// Request that archiving resumes at the next frame boundary.
    Unpause,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown profiler command `{0}`")]
pub struct UnknownCommand(pub String);

impl ProfilerCommand {
    pub const ALL: [ProfilerCommand; 2] = [Self::Pause, Self::Unpause];

    pub fn console_name(self) -> &'static str {
        match self {
            Self::Pause => "ProfilerPause",
            Self::Unpause => "ProfilerUnpause",
        }
    }
}

impl std::fmt::Display for ProfilerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.console_name())
    }
}

impl std::str::FromStr for ProfilerCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.console_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCommand(trimmed.to_string()))
    }
}
