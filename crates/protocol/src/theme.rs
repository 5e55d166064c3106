use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Border,

    TextPrimary,
    TextMuted,

    // Report table
    TableHeaderBackground,
    NameFront,
    NameBack,
    IntPart,
    FloatPart,
    Unit,

    // Frame graph
    GraphBackground,
    FrameGood,
    FrameWarning,
    FrameDropped,
    SelectedFrame,
}
