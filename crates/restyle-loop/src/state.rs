use std::fmt;

/// Paused/running flag. Starts paused; every toggle flips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Paused,
    Running,
}

impl LoopState {
    pub fn toggled(self) -> Self {
        match self {
            LoopState::Paused => LoopState::Running,
            LoopState::Running => LoopState::Paused,
        }
    }

    /// Text shown on the status label.
    pub fn label(self) -> &'static str {
        match self {
            LoopState::Paused => "Paused",
            LoopState::Running => "Running",
        }
    }
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused: nothing captured, the chain stops.
    Skipped,
    /// A frame went through the model and onto the surface.
    Rendered,
}

/// User input delivered with a frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    TogglePause,
    Quit,
}
