/// Milestones the user reaches while learning the tool
///
/// Ordered: the help panel only ever moves forward through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HelpLevel {
    FileLoading,
    StartLine,
    FinishLine,
    SetLength,
    Expert,
}

impl HelpLevel {
    pub fn text(&self) -> &'static str {
        match self {
            Self::FileLoading => "Open or drop an image to start measuring. It never leaves this machine.",
            Self::StartLine => "Click somewhere to start a line.",
            Self::FinishLine => "A second click finishes the line. Or cancel with 'Esc'.",
            Self::SetLength => "Double click on a length to set the real-world size.",
            Self::Expert => "Congratulations - you are an expert now!",
        }
    }

    /// The last level; the help panel fades out once it is reached
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Expert)
    }
}

/// Emits each help level once, in non-decreasing order
#[derive(Debug, Clone, Default)]
pub struct HelpTracker {
    reached: Option<HelpLevel>,
}

impl HelpTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest level emitted so far
    pub fn current(&self) -> Option<HelpLevel> {
        self.reached
    }

    /// Returns `Some(level)` the first time a level above all previous ones is reached
    pub fn reach(&mut self, level: HelpLevel) -> Option<HelpLevel> {
        match self.reached {
            Some(reached) if level <= reached => None,
            _ => {
                self.reached = Some(level);
                Some(level)
            }
        }
    }
}
