/// High-level page events with element targeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Element lost focus
    Blur { target: String },
    /// The value of a form control changed (one keystroke)
    Input { target: String, value: String },
    /// Element was clicked
    Click { target: String },
    /// A form submission was attempted
    Submit { target: String },
}

/// Discriminant of an [`Event`], used as a subscription key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Blur,
    Input,
    Click,
    Submit,
}

impl Event {
    pub fn blur(target: impl Into<String>) -> Self {
        Self::Blur {
            target: target.into(),
        }
    }

    pub fn input(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Input {
            target: target.into(),
            value: value.into(),
        }
    }

    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: target.into(),
        }
    }

    pub fn submit(target: impl Into<String>) -> Self {
        Self::Submit {
            target: target.into(),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Blur { .. } => EventKind::Blur,
            Self::Input { .. } => EventKind::Input,
            Self::Click { .. } => EventKind::Click,
            Self::Submit { .. } => EventKind::Submit,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Self::Blur { target }
            | Self::Input { target, .. }
            | Self::Click { target }
            | Self::Submit { target } => target,
        }
    }
}
