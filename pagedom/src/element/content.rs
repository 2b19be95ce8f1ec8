#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    #[default]
    None,
    Text(String),
    /// Raw inner markup, kept verbatim (e.g. a spinner plus a label).
    Markup(String),
    Children(Vec<super::Element>),
}

impl Content {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(s) | Self::Markup(s) => s.is_empty(),
            Self::Children(c) => c.is_empty(),
        }
    }
}
