/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    EditingDescription,
    EditingTime,
    ConfirmRemove,
    Notice, // Blocking message, e.g. "Too many tasks!"
}

impl UiMode {
    /// Whether keys go to a text field
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::EditingDescription | Self::EditingTime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_editing() {
        assert!(UiMode::EditingDescription.is_editing());
        assert!(UiMode::EditingTime.is_editing());
        assert!(!UiMode::Normal.is_editing());
        assert!(!UiMode::ConfirmRemove.is_editing());
    }
}
