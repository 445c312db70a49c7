//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    JumpToTop,
    JumpToBottom,
    PageUp,
    PageDown,

    // Detail view
    /// Open the selected card.
    Open,
    /// Switch between the Main and Statistics tabs.
    NextTab,
    PrevTab,

    // Catalogue
    Search,
    LoadMore,

    // UI toggles
    ToggleHelp,
    ToggleTheme,

    // Confirmation
    Cancel,

    // Application
    Quit,
    ForceQuit,

    // No action
    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,

            // Esc closes the detail view, help, or clears the filter
            (KeyCode::Esc, _) => KeyAction::Cancel,

            // Navigation - vim style
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::MoveLeft,
            (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::MoveRight,

            // Navigation - arrow keys
            (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Up, _) => KeyAction::MoveUp,
            (KeyCode::Left, _) => KeyAction::MoveLeft,
            (KeyCode::Right, _) => KeyAction::MoveRight,

            // Jump
            (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::JumpToTop,
            (KeyCode::Char('G'), KeyModifiers::SHIFT) => KeyAction::JumpToBottom,
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,

            // Page navigation
            (KeyCode::PageUp, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) => KeyAction::PageDown,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => KeyAction::PageUp,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => KeyAction::PageDown,

            (KeyCode::Enter, _) => KeyAction::Open,

            (KeyCode::Tab, KeyModifiers::NONE) => KeyAction::NextTab,
            (KeyCode::BackTab, _) => KeyAction::PrevTab,

            (KeyCode::Char('/'), KeyModifiers::NONE) => KeyAction::Search,
            (KeyCode::Char('m'), KeyModifiers::NONE) => KeyAction::LoadMore,

            (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::ToggleHelp,
            (KeyCode::Char('?'), KeyModifiers::SHIFT) => KeyAction::ToggleHelp,
            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::ToggleTheme,

            _ => KeyAction::None,
        }
    }
}

/// A section of key bindings for the help display.
pub struct HelpSection {
    pub title: &'static str,
    pub bindings: Vec<KeyBinding>,
}

/// Key binding for display in help.
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Get all key bindings organized by section for help display.
pub fn get_help_sections() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "Browse",
            bindings: vec![
                KeyBinding { keys: "h/j/k/l", description: "Move between cards" },
                KeyBinding { keys: "←/↓/↑/→", description: "Move between cards" },
                KeyBinding { keys: "g/G", description: "Jump to first/last" },
                KeyBinding { keys: "Ctrl-u/d", description: "Page up/down" },
                KeyBinding { keys: "Enter", description: "Open detail view" },
            ],
        },
        HelpSection {
            title: "Detail View",
            bindings: vec![
                KeyBinding { keys: "h/l ←/→", description: "Previous/next item" },
                KeyBinding { keys: "Tab", description: "Main/Statistics tab" },
                KeyBinding { keys: "Esc", description: "Close detail view" },
            ],
        },
        HelpSection {
            title: "Search & Loading",
            bindings: vec![
                KeyBinding { keys: "/", description: "Search by name" },
                KeyBinding { keys: "Esc", description: "Clear search" },
                KeyBinding { keys: "m", description: "Load more items" },
            ],
        },
        HelpSection {
            title: "General",
            bindings: vec![
                KeyBinding { keys: "t", description: "Toggle dark/light theme" },
                KeyBinding { keys: "?", description: "Show this help" },
                KeyBinding { keys: "q", description: "Quit" },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('l'))), KeyAction::MoveRight);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Left)), KeyAction::MoveLeft);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Enter)), KeyAction::Open);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('m'))), KeyAction::LoadMore);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('/'))), KeyAction::Search);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('x'))), KeyAction::None);
        assert_eq!(
            KeyAction::from_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::ForceQuit
        );
    }

    #[test]
    fn test_help_sections_cover_bindings() {
        let sections = get_help_sections();
        assert_eq!(sections.len(), 4);
        assert!(sections.iter().all(|s| !s.bindings.is_empty()));
    }
}
