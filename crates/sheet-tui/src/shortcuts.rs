use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::actions::Action;

/// Shortcut key definition with key matching capability
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key_display: &'static str,
    pub description: &'static str,
    pub action: Action,
    pub matcher: fn(&KeyEvent) -> bool,
}

/// Category of shortcuts
#[derive(Debug, Clone)]
pub struct ShortcutCategory {
    pub name: &'static str,
    pub shortcuts: Vec<Shortcut>,
}

impl Shortcut {
    pub fn matches(&self, key: &KeyEvent) -> bool {
        (self.matcher)(key)
    }
}

fn plain_char(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && !key.modifiers.contains(KeyModifiers::CONTROL)
}

/// All normal-mode shortcuts, grouped for the help panel
pub fn get_shortcuts() -> Vec<ShortcutCategory> {
    vec![
        ShortcutCategory {
            name: "Navigation",
            shortcuts: vec![
                Shortcut {
                    key_display: "↑/↓ or j/k",
                    description: "Move through result rows",
                    action: Action::NavigateToNextRow, // Represents both up/down
                    matcher: |key| {
                        matches!(
                            key.code,
                            KeyCode::Char('j') | KeyCode::Down | KeyCode::Char('k') | KeyCode::Up
                        )
                    },
                },
                Shortcut {
                    key_display: "g / Home",
                    description: "Jump to first row",
                    action: Action::NavigateToFirstRow,
                    matcher: |key| plain_char(key, 'g') || key.code == KeyCode::Home,
                },
                Shortcut {
                    key_display: "G / End",
                    description: "Jump to last row",
                    action: Action::NavigateToLastRow,
                    matcher: |key| plain_char(key, 'G') || key.code == KeyCode::End,
                },
            ],
        },
        ShortcutCategory {
            name: "Search",
            shortcuts: vec![
                Shortcut {
                    key_display: "/",
                    description: "Focus the search box (typing filters live)",
                    action: Action::FocusSearch,
                    matcher: |key| plain_char(key, '/'),
                },
                Shortcut {
                    key_display: "Ctrl+u",
                    description: "Clear the search query",
                    action: Action::ClearQuery,
                    matcher: |key| {
                        key.code == KeyCode::Char('u') && key.modifiers.contains(KeyModifiers::CONTROL)
                    },
                },
                Shortcut {
                    key_display: "Enter / Esc",
                    description: "Leave the search box (while searching)",
                    action: Action::BlurSearch,
                    // Only reachable in search mode, handled by the event loop
                    matcher: |_| false,
                },
            ],
        },
        ShortcutCategory {
            name: "Data",
            shortcuts: vec![Shortcut {
                key_display: "r",
                description: "Retry after a failed load",
                action: Action::Retry,
                matcher: |key| plain_char(key, 'r'),
            }],
        },
        ShortcutCategory {
            name: "Display",
            shortcuts: vec![
                Shortcut {
                    key_display: "t",
                    description: "Toggle light/dark theme",
                    action: Action::ToggleTheme,
                    matcher: |key| plain_char(key, 't'),
                },
                Shortcut {
                    key_display: "`",
                    description: "Toggle debug console",
                    action: Action::ToggleDebugConsole,
                    matcher: |key| key.code == KeyCode::Char('`'),
                },
                Shortcut {
                    key_display: "?",
                    description: "Toggle this help",
                    action: Action::ToggleShortcuts,
                    matcher: |key| key.code == KeyCode::Char('?'),
                },
                Shortcut {
                    key_display: "q / Ctrl+c",
                    description: "Quit",
                    action: Action::Quit,
                    matcher: |key| {
                        plain_char(key, 'q')
                            || (key.code == KeyCode::Char('c')
                                && key.modifiers.contains(KeyModifiers::CONTROL))
                    },
                },
            ],
        },
    ]
}

/// Get all shortcuts in a flat list for easy iteration
pub fn get_all_shortcuts_flat() -> Vec<Shortcut> {
    get_shortcuts()
        .into_iter()
        .flat_map(|category| category.shortcuts)
        .collect()
}

/// Find the normal-mode action for a key event
pub fn find_action_for_key(key: &KeyEvent) -> Action {
    // Up/down share one help entry but map to different actions
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => return Action::NavigateToPreviousRow,
        KeyCode::Down | KeyCode::Char('j') => return Action::NavigateToNextRow,
        _ => {}
    }

    get_all_shortcuts_flat()
        .into_iter()
        .find(|shortcut| shortcut.matches(key))
        .map(|shortcut| shortcut.action)
        .unwrap_or(Action::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_documented_keys_map_to_actions() {
        assert!(matches!(
            find_action_for_key(&key(KeyCode::Char('/'))),
            Action::FocusSearch
        ));
        assert!(matches!(
            find_action_for_key(&key(KeyCode::Char('t'))),
            Action::ToggleTheme
        ));
        assert!(matches!(
            find_action_for_key(&key(KeyCode::Char('r'))),
            Action::Retry
        ));
        assert!(matches!(
            find_action_for_key(&key(KeyCode::Char('?'))),
            Action::ToggleShortcuts
        ));
        assert!(matches!(
            find_action_for_key(&key(KeyCode::Char('q'))),
            Action::Quit
        ));
        assert!(matches!(find_action_for_key(&ctrl('c')), Action::Quit));
        assert!(matches!(find_action_for_key(&ctrl('u')), Action::ClearQuery));
    }

    #[test]
    fn test_up_and_down_are_distinct() {
        assert!(matches!(
            find_action_for_key(&key(KeyCode::Up)),
            Action::NavigateToPreviousRow
        ));
        assert!(matches!(
            find_action_for_key(&key(KeyCode::Char('j'))),
            Action::NavigateToNextRow
        ));
        assert!(matches!(
            find_action_for_key(&KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Action::NavigateToLastRow
        ));
    }

    #[test]
    fn test_unbound_key_is_none() {
        assert!(matches!(
            find_action_for_key(&key(KeyCode::Char('z'))),
            Action::None
        ));
        // Search-mode entries never fire in normal mode
        assert!(matches!(find_action_for_key(&key(KeyCode::Enter)), Action::None));
    }

    #[test]
    fn test_every_category_has_shortcuts() {
        let categories = get_shortcuts();
        assert_eq!(categories.len(), 4);
        assert!(categories.iter().all(|c| !c.shortcuts.is_empty()));
    }
}
