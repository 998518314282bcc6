use chrono::NaiveDate;
use crossterm::event::KeyCode;
use tracing::trace;

use crate::state::Action;
use crate::window::{VisibleWindow, WEEK_LEN};

/// Keys the grid reacts to. Everything else passes through to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
}

impl NavKey {
    /// Parses DOM-style key names such as `ArrowLeft`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(NavKey::ArrowLeft),
            "ArrowRight" => Some(NavKey::ArrowRight),
            "ArrowUp" => Some(NavKey::ArrowUp),
            "ArrowDown" => Some(NavKey::ArrowDown),
            "Enter" => Some(NavKey::Enter),
            _ => None,
        }
    }

    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left => Some(NavKey::ArrowLeft),
            KeyCode::Right => Some(NavKey::ArrowRight),
            KeyCode::Up => Some(NavKey::ArrowUp),
            KeyCode::Down => Some(NavKey::ArrowDown),
            KeyCode::Enter => Some(NavKey::Enter),
            _ => None,
        }
    }
}

/// Result of feeding one key to the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not ours; the host should run its default behaviour
    Ignored,
    /// Focus moves to this date (may be unchanged at the window edge)
    Moved(NaiveDate),
    /// Enter on the focused date
    Commit(NaiveDate),
}

impl KeyOutcome {
    /// True when the host should suppress its own handling of the key.
    pub fn handled(&self) -> bool {
        !matches!(self, KeyOutcome::Ignored)
    }

    pub fn into_action(self) -> Option<Action> {
        match self {
            KeyOutcome::Ignored => None,
            KeyOutcome::Moved(date) => Some(Action::Focus(date)),
            KeyOutcome::Commit(date) => Some(Action::SelectDate(date)),
        }
    }
}

/// Moves focus within the window. Movement stops at the window edges; it
/// never wraps and never regenerates the window. Without a focused date
/// every key is ignored.
pub fn navigate(window: &VisibleWindow, focused: Option<NaiveDate>, key: NavKey) -> KeyOutcome {
    let Some(focused) = focused else {
        return KeyOutcome::Ignored;
    };
    let Some(index) = window.index_of(focused) else {
        return KeyOutcome::Ignored;
    };
    let last = window.len().saturating_sub(1);

    let target = match key {
        NavKey::ArrowLeft => index.saturating_sub(1),
        NavKey::ArrowRight => (index + 1).min(last),
        NavKey::ArrowUp => index.saturating_sub(WEEK_LEN),
        NavKey::ArrowDown => (index + WEEK_LEN).min(last),
        NavKey::Enter => return KeyOutcome::Commit(focused),
    };

    trace!(from = index, to = target, "focus move");
    window
        .get(target)
        .map(KeyOutcome::Moved)
        .unwrap_or(KeyOutcome::Ignored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> VisibleWindow {
        VisibleWindow::generate(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    fn at(window: &VisibleWindow, idx: usize) -> NaiveDate {
        window.get(idx).unwrap()
    }

    #[test]
    fn test_unfocused_keys_are_ignored() {
        let w = window();
        assert_eq!(navigate(&w, None, NavKey::ArrowLeft), KeyOutcome::Ignored);
        assert_eq!(navigate(&w, None, NavKey::Enter), KeyOutcome::Ignored);
    }

    #[test]
    fn test_moves() {
        let w = window();
        let start = Some(at(&w, 10));
        assert_eq!(navigate(&w, start, NavKey::ArrowLeft), KeyOutcome::Moved(at(&w, 9)));
        assert_eq!(navigate(&w, start, NavKey::ArrowRight), KeyOutcome::Moved(at(&w, 11)));
        assert_eq!(navigate(&w, start, NavKey::ArrowUp), KeyOutcome::Moved(at(&w, 3)));
        assert_eq!(navigate(&w, start, NavKey::ArrowDown), KeyOutcome::Moved(at(&w, 17)));
    }

    #[test]
    fn test_moves_clamp_at_edges() {
        let w = window();
        assert_eq!(navigate(&w, Some(at(&w, 14)), NavKey::ArrowDown), KeyOutcome::Moved(at(&w, 20)));
        assert_eq!(navigate(&w, Some(at(&w, 3)), NavKey::ArrowUp), KeyOutcome::Moved(at(&w, 0)));
        assert_eq!(navigate(&w, Some(at(&w, 0)), NavKey::ArrowLeft), KeyOutcome::Moved(at(&w, 0)));
        assert_eq!(navigate(&w, Some(at(&w, 20)), NavKey::ArrowRight), KeyOutcome::Moved(at(&w, 20)));
    }

    #[test]
    fn test_enter_commits_focus() {
        let w = window();
        let outcome = navigate(&w, Some(at(&w, 4)), NavKey::Enter);
        assert_eq!(outcome, KeyOutcome::Commit(at(&w, 4)));
        assert_eq!(outcome.into_action(), Some(Action::SelectDate(at(&w, 4))));
        assert!(outcome.handled());
    }

    #[test]
    fn test_key_names() {
        assert_eq!(NavKey::from_name("ArrowUp"), Some(NavKey::ArrowUp));
        assert_eq!(NavKey::from_name("Tab"), None);
        assert_eq!(NavKey::from_key_code(KeyCode::Down), Some(NavKey::ArrowDown));
        assert_eq!(NavKey::from_key_code(KeyCode::Char('j')), None);
    }
}
