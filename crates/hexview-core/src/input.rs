//! Keyboard input mapping.
//!
//! Keys are platform-neutral ([`Key`] plus [`Modifiers`]). [`key_action`] maps a key to an
//! [`Action`] based on which part of the viewer has focus:
//!
//! | Focus | Keys |
//! |---|---|
//! | body | arrows, Home/End, PageUp/PageDown, copy chord, Escape |
//! | toolbar | Enter / Shift+Enter, ArrowUp/ArrowDown (history), Escape |
//!
//! Anything else is left to the host. The copy chord is only taken while a cursor or a
//! selection exists, so the host's own copy keeps working otherwise.

use crate::commands::{Action, CopyAction, CursorAction, HistoryAction, SearchAction};
use crate::cursor::CursorMove;
use crate::layout::Focus;
use crate::state::HexViewState;

/// A key, independent of the input backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Enter.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Shift.
    pub shift: bool,
    /// Control.
    pub ctrl: bool,
    /// Alt / Option.
    pub alt: bool,
    /// Meta / Command.
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key.
    pub key: Key,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key without modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// The key with Shift held.
    pub fn shift(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                shift: true,
                ..Modifiers::NONE
            },
        }
    }

    /// The key with Control held.
    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
        }
    }

    /// The key with Meta held.
    pub fn meta(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                meta: true,
                ..Modifiers::NONE
            },
        }
    }
}

/// Whether the viewer handled a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyOutcome {
    /// The key was turned into an action; the host should not handle it.
    Consumed,
    /// Not ours.
    Ignored,
}

/// Ctrl+C or Cmd+C.
pub fn is_copy_chord(event: &KeyEvent) -> bool {
    let Key::Char(ch) = event.key else {
        return false;
    };
    (event.modifiers.ctrl || event.modifiers.meta)
        && !event.modifiers.alt
        && ch.eq_ignore_ascii_case(&'c')
}

/// Map a key press to an action for `state`'s current focus.
pub fn key_action(state: &HexViewState, event: &KeyEvent) -> Option<Action> {
    match state.layout.focus {
        Focus::Body => body_key(state, event),
        Focus::Toolbar => toolbar_key(event),
        Focus::None => None,
    }
}

fn body_key(state: &HexViewState, event: &KeyEvent) -> Option<Action> {
    if is_copy_chord(event) {
        let has_target = state.cursor.index.is_some() || state.selection.range.is_some();
        return has_target.then_some(Action::Copy(CopyAction::Copy));
    }
    let step = match event.key {
        Key::ArrowLeft => CursorMove::Left,
        Key::ArrowRight => CursorMove::Right,
        Key::ArrowUp => CursorMove::Up,
        Key::ArrowDown => CursorMove::Down,
        Key::Home => CursorMove::Home,
        Key::End => CursorMove::End,
        Key::PageUp => CursorMove::PageUp,
        Key::PageDown => CursorMove::PageDown,
        Key::Escape => return Some(Action::Escape),
        _ => return None,
    };
    Some(Action::Cursor(CursorAction::Move(step)))
}

fn toolbar_key(event: &KeyEvent) -> Option<Action> {
    match event.key {
        Key::Enter => Some(Action::Search(SearchAction::Commit {
            backward: event.modifiers.shift,
        })),
        Key::ArrowUp => Some(Action::History(HistoryAction::RecallOlder)),
        Key::ArrowDown => Some(Action::History(HistoryAction::RecallNewer)),
        Key::Escape => Some(Action::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focused(focus: Focus) -> HexViewState {
        let mut state = HexViewState::new(vec![0u8; 32]);
        state.layout.focus = focus;
        state
    }

    #[test]
    fn test_copy_chord() {
        assert!(is_copy_chord(&KeyEvent::ctrl(Key::Char('c'))));
        assert!(is_copy_chord(&KeyEvent::meta(Key::Char('C'))));
        assert!(!is_copy_chord(&KeyEvent::new(Key::Char('c'))));
        assert!(!is_copy_chord(&KeyEvent::ctrl(Key::Char('v'))));
    }

    #[test]
    fn test_copy_needs_a_target() {
        let mut state = focused(Focus::Body);
        let chord = KeyEvent::ctrl(Key::Char('c'));
        assert_eq!(key_action(&state, &chord), None);

        state.cursor.index = Some(3);
        assert_eq!(
            key_action(&state, &chord),
            Some(Action::Copy(CopyAction::Copy))
        );
    }

    #[test]
    fn test_keys_follow_focus() {
        let body = focused(Focus::Body);
        let toolbar = focused(Focus::Toolbar);
        let none = focused(Focus::None);

        assert_eq!(
            key_action(&body, &KeyEvent::new(Key::ArrowUp)),
            Some(Action::Cursor(CursorAction::Move(CursorMove::Up)))
        );
        assert_eq!(
            key_action(&toolbar, &KeyEvent::new(Key::ArrowUp)),
            Some(Action::History(HistoryAction::RecallOlder))
        );
        assert_eq!(
            key_action(&toolbar, &KeyEvent::shift(Key::Enter)),
            Some(Action::Search(SearchAction::Commit { backward: true }))
        );
        assert_eq!(key_action(&body, &KeyEvent::new(Key::Enter)), None);
        assert_eq!(key_action(&none, &KeyEvent::new(Key::ArrowUp)), None);
        assert_eq!(
            key_action(&body, &KeyEvent::new(Key::Escape)),
            Some(Action::Escape)
        );
    }
}
