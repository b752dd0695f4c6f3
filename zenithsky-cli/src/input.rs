use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the window to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Search,
    Refresh,
    Insert(char),
    Backspace,
    ClearInput,
}

pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('r') if ctrl => Some(Action::Refresh),
        KeyCode::Char('u') if ctrl => Some(Action::ClearInput),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(Action::Insert(c)),
        KeyCode::F(5) => Some(Action::Refresh),
        KeyCode::Enter => Some(Action::Search),
        KeyCode::Backspace => Some(Action::Backspace),
        _ => None,
    }
}

/// Apply an editing action to the city field. Returns `false` for non-editing actions.
pub fn edit(input: &mut String, action: Action) -> bool {
    match action {
        Action::Insert(c) => input.push(c),
        Action::Backspace => {
            input.pop();
        }
        Action::ClearInput => input.clear(),
        Action::Quit | Action::Search | Action::Refresh => return false,
    }
    true
}
