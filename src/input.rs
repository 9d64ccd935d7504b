use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::grid::Dir;
use crate::settings::Difficulty;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Dir),
    NewMaze,
    Reset,
    SetDifficulty(Difficulty),
    ToggleAlgorithm,
    ToggleSolution,
    Quit,
}

pub fn command_for(key: KeyEvent) -> Option<Command> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {}
        _ => return None,
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }
    let command = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Command::Move(Dir::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Command::Move(Dir::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Command::Move(Dir::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Command::Move(Dir::Right),
        KeyCode::Char('n') => Command::NewMaze,
        KeyCode::Char('r') => Command::Reset,
        KeyCode::Char('1') => Command::SetDifficulty(Difficulty::Easy),
        KeyCode::Char('2') => Command::SetDifficulty(Difficulty::Medium),
        KeyCode::Char('3') => Command::SetDifficulty(Difficulty::Hard),
        KeyCode::Char('g') => Command::ToggleAlgorithm,
        KeyCode::Char('?') => Command::ToggleSolution,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn press(code: KeyCode) -> Option<Command> {
        command_for(key(code, KeyEventKind::Press))
    }

    #[test]
    fn arrows_and_letters_move() {
        assert_eq!(press(KeyCode::Up), Some(Command::Move(Dir::Up)));
        assert_eq!(press(KeyCode::Char('w')), Some(Command::Move(Dir::Up)));
        assert_eq!(press(KeyCode::Char('s')), Some(Command::Move(Dir::Down)));
        assert_eq!(press(KeyCode::Char('a')), Some(Command::Move(Dir::Left)));
        assert_eq!(press(KeyCode::Right), Some(Command::Move(Dir::Right)));
        assert_eq!(press(KeyCode::Char('l')), Some(Command::Move(Dir::Right)));
    }

    #[test]
    fn releases_are_ignored() {
        assert_eq!(command_for(key(KeyCode::Up, KeyEventKind::Release)), None);
        assert_eq!(
            command_for(key(KeyCode::Up, KeyEventKind::Repeat)),
            Some(Command::Move(Dir::Up))
        );
    }

    #[test]
    fn control_c_quits() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(ev), Some(Command::Quit));
        assert_eq!(press(KeyCode::Char('c')), None);
    }

    #[test]
    fn game_keys() {
        assert_eq!(press(KeyCode::Char('3')), Some(Command::SetDifficulty(Difficulty::Hard)));
        assert_eq!(press(KeyCode::Char('?')), Some(Command::ToggleSolution));
        assert_eq!(press(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(press(KeyCode::Char('x')), None);
    }
}
