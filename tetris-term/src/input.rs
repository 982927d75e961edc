use console::Key;
use tetris_engine::{Action, DriverCommand};

/// Keyboard help shown next to the well
pub const CONTROLS: &[&str] = &[
    "Controls:",
    "  ← →   Move",
    "  ↑     Rotate",
    "  ↓     Soft drop",
    "  Space Hard drop",
    "  p     Pause",
    "  r     Restart",
    "  q     Quit",
];

/// Map a key press to a driver command. Unbound keys map to None.
pub fn command_for_key(key: &Key) -> Option<DriverCommand> {
    let action = match key {
        Key::ArrowLeft => Action::MoveLeft,
        Key::ArrowRight => Action::MoveRight,
        Key::ArrowDown => Action::SoftDrop,
        Key::ArrowUp => Action::Rotate,
        Key::Char(' ') => Action::HardDrop,
        Key::Char('p') | Key::Char('P') => Action::TogglePause,
        Key::Char('r') | Key::Char('R') => Action::Reset,
        Key::Char('q') | Key::Char('Q') | Key::Escape => return Some(DriverCommand::Stop),
        _ => return None,
    };
    Some(DriverCommand::Action(action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(command_for_key(&Key::ArrowLeft), Some(DriverCommand::Action(Action::MoveLeft)));
        assert_eq!(command_for_key(&Key::ArrowRight), Some(DriverCommand::Action(Action::MoveRight)));
        assert_eq!(command_for_key(&Key::ArrowDown), Some(DriverCommand::Action(Action::SoftDrop)));
        assert_eq!(command_for_key(&Key::ArrowUp), Some(DriverCommand::Action(Action::Rotate)));
    }

    #[test]
    fn test_character_keys() {
        assert_eq!(command_for_key(&Key::Char(' ')), Some(DriverCommand::Action(Action::HardDrop)));
        assert_eq!(command_for_key(&Key::Char('P')), Some(DriverCommand::Action(Action::TogglePause)));
        assert_eq!(command_for_key(&Key::Char('r')), Some(DriverCommand::Action(Action::Reset)));
        assert_eq!(command_for_key(&Key::Char('q')), Some(DriverCommand::Stop));
        assert_eq!(command_for_key(&Key::Char('x')), None);
        assert_eq!(command_for_key(&Key::Enter), None);
    }
}
