//! Keyboard shortcut registry and key-to-command mapping.

use cellsketch_core::Command;
use winit::keyboard::{Key, NamedKey};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub command: Command,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, command: Command) -> Self {
        Self { key, ctrl, command }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }

    pub fn description(&self) -> &'static str {
        self.command.description()
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Left", false, Command::MoveLeft),
            Shortcut::new("Right", false, Command::MoveRight),
            Shortcut::new("Up", false, Command::MoveUp),
            Shortcut::new("Down", false, Command::MoveDown),
            Shortcut::new("S", false, Command::PlaceSquare),
            Shortcut::new("T", false, Command::PlaceTriangle),
            Shortcut::new("S", true, Command::ExportSvg),
            Shortcut::new("P", true, Command::ExportPdf),
        ]
    }

    /// Display string for the shortcut bound to a command, if any.
    pub fn label_for(command: Command) -> Option<String> {
        Self::all()
            .into_iter()
            .find(|s| s.command == command)
            .map(|s| s.format())
    }

    /// Map a pressed key to a command.
    ///
    /// `ctrl` is the platform command modifier (Ctrl, or Cmd on macOS).
    /// Letters match regardless of case so Shift or Caps Lock don't matter.
    pub fn command_for_key(key: &Key, ctrl: bool) -> Option<Command> {
        match key {
            Key::Named(named) if !ctrl => match named {
                NamedKey::ArrowLeft => Some(Command::MoveLeft),
                NamedKey::ArrowRight => Some(Command::MoveRight),
                NamedKey::ArrowUp => Some(Command::MoveUp),
                NamedKey::ArrowDown => Some(Command::MoveDown),
                _ => None,
            },
            Key::Character(c) => Self::all()
                .into_iter()
                .find(|s| s.ctrl == ctrl && s.key.eq_ignore_ascii_case(c.as_str()))
                .map(|s| s.command),
            _ => None,
        }
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description());
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::SmolStr;

    fn char_key(c: &str) -> Key {
        Key::Character(SmolStr::new(c))
    }

    #[test]
    fn test_arrow_keys_move_cursor() {
        let cases = [
            (NamedKey::ArrowLeft, Command::MoveLeft),
            (NamedKey::ArrowRight, Command::MoveRight),
            (NamedKey::ArrowUp, Command::MoveUp),
            (NamedKey::ArrowDown, Command::MoveDown),
        ];
        for (named, command) in cases {
            assert_eq!(
                ShortcutRegistry::command_for_key(&Key::Named(named), false),
                Some(command)
            );
        }
    }

    #[test]
    fn test_letters_place_shapes() {
        assert_eq!(
            ShortcutRegistry::command_for_key(&char_key("s"), false),
            Some(Command::PlaceSquare)
        );
        assert_eq!(
            ShortcutRegistry::command_for_key(&char_key("T"), false),
            Some(Command::PlaceTriangle)
        );
    }

    #[test]
    fn test_ctrl_letters_export() {
        assert_eq!(
            ShortcutRegistry::command_for_key(&char_key("s"), true),
            Some(Command::ExportSvg)
        );
        assert_eq!(
            ShortcutRegistry::command_for_key(&char_key("p"), true),
            Some(Command::ExportPdf)
        );
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(ShortcutRegistry::command_for_key(&char_key("p"), false), None);
        assert_eq!(ShortcutRegistry::command_for_key(&char_key("t"), true), None);
        assert_eq!(
            ShortcutRegistry::command_for_key(&Key::Named(NamedKey::ArrowLeft), true),
            None
        );
        assert_eq!(
            ShortcutRegistry::command_for_key(&Key::Named(NamedKey::Escape), false),
            None
        );
    }

    #[test]
    fn test_every_command_has_a_shortcut() {
        for command in Command::ALL {
            assert!(ShortcutRegistry::label_for(command).is_some(), "{command:?}");
        }
        assert_eq!(
            ShortcutRegistry::label_for(Command::ExportPdf).as_deref(),
            Some("Ctrl+P")
        );
    }
}
