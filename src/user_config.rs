// SnakeEditor configuration
// Edit this file to customize your editor, then rebuild.

use crate::config::Config;

/// User configuration function
pub fn configure(config: &mut Config) {
    // File menu shortcuts
    config.bind("C-n", "new-file");
    config.bind("C-o", "open-file");
    config.bind("C-s", "save");
    config.bind("C-S-s", "save-as");
    config.bind("C-q", "exit");

    // Edit menu shortcuts
    config.bind("C-x", "cut");
    config.bind("C-c", "copy");
    config.bind("C-v", "paste");
    config.bind("C-a", "select-all");

    // Menu bar
    config.bind("F10", "open-menu");

    // Movement (Shift extends the selection)
    config.bind("Right", "forward-char");
    config.bind("Left", "backward-char");
    config.bind("Down", "next-line");
    config.bind("Up", "previous-line");
    config.bind("Home", "beginning-of-line");
    config.bind("End", "end-of-line");
    config.bind("C-Home", "beginning-of-file");
    config.bind("C-End", "end-of-file");
    config.bind("PageUp", "backward-page");
    config.bind("PageDown", "forward-page");

    // Editing
    config.bind("Enter", "insert-newline");
    config.bind("Tab", "insert-tab");
    config.bind("Backspace", "delete-previous-character");
    config.bind("Delete", "delete-next-character");

    // Settings
    config.set("tab_width", 4);
    config.set("show_status_line", true);
    config.set("theme", "dark");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyMap;

    #[test]
    fn test_user_config() {
        let mut config = Config::default();
        configure(&mut config);

        assert_eq!(config.keybindings.get("C-n"), Some(&"new-file".to_string()));
        assert_eq!(config.keybindings.get("C-o"), Some(&"open-file".to_string()));
        assert_eq!(config.keybindings.get("C-s"), Some(&"save".to_string()));
        assert_eq!(config.keybindings.get("C-S-s"), Some(&"save-as".to_string()));
        assert_eq!(config.keybindings.get("C-x"), Some(&"cut".to_string()));
        assert_eq!(config.keybindings.get("C-c"), Some(&"copy".to_string()));
        assert_eq!(config.keybindings.get("C-v"), Some(&"paste".to_string()));

        assert_eq!(config.tab_width(), 4);
        assert!(config.show_status_line());
        assert_eq!(config.theme(), "dark");
    }

    #[test]
    fn test_every_binding_resolves() {
        let mut config = Config::default();
        configure(&mut config);
        let keymap = KeyMap::from_bindings(&config.keybindings);
        assert_eq!(keymap.len(), config.keybindings.len());
    }
}
