//! Menu System
//!
//! Menu data model for the File / Edit / About menu bar.
//! Rendering is handled by terminal/renderers/menu_renderer.rs.

use crate::core::command::EditorCommand;

/// Height of the menu bar in cells
pub const MENU_BAR_HEIGHT_CELLS: usize = 1;

/// A single menu item (action or separator)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuItem {
    /// Action item with label, command, and optional accelerator hint
    Action {
        label: &'static str,
        command: EditorCommand,
        hotkey: Option<&'static str>,
    },
    /// Separator line
    Separator,
}

impl MenuItem {
    pub const fn action(
        label: &'static str,
        command: EditorCommand,
        hotkey: Option<&'static str>,
    ) -> Self {
        MenuItem::Action {
            label,
            command,
            hotkey,
        }
    }

    pub const fn separator() -> Self {
        MenuItem::Separator
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, MenuItem::Separator)
    }
}

/// A dropdown menu (column of MenuItems)
#[derive(Clone, Debug)]
pub struct Menu {
    /// Menu title (shown in menu bar)
    pub title: &'static str,
    pub items: Vec<MenuItem>,
    /// Currently highlighted item index (None if menu closed)
    pub selected: Option<usize>,
}

impl Menu {
    pub fn new(title: &'static str, items: Vec<MenuItem>) -> Self {
        Self {
            title,
            items,
            selected: None,
        }
    }

    /// Move selection down, skipping separators
    pub fn select_next(&mut self) {
        self.step(|idx, max| (idx + 1) % max);
    }

    /// Move selection up, skipping separators
    pub fn select_prev(&mut self) {
        self.step(|idx, max| if idx == 0 { max - 1 } else { idx - 1 });
    }

    fn step(&mut self, advance: impl Fn(usize, usize) -> usize) {
        let max = self.items.len();
        if max == 0 || self.items.iter().all(MenuItem::is_separator) {
            return;
        }
        let mut idx = self.selected.unwrap_or(0);
        loop {
            idx = advance(idx, max);
            if !self.items[idx].is_separator() {
                break;
            }
        }
        self.selected = Some(idx);
    }

    /// First selectable item
    pub fn first_action(&self) -> Option<usize> {
        self.items.iter().position(|item| !item.is_separator())
    }

    /// Command of the highlighted item
    pub fn selected_command(&self) -> Option<EditorCommand> {
        match self.selected.and_then(|idx| self.items.get(idx)) {
            Some(MenuItem::Action { command, .. }) => Some(*command),
            _ => None,
        }
    }

    /// Width of the dropdown, label plus hint plus padding
    pub fn render_width(&self) -> usize {
        let max_label = self
            .items
            .iter()
            .map(|item| match item {
                MenuItem::Action { label, hotkey, .. } => {
                    let hotkey_len = hotkey.map_or(0, |h| h.len() + 2);
                    label.len() + hotkey_len
                }
                MenuItem::Separator => 3,
            })
            .max()
            .unwrap_or(10);

        max_label + 4
    }
}

/// The menu bar containing all top-level menus
#[derive(Clone, Debug)]
pub struct MenuBar {
    pub menus: Vec<Menu>,
    /// Currently open menu index (None if all closed)
    pub active_menu: Option<usize>,
}

impl MenuBar {
    pub fn new() -> Self {
        Self {
            menus: vec![Self::file_menu(), Self::edit_menu(), Self::about_menu()],
            active_menu: None,
        }
    }

    fn file_menu() -> Menu {
        Menu::new(
            "File",
            vec![
                MenuItem::action("New File", EditorCommand::NewFile, Some("Ctrl+N")),
                MenuItem::action("Open File", EditorCommand::OpenFile, Some("Ctrl+O")),
                MenuItem::action("Save", EditorCommand::Save, Some("Ctrl+S")),
                MenuItem::action("Save As", EditorCommand::SaveAs, Some("Ctrl+Shift+S")),
                MenuItem::separator(),
                MenuItem::action("Exit", EditorCommand::Exit, None),
            ],
        )
    }

    fn edit_menu() -> Menu {
        Menu::new(
            "Edit",
            vec![
                MenuItem::action("Cut", EditorCommand::Cut, Some("Ctrl+X")),
                MenuItem::action("Copy", EditorCommand::Copy, Some("Ctrl+C")),
                MenuItem::action("Paste", EditorCommand::Paste, Some("Ctrl+V")),
            ],
        )
    }

    fn about_menu() -> Menu {
        Menu::new(
            "About",
            vec![
                MenuItem::action("Release Notes", EditorCommand::ReleaseNotes, None),
                MenuItem::separator(),
                MenuItem::action("About", EditorCommand::About, None),
            ],
        )
    }

    /// Open a menu by index, highlighting its first item
    pub fn open_menu(&mut self, index: usize) {
        if index < self.menus.len() {
            if let Some(old_idx) = self.active_menu {
                self.menus[old_idx].selected = None;
            }
            self.active_menu = Some(index);
            self.menus[index].selected = self.menus[index].first_action();
        }
    }

    pub fn close(&mut self) {
        if let Some(idx) = self.active_menu {
            self.menus[idx].selected = None;
        }
        self.active_menu = None;
    }

    /// Move to next menu (right)
    pub fn next_menu(&mut self) {
        if let Some(idx) = self.active_menu {
            self.open_menu((idx + 1) % self.menus.len());
        }
    }

    /// Move to previous menu (left)
    pub fn prev_menu(&mut self) {
        if let Some(idx) = self.active_menu {
            let prev = if idx == 0 {
                self.menus.len() - 1
            } else {
                idx - 1
            };
            self.open_menu(prev);
        }
    }

    pub fn active(&mut self) -> Option<&mut Menu> {
        self.active_menu.map(|idx| &mut self.menus[idx])
    }

    /// Close the bar and return the highlighted command
    pub fn execute_selected(&mut self) -> Option<EditorCommand> {
        let cmd = self
            .active_menu
            .and_then(|idx| self.menus[idx].selected_command());
        self.close();
        cmd
    }

    pub fn is_open(&self) -> bool {
        self.active_menu.is_some()
    }

    /// Menu bar layout (title, x_start, x_end) for rendering and hit-testing
    pub fn layout(&self) -> Vec<(&'static str, usize, usize)> {
        let mut result = Vec::new();
        let mut x = 1; // leave a margin
        for menu in &self.menus {
            let title_len = menu.title.len() + 2;
            result.push((menu.title, x, x + title_len));
            x += title_len + 1;
        }
        result
    }

    /// Menu whose title covers `column` on the bar row
    pub fn title_at(&self, column: usize) -> Option<usize> {
        self.layout()
            .iter()
            .position(|(_, start, end)| column >= *start && column < *end)
    }

    /// Item of the open dropdown at a screen cell. Dropdown rows start right
    /// below the bar.
    pub fn item_at(&self, column: usize, row: usize) -> Option<usize> {
        let idx = self.active_menu?;
        let menu = &self.menus[idx];
        let (_, start_x, _) = *self.layout().get(idx)?;
        if row < MENU_BAR_HEIGHT_CELLS
            || column < start_x
            || column >= start_x + menu.render_width()
        {
            return None;
        }
        let item = row - MENU_BAR_HEIGHT_CELLS;
        match menu.items.get(item) {
            Some(MenuItem::Action { .. }) => Some(item),
            _ => None,
        }
    }

    /// Whether a cell lies on the bar or the open dropdown
    pub fn covers(&self, column: usize, row: usize) -> bool {
        if row < MENU_BAR_HEIGHT_CELLS {
            return true;
        }
        let Some(idx) = self.active_menu else {
            return false;
        };
        let menu = &self.menus[idx];
        match self.layout().get(idx) {
            Some((_, start_x, _)) => {
                row < MENU_BAR_HEIGHT_CELLS + menu.items.len()
                    && column >= *start_x
                    && column < start_x + menu.render_width()
            }
            None => false,
        }
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}
