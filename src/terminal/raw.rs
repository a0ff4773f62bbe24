use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use std::sync::atomic::{AtomicBool, Ordering};

static TERMINAL_INITIALIZED: AtomicBool = AtomicBool::new(false);
static KEYBOARD_ENHANCED: AtomicBool = AtomicBool::new(false);

/// RAII wrapper for raw mode and alternate screen.
/// Enables raw mode and enters alternate screen on creation.
/// Restores terminal state on drop.
pub struct RawMode {
    original_hook: Option<Box<dyn Fn(&std::panic::PanicHookInfo<'_>) + Sync + Send + 'static>>,
}

impl RawMode {
    /// Enter raw mode and alternate screen
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        crossterm::terminal::enable_raw_mode()?;

        let mut stdout = std::io::stdout();
        crossterm::execute!(
            stdout,
            crossterm::terminal::EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste,
            crossterm::cursor::Hide,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
        )?;
        TERMINAL_INITIALIZED.store(true, Ordering::SeqCst);

        // Without disambiguation most terminals send Ctrl+Shift+S as Ctrl+S
        if crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false) {
            crossterm::execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
            KEYBOARD_ENHANCED.store(true, Ordering::SeqCst);
            tracing::debug!("keyboard enhancement enabled");
        } else {
            tracing::debug!("keyboard enhancement not supported; Ctrl+Shift+S may read as Ctrl+S");
        }

        // Restore the terminal before printing a panic
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|info| {
            let _ = restore_terminal();
            tracing::error!("panic: {}", info);
            eprintln!("{}", info);
        }));

        Ok(Self {
            original_hook: Some(original_hook),
        })
    }

    /// Whether Shift is reported distinctly on Ctrl chords
    pub fn keyboard_enhanced() -> bool {
        KEYBOARD_ENHANCED.load(Ordering::SeqCst)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = restore_terminal();

        if let Some(hook) = self.original_hook.take() {
            std::panic::set_hook(hook);
        }
    }
}

fn restore_terminal() -> Result<(), Box<dyn std::error::Error>> {
    if TERMINAL_INITIALIZED.load(Ordering::SeqCst) {
        let mut stdout = std::io::stdout();

        if KEYBOARD_ENHANCED.swap(false, Ordering::SeqCst) {
            let _ = crossterm::execute!(stdout, PopKeyboardEnhancementFlags);
        }

        // Clear before leaving the alternate screen so terminals without
        // proper alternate screen support are not left with artifacts
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
            crossterm::cursor::MoveTo(0, 0),
            crossterm::cursor::Show,
            DisableMouseCapture,
            DisableBracketedPaste,
            crossterm::terminal::LeaveAlternateScreen
        );

        let _ = crossterm::terminal::disable_raw_mode();

        TERMINAL_INITIALIZED.store(false, Ordering::SeqCst);
    }
    Ok(())
}
