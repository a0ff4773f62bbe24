//! Terminal (TUI) mode implementation.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::core::app::EditorApp;
use crate::core::clipboard;
use crate::terminal;
use crate::terminal::display::Display;

/// Idle poll interval; keeps the loop responsive without spinning
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Run in terminal (TUI) mode.
pub fn run_terminal_mode(files: &[PathBuf], config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = EditorApp::initialize_with_config(config, files, clipboard::system_or_local());
    let mut display = Display::new_terminal(config)?;
    app.page_rows = display.text_rows().max(1);

    let _raw_mode = terminal::raw::RawMode::new()?;
    let (cols, rows) = display.terminal_size;
    tracing::info!(
        cols,
        rows,
        keyboard_enhanced = terminal::raw::RawMode::keyboard_enhanced(),
        "terminal mode started"
    );

    let mut stdout = io::stdout();
    draw(&mut app, &mut display, &mut stdout)?;

    let mut event_handler = terminal::events::EventHandler::new();
    loop {
        if event_handler.poll(POLL_INTERVAL)? {
            let event = event_handler.read()?;
            let exit = terminal::event_handler::process_terminal_event(&mut app, &mut display, event)?;
            if exit {
                break;
            }
        }

        if display.dirty {
            draw(&mut app, &mut display, &mut stdout)?;
        }
    }

    tracing::info!("exiting");
    Ok(())
}

/// Render one frame and keep the window title in sync
fn draw(app: &mut EditorApp, display: &mut Display, stdout: &mut io::Stdout) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(title) = display.title_change(&app.title()) {
        terminal::render::set_title(stdout, &title)?;
    }
    display.render(app);
    terminal::render::render_display_to_terminal(display, stdout)?;
    display.swap_buffers();
    Ok(())
}
