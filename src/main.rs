//! SnakeEditor - a small terminal text editor
//!
//! This is the main entry point. It parses CLI arguments, sets up logging and
//! hands over to the terminal front end.

use snake_editor::{cli, config, logging, run};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse()?;

    if cli.help {
        println!("{}", cli::USAGE);
        return Ok(());
    }
    if cli.version {
        println!("snake-editor {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration, then apply CLI overrides
    let mut config = config::Config::load();
    cli.apply_to_config(&mut config);

    let log_path = logging::init(cli.log_file.as_deref())?;
    tracing::debug!(log = %log_path.display(), "logging initialized");

    run::run_terminal_mode(&cli.files(), &config)
}
