use clap::Parser;
use macropad_config::app::App;
use macropad_config::cli::CliArgs;
use macropad_config::util::log::log_dir;
use macropad_config::{log_info, log_warn};
use ratatui::crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};
use std::fs::{create_dir_all, File};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    let config = CliArgs::parse().into_config();

    // The TUI owns stdout, so dependency traces go to a file next to the other logs.
    let dir = log_dir();
    create_dir_all(&dir)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(File::create(dir.join("trace.log"))?))
        .with_ansi(false)
        .init();
    color_eyre::install()?;

    tracing::info!(?config, "starting");
    log_info!("Starting with {:?}", config);

    let mut terminal = ratatui::init();
    // Lets lone modifier and meta keys through for capture where the terminal supports it.
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        if let Err(e) = execute!(
            std::io::stdout(),
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        ) {
            log_warn!("Keyboard enhancement unavailable: {}", e);
        }
    }
    terminal.clear()?;

    let result = App::new(config).run(terminal).await;

    if enhanced {
        let _ = execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
    }
    ratatui::restore();
    result
}
