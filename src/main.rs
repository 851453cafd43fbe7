use anyhow::Result;
use taskboard::{config::Config, logging, tui};

fn main() -> Result<()> {
    // The board takes no arguments
    if let Some(arg) = std::env::args().nth(1) {
        anyhow::bail!("unexpected argument '{}'\n\nUsage: taskboard", arg);
    }

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    // Reported before the TUI takes over the terminal
    let _log_guard = match logging::init(&config) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("warning: logging disabled: {:#}", err);
            None
        }
    };
    if let Some(err) = config_error {
        tracing::warn!("using default config: {:#}", err);
    }

    let mut app = tui::App::new(&config)?;
    app.run()?;

    // Restore the terminal before printing the farewell
    drop(app);
    println!("{}", tui::FAREWELL);

    Ok(())
}
