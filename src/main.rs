#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};
use std::sync::Arc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use acctdesk::config::Config;
use acctdesk::logging;
use acctdesk::storage::{AccountManager, LocalBackend};
use acctdesk::tui::App;

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let manager = match &config.data_dir {
        Some(dir) => AccountManager::with_path(dir)?,
        None => AccountManager::new()?,
    };
    if let Err(e) = logging::init(&manager.base_path().join("acctdesk.log")) {
        eprintln!("acctdesk: logging disabled: {e}");
    }
    tracing::info!(data_dir = %manager.base_path().display(), "starting");

    manager.load_or_seed()?;
    let backend = Arc::new(LocalBackend::new(manager.clone(), &config.route_table())?);

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let mut app = App::new(config, manager, backend.clone(), backend)?;

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = app.run(&mut terminal);

    let restore_result = restore_terminal();
    match result {
        Err(e) => {
            tracing::error!(error = %e, "exiting with error");
            Err(e.into())
        }
        Ok(()) => restore_result.map_err(Into::into),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
