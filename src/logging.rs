//! File logging. The terminal is owned by the UI, so events go to
//! `<data_dir>/acctdesk.log`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `acctdesk=debug`.
pub const LOG_ENV: &str = "ACCTDESK_LOG";

/// Installs the global subscriber writing to `path`.
///
/// Fails only if the file cannot be opened. A subscriber that is already set
/// is left in place.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
