use std::fs::OpenOptions;
use std::io::Write;

use env_logger::{Env, Target};

use crate::config::LOG_FILE_PATH;

/// Logs go to a file; the terminal belongs to the UI.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE_PATH)?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {:<5} {}: {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
    Ok(())
}
