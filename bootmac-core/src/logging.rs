use env_logger::Target;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn file_target(path: &Path) -> io::Result<Target> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Target::Pipe(Box::new(file)))
}

/// Initialise logging once per process.
///
/// Logs go to `log_file` when it can be opened for append, otherwise stderr.
/// `RUST_LOG` still overrides the level.
pub fn init_with(log_file: Option<PathBuf>, debug: bool) {
    let target = log_file
        .as_deref()
        .and_then(|path| match file_target(path) {
            Ok(target) => Some(target),
            Err(err) => {
                eprintln!("Cannot open log file {}: {} (logging to stderr)", path.display(), err);
                None
            }
        })
        .unwrap_or(Target::Stderr);

    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(target)
        .format_timestamp(None)
        .try_init();
}
