//! Logging setup shared by the binaries.
//!
//! `RUST_LOG` overrides the configured level. HTTP client internals are held
//! at `warn` so request plumbing does not bury the application's own events.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Library targets pinned to `warn`.
pub const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls"];

/// Filter directives for `level` with the noisy modules pinned.
pub fn filter_directives(level: &str) -> String {
    let mut directives = String::from(level);
    for module in NOISY_MODULES {
        directives.push_str(&format!(",{module}=warn"));
    }
    directives
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(level)))
}

/// Log to stderr. Used by the CLI.
pub fn init_stderr(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log to `path` (appending), creating parent directories. Used by the TUI,
/// which owns the terminal.
pub fn init_file(level: &str, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    tracing::info!(path = %path.display(), level, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_pin_noisy_modules() {
        let d = filter_directives("debug");
        assert!(d.starts_with("debug,"));
        assert!(d.contains("reqwest=warn"));
        assert!(d.contains("hyper=warn"));
    }
}
