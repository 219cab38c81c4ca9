use std::path::{Path, PathBuf};

/// Loads `KEY=value` pairs from a `.env` file into the process environment.
///
/// With no explicit path the file is searched for from the current directory
/// upward. Variables already set in the environment win. A missing or
/// unreadable file is not an error: the token is only needed once a result
/// is asked for. Returns the file that was loaded, if any.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => {
            tracing::debug!("No .env file found, using the process environment only");
            None
        }
        Err(e) => {
            tracing::warn!("Ignoring .env file: {}", e);
            None
        }
    }
}
