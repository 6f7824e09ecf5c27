use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{errors::Error, Result};

/// File locations shared by the collect and reconcile stages.
///
/// The reconcile stage needs no credentials, so paths load independently of
/// the full [`Config`].
#[derive(Clone, Debug)]
pub struct DataPaths {
    pub session_file: PathBuf,
    pub followers_file: PathBuf,
    pub followees_file: PathBuf,
}

impl DataPaths {
    pub fn load() -> Self {
        Self {
            session_file: env_path("SESSION_FILE").unwrap_or_else(|| PathBuf::from("session.json")),
            followers_file: env_path("FOLLOWERS_FILE")
                .unwrap_or_else(|| PathBuf::from("followers.json")),
            followees_file: env_path("FOLLOWEES_FILE")
                .unwrap_or_else(|| PathBuf::from("followees.json")),
        }
    }
}

/// Typed configuration for the collect stage.
#[derive(Clone, Debug)]
pub struct Config {
    pub ig_username: String,
    pub ig_password: String,
    pub paths: DataPaths,
}

impl Config {
    /// Load configuration from the environment (plus `.env` if present).
    ///
    /// Fails with a config error before any network activity when the
    /// required credentials are absent.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let ig_username = env_str("IG_USERNAME").and_then(non_empty);
        let ig_password = env_str("IG_PASSWORD").and_then(non_empty);

        let (Some(ig_username), Some(ig_password)) = (ig_username, ig_password) else {
            return Err(Error::Config(
                "IG_USERNAME and IG_PASSWORD environment variables are required".to_string(),
            ));
        };

        Ok(Self {
            ig_username,
            ig_password,
            paths: DataPaths::load(),
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).map(PathBuf::from)
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
