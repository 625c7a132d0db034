use std::env;
use std::path::Path;

use anyhow::Context;
use tafsiri_config::Config;

/// Profile picked up from the working directory when no --config is given
const LOCAL_PROFILE: &str = "tafsiri.json";

/// Load the config from an explicit profile, the local profile, or the environment
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => load_profile(path)?,
        None if Path::new(LOCAL_PROFILE).exists() => load_profile(Path::new(LOCAL_PROFILE))?,
        None => {
            tracing::debug!("No config profile, using environment");
            Config::new()
        }
    };

    Ok(config)
}

fn load_profile(path: &Path) -> anyhow::Result<Config> {
    let mut config = Config::from_file(path)
        .with_context(|| format!("Failed to load profile {}", path.display()))?;

    // Keys are usually kept out of profile files
    if config.translator.secondary_api_key.is_none()
        && let Ok(key) = env::var("TAFSIRI_SECONDARY_API_KEY")
        && !key.trim().is_empty()
    {
        config.translator.secondary_api_key = Some(key);
    }

    Ok(config)
}
