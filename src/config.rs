use thiserror::Error;

const DEFAULT_REGION: &str = "nyc3";
const DEFAULT_MANIFEST: &str = "manifest.json";
const DEFAULT_STATS_URL: &str = "https://aoe2.net/api";
const DEFAULT_FFMPEG: &str = "ffmpeg";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Connection details for the DigitalOcean Spaces bucket holding the taunts.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub manifest_key: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub discord_token: String,
    pub prefix: String,
    pub storage: StorageConfig,
    pub stats_api_url: String,
    pub ffmpeg_path: String,
}

impl Config {
    pub fn from_env(debug: bool) -> Result<Self, ConfigError> {
        Self::from_lookup(debug, |key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `debug` selects the development
    /// token and the `$` prefix.
    pub fn from_lookup<F>(debug: bool, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let token_key = if debug {
            "DISCORD_BOT_TOKEN_DEV"
        } else {
            "DISCORD_BOT_TOKEN"
        };

        let region =
            lookup("DIGITALOCEAN_SPACES_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
        let endpoint = lookup("DIGITALOCEAN_SPACES_ENDPOINT")
            .unwrap_or_else(|| format!("https://{region}.digitaloceanspaces.com"));

        Ok(Self {
            discord_token: required(token_key)?,
            prefix: if debug { "$" } else { "!" }.to_string(),
            storage: StorageConfig {
                bucket: required("TAUNT_SPACE")?,
                access_key: required("DIGITALOCEAN_SPACES_KEY_ID")?,
                secret_key: required("DIGITALOCEAN_SPACES_SECRET")?,
                manifest_key: lookup("TAUNT_MANIFEST")
                    .unwrap_or_else(|| DEFAULT_MANIFEST.to_string()),
                region,
                endpoint,
            },
            stats_api_url: lookup("AOE2NET_API_URL")
                .unwrap_or_else(|| DEFAULT_STATS_URL.to_string()),
            ffmpeg_path: lookup("FFMPEG_PATH").unwrap_or_else(|| DEFAULT_FFMPEG.to_string()),
        })
    }
}
