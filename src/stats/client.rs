use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

use super::models::{LeaderboardEntry, LeaderboardKind, LeaderboardResponse, MatchRecord};
use super::strings::StringTable;

const GAME: &str = "aoe2de";
const LANGUAGE: &str = "en";
/// Largest page the API hands out in one request.
const MAX_COUNT: u32 = 10_000;

/// Errors that can occur while talking to aoe2.net.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Network or HTTP-level error from reqwest.
    #[error("could not reach the stats API: {0}")]
    Network(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error("stats API returned {status} for {endpoint}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    /// The response JSON could not be deserialized into the expected type.
    #[error("unexpected stats API response from {endpoint}: {message}")]
    Deserialize { endpoint: String, message: String },
}

/// Client for the aoe2.net REST API. The string table is fetched once in
/// [`StatsClient::connect`] and kept for the lifetime of the client.
pub struct StatsClient {
    http: reqwest::Client,
    base_url: String,
    strings: StringTable,
}

impl StatsClient {
    pub async fn connect(http: reqwest::Client, base_url: &str) -> Result<Self, StatsError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let value: serde_json::Value = get(
            &http,
            &base_url,
            "strings",
            &[("language", LANGUAGE.to_string())],
        )
        .await?;

        Ok(Self::with_strings(
            http,
            &base_url,
            StringTable::from_value(&value),
        ))
    }

    pub fn with_strings(http: reqwest::Client, base_url: &str, strings: StringTable) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            strings,
        }
    }

    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    /// Label for a numeric code, or `None` when the table has no such entry.
    pub fn lookup_display_string(&self, category: &str, id: i64) -> Option<&str> {
        self.strings.lookup(category, id)
    }

    /// Searches one board and returns the first entry whose name equals
    /// `name` ignoring case. Partial matches never count.
    pub async fn find_exact_match(
        &self,
        name: &str,
        kind: LeaderboardKind,
    ) -> Result<Option<LeaderboardEntry>, StatsError> {
        debug!("Searching {kind} for {name}");
        let resp: LeaderboardResponse = get(
            &self.http,
            &self.base_url,
            "leaderboard",
            &leaderboard_params(name, kind),
        )
        .await?;

        Ok(pick_exact_match(resp.leaderboard, name, kind))
    }

    /// First exact match on any board, in board id order.
    pub async fn find_any_board(&self, name: &str) -> Result<Option<LeaderboardEntry>, StatsError> {
        for kind in LeaderboardKind::ALL {
            if let Some(entry) = self.find_exact_match(name, kind).await? {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }

    pub async fn matches_for(&self, profile_id: i64) -> Result<Vec<MatchRecord>, StatsError> {
        debug!("Fetching match history for profile {profile_id}");
        get(
            &self.http,
            &self.base_url,
            "player/matches",
            &[
                ("profile_id", profile_id.to_string()),
                ("start", "1".to_string()),
                ("count", MAX_COUNT.to_string()),
            ],
        )
        .await
    }
}

fn leaderboard_params(name: &str, kind: LeaderboardKind) -> Vec<(&'static str, String)> {
    vec![
        ("leaderboard_id", kind.id().to_string()),
        ("search", name.to_string()),
        ("start", "1".to_string()),
        ("count", MAX_COUNT.to_string()),
    ]
}

pub(crate) fn pick_exact_match(
    entries: Vec<LeaderboardEntry>,
    name: &str,
    kind: LeaderboardKind,
) -> Option<LeaderboardEntry> {
    let wanted = name.to_lowercase();
    entries
        .into_iter()
        .find(|e| e.name.to_lowercase() == wanted)
        .map(|mut e| {
            e.kind = kind;
            e
        })
}

async fn get<T: DeserializeOwned>(
    http: &reqwest::Client,
    base_url: &str,
    endpoint: &str,
    params: &[(&str, String)],
) -> Result<T, StatsError> {
    let url = format!("{base_url}/{endpoint}");
    debug!("Calling {url} with {params:?}");

    let response = http
        .get(&url)
        .query(&[("game", GAME)])
        .query(params)
        .send()
        .await
        .map_err(|e| {
            error!("Failed API call to {url}: {e}");
            StatsError::Network(e)
        })?;

    let status = response.status();
    if !status.is_success() {
        error!("Failed API call to {url}: {status}");
        return Err(StatsError::Status {
            endpoint: endpoint.to_string(),
            status,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| StatsError::Deserialize {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, profile_id: i64, rating: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            profile_id,
            rating: Some(rating),
            steam_id: None,
            rank: None,
            wins: None,
            losses: None,
            kind: LeaderboardKind::default(),
        }
    }

    #[test]
    fn test_exact_match_ignores_case() {
        let entries = vec![entry("ViperX", 1, 1000), entry("viper", 2, 2400)];
        let found = pick_exact_match(entries, "Viper", LeaderboardKind::TeamRandomMap).unwrap();
        assert_eq!(found.profile_id, 2);
        assert_eq!(found.kind, LeaderboardKind::TeamRandomMap);
    }

    #[test]
    fn test_exact_match_rejects_substrings() {
        let entries = vec![entry("ViperX", 1, 1000), entry("TheViper", 2, 2400)];
        assert!(pick_exact_match(entries, "Viper", LeaderboardKind::RandomMap).is_none());
    }

    #[test]
    fn test_exact_match_takes_first() {
        let entries = vec![entry("Hera", 10, 2500), entry("HERA", 11, 900)];
        let found = pick_exact_match(entries, "hera", LeaderboardKind::RandomMap).unwrap();
        assert_eq!(found.profile_id, 10);
    }

    #[test]
    fn test_leaderboard_params() {
        let params = leaderboard_params("GL.TheViper", LeaderboardKind::EmpireWars);
        assert!(params.contains(&("leaderboard_id", "13".to_string())));
        assert!(params.contains(&("search", "GL.TheViper".to_string())));
        assert!(params.contains(&("count", "10000".to_string())));
    }

    #[test]
    fn test_lookup_display_string() {
        let strings = StringTable::from_value(&serde_json::json!({
            "civ": [{"id": 7, "string": "Britons"}]
        }));
        let client = StatsClient::with_strings(reqwest::Client::new(), "https://aoe2.net/api/", strings);
        assert_eq!(client.lookup_display_string("civ", 7), Some("Britons"));
        assert_eq!(client.lookup_display_string("civ", 8), None);
        assert_eq!(client.base_url, "https://aoe2.net/api");
    }

    #[test]
    fn test_stats_error_display() {
        let err = StatsError::Deserialize {
            endpoint: "leaderboard".to_string(),
            message: "missing field".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("leaderboard"));
        assert!(msg.contains("missing field"));
    }
}
