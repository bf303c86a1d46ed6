pub mod catalog;

use serde::Deserialize;

pub use catalog::{CatalogError, TauntCatalog};

/// One entry of the taunt manifest.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TauntRecord {
    #[serde(rename = "num")]
    pub number: u32,
    pub text: String,
    #[serde(rename = "file")]
    pub audio_key: String,
    /// Page the clip was originally scraped from.
    #[serde(default)]
    pub url: Option<String>,
}
