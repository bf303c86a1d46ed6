use thiserror::Error;

use super::TauntRecord;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid taunt manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),
    #[error("Taunts must be between {min} and {max}.")]
    NotFound { number: u32, min: u32, max: u32 },
}

/// Taunts loaded from the manifest object. Never mutated after `load`.
#[derive(Clone, Debug)]
pub struct TauntCatalog {
    records: Vec<TauntRecord>,
    min_number: u32,
    max_number: u32,
}

impl TauntCatalog {
    pub fn load(manifest: &[u8]) -> Result<Self, CatalogError> {
        let records: Vec<TauntRecord> = serde_json::from_slice(manifest)?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<TauntRecord>) -> Self {
        let (min_number, max_number) = bounds(&records);
        Self {
            records,
            min_number,
            max_number,
        }
    }

    pub fn min_number(&self) -> u32 {
        self.min_number
    }

    pub fn max_number(&self) -> u32 {
        self.max_number
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, number: u32) -> Option<&TauntRecord> {
        self.records.iter().find(|r| r.number == number)
    }

    pub fn text_for(&self, number: u32) -> Result<&str, CatalogError> {
        self.get(number)
            .map(|r| r.text.as_str())
            .ok_or(CatalogError::NotFound {
                number,
                min: self.min_number,
                max: self.max_number,
            })
    }

    pub fn audio_key_for(&self, number: u32) -> Option<&str> {
        self.get(number).map(|r| r.audio_key.as_str())
    }
}

// An empty manifest reports 1..1.
fn bounds(records: &[TauntRecord]) -> (u32, u32) {
    let min = records.iter().map(|r| r.number).min().unwrap_or(1);
    let max = records.iter().map(|r| r.number).max().unwrap_or(1);
    (min, max)
}
