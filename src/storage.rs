use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use thiserror::Error;
use tracing::debug;

use crate::config::StorageConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage credentials: {0}")]
    Credentials(String),
    #[error("storage request for `{key}` failed: {source}")]
    Request {
        key: String,
        #[source]
        source: s3::error::S3Error,
    },
    #[error("storage returned {status} for `{key}`")]
    Status { key: String, status: u16 },
    #[error("could not open bucket: {0}")]
    Bucket(#[source] s3::error::S3Error),
}

/// Read access to named binary objects.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, key: &str) -> Result<Vec<u8>, StorageError>;
}

/// A DigitalOcean Spaces bucket, spoken to over the S3 API.
pub struct SpacesStore {
    bucket: Box<Bucket>,
}

impl SpacesStore {
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Credentials(e.to_string()))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let bucket =
            Bucket::new(&config.bucket, region, credentials).map_err(StorageError::Bucket)?;

        Ok(Self { bucket })
    }
}

#[async_trait]
impl ObjectStore for SpacesStore {
    async fn get_object(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        debug!("Fetching object {key} from {}", self.bucket.name());

        let response = self
            .bucket
            .get_object(key)
            .await
            .map_err(|source| StorageError::Request {
                key: key.to_string(),
                source,
            })?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(StorageError::Status {
                key: key.to_string(),
                status,
            });
        }

        Ok(response.bytes().to_vec())
    }
}
