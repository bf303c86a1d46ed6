use poise::serenity_prelude as serenity;
use poise::FrameworkError;
use thiserror::Error;
use tracing::{error, warn};

use crate::playback::PlaybackError;
use crate::stats::StatsError;
use crate::storage::StorageError;
use crate::taunt::CatalogError;
use crate::Data;

const GENERIC_FAILURE: &str = "An error occurred, please contact your administrator.";

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Unavailable(&'static str),
    #[error("could not write report: {0}")]
    Report(#[from] csv::Error),
    #[error(transparent)]
    Discord(#[from] serenity::Error),
}

/// What went wrong, as far as the reply to the user is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ManifestParse,
    ConnectionTimeout,
    TranscoderLaunch,
    UpstreamRequest,
    CommandUsage,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Catalog(CatalogError::NotFound { .. }) => ErrorKind::NotFound,
            Self::Catalog(CatalogError::ManifestParse(_)) => ErrorKind::ManifestParse,
            Self::Stats(_) | Self::Storage(_) => ErrorKind::UpstreamRequest,
            Self::Playback(e) => match e {
                PlaybackError::Storage(_) => ErrorKind::UpstreamRequest,
                PlaybackError::TranscoderLaunch { .. } => ErrorKind::TranscoderLaunch,
                PlaybackError::ConnectTimeout => ErrorKind::ConnectionTimeout,
                PlaybackError::Transcode(_)
                | PlaybackError::Join(_)
                | PlaybackError::Voice(_) => ErrorKind::Internal,
            },
            Self::Usage(_) => ErrorKind::CommandUsage,
            Self::Unavailable(_) | Self::Report(_) | Self::Discord(_) => ErrorKind::Internal,
        }
    }

    /// The chat reply for this error raised by `command`.
    pub fn user_message(&self, command: &str, prefix: &str) -> String {
        match self.kind() {
            ErrorKind::NotFound => self.to_string(),
            ErrorKind::CommandUsage => usage_hint(command, prefix),
            ErrorKind::ConnectionTimeout
            | ErrorKind::ManifestParse
            | ErrorKind::TranscoderLaunch
            | ErrorKind::UpstreamRequest
            | ErrorKind::Internal => GENERIC_FAILURE.to_string(),
        }
    }
}

pub fn usage_hint(command: &str, prefix: &str) -> String {
    format!("Invalid use of {command}, see {prefix}help.")
}

/// Framework error hook: logs everything and answers with a short message.
pub async fn on_error(error: FrameworkError<'_, Data, Error>) {
    match error {
        FrameworkError::Command { error, ctx, .. } => {
            let command = &ctx.command().qualified_name;
            error!(
                "{:?} - '{command} {}' failed: {error}",
                error.kind(),
                ctx.invocation_string()
            );
            let reply = error.user_message(command, ctx.prefix());
            if let Err(e) = ctx.say(reply).await {
                error!("Could not report error to user: {e}");
            }
        }
        FrameworkError::ArgumentParse {
            error, input, ctx, ..
        } => {
            let command = &ctx.command().qualified_name;
            warn!("Bad arguments for {command} ({input:?}): {error}");
            if let Err(e) = ctx.say(usage_hint(command, ctx.prefix())).await {
                error!("Could not report error to user: {e}");
            }
        }
        FrameworkError::UnknownCommand { ctx, msg, .. } => {
            if let Err(e) = msg.channel_id.say(ctx, "Command does not exist.").await {
                error!("Could not report error to user: {e}");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}
