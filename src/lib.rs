pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod playback;
pub mod report;
pub mod stats;
pub mod storage;
pub mod taunt;

pub use error::Error;

pub type Context<'a> = poise::Context<'a, Data, Error>;

pub struct Data {
    pub stats: stats::StatsClient,
    pub store: Box<dyn storage::ObjectStore>,
    pub catalog: taunt::TauntCatalog,
    pub transcoder: playback::transcode::Transcoder,
    pub sessions: playback::SessionManager,
}
