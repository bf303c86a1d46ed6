pub mod controller;
pub mod session;
pub mod transcode;
pub mod voice;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serenity::model::id::GuildId;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::storage::StorageError;

pub const SAMPLE_RATE: u32 = 48_000;
pub const CHANNELS: u32 = 2;
/// One 20 ms frame of 16-bit stereo PCM at 48 kHz.
pub const FRAME_SIZE: usize = 3840;
const FRAME_DURATION: Duration = Duration::from_millis(20);

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("{program} was not found or could not be started: {source}")]
    TranscoderLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("transcoding failed: {0}")]
    Transcode(String),
    #[error("timed out joining the voice channel")]
    ConnectTimeout,
    #[error("could not join the voice channel: {0}")]
    Join(#[from] songbird::error::JoinError),
    #[error("voice playback failed: {0}")]
    Voice(#[from] songbird::error::ControlError),
}

/// Decoded audio: interleaved s16le stereo at 48 kHz, whole frames only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PcmClip {
    data: Vec<u8>,
}

impl PcmClip {
    /// Drops a trailing partial frame.
    pub fn from_s16le(mut data: Vec<u8>) -> Self {
        let whole = data.len() - data.len() % FRAME_SIZE;
        data.truncate(whole);
        Self { data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn frames(&self) -> usize {
        self.data.len() / FRAME_SIZE
    }

    pub fn duration(&self) -> Duration {
        FRAME_DURATION * self.frames() as u32
    }

    /// The same samples as little-endian `f32`, the raw layout songbird reads.
    pub fn to_f32le(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 2);
        for sample in self.data.chunks_exact(2) {
            let value = f32::from(i16::from_le_bytes([sample[0], sample[1]])) / 32768.0;
            out.extend_from_slice(&value.to_le_bytes());
        }
        out
    }
}

/// Turns an encoded clip into PCM.
#[async_trait]
pub trait Decode: Send + Sync {
    async fn decode(&self, encoded: Vec<u8>) -> Result<PcmClip, PlaybackError>;
}

/// Somewhere to play a clip. `play` returns once the clip has finished or was
/// replaced or dropped by the connection.
#[async_trait]
pub trait VoiceSink: Send + Sync {
    async fn play(&self, clip: PcmClip) -> Result<(), PlaybackError>;
}

/// Control state of one play session, shared between the loop and whoever
/// may call `stop` or start a newer session in the same guild.
///
/// `disable` only ends looping, so the clip in progress and a pending one
/// still play. `supersede` means another session owns the call now, and this
/// one must not play anything more.
#[derive(Clone, Debug, Default)]
pub struct LoopFlag(Arc<FlagState>);

#[derive(Debug, Default)]
struct FlagState {
    looping: AtomicBool,
    superseded: AtomicBool,
}

impl LoopFlag {
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(FlagState {
            looping: AtomicBool::new(enabled),
            superseded: AtomicBool::new(false),
        }))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.looping.load(Ordering::SeqCst)
    }

    pub fn disable(&self) {
        self.0.looping.store(false, Ordering::SeqCst);
    }

    pub fn supersede(&self) {
        self.disable();
        self.0.superseded.store(true, Ordering::SeqCst);
    }

    pub fn is_superseded(&self) -> bool {
        self.0.superseded.load(Ordering::SeqCst)
    }

    pub fn same_session(&self, other: &LoopFlag) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

pub type SessionManager = Arc<RwLock<HashMap<GuildId, LoopFlag>>>;

pub fn new_session_manager() -> SessionManager {
    Arc::new(RwLock::new(HashMap::new()))
}
