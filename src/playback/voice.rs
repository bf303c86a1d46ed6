use std::io::Cursor;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use serenity::model::id::{ChannelId, GuildId};
use songbird::events::{Event, EventContext, EventHandler, TrackEvent};
use songbird::input::{Input, RawAdapter};
use songbird::{Call, Songbird};
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, info};

use super::{PcmClip, PlaybackError, VoiceSink, CHANNELS, SAMPLE_RATE};

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether a guild whose call sits in `current` needs a `join` to reach
/// `target`. Songbird moves an existing call on `join`, so answering `true`
/// never opens a second connection.
fn should_join(current: Option<u64>, target: u64) -> bool {
    current != Some(target)
}

/// Returns the guild's call, reusing it when it is already in `channel_id`.
/// Otherwise songbird opens a connection, or moves the existing one.
pub async fn connect(
    manager: &Songbird,
    guild_id: GuildId,
    channel_id: ChannelId,
) -> Result<Arc<Mutex<Call>>, PlaybackError> {
    if let Some(call) = manager.get(guild_id) {
        let current = call.lock().await.current_channel().map(|ch| ch.0.get());
        if !should_join(current, channel_id.get()) {
            return Ok(call);
        }
        info!("Moving voice connection to {channel_id} (guild: {guild_id})");
    }

    match tokio::time::timeout(CONNECT_TIMEOUT, manager.join(guild_id, channel_id)).await {
        Ok(joined) => Ok(joined?),
        Err(_) => Err(PlaybackError::ConnectTimeout),
    }
}

struct ClipEndNotifier {
    done: Arc<StdMutex<Option<oneshot::Sender<()>>>>,
}

#[async_trait]
impl EventHandler for ClipEndNotifier {
    async fn act(&self, _ctx: &EventContext<'_>) -> Option<Event> {
        if let Some(tx) = self.done.lock().ok().and_then(|mut done| done.take()) {
            let _ = tx.send(());
        }
        Some(Event::Cancel)
    }
}

/// Plays clips on a songbird call, replacing whatever track was playing.
pub struct CallSink {
    call: Arc<Mutex<Call>>,
}

impl CallSink {
    pub fn new(call: Arc<Mutex<Call>>) -> Self {
        Self { call }
    }
}

#[async_trait]
impl VoiceSink for CallSink {
    async fn play(&self, clip: PcmClip) -> Result<(), PlaybackError> {
        let (tx, rx) = oneshot::channel();
        let done = Arc::new(StdMutex::new(Some(tx)));

        let input: Input =
            RawAdapter::new(Cursor::new(clip.to_f32le()), SAMPLE_RATE, CHANNELS).into();
        drop(clip);

        {
            let mut call = self.call.lock().await;
            let handle = call.play_only_input(input);
            handle.add_event(
                Event::Track(TrackEvent::End),
                ClipEndNotifier { done: done.clone() },
            )?;
            handle.add_event(Event::Track(TrackEvent::Error), ClipEndNotifier { done })?;
        } // call lock dropped here

        // An error means the track was dropped along with its handlers, which
        // happens on disconnect.
        if rx.await.is_err() {
            debug!("Track dropped before it ended");
        }
        Ok(())
    }
}
