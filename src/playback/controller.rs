use std::time::Duration;

use tracing::{debug, info};

use super::{Decode, LoopFlag, PlaybackError, VoiceSink};
use crate::storage::ObjectStore;

/// Drives the taunt play loop for one guild session.
pub struct PlaybackController<'a> {
    store: &'a dyn ObjectStore,
    decoder: &'a dyn Decode,
    sink: &'a dyn VoiceSink,
}

impl<'a> PlaybackController<'a> {
    pub fn new(store: &'a dyn ObjectStore, decoder: &'a dyn Decode, sink: &'a dyn VoiceSink) -> Self {
        Self {
            store,
            decoder,
            sink,
        }
    }

    /// Plays the clip stored under `key`, then waits `delay` if given, and
    /// goes around again for as long as `looping` stays enabled. The flag is
    /// only read between clips, so a clip that has started always finishes.
    /// A superseded session stops before fetching and again before playing,
    /// so it never takes the call back from the session that replaced it.
    ///
    /// Returns how many times the clip was played.
    pub async fn run(
        &self,
        key: &str,
        delay: Option<Duration>,
        looping: &LoopFlag,
    ) -> Result<usize, PlaybackError> {
        let mut plays = 0;
        loop {
            if looping.is_superseded() {
                break;
            }
            let encoded = self.store.get_object(key).await?;
            let clip = self.decoder.decode(encoded).await?;
            if looping.is_superseded() {
                debug!("Dropping {key}, a newer taunt took over");
                break;
            }
            debug!("Playing {key} ({:?})", clip.duration());

            // the clip buffer is owned by the sink and released when it returns
            self.sink.play(clip).await?;
            plays += 1;

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            if !looping.is_enabled() {
                break;
            }
        }

        info!("Finished {key} after {plays} play(s)");
        Ok(plays)
    }
}
