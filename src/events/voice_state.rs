use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::{info, warn};

use crate::playback::session;
use crate::{Data, Error};

const ALONE_TIMEOUT: Duration = Duration::from_secs(30);

/// Voice states in `channel`, the bot's own included. `None` when the guild
/// is not cached.
fn occupants(cache: &serenity::Cache, guild_id: serenity::GuildId, channel: u64) -> Option<usize> {
    let guild = cache.guild(guild_id)?;
    let count = guild
        .voice_states
        .values()
        .filter(|vs| vs.channel_id.is_some_and(|ch| ch.get() == channel))
        .count();
    Some(count)
}

pub async fn handle(
    ctx: &serenity::Context,
    _old: &Option<serenity::VoiceState>,
    new: &serenity::VoiceState,
    data: &Data,
) -> Result<(), Error> {
    let Some(guild_id) = new.guild_id else {
        return Ok(());
    };

    let manager = songbird::get(ctx)
        .await
        .expect("songbird is registered at startup");

    // Bot is not in a voice channel in this guild
    let Some(call) = manager.get(guild_id) else {
        return Ok(());
    };
    let Some(bot_channel) = call.lock().await.current_channel() else {
        return Ok(());
    };

    match occupants(&ctx.cache, guild_id, bot_channel.0.get()) {
        Some(count) if count <= 1 => {}
        _ => return Ok(()),
    }

    let cache = ctx.cache.clone();
    let sessions = data.sessions.clone();

    tokio::spawn(async move {
        tokio::time::sleep(ALONE_TIMEOUT).await;

        let Some(call) = manager.get(guild_id) else {
            return;
        };
        let Some(channel) = call.lock().await.current_channel() else {
            return;
        };
        // someone came back
        if occupants(&cache, guild_id, channel.0.get()).is_some_and(|count| count > 1) {
            return;
        }

        info!("Alone in voice channel, leaving (guild: {guild_id})");
        session::stop(&sessions, guild_id).await;
        if let Err(e) = manager.remove(guild_id).await {
            warn!("Could not leave voice channel (guild: {guild_id}): {e}");
        }
    });

    Ok(())
}
