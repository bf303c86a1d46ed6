use std::time::Duration;

use tracing::info;

use crate::playback::controller::PlaybackController;
use crate::playback::session;
use crate::playback::voice::{self, CallSink};
use crate::taunt::CatalogError;
use crate::{Context, Error};

async fn taunt_impl(ctx: Context<'_>, number: u32, delay: Option<u64>) -> Result<(), Error> {
    let guild_id = ctx
        .guild_id()
        .ok_or_else(|| Error::Usage("taunts can only be played in a server".to_string()))?;
    let data = ctx.data();

    let text = match data.catalog.text_for(number) {
        Ok(text) => text,
        Err(e @ CatalogError::NotFound { .. }) => {
            ctx.say(e.to_string()).await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    ctx.say(text).await?;

    let channel_id = {
        let guild = ctx
            .guild()
            .ok_or(Error::Unavailable("guild is not in the cache"))?;
        guild
            .voice_states
            .get(&ctx.author().id)
            .and_then(|vs| vs.channel_id)
    };

    // Not in voice: the text reply is all we do.
    let Some(channel_id) = channel_id else {
        return Ok(());
    };
    let Some(key) = data.catalog.audio_key_for(number) else {
        return Ok(());
    };

    let manager = songbird::get(ctx.serenity_context())
        .await
        .expect("songbird is registered at startup");

    // A delay turns the taunt into a loop that runs until `stop`.
    let delay = delay.filter(|&secs| secs > 0).map(Duration::from_secs);
    session::scoped(&data.sessions, guild_id, delay.is_some(), |looping| async move {
        let call = voice::connect(&manager, guild_id, channel_id).await?;
        info!("Playing taunt {number} in {channel_id} (guild: {guild_id}, delay: {delay:?})");

        let sink = CallSink::new(call);
        let controller = PlaybackController::new(data.store.as_ref(), &data.transcoder, &sink);
        controller.run(key, delay, &looping).await
    })
    .await?;

    Ok(())
}

/// Plays an Age of Empires II taunt
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn taunt(
    ctx: Context<'_>,
    #[description = "Taunt number"] number: u32,
    #[description = "Repeat every N seconds until stop"] delay: Option<u64>,
) -> Result<(), Error> {
    taunt_impl(ctx, number, delay).await
}

/// Plays an Age of Empires II taunt (/taunt shorthand)
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn t(
    ctx: Context<'_>,
    #[description = "Taunt number"] number: u32,
    #[description = "Repeat every N seconds until stop"] delay: Option<u64>,
) -> Result<(), Error> {
    taunt_impl(ctx, number, delay).await
}
