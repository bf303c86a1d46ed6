use crate::playback::session;
use crate::{Context, Error};

async fn stop_impl(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx
        .guild_id()
        .ok_or_else(|| Error::Usage("stop only works in a server".to_string()))?;

    if session::stop(&ctx.data().sessions, guild_id).await {
        ctx.say("Stopping after the current taunt.").await?;
    } else {
        ctx.say("Nothing is playing.").await?;
    }

    Ok(())
}

/// Stops a looping taunt once the current clip has finished
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn stop(ctx: Context<'_>) -> Result<(), Error> {
    stop_impl(ctx).await
}
