use poise::CreateReply;
use serenity::builder::CreateEmbed;

use crate::{Context, Error};

fn command_list(prefix: &str) -> String {
    format!(
        "\
`{prefix}elo <name> [solo|team|unranked|all]` - player ratings
`{prefix}taunt <number> [delay]` (`{prefix}t`) - play a taunt, looping every `delay` seconds
`{prefix}stop` - stop a looping taunt after the current clip
`{prefix}civs <name, name, ...>` - civ win/loss report as CSV
`{prefix}help` - this message"
    )
}

async fn help_impl(ctx: Context<'_>) -> Result<(), Error> {
    let embed = CreateEmbed::new()
        .title("AoE2 Bot")
        .description("Quote player names that contain spaces, e.g. `\"[aM] Liereyy\"`.")
        .field("Commands", command_list(ctx.prefix()), false)
        .color(0x5865F2);

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Lists the bot's commands
#[poise::command(prefix_command, slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    help_impl(ctx).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_list_uses_prefix() {
        let list = command_list("$");
        assert!(list.contains("`$taunt <number> [delay]`"));
        assert!(list.contains("`$t`"));
        assert!(!list.contains('!'));
    }
}
