use poise::serenity_prelude as serenity;
use poise::CreateReply;
use tracing::info;

use crate::report::{self, PlayerHistory};
use crate::{Context, Error};

fn parse_players(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

async fn civs_impl(ctx: Context<'_>, names: String) -> Result<(), Error> {
    let players = parse_players(&names);
    if players.is_empty() {
        return Err(Error::Usage("no player names given".to_string()));
    }

    ctx.defer().await?;
    let stats = &ctx.data().stats;

    let mut histories = Vec::new();
    for name in &players {
        let Some(entry) = stats.find_any_board(name).await? else {
            ctx.say(format!("Could not find any results for '{name}'."))
                .await?;
            continue;
        };

        let matches = stats.matches_for(entry.profile_id).await?;
        info!("{} matches for {name} ({})", matches.len(), entry.profile_id);
        histories.push(PlayerHistory {
            name: name.clone(),
            profile_id: entry.profile_id,
            matches,
        });
    }

    if histories.is_empty() {
        ctx.say("No stats found.").await?;
        return Ok(());
    }

    let rows = report::build_civ_report(&histories, stats.strings());
    let csv = report::to_csv(&rows)?;
    let file_name = report::report_file_name(chrono::Local::now().date_naive(), &players);

    ctx.send(CreateReply::default().attachment(serenity::CreateAttachment::bytes(csv, file_name)))
        .await?;
    Ok(())
}

/// Summarizes civ history for comma separated players as a CSV
#[poise::command(prefix_command, slash_command)]
pub async fn civs(
    ctx: Context<'_>,
    #[rest]
    #[description = "Comma separated player names"]
    names: String,
) -> Result<(), Error> {
    civs_impl(ctx, names).await
}
