use tracing::info;

use crate::stats::LeaderboardKind;
use crate::{Context, Error};

/// One reply line per board the player was found on. With no boards, the
/// reply is the single not-found line.
pub fn format_ratings(name: &str, ratings: &[(String, Option<i64>)]) -> String {
    if ratings.is_empty() {
        return format!("Could not find any results for `{name}`!");
    }

    let mut lines = vec![format!("Ratings for `{name}`:")];
    for (board, rating) in ratings {
        let rating = rating.map_or_else(|| "unrated".to_string(), |r| r.to_string());
        lines.push(format!("- {board}: *{rating}*"));
    }
    lines.join("\n")
}

async fn elo_impl(ctx: Context<'_>, name: String, game_type: Option<String>) -> Result<(), Error> {
    info!("Looking up player {name}");
    ctx.defer().await?;

    let stats = &ctx.data().stats;
    let boards = LeaderboardKind::for_selector(game_type.as_deref().unwrap_or("all"));

    let mut ratings = Vec::new();
    for kind in boards {
        if let Some(entry) = stats.find_exact_match(&name, kind).await? {
            let board = stats
                .lookup_display_string("leaderboard", kind.id())
                .map_or_else(|| kind.to_string(), str::to_string);
            ratings.push((board, entry.rating));
        }
    }

    ctx.say(format_ratings(&name, &ratings)).await?;
    Ok(())
}

/// Shows a player's ratings. Quote names that contain spaces.
#[poise::command(prefix_command, slash_command)]
pub async fn elo(
    ctx: Context<'_>,
    #[description = "Player name"] name: String,
    #[description = "solo, team, unranked or all (default)"] game_type: Option<String>,
) -> Result<(), Error> {
    elo_impl(ctx, name, game_type).await
}
