use std::process::ExitCode;

use aoe2bot::playback::{self, transcode::Transcoder};
use aoe2bot::storage::{ObjectStore, SpacesStore};
use aoe2bot::{commands, config, error, events, stats, taunt, Data};
use clap::Parser;
use poise::serenity_prelude as serenity;
use songbird::SerenityInit;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Age of Empires II Discord bot")]
struct Args {
    /// Use the development token and the `$` prefix
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,serenity=warn,songbird=warn")),
        )
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env(args.debug)?;

    let http = reqwest::Client::new();
    let stats = stats::StatsClient::connect(http, &config.stats_api_url).await?;
    info!("Loaded stats strings ({:?})", stats.strings().language());

    let store = SpacesStore::new(&config.storage)?;
    let manifest = store.get_object(&config.storage.manifest_key).await?;
    let catalog = taunt::TauntCatalog::load(&manifest)?;
    info!(
        "Loaded {} taunts ({}..{})",
        catalog.len(),
        catalog.min_number(),
        catalog.max_number()
    );

    let data = Data {
        stats,
        store: Box::new(store),
        catalog,
        transcoder: Transcoder::new(config.ffmpeg_path.clone()),
        sessions: playback::new_session_manager(),
    };

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.prefix.clone()),
                ..Default::default()
            },
            on_error: |err| Box::pin(error::on_error(err)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Bot is ready");
                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .register_songbird()
        .await?;

    client.start().await?;
    Ok(())
}
