use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qiita_lens::app::{AppContext, Result};
use qiita_lens::cli::{commands, Cli, Commands};
use qiita_lens::config::Config;
use qiita_lens::domain::Credential;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays clean
    let filter = if cli.verbose {
        EnvFilter::new("qiita_lens=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;
    let credential = ctx.credential(cli.token.as_deref())?;

    if let Err(err) = run(&ctx, &credential, cli.command).await {
        if let Some(hint) = err.hint() {
            eprintln!("hint: {}", hint);
        }
        return Err(err.into());
    }

    Ok(())
}

async fn run(ctx: &AppContext, credential: &Credential, command: Commands) -> Result<()> {
    match command {
        Commands::Items {
            filter,
            newest_first,
        } => {
            commands::list_items(ctx, credential, &filter, newest_first).await?;
        }
        Commands::Summary { filter } => {
            commands::summary(ctx, credential, &filter).await?;
        }
        Commands::Ranking { filter, by, top } => {
            commands::ranking(ctx, credential, &filter, by.into(), top).await?;
        }
        Commands::Tags {
            filter,
            top,
            monthly,
        } => {
            commands::tags(ctx, credential, &filter, top, monthly).await?;
        }
        Commands::Timeline { filter, cumulative } => {
            commands::timeline(ctx, credential, &filter, cumulative).await?;
        }
        Commands::StockHeavy { filter, top } => {
            commands::stock_heavy_items(ctx, credential, &filter, top).await?;
        }
    }

    Ok(())
}
