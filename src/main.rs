//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use sportintel::{
    cli::{Commands, SportIntel},
    commands::{
        handle_explain, handle_odds, handle_optimize, handle_projections, CommandContext,
        ExplainParams, OddsParams, OptimizeParams, ProjectionParams,
    },
    core::{logging::init_tracing, Config},
};
use std::io::Read;
use std::path::Path;

fn read_request(path: &Path) -> anyhow::Result<OptimizeParams> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading optimize request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading optimize request {}", path.display()))?
    };
    serde_json::from_str(&raw).context("parsing optimize request")
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let app = SportIntel::parse();
    let config = Config::from_env().context("loading configuration")?;
    let ctx = CommandContext::from_config(&config).context("building provider clients")?;

    match app.command {
        Commands::Projections {
            slate,
            date,
            min_salary,
            max_salary,
            positions,
            max_players,
            no_explanations,
            json,
        } => {
            let params = ProjectionParams {
                sport: slate.sport,
                slate: slate.slate,
                site: slate.site,
                date,
                include_explanations: !no_explanations,
                min_salary,
                max_salary,
                positions,
                max_players,
            };
            handle_projections(&ctx, params, json).await?
        }

        Commands::Optimize {
            input,
            count,
            strategy,
            seed,
            json,
        } => {
            let mut params = read_request(&input)?;
            if let Some(count) = count {
                params.lineup_count = count;
            }
            if let Some(strategy) = strategy {
                params.strategy = strategy;
            }
            params.seed = seed.or(params.seed);
            handle_optimize(&ctx, params, json)?
        }

        Commands::Odds {
            sport,
            markets,
            bookmakers,
            game_ids,
            json,
        } => {
            let mut params = OddsParams::new(sport);
            if let Some(markets) = markets {
                params.markets = markets;
            }
            params.bookmakers = bookmakers;
            params.game_ids = game_ids;
            handle_odds(&ctx, params, json).await?
        }

        Commands::Explain {
            player_id,
            sport,
            method,
            json,
        } => {
            let mut params = ExplainParams::new(player_id, sport);
            params.method = method;
            handle_explain(&ctx, params, json).await?
        }
    }

    Ok(())
}
