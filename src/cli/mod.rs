//! CLI argument definitions and parsing.

pub mod types;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{ExplainMethod, Market, PlayerId, Position, SlateType, Site, Sport, Strategy};

/// Slate selection shared by commands that read salaries
#[derive(Debug, Args)]
pub struct SlateArgs {
    /// League to work on.
    #[clap(long, default_value_t = Sport::NBA)]
    pub sport: Sport,

    /// DFS site whose salaries are used.
    #[clap(long, default_value_t = Site::default())]
    pub site: Site,

    /// Slate type: main | early | afternoon | evening | late | showdown.
    #[clap(long, default_value_t = SlateType::default())]
    pub slate: SlateType,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Project fantasy points for every player on the day's slate.
    Projections {
        #[clap(flatten)]
        slate: SlateArgs,

        /// Slate date (YYYY-MM-DD); defaults to today.
        #[clap(long, short)]
        date: Option<NaiveDate>,

        /// Only players priced at or above this salary.
        #[clap(long)]
        min_salary: Option<u32>,

        /// Only players priced at or below this salary.
        #[clap(long)]
        max_salary: Option<u32>,

        /// Filter by position (repeatable): `-p PG -p C`.
        #[clap(short = 'p', long = "position")]
        positions: Option<Vec<Position>>,

        /// Cap on players projected.
        #[clap(long, default_value_t = crate::commands::projections::DEFAULT_MAX_PLAYERS)]
        max_players: usize,

        /// Skip the per-player factor breakdown.
        #[clap(long)]
        no_explanations: bool,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Build salary-capped lineups from a JSON request file.
    ///
    /// The file holds `sport`, `projections`, `salary_cap` and optionally
    /// `lineup_count`, `strategy` and `constraints`.
    Optimize {
        /// Path to the request JSON; `-` reads stdin.
        #[clap(long, short)]
        input: PathBuf,

        /// Override the request's lineup count.
        #[clap(long, short = 'n')]
        count: Option<usize>,

        /// Override the request's strategy: cash | tournament | balanced.
        #[clap(long)]
        strategy: Option<Strategy>,

        /// Seed for reproducible lineups.
        #[clap(long)]
        seed: Option<u64>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Fetch live betting odds with the best price per side.
    Odds {
        /// League to fetch.
        #[clap(long, default_value_t = Sport::NBA)]
        sport: Sport,

        /// Markets (repeatable): `-m spreads -m totals`.
        #[clap(short = 'm', long = "market")]
        markets: Option<Vec<Market>>,

        /// Bookmaker keys (repeatable).
        #[clap(short = 'b', long = "bookmaker")]
        bookmakers: Option<Vec<String>>,

        /// Only these game ids (repeatable).
        #[clap(short = 'g', long = "game")]
        game_ids: Option<Vec<String>>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Explain one player's projection factor by factor.
    Explain {
        /// Player id from the stats provider.
        player_id: PlayerId,

        #[clap(long, default_value_t = Sport::NBA)]
        sport: Sport,

        /// shap | lime | feature_importance
        #[clap(long, default_value_t = ExplainMethod::default())]
        method: ExplainMethod,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "sportintel", about = "Daily fantasy sports projections, lineups and odds")]
pub struct SportIntel {
    #[clap(subcommand)]
    pub command: Commands,
}
