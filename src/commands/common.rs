//! Shared resources for the command handlers.
//!
//! A [`CommandContext`] owns every provider client and service for one run.
//! The binary builds it from [`Config`]; tests build it from in-memory fakes
//! through [`Providers`].

use chrono::{DateTime, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info};

use crate::core::cache::{Clock, SystemClock};
use crate::core::config::{Config, SalaryServiceConfig};
use crate::projections::ProjectionGenerator;
use crate::providers::sentiment::HUGGINGFACE_INFERENCE_URL;
use crate::providers::{
    BallDontLieClient, DraftKingsClient, HuggingFaceClassifier, InjuryRiskAnalyzer, MentionFeed,
    OddsApiClient, OddsProvider, RiskOracle, RotoGrindersClient, SalaryProvider,
    StaticMentionFeed, StatsProvider,
};
use crate::services::{PlayerDirectory, SalaryService};
use crate::{Result, SportIntelError};

pub const ORACLE_TIMEOUT: Duration = Duration::from_secs(15);

/// The external collaborators a context is wired to.
pub struct Providers {
    pub stats: Arc<dyn StatsProvider>,
    pub salaries: Vec<Arc<dyn SalaryProvider>>,
    pub odds: Option<Arc<dyn OddsProvider>>,
    pub oracle: Option<Arc<dyn RiskOracle>>,
    pub mentions: Arc<dyn MentionFeed>,
}

impl Providers {
    /// Real HTTP clients. Odds and the risk oracle are only wired when their
    /// API keys are present.
    pub fn from_config(config: &Config) -> Result<Self> {
        let stats: Arc<dyn StatsProvider> = Arc::new(BallDontLieClient::new(&config.stats)?);
        let salaries: Vec<Arc<dyn SalaryProvider>> = vec![
            Arc::new(DraftKingsClient::new(&config.draftkings)?),
            Arc::new(RotoGrindersClient::new(&config.rotogrinders)?),
        ];

        let odds: Option<Arc<dyn OddsProvider>> = match config.odds.api_key {
            Some(_) => Some(Arc::new(OddsApiClient::new(&config.odds)?)),
            None => {
                debug!("odds api key not set, live odds disabled");
                None
            }
        };

        let oracle: Option<Arc<dyn RiskOracle>> = match &config.huggingface_api_key {
            Some(key) => {
                let classifier =
                    HuggingFaceClassifier::new(key, HUGGINGFACE_INFERENCE_URL, ORACLE_TIMEOUT)?;
                Some(Arc::new(InjuryRiskAnalyzer::new(Arc::new(classifier))))
            }
            None => None,
        };

        Ok(Self {
            stats,
            salaries,
            odds,
            oracle,
            mentions: Arc::new(StaticMentionFeed::new()),
        })
    }
}

/// Context containing the services every command needs.
pub struct CommandContext {
    pub stats: Arc<dyn StatsProvider>,
    pub salaries: SalaryService,
    pub players: PlayerDirectory,
    pub generator: ProjectionGenerator,
    odds: Option<Arc<dyn OddsProvider>>,
    rng: Mutex<StdRng>,
    clock: Arc<dyn Clock>,
}

impl CommandContext {
    pub fn new(providers: Providers, salary_config: SalaryServiceConfig, seed: Option<u64>) -> Self {
        let mut generator =
            ProjectionGenerator::new(providers.stats.clone(), providers.mentions.clone());
        if let Some(oracle) = providers.oracle {
            generator = generator.with_oracle(oracle);
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            stats: providers.stats.clone(),
            salaries: SalaryService::new(providers.salaries, salary_config),
            players: PlayerDirectory::new(providers.stats),
            generator,
            odds: providers.odds,
            rng: Mutex::new(rng),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let providers = Providers::from_config(config)?;
        info!(
            odds = providers.odds.is_some(),
            risk_oracle = providers.oracle.is_some(),
            "providers configured"
        );
        Ok(Self::new(providers, config.salary.clone(), config.seed))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.salaries = self.salaries.with_clock(clock.clone());
        self.players = self.players.with_clock(clock.clone());
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn odds(&self) -> Result<&Arc<dyn OddsProvider>> {
        self.odds.as_ref().ok_or_else(|| {
            SportIntelError::configuration("ODDS_API_KEY is not set; live odds are unavailable")
        })
    }

    /// The run's pseudo-random source. Seeded runs are reproducible.
    pub fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
