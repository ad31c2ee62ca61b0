//! Short-lived cache of the stats provider's player list.

use chrono::Duration;
use std::sync::Arc;
use tracing::debug;

use crate::cli::types::{PlayerId, Sport};
use crate::core::cache::{Clock, PlayerListCacheKey, SystemClock, TtlCache};
use crate::providers::{PlayerRecord, StatsProvider};
use crate::{Result, SportIntelError};

pub const PLAYER_LIST_TTL_MINUTES: i64 = 60;

/// Sports the stats provider covers.
pub const STATS_SPORTS: &[Sport] = &[Sport::NBA];

pub fn ensure_stats_sport(sport: Sport) -> Result<()> {
    if STATS_SPORTS.contains(&sport) {
        Ok(())
    } else {
        Err(SportIntelError::configuration(format!(
            "{sport} is not supported yet; only NBA statistics are available"
        )))
    }
}

pub struct PlayerDirectory {
    stats: Arc<dyn StatsProvider>,
    cache: TtlCache<PlayerListCacheKey, Vec<PlayerRecord>>,
    clock: Arc<dyn Clock>,
}

impl PlayerDirectory {
    pub fn new(stats: Arc<dyn StatsProvider>) -> Self {
        Self {
            stats,
            cache: TtlCache::new(STATS_SPORTS.len(), Duration::minutes(PLAYER_LIST_TTL_MINUTES)),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Full player list for `sport`. A failed refresh is returned as an error.
    pub async fn players(&self, sport: Sport) -> Result<Vec<PlayerRecord>> {
        ensure_stats_sport(sport)?;
        let key = PlayerListCacheKey { sport };

        if let Some(entry) = self.cache.get_at(&key, self.clock.now()) {
            debug!(%sport, count = entry.payload.len(), "player list cache hit");
            return Ok(entry.payload);
        }

        let players = self.stats.list_players(None).await?;
        self.cache
            .put_at(key, players.clone(), self.stats.name(), self.clock.now());
        Ok(players)
    }

    pub async fn find(&self, sport: Sport, id: &PlayerId) -> Result<Option<PlayerRecord>> {
        Ok(self
            .players(sport)
            .await?
            .into_iter()
            .find(|player| &player.id == id))
    }

    pub fn invalidate(&self, sport: Sport) {
        self.cache.invalidate(&PlayerListCacheKey { sport });
    }
}
