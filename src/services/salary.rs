//! Salary resolution across providers.
//!
//! A lookup walks an ordered list of salary providers and keeps the first
//! non-empty answer. Provider errors, rate-limit rejections and empty
//! answers move on to the next provider; when every provider has been tried
//! the result is an empty set. Configuration and validation errors stop the
//! walk and are returned unchanged. Winning answers are cached per
//! (sport, site, slate, day) for a configurable TTL.

use chrono::Duration;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cli::types::{SalarySource, SlateType, Site, Sport};
use crate::core::cache::{CacheKey, Clock, SalaryCacheKey, SystemClock, TtlCache};
use crate::core::{RateLimitStatus, SalaryServiceConfig};
use crate::providers::{SalaryProvider, SalaryQuote};
use crate::Result;


pub const SALARY_CACHE_CAPACITY: usize = 64;

/// What to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SalaryNeed {
    pub sport: Sport,
    pub site: Site,
    pub slate_type: SlateType,
}

impl SalaryNeed {
    pub fn new(sport: Sport) -> Self {
        Self {
            sport,
            site: Site::default(),
            slate_type: SlateType::default(),
        }
    }

    pub fn site(mut self, site: Site) -> Self {
        self.site = site;
        self
    }

    pub fn slate_type(mut self, slate_type: SlateType) -> Self {
        self.slate_type = slate_type;
        self
    }
}

/// Outcome of a resolution. `source` is `None` only when nothing was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved {
    pub records: Vec<SalaryQuote>,
    pub source: Option<SalarySource>,
    pub from_cache: bool,
}

impl Resolved {
    fn exhausted() -> Self {
        Self {
            records: Vec::new(),
            source: None,
            from_cache: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachedSlate {
    pub key: String,
    pub sport: Sport,
    pub site: Site,
    pub slate_type: SlateType,
    pub count: usize,
    pub age_minutes: i64,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStatus {
    pub enabled: bool,
    pub ttl_minutes: i64,
    pub entries: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceStatus {
    pub source: SalarySource,
    pub rate_limit: Option<RateLimitStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryServiceStatus {
    pub cache: CacheStatus,
    pub preferred: Option<SalarySource>,
    pub sources: Vec<SourceStatus>,
}

pub struct SalaryService {
    providers: Vec<Arc<dyn SalaryProvider>>,
    config: SalaryServiceConfig,
    cache: TtlCache<SalaryCacheKey, Vec<SalaryQuote>>,
    clock: Arc<dyn Clock>,
}

impl SalaryService {
    pub fn new(providers: Vec<Arc<dyn SalaryProvider>>, config: SalaryServiceConfig) -> Self {
        let ttl = Duration::minutes(config.cache_ttl_minutes);
        Self {
            providers,
            config,
            cache: TtlCache::new(SALARY_CACHE_CAPACITY, ttl),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &SalaryServiceConfig {
        &self.config
    }

    /// Providers to try for `site`, in order.
    pub fn source_order(&self, site: Site) -> Vec<SalarySource> {
        if let Some(preferred) = self.config.preferred_source {
            return vec![preferred];
        }

        match site {
            Site::DraftKings => vec![SalarySource::DraftKings, SalarySource::RotoGrinders],
            Site::FanDuel | Site::Yahoo => vec![SalarySource::RotoGrinders],
        }
    }

    fn cache_key(&self, need: &SalaryNeed) -> SalaryCacheKey {
        SalaryCacheKey {
            sport: need.sport,
            site: need.site,
            slate_type: need.slate_type,
            day: self.clock.today(),
        }
    }

    fn provider(&self, source: SalarySource) -> Option<&Arc<dyn SalaryProvider>> {
        self.providers.iter().find(|p| p.source() == source)
    }

    pub async fn resolve(&self, need: &SalaryNeed) -> Result<Resolved> {
        let key = self.cache_key(need);

        if self.config.enable_cache {
            if let Some(entry) = self.cache.get_at(&key, self.clock.now()) {
                info!(
                    key = %key.cache_key(),
                    source = %entry.source,
                    count = entry.payload.len(),
                    "salary cache hit"
                );
                return Ok(Resolved {
                    source: entry.source.parse().ok(),
                    records: entry.payload,
                    from_cache: true,
                });
            }
        }

        for source in self.source_order(need.site) {
            let Some(provider) = self.provider(source) else {
                warn!(%source, "salary source not configured");
                continue;
            };

            debug!(%source, key = %key.cache_key(), "trying salary source");
            match provider
                .salaries_for(need.sport, need.site, need.slate_type, key.day)
                .await
            {
                Ok(records) if !records.is_empty() => {
                    info!(%source, count = records.len(), "salaries resolved");
                    if self.config.enable_cache {
                        self.cache
                            .put_at(key.clone(), records.clone(), source.as_str(), self.clock.now());
                    }
                    return Ok(Resolved {
                        records,
                        source: Some(source),
                        from_cache: false,
                    });
                }
                Ok(_) => debug!(%source, "salary source returned no records"),
                Err(e) if e.is_fallback_eligible() => {
                    warn!(%source, error = %e, "salary source failed")
                }
                Err(e) => return Err(e),
            }
        }

        warn!(key = %key.cache_key(), "all salary sources exhausted");
        Ok(Resolved::exhausted())
    }

    /// Salary on `need.site` for a player matched by name, case-insensitively.
    pub async fn player_salary(&self, player_name: &str, need: &SalaryNeed) -> Result<Option<u32>> {
        let resolved = self.resolve(need).await?;
        Ok(resolved
            .records
            .iter()
            .find(|quote| quote.player_name.eq_ignore_ascii_case(player_name))
            .and_then(|quote| quote.salaries.salary_for(need.site)))
    }

    /// Salaries for every name that resolves; keys keep the caller's spelling.
    pub async fn players_salaries(
        &self,
        player_names: &[String],
        need: &SalaryNeed,
    ) -> Result<HashMap<String, u32>> {
        let resolved = self.resolve(need).await?;
        let by_name: HashMap<String, u32> = resolved
            .records
            .iter()
            .filter_map(|quote| {
                quote
                    .salaries
                    .salary_for(need.site)
                    .map(|salary| (quote.player_name.to_lowercase(), salary))
            })
            .collect();

        Ok(player_names
            .iter()
            .filter_map(|name| {
                by_name
                    .get(&name.to_lowercase())
                    .map(|salary| (name.clone(), *salary))
            })
            .collect())
    }

    /// Drop the cached entry for `need`, then resolve again.
    pub async fn refresh(&self, need: &SalaryNeed) -> Result<Resolved> {
        self.cache.invalidate(&self.cache_key(need));
        self.resolve(need).await
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("salary cache cleared");
    }

    pub fn cached_slates(&self) -> Vec<CachedSlate> {
        let now = self.clock.now();
        self.cache
            .entries()
            .into_iter()
            .map(|(key, entry)| CachedSlate {
                key: key.cache_key(),
                sport: key.sport,
                site: key.site,
                slate_type: key.slate_type,
                count: entry.payload.len(),
                age_minutes: entry.age(now).num_minutes(),
                source: entry.source,
            })
            .collect()
    }

    pub fn status(&self) -> SalaryServiceStatus {
        SalaryServiceStatus {
            cache: CacheStatus {
                enabled: self.config.enable_cache,
                ttl_minutes: self.config.cache_ttl_minutes,
                entries: self.cache.stats().0,
            },
            preferred: self.config.preferred_source,
            sources: self
                .providers
                .iter()
                .map(|p| SourceStatus {
                    source: p.source(),
                    rate_limit: p.rate_limit_status(),
                })
                .collect(),
        }
    }
}
