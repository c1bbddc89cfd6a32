use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::memory::{MemoryGuard, ProcRssProbe, DEFAULT_MEMORY_RESERVE_BYTES};

pub const DEFAULT_DEPTH_LIMIT: usize = 64;

pub const ENV_STRATEGY: &str = "STATESPACE_STRATEGY";
pub const ENV_MEMORY_LIMIT: &str = "STATESPACE_MEMORY_LIMIT_BYTES";
pub const ENV_MEMORY_RESERVE: &str = "STATESPACE_MEMORY_RESERVE_BYTES";
pub const ENV_DEPTH_LIMIT: &str = "STATESPACE_DEPTH_LIMIT";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[serde(alias = "breadth_first")]
    Bfs,
    #[serde(alias = "depth_first")]
    Dfs,
    #[default]
    #[serde(alias = "a*")]
    Astar,
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth_first" => Ok(Self::Bfs),
            "dfs" | "depth_first" => Ok(Self::Dfs),
            "astar" | "a*" => Ok(Self::Astar),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub strategy: StrategyKind,
    /// Unset means no memory guard.
    pub memory_limit_bytes: Option<u64>,
    pub memory_reserve_bytes: u64,
    /// Only consulted by depth-first search.
    pub depth_limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            memory_limit_bytes: None,
            memory_reserve_bytes: DEFAULT_MEMORY_RESERVE_BYTES,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

impl SearchOptions {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Defaults overridden by any `STATESPACE_*` variables present.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();
        if let Some(v) = lookup(ENV_STRATEGY) {
            opts.strategy = v.parse()?;
        }
        if let Some(v) = lookup(ENV_MEMORY_LIMIT) {
            opts.memory_limit_bytes = Some(parse_var(ENV_MEMORY_LIMIT, v)?);
        }
        if let Some(v) = lookup(ENV_MEMORY_RESERVE) {
            opts.memory_reserve_bytes = parse_var(ENV_MEMORY_RESERVE, v)?;
        }
        if let Some(v) = lookup(ENV_DEPTH_LIMIT) {
            opts.depth_limit = parse_var(ENV_DEPTH_LIMIT, v)?;
        }
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.memory_limit_bytes {
            Some(limit) if limit <= self.memory_reserve_bytes => {
                Err(ConfigError::LimitBelowReserve { limit, reserve: self.memory_reserve_bytes })
            }
            _ => Ok(()),
        }
    }

    /// Guard over this process's resident memory, or an unlimited one when no limit is set.
    pub fn memory_guard(&self) -> MemoryGuard {
        match self.memory_limit_bytes {
            Some(limit) => MemoryGuard::new(ProcRssProbe::new(), limit, self.memory_reserve_bytes),
            None => MemoryGuard::unlimited(),
        }
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidEnv { var, value })
}
