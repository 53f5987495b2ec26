//! Configuration for the settlement engine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settlement engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// How to treat expenses referencing unknown members
    pub integrity: IntegrityMode,

    /// Solver configuration
    pub solver: SolverConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            integrity: IntegrityMode::Strict,
            solver: SolverConfig::default(),
        }
    }
}

/// Policy for expenses referencing member ids absent from the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrityMode {
    /// Reject the whole computation; no partial balances (default)
    Strict,

    /// Skip contributions to/from unknown ids while still counting the
    /// expense toward totals. Breaks the zero-sum invariant.
    BestEffort,
}

/// Solver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Balances within this of zero count as already settled
    /// (default: 0.01, one cent; absorbs division residue)
    pub settled_tolerance: Decimal,

    /// Decimal places for settlement amounts (default: 2)
    pub amount_dp: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            settled_tolerance: Decimal::new(1, 2),
            amount_dp: 2,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(mode) = std::env::var("TRIPLEDGER_INTEGRITY_MODE") {
            config.integrity = match mode.as_str() {
                "strict" => IntegrityMode::Strict,
                "best-effort" => IntegrityMode::BestEffort,
                other => {
                    return Err(crate::Error::Config(format!(
                        "Unknown integrity mode: {}",
                        other
                    )))
                }
            };
        }

        if let Ok(tolerance) = std::env::var("TRIPLEDGER_SETTLED_TOLERANCE") {
            config.solver.settled_tolerance = tolerance.parse().map_err(|e| {
                crate::Error::Config(format!("Invalid settled tolerance: {}", e))
            })?;
        }

        Ok(config)
    }
}
