//! Construction-time configuration of a game session.

use kitchen_tactics_world::Rules;
use thiserror::Error;

/// Narrowest board the opening layout and enemy spawn columns fit on.
pub const MIN_COLUMNS: u32 = 4;

/// Everything needed to start a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// World rules the battle runs under.
    pub rules: Rules,
    /// Seed shared by every randomized system.
    pub seed: u64,
}

impl SessionConfig {
    /// Default rules with the provided seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rules: Rules::default(),
            seed,
        }
    }

    /// Rejects boards the game cannot be played on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.rules;
        if rules.columns < MIN_COLUMNS {
            return Err(ConfigError::TooFewColumns {
                columns: rules.columns,
            });
        }
        if rules.rows == 0 {
            return Err(ConfigError::NoRows);
        }
        if rules.deploy_columns == 0 || rules.deploy_columns > rules.columns {
            return Err(ConfigError::DeployZone {
                deploy_columns: rules.deploy_columns,
                columns: rules.columns,
            });
        }
        Ok(())
    }
}

/// Reasons a [`SessionConfig`] is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The board is narrower than the minimum.
    #[error("board needs at least {} columns, got {columns}", MIN_COLUMNS)]
    TooFewColumns {
        /// Requested width.
        columns: u32,
    },
    /// The board has no rows.
    #[error("board needs at least one row")]
    NoRows,
    /// The deployment zone is empty or wider than the board.
    #[error("deploy zone of {deploy_columns} columns does not fit a board of {columns}")]
    DeployZone {
        /// Requested deployment zone width.
        deploy_columns: u32,
        /// Board width.
        columns: u32,
    },
}
