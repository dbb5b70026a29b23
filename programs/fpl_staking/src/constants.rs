//! Program constants for the FPL Staking program.
//!
//! PDA seeds, length limits for variable-size account fields, and the
//! policy bounds enforced when the configuration singletons are created.

/// Seed for the global season state PDA
pub const GLOBAL_STATE_SEED: &[u8] = b"global-state";

/// Seed for the stake policy PDA
pub const STAKE_CONFIG_SEED: &[u8] = b"stake-config";

/// Seed for the reward policy PDA
pub const REWARD_CONFIG_SEED: &[u8] = b"reward-config";

/// Seed for the reward token pool (SPL token account owned by the reward config)
pub const REWARD_POOL_SEED: &[u8] = b"reward-pool";

/// Seed for the vault holding staked lamports
pub const STAKE_VAULT_SEED: &[u8] = b"stake-vault";

/// Seed for the treasury holding early-withdrawal fees
pub const TREASURY_SEED: &[u8] = b"treasury";

/// Seed for per-owner FPL user records
pub const FPL_USER_SEED: &[u8] = b"fpl-user";

/// Seed for the external id -> owner index
pub const FPL_ID_SEED: &[u8] = b"fpl-id";

/// Seed for per-owner open stake positions
pub const USER_STAKE_SEED: &[u8] = b"user-stake";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Maximum byte length of an external FPL id
pub const MAX_FPL_ID_LEN: usize = 20;

/// Maximum byte length of the score feed URL
pub const MAX_API_URL_LEN: usize = 100;

/// Maximum number of lock durations a stake config may offer
pub const MAX_LOCK_OPTIONS: usize = 8;

/// Last gameweek of a Premier League season
pub const MAX_GAMEWEEK: u8 = 38;

/// Upper bound for the reward multiplier (percent, 1000 = 10x)
pub const MAX_SCORE_MULTIPLIER: u16 = 1_000;

/// Maximum number of entries accepted in one score batch
pub const MAX_SCORE_BATCH: usize = 16;

/// Denominator for percentage values (fees, reserves, multipliers)
pub const PERCENT_DENOMINATOR: u64 = 100;
