//! State structures for the FPL Staking program.
//!
//! Account layouts plus the ledger arithmetic that mutates them. Handlers in
//! `instructions` load accounts, call into these methods, and move funds.

pub mod fpl_user;
pub mod global_state;
pub mod reward_config;
pub mod stake_config;
pub mod user_stake;
pub mod vault;

pub use fpl_user::*;
pub use global_state::*;
pub use reward_config::*;
pub use stake_config::*;
pub use user_stake::*;
pub use vault::*;
