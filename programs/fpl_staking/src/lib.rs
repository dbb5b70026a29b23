//! # FPL Staking Program
//!
//! A staking and rewards ledger for Fantasy Premier League players.
//! Users link an FPL team id to their wallet, lock SOL in a shared vault,
//! and earn reward tokens from the gameweek scores the admin publishes.
//!
//! ## Features
//! - One FPL id per wallet, one wallet per FPL id
//! - SOL staking with admin-configured lock durations
//! - Early-withdrawal fee paid into the treasury
//! - Score-based reward accrual with a bounded, linear reward curve
//! - Reward claims from a token pool with an optional cooldown
//! - Admin emergency withdrawal of the stake vault
//! - Safe math with overflow protection

use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;
use state::{GlobalParams, RewardConfigParams, ScoreEntry, StakeConfigParams};

#[program]
pub mod fpl_staking {
    use super::*;

    /// Creates the global season state.
    ///
    /// # Arguments
    /// * `ctx` - The context containing the admin and global state accounts
    /// * `params` - Current gameweek, season window and score API url
    ///
    /// # Errors
    /// Returns an error if the state already exists or a parameter is invalid.
    pub fn initialize_global(ctx: Context<InitializeGlobal>, params: GlobalParams) -> Result<()> {
        instructions::initialize::initialize_global_handler(ctx, params)
    }

    /// Creates the stake policy, stake vault and treasury.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the global admin
    /// - The policy already exists
    /// - Stake bounds, fee or lock options are invalid
    pub fn initialize_stake_config(
        ctx: Context<InitializeStakeConfig>,
        params: StakeConfigParams,
    ) -> Result<()> {
        instructions::initialize::initialize_stake_config_handler(ctx, params)
    }

    /// Creates the reward policy and reward pool, optionally seeding the pool.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the global admin
    /// - The policy already exists
    /// - Score or reward bounds are invalid
    pub fn initialize_reward_config(
        ctx: Context<InitializeRewardConfig>,
        params: RewardConfigParams,
    ) -> Result<()> {
        instructions::initialize::initialize_reward_config_handler(ctx, params)
    }

    /// Links an FPL team id to the caller's wallet.
    ///
    /// # Arguments
    /// * `ctx` - The context containing the user, record and index accounts
    /// * `fpl_id` - External FPL team id (1-20 bytes)
    ///
    /// # Errors
    /// Returns an error if:
    /// - The wallet is already registered
    /// - The FPL id is already claimed by another wallet
    /// - The FPL id is empty or too long
    ///
    /// Ids of 21-32 bytes fail with `InvalidFplId`. Longer ids are not valid
    /// PDA seeds and abort during account derivation, without a program
    /// error code.
    pub fn register_user(ctx: Context<RegisterUser>, fpl_id: String) -> Result<()> {
        instructions::register_user::handler(ctx, fpl_id)
    }

    /// Locks SOL in the stake vault.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for staking
    /// * `amount` - Lamports to stake
    /// * `lock_duration` - Lock length in seconds, one of the configured options
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not registered
    /// - Amount is outside the configured bounds
    /// - Lock duration is not offered
    /// - A position is already open
    /// - Insufficient balance
    pub fn stake(ctx: Context<Stake>, amount: u64, lock_duration: u64) -> Result<()> {
        instructions::stake::handler(ctx, amount, lock_duration)
    }

    /// Closes the caller's stake position.
    ///
    /// Withdrawing before the lock ends pays the early-withdrawal fee to the
    /// treasury.
    ///
    /// # Errors
    /// Returns an error if no position is open or the vault cannot cover it.
    pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
        instructions::unstake::handler(ctx)
    }

    /// Admin function to record one gameweek of scores.
    ///
    /// Remaining accounts hold one `[fpl_id_index, fpl_user]` pair per entry.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the admin
    /// - Gameweek is zero or ahead of the current gameweek
    /// - Batch is empty or too large
    /// - Remaining accounts do not line up with the entries
    pub fn update_scores(
        ctx: Context<UpdateScores>,
        gameweek: u8,
        entries: Vec<ScoreEntry>,
    ) -> Result<()> {
        instructions::update_scores::handler(ctx, gameweek, entries)
    }

    /// Admin function to advance the current gameweek.
    ///
    /// # Errors
    /// Returns an error if caller is not the admin, or the gameweek is out of
    /// range or moves backwards.
    pub fn update_current_gameweek(ctx: Context<UpdateCurrentGameweek>, gameweek: u8) -> Result<()> {
        instructions::admin::update_current_gameweek_handler(ctx, gameweek)
    }

    /// Pays out all pending score rewards.
    ///
    /// # Errors
    /// Returns an error if:
    /// - No rewards are pending
    /// - Reward pool has insufficient funds
    /// - Claim cooldown has not elapsed
    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::claim_rewards::handler(ctx)
    }

    /// Admin function to drain the stake vault.
    ///
    /// # Errors
    /// Returns an error if caller is not the admin.
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>) -> Result<()> {
        instructions::admin::emergency_withdraw_handler(ctx)
    }

    /// Tops up the reward pool with reward tokens.
    ///
    /// # Errors
    /// Returns an error if amount is zero, the mint is wrong, or balance is
    /// insufficient.
    pub fn fund_reward_pool(ctx: Context<FundRewardPool>, amount: u64) -> Result<()> {
        instructions::fund_reward_pool::handler(ctx, amount)
    }

    /// Deposits lamports into the treasury.
    ///
    /// # Errors
    /// Returns an error if amount is zero or balance is insufficient.
    pub fn deposit_to_treasury(ctx: Context<DepositToTreasury>, amount: u64) -> Result<()> {
        instructions::treasury::deposit_handler(ctx, amount)
    }

    /// Admin function to withdraw from the treasury.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the admin
    /// - Amount is zero
    /// - Amount would dip into the reserve
    pub fn withdraw_treasury(ctx: Context<WithdrawTreasury>, amount: u64) -> Result<()> {
        instructions::treasury::withdraw_handler(ctx, amount)
    }

    /// Admin function to change the treasury reserve percentage.
    ///
    /// # Errors
    /// Returns an error if caller is not the admin or the percentage exceeds 100.
    pub fn update_treasury_config(ctx: Context<TreasuryAdmin>, reserve_percentage: u8) -> Result<()> {
        instructions::treasury::update_config_handler(ctx, reserve_percentage)
    }
}
