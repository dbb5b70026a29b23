use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::FplStakingError;
use crate::state::FplUser;

/// Reward policy supplied by the admin at initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct RewardConfigParams {
    /// Percent applied to the interpolated reward (100 = 1x).
    pub base_score_multiplier: u16,
    pub min_score_for_reward: u32,
    pub max_score_for_reward: u32,
    pub min_reward_amount: u64,
    pub max_reward_amount: u64,
    /// Minimum seconds between two claims by the same user.
    pub claim_cooldown: i64,
    /// Reward tokens moved from the admin into the pool on creation.
    pub initial_funding: u64,
}

impl RewardConfigParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.base_score_multiplier > 0 && self.base_score_multiplier <= MAX_SCORE_MULTIPLIER,
            FplStakingError::InvalidParameter
        );
        require!(
            self.min_score_for_reward <= self.max_score_for_reward,
            FplStakingError::InvalidParameter
        );
        require!(
            self.min_reward_amount <= self.max_reward_amount,
            FplStakingError::InvalidParameter
        );
        require!(self.claim_cooldown >= 0, FplStakingError::InvalidParameter);
        Ok(())
    }
}

#[account]
#[derive(Debug)]
pub struct RewardConfig {
    pub admin: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_pool: Pubkey,

    pub base_score_multiplier: u16,
    pub min_score_for_reward: u32,
    pub max_score_for_reward: u32,
    pub min_reward_amount: u64,
    pub max_reward_amount: u64,
    pub claim_cooldown: i64,

    pub total_funded: u64,
    pub total_distributed: u64,

    pub pool_bump: u8,
    pub bump: u8,
}

impl RewardConfig {
    pub const LEN: usize = 8 + (32 * 3) + 2 + (4 * 2) + (8 * 3) + (8 * 2) + 2;

    pub fn is_initialized(&self) -> bool {
        self.admin != Pubkey::default()
    }

    /// Fills a freshly allocated config. Fails on a config that already has an admin.
    pub fn initialize(
        &mut self,
        admin: Pubkey,
        reward_mint: Pubkey,
        reward_pool: Pubkey,
        params: &RewardConfigParams,
        bump: u8,
        pool_bump: u8,
    ) -> Result<()> {
        require!(!self.is_initialized(), FplStakingError::AlreadyInitialized);
        params.validate()?;

        self.admin = admin;
        self.reward_mint = reward_mint;
        self.reward_pool = reward_pool;
        self.base_score_multiplier = params.base_score_multiplier;
        self.min_score_for_reward = params.min_score_for_reward;
        self.max_score_for_reward = params.max_score_for_reward;
        self.min_reward_amount = params.min_reward_amount;
        self.max_reward_amount = params.max_reward_amount;
        self.claim_cooldown = params.claim_cooldown;
        self.total_funded = params.initial_funding;
        self.total_distributed = 0;
        self.bump = bump;
        self.pool_bump = pool_bump;
        Ok(())
    }

    /// Converts one gameweek score into reward token units.
    ///
    /// Scores below the floor earn nothing. Otherwise the score is clamped to
    /// the ceiling, mapped linearly onto `[min_reward_amount, max_reward_amount]`
    /// and scaled by `base_score_multiplier / 100`.
    pub fn reward_for(&self, score: u32) -> Result<u64> {
        if score < self.min_score_for_reward {
            return Ok(0);
        }

        let clamped = score.min(self.max_score_for_reward);
        let score_span = (self.max_score_for_reward - self.min_score_for_reward) as u128;
        let reward_span = (self.max_reward_amount as u128)
            .checked_sub(self.min_reward_amount as u128)
            .ok_or(FplStakingError::MathOverflow)?;

        let interpolated = if score_span == 0 {
            self.max_reward_amount as u128
        } else {
            let above_floor = (clamped - self.min_score_for_reward) as u128;
            above_floor
                .checked_mul(reward_span)
                .ok_or(FplStakingError::MathOverflow)?
                .checked_div(score_span)
                .ok_or(FplStakingError::MathOverflow)?
                .checked_add(self.min_reward_amount as u128)
                .ok_or(FplStakingError::MathOverflow)?
        };

        let reward = interpolated
            .checked_mul(self.base_score_multiplier as u128)
            .ok_or(FplStakingError::MathOverflow)?
            .checked_div(PERCENT_DENOMINATOR as u128)
            .ok_or(FplStakingError::MathOverflow)?;

        let reward_u64 = u64::try_from(reward).map_err(|_| FplStakingError::MathOverflow)?;

        Ok(reward_u64)
    }

    /// Amount `user` can claim right now from a pool holding `pool_balance`.
    ///
    /// # Errors
    /// - `NothingToClaim` when no rewards are pending
    /// - `InsufficientPoolBalance` when the pool cannot cover the whole claim
    /// - `TooEarlyToClaim` when the claim cooldown has not elapsed
    pub fn claimable(&self, user: &FplUser, pool_balance: u64, now: i64) -> Result<u64> {
        let amount = user.pending_rewards;
        require!(amount > 0, FplStakingError::NothingToClaim);
        require!(
            pool_balance >= amount,
            FplStakingError::InsufficientPoolBalance
        );
        self.check_claim_window(user.last_reward_claim, now)?;
        Ok(amount)
    }

    /// The first claim is never throttled.
    pub fn check_claim_window(&self, last_claim: i64, now: i64) -> Result<()> {
        if last_claim == 0 || self.claim_cooldown == 0 {
            return Ok(());
        }
        require!(
            now.saturating_sub(last_claim) >= self.claim_cooldown,
            FplStakingError::TooEarlyToClaim
        );
        Ok(())
    }

    pub fn record_funding(&mut self, amount: u64) -> Result<()> {
        self.total_funded = self
            .total_funded
            .checked_add(amount)
            .ok_or(FplStakingError::MathOverflow)?;
        Ok(())
    }

    pub fn record_distribution(&mut self, amount: u64) -> Result<()> {
        self.total_distributed = self
            .total_distributed
            .checked_add(amount)
            .ok_or(FplStakingError::MathOverflow)?;
        Ok(())
    }
}
