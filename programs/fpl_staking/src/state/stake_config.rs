use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::FplStakingError;

/// Stake policy supplied by the admin at initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct StakeConfigParams {
    pub min_stake_amount: u64,
    pub max_stake_amount: u64,
    pub early_withdrawal_fee_percent: u8,
    pub lock_options: Vec<u64>,
    pub treasury_reserve_percent: u8,
}

impl StakeConfigParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.min_stake_amount > 0 && self.min_stake_amount <= self.max_stake_amount,
            FplStakingError::InvalidParameter
        );
        require!(
            u64::from(self.early_withdrawal_fee_percent) <= PERCENT_DENOMINATOR,
            FplStakingError::InvalidParameter
        );
        require!(
            !self.lock_options.is_empty() && self.lock_options.len() <= MAX_LOCK_OPTIONS,
            FplStakingError::InvalidParameter
        );
        require!(
            self.lock_options
                .iter()
                .all(|&duration| duration > 0 && i64::try_from(duration).is_ok()),
            FplStakingError::InvalidParameter
        );
        require!(
            u64::from(self.treasury_reserve_percent) <= PERCENT_DENOMINATOR,
            FplStakingError::InvalidParameter
        );
        Ok(())
    }
}

#[account]
#[derive(Debug)]
pub struct StakeConfig {
    pub admin: Pubkey,
    pub min_stake_amount: u64,
    pub max_stake_amount: u64,
    pub early_withdrawal_fee_percent: u8,
    pub lock_options: Vec<u64>,
    pub vault_bump: u8,
    pub treasury_bump: u8,
    pub bump: u8,
}

impl StakeConfig {
    pub const LEN: usize = 8 + 32 + (8 * 2) + 1 + (4 + 8 * MAX_LOCK_OPTIONS) + 3;

    pub fn is_initialized(&self) -> bool {
        self.admin != Pubkey::default()
    }

    /// Fills a freshly allocated config. Fails on a config that already has an admin.
    pub fn initialize(
        &mut self,
        admin: Pubkey,
        params: &StakeConfigParams,
        bump: u8,
        vault_bump: u8,
        treasury_bump: u8,
    ) -> Result<()> {
        require!(!self.is_initialized(), FplStakingError::AlreadyInitialized);
        params.validate()?;

        self.admin = admin;
        self.min_stake_amount = params.min_stake_amount;
        self.max_stake_amount = params.max_stake_amount;
        self.early_withdrawal_fee_percent = params.early_withdrawal_fee_percent;
        self.lock_options = params.lock_options.clone();
        self.bump = bump;
        self.vault_bump = vault_bump;
        self.treasury_bump = treasury_bump;
        Ok(())
    }

    pub fn validate_stake(&self, amount: u64, lock_duration: u64) -> Result<()> {
        require!(
            amount >= self.min_stake_amount && amount <= self.max_stake_amount,
            FplStakingError::InvalidAmount
        );
        require!(
            self.lock_options.contains(&lock_duration),
            FplStakingError::InvalidLockDuration
        );
        Ok(())
    }

    /// Fee withheld when a position is closed before `lock_end`.
    ///
    /// `amount * fee% / 100`, truncated. Zero once the lock has expired.
    pub fn early_withdrawal_fee(&self, amount: u64, now: i64, lock_end: i64) -> Result<u64> {
        if now >= lock_end {
            return Ok(0);
        }
        let fee = (amount as u128)
            .checked_mul(self.early_withdrawal_fee_percent as u128)
            .ok_or(FplStakingError::MathOverflow)?
            .checked_div(PERCENT_DENOMINATOR as u128)
            .ok_or(FplStakingError::MathOverflow)?;
        let fee_u64 = u64::try_from(fee).map_err(|_| FplStakingError::MathOverflow)?;

        Ok(fee_u64)
    }
}
