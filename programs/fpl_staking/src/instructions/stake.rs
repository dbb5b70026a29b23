//! Stake instruction handler.
//!
//! Locks SOL in the stake vault for one of the configured lock durations.

use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::*;
use crate::error::FplStakingError;
use crate::state::{FplUser, StakeConfig, StakeVault, UserStakeAccount};

/// Accounts required for staking.
#[derive(Accounts)]
pub struct Stake<'info> {
    /// The user staking SOL.
    #[account(mut)]
    pub user: Signer<'info>,

    /// Staking requires a registered FPL user.
    #[account(
        seeds = [FPL_USER_SEED, user.key().as_ref()],
        bump = fpl_user.bump,
        constraint = fpl_user.authority == user.key() @ FplStakingError::Unauthorized
    )]
    pub fpl_user: Account<'info, FplUser>,

    /// Stake policy.
    #[account(
        seeds = [STAKE_CONFIG_SEED],
        bump = stake_config.bump
    )]
    pub stake_config: Account<'info, StakeConfig>,

    /// Vault receiving the staked lamports.
    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED],
        bump = stake_config.vault_bump
    )]
    pub stake_vault: Account<'info, StakeVault>,

    /// User's position (created on first stake, recreated after unstake).
    #[account(
        init_if_needed,
        payer = user,
        space = UserStakeAccount::LEN,
        seeds = [USER_STAKE_SEED, user.key().as_ref()],
        bump
    )]
    pub user_stake: Account<'info, UserStakeAccount>,

    /// System program.
    pub system_program: Program<'info, System>,
}

/// Stake SOL for a fixed lock duration.
///
/// # Arguments
/// * `ctx` - Stake accounts context
/// * `amount` - Lamports to stake
/// * `lock_duration` - Lock length in seconds, must be a configured option
///
/// # Errors
/// - `InvalidAmount` / `InvalidLockDuration` when outside policy
/// - `StakeAlreadyOpen` when the user already has an open position
/// - `InsufficientFunds` when the user cannot cover `amount`
pub fn handler(ctx: Context<Stake>, amount: u64, lock_duration: u64) -> Result<()> {
    let clock = Clock::get()?;
    let owner = ctx.accounts.user.key();

    ctx.accounts.stake_vault.open_stake(
        &ctx.accounts.stake_config,
        &mut ctx.accounts.user_stake,
        owner,
        amount,
        lock_duration,
        clock.unix_timestamp,
        ctx.bumps.user_stake,
    )?;

    require!(
        ctx.accounts.user.lamports() >= amount,
        FplStakingError::InsufficientFunds
    );

    // Transfer lamports from user to vault
    let cpi_accounts = system_program::Transfer {
        from: ctx.accounts.user.to_account_info(),
        to: ctx.accounts.stake_vault.to_account_info(),
    };
    let cpi_program = ctx.accounts.system_program.to_account_info();
    system_program::transfer(CpiContext::new(cpi_program, cpi_accounts), amount)?;

    msg!("Staked {} lamports for {} seconds", amount, lock_duration);
    msg!("Locked until {}", ctx.accounts.user_stake.lock_end);
    msg!("Vault total staked: {}", ctx.accounts.stake_vault.total_staked);

    Ok(())
}
