//! Unstake instruction handler.
//!
//! Closes the caller's position. Before `lock_end` the early-withdrawal fee is
//! withheld and sent to the treasury; the rest of the principal goes back to
//! the owner and the position account's rent is refunded. A position opened
//! before an emergency withdrawal has no principal left and closes empty.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::FplStakingError;
use crate::instructions::transfer_lamports;
use crate::state::{StakeConfig, StakeVault, Treasury, UserStakeAccount};

/// Accounts required for unstaking.
#[derive(Accounts)]
pub struct Unstake<'info> {
    /// The position owner.
    #[account(mut)]
    pub user: Signer<'info>,

    /// Stake policy (fee percentage).
    #[account(
        seeds = [STAKE_CONFIG_SEED],
        bump = stake_config.bump
    )]
    pub stake_config: Account<'info, StakeConfig>,

    /// Vault paying out the principal.
    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED],
        bump = stake_config.vault_bump
    )]
    pub stake_vault: Account<'info, StakeVault>,

    /// Treasury receiving the fee.
    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = stake_config.treasury_bump
    )]
    pub treasury: Account<'info, Treasury>,

    /// User's position, closed on success.
    #[account(
        mut,
        close = user,
        seeds = [USER_STAKE_SEED, user.key().as_ref()],
        bump = user_stake.bump,
        constraint = user_stake.owner == user.key() @ FplStakingError::Unauthorized,
        constraint = user_stake.is_open() @ FplStakingError::AccountNotFound
    )]
    pub user_stake: Account<'info, UserStakeAccount>,
}

/// Close the caller's stake position.
///
/// # Arguments
/// * `ctx` - Unstake accounts context
///
/// # Errors
/// - `AccountNotFound` if no position is open
pub fn handler(ctx: Context<Unstake>) -> Result<()> {
    let clock = Clock::get()?;
    let lock_end = ctx.accounts.user_stake.lock_end;

    let settlement = ctx.accounts.stake_vault.settle_unstake(
        &ctx.accounts.stake_config,
        &mut ctx.accounts.user_stake,
        clock.unix_timestamp,
    )?;

    let vault_info = ctx.accounts.stake_vault.to_account_info();
    transfer_lamports(
        &vault_info,
        &ctx.accounts.user.to_account_info(),
        settlement.payout,
    )?;
    transfer_lamports(
        &vault_info,
        &ctx.accounts.treasury.to_account_info(),
        settlement.fee,
    )?;

    ctx.accounts.treasury.collect_fee(settlement.fee)?;

    if settlement.stranded {
        msg!(
            "Position of {} lamports predates an emergency withdrawal; closed without payout",
            settlement.principal
        );
        return Ok(());
    }
    if settlement.fee > 0 {
        msg!("Early withdrawal before {}: fee {} lamports", lock_end, settlement.fee);
    }
    msg!("Unstaked {} lamports, returned {}", settlement.principal, settlement.payout);
    msg!("Vault total staked: {}", ctx.accounts.stake_vault.total_staked);
    msg!("Treasury fees collected: {}", ctx.accounts.treasury.total_fees_collected);

    Ok(())
}
