/// Admin instruction handlers.
///
/// Handles admin-only operations on the season and the stake vault.
///
/// ## Security Guarantees
/// - All admin functions require signer == configured admin
/// - PDA validation ensures correct singletons
/// - Gameweek can only move forward

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::FplStakingError;
use crate::instructions::{spendable_lamports, transfer_lamports};
use crate::state::{GlobalState, StakeConfig, StakeVault};

/// Accounts required for season administration.
///
/// ## Security Notes
/// - Admin must be signer AND match global_state.admin
#[derive(Accounts)]
pub struct UpdateCurrentGameweek<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED],
        bump = global_state.bump,
        has_one = admin @ FplStakingError::Unauthorized
    )]
    pub global_state: Account<'info, GlobalState>,
}

/// Advance the current gameweek.
///
/// # Arguments
/// * `ctx` - UpdateCurrentGameweek accounts context
/// * `gameweek` - New gameweek (1-38, never below the current one)
///
/// # Errors
/// - `InvalidGameweek` when out of range
/// - `GameweekRegression` when below the current gameweek
pub fn update_current_gameweek_handler(
    ctx: Context<UpdateCurrentGameweek>,
    gameweek: u8,
) -> Result<()> {
    let previous = ctx.accounts.global_state.advance_gameweek(gameweek)?;

    msg!("Gameweek: {} -> {}", previous, gameweek);
    msg!("Admin: {}", ctx.accounts.admin.key());

    Ok(())
}

/// Accounts required for an emergency withdrawal.
///
/// ## Security Notes
/// - Admin must be signer AND match stake_config.admin
#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [STAKE_CONFIG_SEED],
        bump = stake_config.bump,
        has_one = admin @ FplStakingError::Unauthorized
    )]
    pub stake_config: Account<'info, StakeConfig>,

    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED],
        bump = stake_config.vault_bump
    )]
    pub stake_vault: Account<'info, StakeVault>,
}

/// Move every spendable lamport in the stake vault to the admin.
///
/// The vault keeps its rent-exempt minimum. Open positions from before the
/// drain can no longer be paid out of the vault.
///
/// # Arguments
/// * `ctx` - EmergencyWithdraw accounts context
pub fn emergency_withdraw_handler(ctx: Context<EmergencyWithdraw>) -> Result<()> {
    let clock = Clock::get()?;
    let vault_info = ctx.accounts.stake_vault.to_account_info();
    let drained = spendable_lamports(&vault_info)?;

    if drained == 0 {
        msg!("Emergency withdrawal: vault empty, nothing moved");
        return Ok(());
    }

    let staked_before = ctx.accounts.stake_vault.total_staked;
    transfer_lamports(&vault_info, &ctx.accounts.admin.to_account_info(), drained)?;
    ctx.accounts
        .stake_vault
        .record_emergency_drain(drained, clock.unix_timestamp)?;

    msg!("EMERGENCY WITHDRAWAL of {} lamports", drained);
    msg!("Recorded stake at drain: {}", staked_before);
    msg!("Vault epoch: {}", ctx.accounts.stake_vault.emergency_epoch);
    msg!("Admin: {}", ctx.accounts.admin.key());

    Ok(())
}
