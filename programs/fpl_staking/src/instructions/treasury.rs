/// Treasury instruction handlers.
///
/// Deposits are permissionless; withdrawals and reserve changes are admin-only.
///
/// ## Security Guarantees
/// - Withdrawals require signer == treasury.admin
/// - Withdrawals never touch the reserve share or the rent-exempt minimum

use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::*;
use crate::error::FplStakingError;
use crate::instructions::{spendable_lamports, transfer_lamports};
use crate::state::Treasury;

/// Accounts required for a treasury deposit.
#[derive(Accounts)]
pub struct DepositToTreasury<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = treasury.bump
    )]
    pub treasury: Account<'info, Treasury>,

    pub system_program: Program<'info, System>,
}

/// Deposit lamports into the treasury.
pub fn deposit_handler(ctx: Context<DepositToTreasury>, amount: u64) -> Result<()> {
    ctx.accounts.treasury.record_deposit(amount)?;

    let cpi_accounts = system_program::Transfer {
        from: ctx.accounts.depositor.to_account_info(),
        to: ctx.accounts.treasury.to_account_info(),
    };
    let cpi_program = ctx.accounts.system_program.to_account_info();
    system_program::transfer(CpiContext::new(cpi_program, cpi_accounts), amount)?;

    msg!("Treasury deposit of {} lamports", amount);
    msg!("Depositor: {}", ctx.accounts.depositor.key());

    Ok(())
}

/// Accounts required for treasury administration.
///
/// ## Security Notes
/// - Authority must be signer AND match treasury.admin
#[derive(Accounts)]
pub struct TreasuryAdmin<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
        has_one = admin @ FplStakingError::Unauthorized
    )]
    pub treasury: Account<'info, Treasury>,
}

/// Change the share of the treasury kept in reserve.
///
/// # Arguments
/// * `ctx` - TreasuryAdmin accounts context
/// * `reserve_percentage` - New reserve share (0-100)
pub fn update_config_handler(ctx: Context<TreasuryAdmin>, reserve_percentage: u8) -> Result<()> {
    let treasury = &mut ctx.accounts.treasury;
    let previous = treasury.reserve_percentage;
    treasury.set_reserve_percentage(reserve_percentage)?;

    msg!("Treasury reserve: {}% -> {}%", previous, reserve_percentage);
    msg!("Admin: {}", ctx.accounts.admin.key());

    Ok(())
}

/// Accounts required for a treasury withdrawal.
#[derive(Accounts)]
pub struct WithdrawTreasury<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = treasury.bump,
        has_one = admin @ FplStakingError::Unauthorized
    )]
    pub treasury: Account<'info, Treasury>,

    /// CHECK: Any account may receive the withdrawn lamports.
    #[account(mut)]
    pub recipient: UncheckedAccount<'info>,
}

/// Withdraw collected fees, keeping the reserve share in place.
///
/// # Arguments
/// * `ctx` - WithdrawTreasury accounts context
/// * `amount` - Lamports to withdraw
///
/// # Errors
/// - `ExceedsWithdrawalLimit` when `amount` would dip into the reserve
pub fn withdraw_handler(ctx: Context<WithdrawTreasury>, amount: u64) -> Result<()> {
    let treasury_info = ctx.accounts.treasury.to_account_info();
    let available = spendable_lamports(&treasury_info)?;

    ctx.accounts.treasury.record_withdrawal(amount, available)?;
    transfer_lamports(
        &treasury_info,
        &ctx.accounts.recipient.to_account_info(),
        amount,
    )?;

    msg!("Treasury withdrawal of {} lamports", amount);
    msg!("Recipient: {}", ctx.accounts.recipient.key());
    msg!("Admin: {}", ctx.accounts.admin.key());

    Ok(())
}
