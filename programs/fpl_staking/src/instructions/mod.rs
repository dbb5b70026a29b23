//! Instruction handlers for the FPL Staking program.
//!
//! This module contains all instruction implementations.

pub mod admin;
pub mod claim_rewards;
pub mod fund_reward_pool;
pub mod initialize;
pub mod register_user;
pub mod stake;
pub mod treasury;
pub mod unstake;
pub mod update_scores;

pub use admin::*;
pub use claim_rewards::*;
pub use fund_reward_pool::*;
pub use initialize::*;
pub use register_user::*;
pub use stake::*;
pub use treasury::*;
pub use unstake::*;
pub use update_scores::*;

use anchor_lang::prelude::*;

use crate::error::FplStakingError;

/// Moves lamports out of a program-owned account.
///
/// The system program cannot debit accounts that carry data, so vault and
/// treasury payouts adjust balances directly. Zero is a no-op.
pub(crate) fn transfer_lamports(
    from: &AccountInfo<'_>,
    to: &AccountInfo<'_>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let from_balance = from
        .lamports()
        .checked_sub(amount)
        .ok_or(FplStakingError::InsufficientFunds)?;
    let to_balance = to
        .lamports()
        .checked_add(amount)
        .ok_or(FplStakingError::MathOverflow)?;

    **from.try_borrow_mut_lamports()? = from_balance;
    **to.try_borrow_mut_lamports()? = to_balance;

    Ok(())
}

/// Lamports held by a program-owned account above its rent-exempt minimum.
pub(crate) fn spendable_lamports(account: &AccountInfo<'_>) -> Result<u64> {
    let rent_exempt = Rent::get()?.minimum_balance(account.data_len());
    Ok(account.lamports().saturating_sub(rent_exempt))
}
