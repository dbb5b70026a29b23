//! Claim rewards instruction handler.
//!
//! Pays the caller's pending score rewards out of the reward pool.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::FplStakingError;
use crate::state::{FplUser, RewardConfig};

/// Accounts required for claiming rewards.
#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    /// The user claiming rewards.
    #[account(mut)]
    pub user: Signer<'info>,

    /// User's FPL record holding pending rewards.
    #[account(
        mut,
        seeds = [FPL_USER_SEED, user.key().as_ref()],
        bump = fpl_user.bump,
        constraint = fpl_user.authority == user.key() @ FplStakingError::Unauthorized
    )]
    pub fpl_user: Account<'info, FplUser>,

    /// Reward policy; signs for the pool.
    #[account(
        mut,
        seeds = [REWARD_CONFIG_SEED],
        bump = reward_config.bump,
        has_one = reward_pool
    )]
    pub reward_config: Account<'info, RewardConfig>,

    /// Pool holding reward tokens.
    #[account(
        mut,
        seeds = [REWARD_POOL_SEED],
        bump = reward_config.pool_bump
    )]
    pub reward_pool: Account<'info, TokenAccount>,

    /// User's token account for receiving rewards.
    #[account(
        mut,
        constraint = user_token_account.mint == reward_config.reward_mint @ FplStakingError::MintMismatch,
        constraint = user_token_account.owner == user.key() @ FplStakingError::Unauthorized
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Claim all pending rewards.
///
/// Every check runs before the transfer, and the record is reset in the same
/// instruction, so a failed claim leaves pending rewards untouched.
///
/// # Arguments
/// * `ctx` - ClaimRewards accounts context
///
/// # Errors
/// - `NothingToClaim` when no rewards are pending
/// - `InsufficientPoolBalance` when the pool cannot cover the claim
/// - `TooEarlyToClaim` when the claim cooldown has not elapsed
pub fn handler(ctx: Context<ClaimRewards>) -> Result<()> {
    let clock = Clock::get()?;
    let amount = ctx.accounts.reward_config.claimable(
        &ctx.accounts.fpl_user,
        ctx.accounts.reward_pool.amount,
        clock.unix_timestamp,
    )?;

    // Transfer rewards from pool to user, signed by the reward config PDA
    let seeds = &[REWARD_CONFIG_SEED, &[ctx.accounts.reward_config.bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.reward_pool.to_account_info(),
        to: ctx.accounts.user_token_account.to_account_info(),
        authority: ctx.accounts.reward_config.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, amount)?;

    let claimed = ctx.accounts.fpl_user.settle_claim(clock.unix_timestamp)?;
    ctx.accounts.reward_config.record_distribution(claimed)?;

    msg!("Claimed {} reward tokens", claimed);
    msg!(
        "Total rewards claimed by user: {}",
        ctx.accounts.fpl_user.total_rewards_claimed
    );
    msg!(
        "Total distributed from pool: {}",
        ctx.accounts.reward_config.total_distributed
    );

    Ok(())
}
