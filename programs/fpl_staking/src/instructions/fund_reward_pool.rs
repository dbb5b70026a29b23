/// Fund reward pool instruction handler.
///
/// Handles topping up the reward pool with reward tokens after creation.
///
/// ## Security Guarantees
/// - Pool validation ensures the configured PDA
/// - Mint validation prevents wrong token deposits
/// - Anyone can fund (no admin restriction)

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::FplStakingError;
use crate::state::RewardConfig;

/// Accounts required for funding the reward pool.
#[derive(Accounts)]
pub struct FundRewardPool<'info> {
    /// The funder (anyone can fund - no admin restriction).
    pub funder: Signer<'info>,

    /// Reward policy; tracks total funding.
    #[account(
        mut,
        seeds = [REWARD_CONFIG_SEED],
        bump = reward_config.bump,
        has_one = reward_pool
    )]
    pub reward_config: Account<'info, RewardConfig>,

    /// Pool receiving the tokens.
    #[account(
        mut,
        seeds = [REWARD_POOL_SEED],
        bump = reward_config.pool_bump
    )]
    pub reward_pool: Account<'info, TokenAccount>,

    /// Funder's token account.
    /// SECURITY: Mint and owner validation.
    #[account(
        mut,
        constraint = funder_token_account.mint == reward_config.reward_mint @ FplStakingError::MintMismatch,
        constraint = funder_token_account.owner == funder.key() @ FplStakingError::Unauthorized
    )]
    pub funder_token_account: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Fund the reward pool.
///
/// # Arguments
/// * `ctx` - FundRewardPool accounts context
/// * `amount` - Reward tokens to deposit
pub fn handler(ctx: Context<FundRewardPool>, amount: u64) -> Result<()> {
    require!(amount > 0, FplStakingError::InvalidAmount);

    let cpi_accounts = Transfer {
        from: ctx.accounts.funder_token_account.to_account_info(),
        to: ctx.accounts.reward_pool.to_account_info(),
        authority: ctx.accounts.funder.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    token::transfer(CpiContext::new(cpi_program, cpi_accounts), amount)?;

    ctx.accounts.reward_config.record_funding(amount)?;

    // Reload pool to get updated balance
    ctx.accounts.reward_pool.reload()?;
    let pool_balance = ctx.accounts.reward_pool.amount;

    msg!("Reward pool funded with {} tokens", amount);
    msg!("New reward pool balance: {}", pool_balance);
    msg!("Funder: {}", ctx.accounts.funder.key());

    Ok(())
}
