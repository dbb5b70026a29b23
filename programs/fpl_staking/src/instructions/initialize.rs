//! Initialization handlers for the configuration singletons.
//!
//! ## Security Guarantees
//! - Each singleton is a fixed-seed PDA, so only one can ever exist
//! - A second initialization fails with `AlreadyInitialized`
//! - Stake and reward configs can only be created by the global admin
//! - Vault, treasury and reward pool addresses are PDAs owned by the program

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::FplStakingError;
use crate::state::{
    GlobalParams, GlobalState, RewardConfig, RewardConfigParams, StakeConfig, StakeConfigParams,
    StakeVault, Treasury,
};

/// Accounts required to create the global season state.
#[derive(Accounts)]
pub struct InitializeGlobal<'info> {
    /// The admin authority for every configuration and scoring operation.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Global season state.
    #[account(
        init_if_needed,
        payer = admin,
        space = GlobalState::LEN,
        seeds = [GLOBAL_STATE_SEED],
        bump
    )]
    pub global_state: Account<'info, GlobalState>,

    /// System program for account creation.
    pub system_program: Program<'info, System>,
}

/// Create the global season state.
///
/// # Arguments
/// * `ctx` - InitializeGlobal accounts context
/// * `params` - Season window, starting gameweek and score feed URL
pub fn initialize_global_handler(ctx: Context<InitializeGlobal>, params: GlobalParams) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let global_state = &mut ctx.accounts.global_state;
    global_state.initialize(admin, params, ctx.bumps.global_state)?;

    msg!("FPL global state initialized");
    msg!("Admin: {}", global_state.admin);
    msg!(
        "Season: {} -> {}, gameweek {}",
        global_state.season_start,
        global_state.season_end,
        global_state.current_gameweek
    );

    Ok(())
}

/// Accounts required to create the stake policy, vault and treasury.
///
/// ## Security Notes
/// - `stake_vault` and `treasury` are program-owned PDAs; only this program
///   can debit them
/// - Caller must be the admin recorded in `global_state`
#[derive(Accounts)]
pub struct InitializeStakeConfig<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [GLOBAL_STATE_SEED],
        bump = global_state.bump,
        has_one = admin @ FplStakingError::Unauthorized
    )]
    pub global_state: Account<'info, GlobalState>,

    #[account(
        init_if_needed,
        payer = admin,
        space = StakeConfig::LEN,
        seeds = [STAKE_CONFIG_SEED],
        bump
    )]
    pub stake_config: Account<'info, StakeConfig>,

    /// Vault holding staked lamports.
    #[account(
        init_if_needed,
        payer = admin,
        space = StakeVault::LEN,
        seeds = [STAKE_VAULT_SEED],
        bump
    )]
    pub stake_vault: Account<'info, StakeVault>,

    /// Treasury collecting early-withdrawal fees.
    #[account(
        init_if_needed,
        payer = admin,
        space = Treasury::LEN,
        seeds = [TREASURY_SEED],
        bump
    )]
    pub treasury: Account<'info, Treasury>,

    pub system_program: Program<'info, System>,
}

/// Create the stake policy together with the vault and treasury.
///
/// # Arguments
/// * `ctx` - InitializeStakeConfig accounts context
/// * `params` - Stake bounds, early-withdrawal fee, lock options, treasury reserve
pub fn initialize_stake_config_handler(
    ctx: Context<InitializeStakeConfig>,
    params: StakeConfigParams,
) -> Result<()> {
    let admin = ctx.accounts.admin.key();

    ctx.accounts.stake_config.initialize(
        admin,
        &params,
        ctx.bumps.stake_config,
        ctx.bumps.stake_vault,
        ctx.bumps.treasury,
    )?;

    let stake_vault = &mut ctx.accounts.stake_vault;
    stake_vault.total_staked = 0;
    stake_vault.staker_count = 0;
    stake_vault.emergency_epoch = 0;
    stake_vault.total_emergency_withdrawn = 0;
    stake_vault.last_emergency_withdrawal = 0;
    stake_vault.bump = ctx.bumps.stake_vault;

    let treasury = &mut ctx.accounts.treasury;
    treasury.admin = admin;
    treasury.total_fees_collected = 0;
    treasury.total_deposited = 0;
    treasury.total_withdrawn = 0;
    treasury.set_reserve_percentage(params.treasury_reserve_percent)?;
    treasury.bump = ctx.bumps.treasury;

    msg!("Stake config initialized");
    msg!(
        "Stake bounds: {} - {} lamports, early withdrawal fee {}%",
        params.min_stake_amount,
        params.max_stake_amount,
        params.early_withdrawal_fee_percent
    );
    msg!("Lock options: {:?}", ctx.accounts.stake_config.lock_options);

    Ok(())
}

/// Accounts required to create the reward policy and its token pool.
///
/// ## Security Notes
/// - `reward_pool` is a PDA token account whose authority is `reward_config`
/// - Reward mint is locked into `reward_config` permanently
#[derive(Accounts)]
pub struct InitializeRewardConfig<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [GLOBAL_STATE_SEED],
        bump = global_state.bump,
        has_one = admin @ FplStakingError::Unauthorized
    )]
    pub global_state: Account<'info, GlobalState>,

    #[account(
        init_if_needed,
        payer = admin,
        space = RewardConfig::LEN,
        seeds = [REWARD_CONFIG_SEED],
        bump
    )]
    pub reward_config: Account<'info, RewardConfig>,

    /// Mint of the reward token.
    pub reward_mint: Account<'info, Mint>,

    /// Pool holding reward tokens for claims.
    #[account(
        init_if_needed,
        payer = admin,
        seeds = [REWARD_POOL_SEED],
        bump,
        token::mint = reward_mint,
        token::authority = reward_config
    )]
    pub reward_pool: Account<'info, TokenAccount>,

    /// Admin token account the initial funding is taken from.
    #[account(
        mut,
        constraint = admin_token_account.mint == reward_mint.key() @ FplStakingError::MintMismatch,
        constraint = admin_token_account.owner == admin.key() @ FplStakingError::Unauthorized
    )]
    pub admin_token_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,

    pub token_program: Program<'info, Token>,

    pub rent: Sysvar<'info, Rent>,
}

/// Create the reward policy and fund the reward pool.
///
/// # Arguments
/// * `ctx` - InitializeRewardConfig accounts context
/// * `params` - Score/reward bounds, multiplier, claim cooldown, initial funding
pub fn initialize_reward_config_handler(
    ctx: Context<InitializeRewardConfig>,
    params: RewardConfigParams,
) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let reward_mint = ctx.accounts.reward_mint.key();
    let reward_pool = ctx.accounts.reward_pool.key();
    ctx.accounts.reward_config.initialize(
        admin,
        reward_mint,
        reward_pool,
        &params,
        ctx.bumps.reward_config,
        ctx.bumps.reward_pool,
    )?;

    if params.initial_funding > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.admin_token_account.to_account_info(),
            to: ctx.accounts.reward_pool.to_account_info(),
            authority: ctx.accounts.admin.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        token::transfer(CpiContext::new(cpi_program, cpi_accounts), params.initial_funding)?;
    }

    msg!("Reward config initialized");
    msg!("Reward mint: {}", reward_mint);
    msg!(
        "Scores {}..={} pay {}..={} at {}%",
        params.min_score_for_reward,
        params.max_score_for_reward,
        params.min_reward_amount,
        params.max_reward_amount,
        params.base_score_multiplier
    );
    msg!("Reward pool funded with {} tokens", params.initial_funding);

    Ok(())
}
