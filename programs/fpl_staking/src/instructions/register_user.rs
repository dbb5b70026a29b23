//! Register user instruction handler.
//!
//! Creates the caller's FPL user record and the external id index entry that
//! score batches resolve through. Both are created in the same instruction.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::FplStakingError;
use crate::state::{validate_fpl_id, FplIdIndex, FplUser, GlobalState};

/// Accounts required for registration.
#[derive(Accounts)]
#[instruction(fpl_id: String)]
pub struct RegisterUser<'info> {
    /// The participant registering; becomes the record authority.
    #[account(mut)]
    pub user: Signer<'info>,

    /// Global state must exist before users can register.
    #[account(
        seeds = [GLOBAL_STATE_SEED],
        bump = global_state.bump
    )]
    pub global_state: Account<'info, GlobalState>,

    /// FPL user record keyed by owner.
    #[account(
        init_if_needed,
        payer = user,
        space = FplUser::LEN,
        seeds = [FPL_USER_SEED, user.key().as_ref()],
        bump
    )]
    pub fpl_user: Account<'info, FplUser>,

    /// External id -> owner index entry. Seeds cap `fpl_id` at 32 bytes.
    #[account(
        init_if_needed,
        payer = user,
        space = FplIdIndex::LEN,
        seeds = [FPL_ID_SEED, fpl_id.as_bytes()],
        bump
    )]
    pub fpl_id_index: Account<'info, FplIdIndex>,

    pub system_program: Program<'info, System>,
}

/// Register the caller under an external FPL id.
///
/// # Arguments
/// * `ctx` - RegisterUser accounts context
/// * `fpl_id` - External FPL team id (1-20 bytes, unique across users)
///
/// # Errors
/// - `AlreadyRegistered` if the caller already has a record
/// - `FplIdTaken` if another owner registered the same id
/// - `InvalidFplId` if the id is empty or 21-32 bytes long
///
/// An id over 32 bytes is not a valid PDA seed, so the index derivation fails
/// before this handler runs and the transaction aborts without a program
/// error code. Clients should check the length before sending.
pub fn handler(ctx: Context<RegisterUser>, fpl_id: String) -> Result<()> {
    validate_fpl_id(&fpl_id)?;
    require!(
        !ctx.accounts.fpl_user.is_registered(),
        FplStakingError::AlreadyRegistered
    );
    require!(
        !ctx.accounts.fpl_id_index.is_claimed(),
        FplStakingError::FplIdTaken
    );

    let clock = Clock::get()?;
    let owner = ctx.accounts.user.key();
    let fpl_user_key = ctx.accounts.fpl_user.key();

    ctx.accounts
        .fpl_user
        .register(owner, fpl_id, clock.unix_timestamp, ctx.bumps.fpl_user)?;

    let fpl_id_index = &mut ctx.accounts.fpl_id_index;
    fpl_id_index.owner = owner;
    fpl_id_index.fpl_user = fpl_user_key;
    fpl_id_index.bump = ctx.bumps.fpl_id_index;

    msg!("Registered FPL user {}", ctx.accounts.fpl_user.fpl_id);
    msg!("Authority: {}", owner);

    Ok(())
}
