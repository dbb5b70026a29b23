//! Update scores instruction handler.
//!
//! The admin submits one gameweek of results keyed by external FPL id. Each
//! entry is resolved through its `FplIdIndex` to the owner's `FplUser`, whose
//! scores are overwritten and whose pending rewards grow by the score reward.
//!
//! Remaining accounts carry one `[fpl_id_index, fpl_user]` pair per entry, in
//! entry order. Entries for unknown ids or already-scored gameweeks are skipped
//! and logged; a misaligned account list aborts the whole batch.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::FplStakingError;
use crate::state::{
    validate_fpl_id, FplIdIndex, FplUser, GlobalState, RewardConfig, ScoreEntry, ScoreOutcome,
};

/// Accounts required for a score batch.
#[derive(Accounts)]
pub struct UpdateScores<'info> {
    /// The admin submitting scores.
    pub admin: Signer<'info>,

    #[account(
        seeds = [GLOBAL_STATE_SEED],
        bump = global_state.bump,
        has_one = admin @ FplStakingError::Unauthorized
    )]
    pub global_state: Account<'info, GlobalState>,

    #[account(
        seeds = [REWARD_CONFIG_SEED],
        bump = reward_config.bump
    )]
    pub reward_config: Account<'info, RewardConfig>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    Recorded(ScoreOutcome),
    UnknownFplId,
}

/// Resolve and apply a single score entry.
///
/// Returns an error only for structural problems (accounts at the wrong
/// address, or not owned by this program); those abort the batch.
pub(crate) fn apply_entry(
    program_id: &Pubkey,
    gameweek: u8,
    entry: &ScoreEntry,
    reward_config: &RewardConfig,
    index_info: &AccountInfo<'_>,
    user_info: &AccountInfo<'_>,
) -> Result<EntryOutcome> {
    if validate_fpl_id(&entry.fpl_id).is_err() {
        return Ok(EntryOutcome::UnknownFplId);
    }

    let (expected_index, _) =
        Pubkey::find_program_address(&[FPL_ID_SEED, entry.fpl_id.as_bytes()], program_id);
    require_keys_eq!(
        *index_info.key,
        expected_index,
        FplStakingError::ScoreAccountsMismatch
    );

    if index_info.owner != program_id || index_info.data_is_empty() {
        return Ok(EntryOutcome::UnknownFplId);
    }

    let index = {
        let data = index_info.try_borrow_data()?;
        FplIdIndex::try_deserialize(&mut &data[..])?
    };
    require_keys_eq!(
        *user_info.key,
        index.fpl_user,
        FplStakingError::ScoreAccountsMismatch
    );
    require!(
        user_info.owner == program_id && user_info.is_writable,
        FplStakingError::InvalidScoreAccount
    );

    let mut user = {
        let data = user_info.try_borrow_data()?;
        FplUser::try_deserialize(&mut &data[..])?
    };

    let reward = reward_config.reward_for(entry.gameweek_score)?;
    let outcome = user.record_gameweek(gameweek, entry, reward)?;

    if let ScoreOutcome::Applied { .. } = outcome {
        let mut data = user_info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        user.try_serialize(&mut writer)?;
    }

    Ok(EntryOutcome::Recorded(outcome))
}

/// Apply one gameweek of scores.
///
/// # Arguments
/// * `ctx` - UpdateScores accounts context, plus `[index, user]` remaining account pairs
/// * `gameweek` - Gameweek the scores belong to (1..=current gameweek)
/// * `entries` - Score lines, at most `MAX_SCORE_BATCH`
pub fn handler(ctx: Context<UpdateScores>, gameweek: u8, entries: Vec<ScoreEntry>) -> Result<()> {
    require!(
        !entries.is_empty() && entries.len() <= MAX_SCORE_BATCH,
        FplStakingError::InvalidBatchSize
    );
    ctx.accounts.global_state.check_score_gameweek(gameweek)?;
    require!(
        ctx.remaining_accounts.len() == entries.len() * 2,
        FplStakingError::ScoreAccountsMismatch
    );

    let mut applied: u32 = 0;
    let mut skipped: u32 = 0;
    let mut accrued: u64 = 0;

    for (entry, accounts) in entries
        .iter()
        .zip(ctx.remaining_accounts.chunks_exact(2))
    {
        let outcome = apply_entry(
            ctx.program_id,
            gameweek,
            entry,
            &ctx.accounts.reward_config,
            &accounts[0],
            &accounts[1],
        )?;

        match outcome {
            EntryOutcome::Recorded(ScoreOutcome::Applied { reward }) => {
                applied += 1;
                accrued = accrued.saturating_add(reward);
                msg!(
                    "FPL {}: score {} (total {}, rank {}), reward {}",
                    entry.fpl_id,
                    entry.gameweek_score,
                    entry.total_score,
                    entry.rank,
                    reward
                );
            }
            EntryOutcome::Recorded(ScoreOutcome::Stale {
                last_updated_gameweek,
            }) => {
                skipped += 1;
                msg!(
                    "Skipped FPL {}: already scored through gameweek {}",
                    entry.fpl_id,
                    last_updated_gameweek
                );
            }
            EntryOutcome::UnknownFplId => {
                skipped += 1;
                msg!("Skipped FPL {}: not registered", entry.fpl_id);
            }
        }
    }

    msg!(
        "Gameweek {} scores: {} applied, {} skipped, {} reward accrued",
        gameweek,
        applied,
        skipped,
        accrued
    );

    Ok(())
}
