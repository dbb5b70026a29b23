//! Error types for the FPL Staking program.
//!
//! Every handler aborts with one of these codes; nothing is partially applied.
//!
//! ## Error Code Ranges
//! - 6000-6006: Input validation errors
//! - 6007-6016: State/balance errors
//! - 6017: Time errors
//! - 6018: Math errors
//! - 6019: Authorization errors
//! - 6020-6021: Account validation errors

use anchor_lang::prelude::*;

/// Custom error codes for the FPL Staking program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum FplStakingError {
    // ========== Input Validation Errors ==========

    /// [6000] A configuration value is out of range.
    #[msg("Invalid parameter")]
    InvalidParameter,

    /// [6001] Stake, deposit or withdrawal amount is zero or outside the allowed range.
    #[msg("Invalid amount")]
    InvalidAmount,

    /// [6002] Lock duration is not one of the configured lock options.
    #[msg("Invalid lock duration")]
    InvalidLockDuration,

    /// [6003] External FPL id is empty or longer than 20 bytes.
    #[msg("Invalid FPL ID")]
    InvalidFplId,

    /// [6004] Gameweek is zero, beyond the season, or ahead of the current gameweek.
    #[msg("Invalid gameweek")]
    InvalidGameweek,

    /// [6005] Score batch is empty or larger than the maximum batch size.
    #[msg("Score batch size out of range")]
    InvalidBatchSize,

    /// [6006] Remaining accounts do not line up with the score batch entries.
    #[msg("Score accounts do not match batch entries")]
    ScoreAccountsMismatch,

    // ========== State/Balance Errors ==========

    /// [6007] The singleton account was already initialized.
    #[msg("Account already initialized")]
    AlreadyInitialized,

    /// [6008] Caller already has an FPL user record.
    #[msg("User already registered")]
    AlreadyRegistered,

    /// [6009] External FPL id is registered to another owner.
    #[msg("FPL ID already registered")]
    FplIdTaken,

    /// [6010] Caller already has an open stake position.
    #[msg("An open stake already exists - unstake first")]
    StakeAlreadyOpen,

    /// [6011] The referenced stake or user record is closed or missing.
    #[msg("Account not found")]
    AccountNotFound,

    /// [6012] Caller or vault cannot cover the requested transfer.
    #[msg("Insufficient funds")]
    InsufficientFunds,

    /// [6013] No pending rewards to claim.
    #[msg("Nothing to claim")]
    NothingToClaim,

    /// [6014] Reward pool balance is below the pending reward amount.
    #[msg("Insufficient reward pool balance")]
    InsufficientPoolBalance,

    /// [6015] Treasury withdrawal would dip into the reserve.
    #[msg("Exceeds withdrawal limit")]
    ExceedsWithdrawalLimit,

    /// [6016] New gameweek is lower than the current one.
    #[msg("Gameweek cannot move backwards")]
    GameweekRegression,

    // ========== Time Errors ==========

    /// [6017] Claim cooldown has not elapsed since the last claim.
    #[msg("Too early to claim rewards")]
    TooEarlyToClaim,

    // ========== Math Errors ==========

    /// [6018] Arithmetic overflow or underflow.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    // ========== Authorization Errors ==========

    /// [6019] Signer is not the admin or not the owner of the account.
    #[msg("Unauthorized access")]
    Unauthorized,

    // ========== Account Validation Errors ==========

    /// [6020] Token account mint does not match the reward mint.
    #[msg("Token mint mismatch - wrong token for this pool")]
    MintMismatch,

    /// [6021] Score account is not owned by this program or not writable.
    #[msg("Invalid score account")]
    InvalidScoreAccount,
}

#[cfg(test)]
pub(crate) fn code_of(err: anchor_lang::error::Error) -> u32 {
    match err {
        anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
        other => panic!("expected a program error code, got {other:?}"),
    }
}
