use anchor_lang::prelude::*;

use crate::error::FplStakingError;

/// An open, time-locked SOL position. Closed (and its rent refunded) on unstake.
#[account]
#[derive(Debug, PartialEq)]
pub struct UserStakeAccount {
    pub owner: Pubkey,
    pub amount_staked: u64,
    pub lock_start: i64,
    pub lock_end: i64,
    /// Vault emergency epoch the principal was deposited in.
    pub vault_epoch: u64,
    pub bump: u8,
}

impl UserStakeAccount {
    pub const LEN: usize = 8 + 32 + 8 + 8 + 8 + 8 + 1;

    pub fn is_open(&self) -> bool {
        self.amount_staked > 0
    }

    pub fn is_locked(&self, now: i64) -> bool {
        now < self.lock_end
    }

    /// Opens a position. One position per owner; re-staking while open is rejected.
    pub fn open(
        &mut self,
        owner: Pubkey,
        amount: u64,
        lock_duration: u64,
        now: i64,
        vault_epoch: u64,
        bump: u8,
    ) -> Result<()> {
        require!(!self.is_open(), FplStakingError::StakeAlreadyOpen);
        require!(amount > 0, FplStakingError::InvalidAmount);

        let duration = i64::try_from(lock_duration).map_err(|_| FplStakingError::MathOverflow)?;
        let lock_end = now
            .checked_add(duration)
            .ok_or(FplStakingError::MathOverflow)?;

        self.owner = owner;
        self.amount_staked = amount;
        self.lock_start = now;
        self.lock_end = lock_end;
        self.vault_epoch = vault_epoch;
        self.bump = bump;
        Ok(())
    }

    /// Empties the position, returning the principal it held.
    pub fn close_position(&mut self) -> Result<u64> {
        require!(self.is_open(), FplStakingError::AccountNotFound);
        let amount = self.amount_staked;
        self.amount_staked = 0;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECONDS_PER_DAY;
    use crate::error::code_of;

    const WEEK: u64 = 7 * SECONDS_PER_DAY as u64;

    fn empty() -> UserStakeAccount {
        UserStakeAccount {
            owner: Pubkey::default(),
            amount_staked: 0,
            lock_start: 0,
            lock_end: 0,
            vault_epoch: 0,
            bump: 0,
        }
    }

    #[test]
    fn len_matches_serialized_size() {
        let serialized = empty().try_to_vec().unwrap();
        assert_eq!(UserStakeAccount::LEN, 8 + serialized.len());
    }

    #[test]
    fn open_sets_lock_window() {
        let owner = Pubkey::new_unique();
        let mut stake = empty();
        stake.open(owner, 1_000_000_000, WEEK, 1_000, 0, 253).unwrap();

        assert!(stake.is_open());
        assert_eq!(stake.owner, owner);
        assert_eq!(stake.lock_start, 1_000);
        assert_eq!(stake.lock_end, 1_000 + WEEK as i64);
        assert!(stake.is_locked(1_000 + WEEK as i64 - 1));
        assert!(!stake.is_locked(1_000 + WEEK as i64));
    }

    #[test]
    fn reopening_an_open_position_is_rejected() {
        let mut stake = empty();
        stake.open(Pubkey::new_unique(), 500, WEEK, 0, 0, 1).unwrap();
        let before = stake.clone();

        let err = stake.open(stake.owner, 300, WEEK, 10, 0, 1).unwrap_err();

        assert_eq!(code_of(err), u32::from(FplStakingError::StakeAlreadyOpen));
        assert_eq!(stake, before);
    }

    #[test]
    fn lock_end_overflow_is_rejected() {
        let mut stake = empty();
        let err = stake
            .open(Pubkey::new_unique(), 1, i64::MAX as u64, 1, 0, 1)
            .unwrap_err();
        assert_eq!(code_of(err), u32::from(FplStakingError::MathOverflow));
        assert!(!stake.is_open());
    }

    #[test]
    fn close_returns_principal_once() {
        let mut stake = empty();
        stake.open(Pubkey::new_unique(), 300_000_000, WEEK, 0, 2, 1).unwrap();
        assert_eq!(stake.close_position().unwrap(), 300_000_000);
        assert_eq!(
            code_of(stake.close_position().unwrap_err()),
            u32::from(FplStakingError::AccountNotFound)
        );
    }
}
