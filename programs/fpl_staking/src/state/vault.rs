use anchor_lang::prelude::*;

use crate::constants::PERCENT_DENOMINATOR;
use crate::error::FplStakingError;
use crate::state::{StakeConfig, UserStakeAccount};

/// How a closed position's principal is split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub principal: u64,
    /// Lamports returned to the owner.
    pub payout: u64,
    /// Early-withdrawal fee owed to the treasury.
    pub fee: u64,
    /// The position predates an emergency drain; nothing is paid out.
    pub stranded: bool,
}

/// Program-owned account holding staked lamports on top of its rent reserve.
///
/// `total_staked` equals the sum of `amount_staked` over open positions opened
/// in the current `emergency_epoch`. An emergency drain zeroes it and starts a
/// new epoch; positions from earlier epochs no longer have backing principal.
#[account]
#[derive(Debug, PartialEq)]
pub struct StakeVault {
    pub total_staked: u64,
    pub staker_count: u64,
    pub emergency_epoch: u64,
    pub total_emergency_withdrawn: u64,
    pub last_emergency_withdrawal: i64,
    pub bump: u8,
}

impl StakeVault {
    pub const LEN: usize = 8 + (8 * 5) + 1;

    /// Adds principal, returning the epoch the new position belongs to.
    pub fn deposit(&mut self, amount: u64) -> Result<u64> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(FplStakingError::MathOverflow)?;
        self.staker_count = self.staker_count.saturating_add(1);
        Ok(self.emergency_epoch)
    }

    /// Opens `position` for `owner` under the stake policy.
    pub fn open_stake(
        &mut self,
        config: &StakeConfig,
        position: &mut UserStakeAccount,
        owner: Pubkey,
        amount: u64,
        lock_duration: u64,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        config.validate_stake(amount, lock_duration)?;
        require!(!position.is_open(), FplStakingError::StakeAlreadyOpen);

        let vault_epoch = self.deposit(amount)?;
        position.open(owner, amount, lock_duration, now, vault_epoch, bump)
    }

    /// Closes `position` and splits its principal into payout and fee.
    ///
    /// A position opened before the last emergency drain is closed with
    /// nothing paid out, which frees the owner's slot. On error nothing changes.
    pub fn settle_unstake(
        &mut self,
        config: &StakeConfig,
        position: &mut UserStakeAccount,
        now: i64,
    ) -> Result<Settlement> {
        require!(position.is_open(), FplStakingError::AccountNotFound);
        let principal = position.amount_staked;

        if position.vault_epoch != self.emergency_epoch {
            position.close_position()?;
            return Ok(Settlement {
                principal,
                payout: 0,
                fee: 0,
                stranded: true,
            });
        }

        let fee = config.early_withdrawal_fee(principal, now, position.lock_end)?;
        let payout = principal
            .checked_sub(fee)
            .ok_or(FplStakingError::MathOverflow)?;
        self.release(principal, position.vault_epoch)?;
        position.close_position()?;

        Ok(Settlement {
            principal,
            payout,
            fee,
            stranded: false,
        })
    }

    /// Releases one position's principal.
    ///
    /// Positions opened before the last emergency drain are unbacked and fail
    /// with `InsufficientFunds`.
    pub fn release(&mut self, amount: u64, position_epoch: u64) -> Result<()> {
        require!(
            position_epoch == self.emergency_epoch,
            FplStakingError::InsufficientFunds
        );
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(FplStakingError::InsufficientFunds)?;
        self.staker_count = self.staker_count.saturating_sub(1);
        Ok(())
    }

    /// Zeroes the ledger regardless of open positions and records the
    /// `drained` lamports that actually left the vault.
    pub fn record_emergency_drain(&mut self, drained: u64, now: i64) -> Result<()> {
        self.total_emergency_withdrawn = self
            .total_emergency_withdrawn
            .checked_add(drained)
            .ok_or(FplStakingError::MathOverflow)?;
        self.emergency_epoch = self
            .emergency_epoch
            .checked_add(1)
            .ok_or(FplStakingError::MathOverflow)?;
        self.total_staked = 0;
        self.staker_count = 0;
        self.last_emergency_withdrawal = now;
        Ok(())
    }
}

/// Program-owned account collecting early-withdrawal fees and deposits.
#[account]
#[derive(Debug, PartialEq)]
pub struct Treasury {
    pub admin: Pubkey,
    pub total_fees_collected: u64,
    pub total_deposited: u64,
    pub total_withdrawn: u64,
    /// Percent of the available balance that can never be withdrawn.
    pub reserve_percentage: u8,
    pub bump: u8,
}

impl Treasury {
    pub const LEN: usize = 8 + 32 + (8 * 3) + 1 + 1;

    pub fn collect_fee(&mut self, fee: u64) -> Result<()> {
        self.total_fees_collected = self
            .total_fees_collected
            .checked_add(fee)
            .ok_or(FplStakingError::MathOverflow)?;
        Ok(())
    }

    pub fn record_deposit(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, FplStakingError::InvalidAmount);
        self.total_deposited = self
            .total_deposited
            .checked_add(amount)
            .ok_or(FplStakingError::MathOverflow)?;
        Ok(())
    }

    pub fn set_reserve_percentage(&mut self, reserve_percentage: u8) -> Result<()> {
        require!(
            u64::from(reserve_percentage) <= PERCENT_DENOMINATOR,
            FplStakingError::InvalidParameter
        );
        self.reserve_percentage = reserve_percentage;
        Ok(())
    }

    /// Largest withdrawal that keeps `reserve_percentage` of `available` in place.
    pub fn max_withdrawable(&self, available: u64) -> Result<u64> {
        let reserved = (available as u128)
            .checked_mul(self.reserve_percentage as u128)
            .ok_or(FplStakingError::MathOverflow)?
            .checked_div(PERCENT_DENOMINATOR as u128)
            .ok_or(FplStakingError::MathOverflow)?;
        let reserved = u64::try_from(reserved).map_err(|_| FplStakingError::MathOverflow)?;

        Ok(available.saturating_sub(reserved))
    }

    pub fn record_withdrawal(&mut self, amount: u64, available: u64) -> Result<()> {
        require!(amount > 0, FplStakingError::InvalidAmount);
        require!(
            amount <= self.max_withdrawable(available)?,
            FplStakingError::ExceedsWithdrawalLimit
        );
        self.total_withdrawn = self
            .total_withdrawn
            .checked_add(amount)
            .ok_or(FplStakingError::MathOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::code_of;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn vault() -> StakeVault {
        StakeVault {
            total_staked: 0,
            staker_count: 0,
            emergency_epoch: 0,
            total_emergency_withdrawn: 0,
            last_emergency_withdrawal: 0,
            bump: 255,
        }
    }

    const WEEK: u64 = 7 * 86_400;

    fn stake_config() -> StakeConfig {
        StakeConfig {
            admin: Pubkey::new_unique(),
            min_stake_amount: 100_000_000,
            max_stake_amount: 100_000_000_000,
            early_withdrawal_fee_percent: 10,
            lock_options: vec![WEEK],
            vault_bump: 255,
            treasury_bump: 254,
            bump: 253,
        }
    }

    fn closed_position() -> UserStakeAccount {
        UserStakeAccount {
            owner: Pubkey::default(),
            amount_staked: 0,
            lock_start: 0,
            lock_end: 0,
            vault_epoch: 0,
            bump: 0,
        }
    }

    fn treasury(reserve_percentage: u8) -> Treasury {
        Treasury {
            admin: Pubkey::new_unique(),
            total_fees_collected: 0,
            total_deposited: 0,
            total_withdrawn: 0,
            reserve_percentage,
            bump: 254,
        }
    }

    #[test]
    fn lens_match_serialized_sizes() {
        assert_eq!(StakeVault::LEN, 8 + vault().try_to_vec().unwrap().len());
        assert_eq!(Treasury::LEN, 8 + treasury(0).try_to_vec().unwrap().len());
    }

    #[test]
    fn deposit_and_release_track_open_principal() {
        let mut v = vault();
        assert_eq!(v.deposit(1_000).unwrap(), 0);
        v.deposit(300).unwrap();
        v.release(1_000, 0).unwrap();
        assert_eq!((v.total_staked, v.staker_count), (300, 1));
    }

    #[test]
    fn emergency_drain_zeroes_ledger_and_audits() {
        let mut v = vault();
        v.deposit(300_000_000).unwrap();
        v.record_emergency_drain(300_000_000, 42).unwrap();

        assert_eq!(v.total_staked, 0);
        assert_eq!(v.emergency_epoch, 1);
        assert_eq!(v.total_emergency_withdrawn, 300_000_000);
        assert_eq!(v.last_emergency_withdrawal, 42);
    }

    #[test]
    fn drained_position_cannot_take_later_principal() {
        let mut v = vault();
        let drained_epoch = v.deposit(300_000_000).unwrap();
        v.record_emergency_drain(300_000_000, 42).unwrap();
        let fresh_epoch = v.deposit(500_000_000).unwrap();
        let before = v.clone();

        let err = v.release(300_000_000, drained_epoch).unwrap_err();
        assert_eq!(code_of(err), u32::from(FplStakingError::InsufficientFunds));
        assert_eq!(v, before);

        v.release(500_000_000, fresh_epoch).unwrap();
        assert_eq!(v.total_staked, 0);
    }

    #[test]
    fn open_stake_rejects_second_position() {
        let config = stake_config();
        let mut v = vault();
        let mut position = closed_position();
        let owner = Pubkey::new_unique();
        v.open_stake(&config, &mut position, owner, 1_000_000_000, WEEK, 0, 250)
            .unwrap();
        let (vault_before, position_before) = (v.clone(), position.clone());

        let err = v
            .open_stake(&config, &mut position, owner, 1_000_000_000, WEEK, 10, 250)
            .unwrap_err();
        assert_eq!(code_of(err), u32::from(FplStakingError::StakeAlreadyOpen));
        assert_eq!(v, vault_before);
        assert_eq!(position, position_before);
    }

    #[test]
    fn settle_before_lock_end_withholds_fee() {
        let config = stake_config();
        let mut v = vault();
        let mut position = closed_position();
        v.open_stake(&config, &mut position, Pubkey::new_unique(), 1_000_000_000, WEEK, 0, 250)
            .unwrap();

        let settlement = v.settle_unstake(&config, &mut position, 60).unwrap();

        assert_eq!(
            settlement,
            Settlement {
                principal: 1_000_000_000,
                payout: 900_000_000,
                fee: 100_000_000,
                stranded: false,
            }
        );
        assert!(!position.is_open());
        assert_eq!((v.total_staked, v.staker_count), (0, 0));
    }

    #[test]
    fn drained_position_closes_without_payout_and_frees_slot() {
        let config = stake_config();
        let mut v = vault();
        let mut position = closed_position();
        let owner = Pubkey::new_unique();
        v.open_stake(&config, &mut position, owner, 300_000_000, WEEK, 0, 250)
            .unwrap();
        v.record_emergency_drain(300_000_000, 42).unwrap();

        let settlement = v.settle_unstake(&config, &mut position, 60).unwrap();
        assert_eq!(
            settlement,
            Settlement {
                principal: 300_000_000,
                payout: 0,
                fee: 0,
                stranded: true,
            }
        );
        assert!(!position.is_open());
        assert_eq!(v.total_staked, 0);

        v.open_stake(&config, &mut position, owner, 500_000_000, WEEK, 100, 250)
            .unwrap();
        assert_eq!(position.vault_epoch, 1);
        assert_eq!(v.total_staked, 500_000_000);
    }

    #[test]
    fn settle_without_open_position_fails() {
        let mut v = vault();
        let mut position = closed_position();
        let err = v
            .settle_unstake(&stake_config(), &mut position, 0)
            .unwrap_err();
        assert_eq!(code_of(err), u32::from(FplStakingError::AccountNotFound));
    }

    #[test]
    fn release_beyond_ledger_is_insufficient() {
        let mut v = vault();
        v.deposit(100).unwrap();
        assert_eq!(
            code_of(v.release(101, 0).unwrap_err()),
            u32::from(FplStakingError::InsufficientFunds)
        );
    }

    #[test_case(0, 1_000, 1_000 ; "no reserve")]
    #[test_case(20, 1_000, 800 ; "twenty percent reserve")]
    #[test_case(33, 1_000, 670 ; "reserve truncates")]
    #[test_case(100, 1_000, 0 ; "fully reserved")]
    fn withdrawal_limit(reserve: u8, available: u64, expected: u64) {
        assert_eq!(treasury(reserve).max_withdrawable(available).unwrap(), expected);
    }

    #[test]
    fn withdrawal_beyond_reserve_is_rejected() {
        let mut t = treasury(20);
        let err = t.record_withdrawal(801, 1_000).unwrap_err();
        assert_eq!(code_of(err), u32::from(FplStakingError::ExceedsWithdrawalLimit));
        t.record_withdrawal(800, 1_000).unwrap();
        assert_eq!(t.total_withdrawn, 800);
    }

    #[test]
    fn zero_deposit_and_withdrawal_rejected() {
        let mut t = treasury(0);
        assert_eq!(
            code_of(t.record_deposit(0).unwrap_err()),
            u32::from(FplStakingError::InvalidAmount)
        );
        assert_eq!(
            code_of(t.record_withdrawal(0, 10).unwrap_err()),
            u32::from(FplStakingError::InvalidAmount)
        );
    }

    #[test]
    fn reserve_percentage_bounded() {
        let mut t = treasury(10);
        assert!(t.set_reserve_percentage(101).is_err());
        assert_eq!(t.reserve_percentage, 10);
        t.set_reserve_percentage(100).unwrap();
        assert_eq!(t.reserve_percentage, 100);
    }

    #[test]
    fn fees_accumulate() {
        let mut t = treasury(0);
        t.collect_fee(100_000_000).unwrap();
        t.collect_fee(0).unwrap();
        t.collect_fee(30_000_000).unwrap();
        assert_eq!(t.total_fees_collected, 130_000_000);
    }
}
