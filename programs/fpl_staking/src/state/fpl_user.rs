use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::FplStakingError;

/// One line of an admin score batch.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct ScoreEntry {
    pub fpl_id: String,
    pub gameweek_score: u32,
    pub total_score: u32,
    pub rank: u32,
}

/// What happened to a single score entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreOutcome {
    Applied { reward: u64 },
    /// The user already has a score for this gameweek or a later one.
    Stale { last_updated_gameweek: u8 },
}

pub fn validate_fpl_id(fpl_id: &str) -> Result<()> {
    require!(
        !fpl_id.is_empty() && fpl_id.len() <= MAX_FPL_ID_LEN,
        FplStakingError::InvalidFplId
    );
    Ok(())
}

#[account]
#[derive(Debug, PartialEq)]
pub struct FplUser {
    pub authority: Pubkey,
    pub fpl_id: String,

    pub last_updated_gameweek: u8,
    pub current_score: u32,
    pub total_score: u32,
    pub last_rank: u32,

    pub pending_rewards: u64,
    pub total_rewards_claimed: u64,
    pub last_reward_claim: i64,
    pub registered_at: i64,

    pub bump: u8,
}

impl FplUser {
    pub const LEN: usize = 8 + 32 + (4 + MAX_FPL_ID_LEN) + 1 + (4 * 3) + (8 * 4) + 1;

    pub fn is_registered(&self) -> bool {
        self.authority != Pubkey::default()
    }

    pub fn register(&mut self, authority: Pubkey, fpl_id: String, now: i64, bump: u8) -> Result<()> {
        require!(!self.is_registered(), FplStakingError::AlreadyRegistered);
        validate_fpl_id(&fpl_id)?;

        self.authority = authority;
        self.fpl_id = fpl_id;
        self.last_updated_gameweek = 0;
        self.current_score = 0;
        self.total_score = 0;
        self.last_rank = 0;
        self.pending_rewards = 0;
        self.total_rewards_claimed = 0;
        self.last_reward_claim = 0;
        self.registered_at = now;
        self.bump = bump;
        Ok(())
    }

    /// Records a gameweek result and accrues `reward`.
    ///
    /// Each gameweek accrues at most once per user; resubmissions for the same
    /// or an earlier gameweek are reported as stale and leave the record untouched.
    pub fn record_gameweek(
        &mut self,
        gameweek: u8,
        entry: &ScoreEntry,
        reward: u64,
    ) -> Result<ScoreOutcome> {
        if gameweek <= self.last_updated_gameweek {
            return Ok(ScoreOutcome::Stale {
                last_updated_gameweek: self.last_updated_gameweek,
            });
        }

        let pending = self
            .pending_rewards
            .checked_add(reward)
            .ok_or(FplStakingError::MathOverflow)?;

        self.current_score = entry.gameweek_score;
        self.total_score = entry.total_score;
        self.last_rank = entry.rank;
        self.last_updated_gameweek = gameweek;
        self.pending_rewards = pending;

        Ok(ScoreOutcome::Applied { reward })
    }

    /// Resets accrual after a payout, returning the amount paid.
    pub fn settle_claim(&mut self, now: i64) -> Result<u64> {
        let amount = self.pending_rewards;
        require!(amount > 0, FplStakingError::NothingToClaim);

        let total_claimed = self
            .total_rewards_claimed
            .checked_add(amount)
            .ok_or(FplStakingError::MathOverflow)?;

        self.pending_rewards = 0;
        self.total_rewards_claimed = total_claimed;
        self.last_reward_claim = now;

        Ok(amount)
    }
}

/// Maps an external FPL id to the owner that registered it.
#[account]
#[derive(Debug)]
pub struct FplIdIndex {
    pub owner: Pubkey,
    pub fpl_user: Pubkey,
    pub bump: u8,
}

impl FplIdIndex {
    pub const LEN: usize = 8 + 32 + 32 + 1;

    pub fn is_claimed(&self) -> bool {
        self.owner != Pubkey::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::code_of;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn blank() -> FplUser {
        FplUser {
            authority: Pubkey::default(),
            fpl_id: String::new(),
            last_updated_gameweek: 0,
            current_score: 0,
            total_score: 0,
            last_rank: 0,
            pending_rewards: 0,
            total_rewards_claimed: 0,
            last_reward_claim: 0,
            registered_at: 0,
            bump: 0,
        }
    }

    fn registered() -> FplUser {
        let mut user = blank();
        user.register(Pubkey::new_unique(), "12345678".to_string(), 1_700_000_000, 254)
            .unwrap();
        user
    }

    fn entry(gameweek_score: u32, total_score: u32) -> ScoreEntry {
        ScoreEntry {
            fpl_id: "12345678".to_string(),
            gameweek_score,
            total_score,
            rank: 100_000,
        }
    }

    #[test]
    fn max_len_id_fits_allocated_space() {
        let mut user = registered();
        user.fpl_id = "9".repeat(MAX_FPL_ID_LEN);
        let serialized = user.try_to_vec().unwrap();
        assert_eq!(8 + serialized.len(), FplUser::LEN);
    }

    #[test]
    fn index_len_matches_serialized_size() {
        let index = FplIdIndex {
            owner: Pubkey::new_unique(),
            fpl_user: Pubkey::new_unique(),
            bump: 253,
        };
        assert_eq!(FplIdIndex::LEN, 8 + index.try_to_vec().unwrap().len());
    }

    #[test]
    fn registration_fills_record() {
        let user = registered();
        assert!(user.is_registered());
        assert_eq!(user.fpl_id, "12345678");
        assert_eq!(user.registered_at, 1_700_000_000);
        assert_eq!(user.pending_rewards, 0);
    }

    #[test]
    fn second_registration_rejected() {
        let mut user = registered();
        let before = user.clone();
        let err = user
            .register(Pubkey::new_unique(), "87654321".to_string(), 1, 1)
            .unwrap_err();
        assert_eq!(code_of(err), u32::from(FplStakingError::AlreadyRegistered));
        assert_eq!(user, before);
    }

    #[test_case(String::new() ; "empty")]
    #[test_case("1".repeat(MAX_FPL_ID_LEN + 1) ; "too long")]
    #[test_case("1".repeat(32) ; "longest seedable id")]
    fn rejects_malformed_fpl_id(fpl_id: String) {
        let err = blank()
            .register(Pubkey::new_unique(), fpl_id, 0, 0)
            .unwrap_err();
        assert_eq!(code_of(err), u32::from(FplStakingError::InvalidFplId));
    }

    #[test]
    fn index_address_exists_only_up_to_seed_limit() {
        let seeded = |len: usize| {
            let id = "1".repeat(len);
            Pubkey::try_find_program_address(&[FPL_ID_SEED, id.as_bytes()], &crate::ID)
        };
        assert!(seeded(32).is_some());
        assert!(seeded(33).is_none());
    }

    #[test]
    fn gameweek_result_overwrites_scores_and_accrues() {
        let mut user = registered();
        let outcome = user.record_gameweek(1, &entry(75, 75), 5_000).unwrap();
        assert_eq!(outcome, ScoreOutcome::Applied { reward: 5_000 });

        let outcome = user.record_gameweek(2, &entry(40, 115), 1_000).unwrap();
        assert_eq!(outcome, ScoreOutcome::Applied { reward: 1_000 });

        assert_eq!(user.current_score, 40);
        assert_eq!(user.total_score, 115);
        assert_eq!(user.last_rank, 100_000);
        assert_eq!(user.last_updated_gameweek, 2);
        assert_eq!(user.pending_rewards, 6_000);
    }

    #[test_case(3 ; "same gameweek")]
    #[test_case(2 ; "earlier gameweek")]
    fn resubmitted_gameweek_is_stale(gameweek: u8) {
        let mut user = registered();
        user.record_gameweek(3, &entry(60, 60), 2_000).unwrap();
        let before = user.clone();

        let outcome = user.record_gameweek(gameweek, &entry(90, 150), 9_000).unwrap();

        assert_eq!(outcome, ScoreOutcome::Stale { last_updated_gameweek: 3 });
        assert_eq!(user, before);
    }

    #[test]
    fn zero_reward_still_records_score() {
        let mut user = registered();
        user.record_gameweek(1, &entry(2, 2), 0).unwrap();
        assert_eq!(user.current_score, 2);
        assert_eq!(user.pending_rewards, 0);
    }

    #[test]
    fn accrual_overflow_leaves_record_untouched() {
        let mut user = registered();
        user.pending_rewards = u64::MAX;
        let before = user.clone();
        assert!(user.record_gameweek(1, &entry(75, 75), 1).is_err());
        assert_eq!(user, before);
    }

    #[test]
    fn claim_resets_pending_and_second_claim_fails() {
        let mut user = registered();
        user.record_gameweek(1, &entry(75, 75), 5_178_571).unwrap();

        assert_eq!(user.settle_claim(1_700_000_500).unwrap(), 5_178_571);
        assert_eq!(user.pending_rewards, 0);
        assert_eq!(user.total_rewards_claimed, 5_178_571);
        assert_eq!(user.last_reward_claim, 1_700_000_500);

        let err = user.settle_claim(1_700_000_600).unwrap_err();
        assert_eq!(code_of(err), u32::from(FplStakingError::NothingToClaim));
        assert_eq!(user.last_reward_claim, 1_700_000_500);
    }
}
