use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::FplStakingError;

/// Season parameters supplied by the admin at initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct GlobalParams {
    pub current_gameweek: u8,
    pub season_start: i64,
    pub season_end: i64,
    pub api_url: String,
}

impl GlobalParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.season_start < self.season_end,
            FplStakingError::InvalidParameter
        );
        require!(
            !self.api_url.is_empty() && self.api_url.len() <= MAX_API_URL_LEN,
            FplStakingError::InvalidParameter
        );
        require!(
            self.current_gameweek <= MAX_GAMEWEEK,
            FplStakingError::InvalidParameter
        );
        Ok(())
    }
}

#[account]
#[derive(Debug)]
pub struct GlobalState {
    pub admin: Pubkey,
    pub current_gameweek: u8,
    pub season_start: i64,
    pub season_end: i64,
    pub api_url: String,
    pub bump: u8,
}

impl GlobalState {
    pub const LEN: usize = 8 + 32 + 1 + (8 * 2) + (4 + MAX_API_URL_LEN) + 1;

    pub fn is_initialized(&self) -> bool {
        self.admin != Pubkey::default()
    }

    /// Fills freshly allocated state. Fails on state that already has an admin.
    pub fn initialize(&mut self, admin: Pubkey, params: GlobalParams, bump: u8) -> Result<()> {
        require!(!self.is_initialized(), FplStakingError::AlreadyInitialized);
        params.validate()?;

        self.admin = admin;
        self.current_gameweek = params.current_gameweek;
        self.season_start = params.season_start;
        self.season_end = params.season_end;
        self.api_url = params.api_url;
        self.bump = bump;
        Ok(())
    }

    /// Moves the season to `gameweek`, returning the previous value.
    pub fn advance_gameweek(&mut self, gameweek: u8) -> Result<u8> {
        require!(gameweek <= MAX_GAMEWEEK, FplStakingError::InvalidGameweek);
        require!(
            gameweek >= self.current_gameweek,
            FplStakingError::GameweekRegression
        );
        let previous = self.current_gameweek;
        self.current_gameweek = gameweek;
        Ok(previous)
    }

    /// Scores may only be submitted for gameweeks that have started.
    pub fn check_score_gameweek(&self, gameweek: u8) -> Result<()> {
        require!(
            gameweek > 0 && gameweek <= self.current_gameweek,
            FplStakingError::InvalidGameweek
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::code_of;
    use test_case::test_case;

    fn params() -> GlobalParams {
        GlobalParams {
            current_gameweek: 1,
            season_start: 1_723_161_600,
            season_end: 1_747_526_400,
            api_url: "https://fantasy.premierleague.com/api".to_string(),
        }
    }

    fn state(current_gameweek: u8) -> GlobalState {
        GlobalState {
            admin: Pubkey::new_unique(),
            current_gameweek,
            season_start: 0,
            season_end: 1,
            api_url: String::new(),
            bump: 255,
        }
    }

    #[test]
    fn accepts_well_formed_season() {
        assert!(params().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_season_window() {
        let mut p = params();
        p.season_end = p.season_start;
        assert_eq!(
            code_of(p.validate().unwrap_err()),
            u32::from(FplStakingError::InvalidParameter)
        );
    }

    #[test_case(String::new() ; "empty url")]
    #[test_case("x".repeat(MAX_API_URL_LEN + 1) ; "oversized url")]
    fn rejects_bad_api_url(url: String) {
        let mut p = params();
        p.api_url = url;
        assert!(p.validate().is_err());
    }

    #[test]
    fn len_fits_longest_api_url() {
        let mut s = state(MAX_GAMEWEEK);
        s.api_url = "x".repeat(MAX_API_URL_LEN);
        assert_eq!(GlobalState::LEN, 8 + s.try_to_vec().unwrap().len());
    }

    #[test]
    fn initialize_fills_blank_state() {
        let mut s = state(0);
        s.admin = Pubkey::default();
        let admin = Pubkey::new_unique();
        s.initialize(admin, params(), 254).unwrap();
        assert_eq!(s.admin, admin);
        assert_eq!(s.current_gameweek, 1);
        assert_eq!(s.api_url, "https://fantasy.premierleague.com/api");
        assert_eq!(s.bump, 254);
    }

    #[test]
    fn second_initialization_rejected() {
        let mut s = state(4);
        let admin = s.admin;
        let err = s.initialize(Pubkey::new_unique(), params(), 1).unwrap_err();
        assert_eq!(code_of(err), u32::from(FplStakingError::AlreadyInitialized));
        assert_eq!((s.admin, s.current_gameweek, s.bump), (admin, 4, 255));
    }

    #[test]
    fn uninitialized_state_has_default_admin() {
        let mut s = state(0);
        assert!(s.is_initialized());
        s.admin = Pubkey::default();
        assert!(!s.is_initialized());
    }

    #[test]
    fn gameweek_moves_forward_or_stays() {
        let mut s = state(3);
        assert_eq!(s.advance_gameweek(3).unwrap(), 3);
        assert_eq!(s.advance_gameweek(7).unwrap(), 3);
        assert_eq!(s.current_gameweek, 7);
    }

    #[test]
    fn gameweek_never_moves_backwards() {
        let mut s = state(5);
        assert_eq!(
            code_of(s.advance_gameweek(4).unwrap_err()),
            u32::from(FplStakingError::GameweekRegression)
        );
        assert_eq!(s.current_gameweek, 5);
    }

    #[test]
    fn gameweek_capped_at_season_length() {
        let mut s = state(37);
        assert_eq!(
            code_of(s.advance_gameweek(MAX_GAMEWEEK + 1).unwrap_err()),
            u32::from(FplStakingError::InvalidGameweek)
        );
    }

    #[test_case(0, false ; "gameweek zero")]
    #[test_case(1, true ; "first gameweek")]
    #[test_case(4, true ; "current gameweek")]
    #[test_case(5, false ; "future gameweek")]
    fn score_gameweek_window(gameweek: u8, ok: bool) {
        assert_eq!(state(4).check_score_gameweek(gameweek).is_ok(), ok);
    }
}
