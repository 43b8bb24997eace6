use anchor_lang::prelude::*;

use crate::constants::{MAX_FEE_BASIS_POINTS, MAX_QUESTION_LEN};
use crate::errors::MarketError;

/// ─── Global Config ────────────────────────────────────────────────
///
/// PDA: seeds = [b"config"]
///
/// Protocol-level settings. Copied by value into every market at creation.
#[account]
#[derive(Default, Debug)]
pub struct GlobalConfig {
    /// Protocol authority (resolves, cancels, updates config, pauses).
    pub admin: Pubkey,

    /// Wallet that receives market creation fees.
    pub fee_recipient: Pubkey,

    /// Fee cap in basis points (never above 1000 = 10%).
    pub max_fee_basis_points: u16,

    /// Circuit breaker for creation and betting.
    pub paused: bool,

    /// SPL mint every market settles in.
    pub asset_mint: Pubkey,

    /// Total markets created. The next market id is `market_count + 1`.
    pub market_count: u64,

    /// Total stake accepted across all markets.
    pub total_volume: u64,

    /// Set while a mutating instruction is in progress.
    pub locked: bool,

    /// Bump seed.
    pub bump: u8,
}

impl GlobalConfig {
    pub const SIZE: usize = 8  // discriminator
        + 32                    // admin
        + 32                    // fee_recipient
        + 2                     // max_fee_basis_points
        + 1                     // paused
        + 32                    // asset_mint
        + 8                     // market_count
        + 8                     // total_volume
        + 1                     // locked
        + 1;                    // bump

    pub fn ensure_admin(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.admin, MarketError::Unauthorized);
        Ok(())
    }

    pub fn ensure_not_paused(&self) -> Result<()> {
        require!(!self.paused, MarketError::Paused);
        Ok(())
    }

    /// Ids are 1-based; anything outside `1..=market_count` was never created.
    pub fn ensure_market_exists(&self, market_id: u64) -> Result<()> {
        require!(
            market_id >= 1 && market_id <= self.market_count,
            MarketError::MarketNotFound
        );
        Ok(())
    }

    pub fn set_fee_policy(&mut self, fee_recipient: Pubkey, max_fee_basis_points: u16) -> Result<()> {
        require!(
            max_fee_basis_points <= MAX_FEE_BASIS_POINTS,
            MarketError::FeeTooHigh
        );
        self.fee_recipient = fee_recipient;
        self.max_fee_basis_points = max_fee_basis_points;
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        if paused {
            require!(!self.paused, MarketError::AlreadyPaused);
        } else {
            require!(self.paused, MarketError::NotPaused);
        }
        self.paused = paused;
        Ok(())
    }

    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            fee_recipient: self.fee_recipient,
            max_fee_basis_points: self.max_fee_basis_points,
        }
    }

    pub fn next_market_id(&self) -> Result<u64> {
        Ok(self
            .market_count
            .checked_add(1)
            .ok_or(MarketError::Overflow)?)
    }

    /// PDA seed of the market the next `create_market` will allocate.
    pub fn next_market_seed(&self) -> [u8; 8] {
        self.market_count.wrapping_add(1).to_le_bytes()
    }

    /// Consume the next id. Ids are never reused.
    pub fn register_market(&mut self) -> Result<u64> {
        let market_id = self.next_market_id()?;
        self.market_count = market_id;
        Ok(market_id)
    }

    pub fn record_volume(&mut self, amount: u64) -> Result<()> {
        self.total_volume = self
            .total_volume
            .checked_add(amount)
            .ok_or(MarketError::Overflow)?;
        Ok(())
    }
}

/// ─── Config Snapshot ──────────────────────────────────────────────
///
/// Frozen copy of the fee policy a market was created under. Later admin
/// changes never touch it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct ConfigSnapshot {
    pub fee_recipient: Pubkey,
    pub max_fee_basis_points: u16,
}

impl ConfigSnapshot {
    pub const SIZE: usize = 32 + 2;
}

/// ─── Market Account ───────────────────────────────────────────────
///
/// PDA: seeds = [b"market", market_id.to_le_bytes()]
///
/// Stores all state for a single binary pot market. Never closed: the
/// terminal record stays around for claims and audit.
#[account]
#[derive(Default, Debug)]
pub struct Market {
    /// Unique numeric identifier (1-based, incrementing).
    pub market_id: u64,

    /// Creator's public key.
    pub creator: Pubkey,

    /// Human-readable question (max 256 bytes).
    pub question: String,

    /// Betting closes at this Unix timestamp; resolution opens at it.
    pub resolution_timestamp: i64,

    /// Unix timestamp of creation.
    pub created_at: i64,

    /// Lifecycle state.
    pub state: MarketState,

    /// Winning side (only set when state == Resolved).
    pub winning_outcome: Outcome,

    // ─── Pool accounting ───
    /// Total stake on YES.
    pub yes_pool: u64,

    /// Total stake on NO.
    pub no_pool: u64,

    /// Flat fee the creator paid to the fee recipient.
    pub creation_fee: u64,

    /// Fee policy in force when the market was created.
    pub config: ConfigSnapshot,

    /// Custody token account (PDA, authority = this market).
    pub vault: Pubkey,

    /// Vault bump seed.
    pub vault_bump: u8,

    /// Market PDA bump seed.
    pub bump: u8,

    // ─── Settlement state ───
    /// Unix timestamp of resolution or cancellation (0 while Active).
    pub finalized_at: i64,

    /// Total paid out through claims.
    pub total_paid_out: u64,

    /// Number of positions claimed.
    pub claims_count: u64,
}

impl Market {
    /// Account size for Anchor allocation.
    pub const SIZE: usize = 8  // discriminator
        + 8                     // market_id
        + 32                    // creator
        + (4 + MAX_QUESTION_LEN) // question
        + 8                     // resolution_timestamp
        + 8                     // created_at
        + 1                     // state
        + 1                     // winning_outcome
        + 8                     // yes_pool
        + 8                     // no_pool
        + 8                     // creation_fee
        + ConfigSnapshot::SIZE  // config
        + 32                    // vault
        + 1                     // vault_bump
        + 1                     // bump
        + 8                     // finalized_at
        + 8                     // total_paid_out
        + 8;                    // claims_count

    /// Build a fresh Active market, validating the creation terms.
    pub fn open(
        market_id: u64,
        creator: Pubkey,
        question: String,
        resolution_timestamp: i64,
        creation_fee: u64,
        config: ConfigSnapshot,
        now: i64,
    ) -> Result<Self> {
        require!(!question.is_empty(), MarketError::EmptyQuestion);
        require!(
            question.len() <= MAX_QUESTION_LEN,
            MarketError::QuestionTooLong
        );
        require!(
            resolution_timestamp > now,
            MarketError::ResolutionTimeInPast
        );

        Ok(Self {
            market_id,
            creator,
            question,
            resolution_timestamp,
            created_at: now,
            state: MarketState::Active,
            winning_outcome: Outcome::Unresolved,
            creation_fee,
            config,
            ..Default::default()
        })
    }

    pub fn is_finalized(&self) -> bool {
        self.state != MarketState::Active
    }

    /// Total stake held for this market.
    pub fn total_pool(&self) -> Result<u64> {
        Ok(self
            .yes_pool
            .checked_add(self.no_pool)
            .ok_or(MarketError::Overflow)?)
    }

    /// Record a bet against `position`.
    ///
    /// Pools and the position are only touched once every check has passed,
    /// so a failed bet leaves both untouched.
    pub fn record_bet(
        &mut self,
        position: &mut UserPosition,
        outcome: Outcome,
        amount: u64,
        now: i64,
    ) -> Result<()> {
        require!(amount > 0, MarketError::ZeroAmount);
        require!(
            self.state == MarketState::Active,
            MarketError::MarketNotActive
        );
        require!(
            now < self.resolution_timestamp,
            MarketError::MarketExpired
        );

        match outcome {
            Outcome::Yes => {
                let pool = self.yes_pool.checked_add(amount).ok_or(MarketError::Overflow)?;
                let bet = position.yes_bet.checked_add(amount).ok_or(MarketError::Overflow)?;
                self.yes_pool = pool;
                position.yes_bet = bet;
            }
            Outcome::No => {
                let pool = self.no_pool.checked_add(amount).ok_or(MarketError::Overflow)?;
                let bet = position.no_bet.checked_add(amount).ok_or(MarketError::Overflow)?;
                self.no_pool = pool;
                position.no_bet = bet;
            }
            Outcome::Unresolved => return err!(MarketError::InvalidOutcome),
        }

        Ok(())
    }

    /// Active -> Resolved. Both pools must hold stake; a one-sided market
    /// has to be cancelled instead.
    pub fn resolve(&mut self, outcome: Outcome, now: i64) -> Result<()> {
        require!(!self.is_finalized(), MarketError::MarketFinalized);
        require!(
            now >= self.resolution_timestamp,
            MarketError::MarketNotExpired
        );
        require!(
            outcome != Outcome::Unresolved,
            MarketError::InvalidOutcome
        );
        require!(
            self.yes_pool > 0 && self.no_pool > 0,
            MarketError::NoOpposition
        );

        self.state = MarketState::Resolved;
        self.winning_outcome = outcome;
        self.finalized_at = now;
        Ok(())
    }

    /// Active -> Cancelled. Every position becomes refundable in full.
    pub fn cancel(&mut self, now: i64) -> Result<()> {
        require!(!self.is_finalized(), MarketError::MarketFinalized);
        require!(
            now >= self.resolution_timestamp,
            MarketError::MarketNotExpired
        );

        self.state = MarketState::Cancelled;
        self.finalized_at = now;
        Ok(())
    }

    /// Amount `position` is entitled to, ignoring whether it was claimed.
    ///
    /// Resolved:
    ///   payout = stake + stake × losing_pool / winning_pool
    /// where `stake` is the position's bet on the winning side. The division
    /// truncates; the remainder (dust) stays in the vault.
    ///
    /// Cancelled:
    ///   payout = yes_bet + no_bet
    pub fn payout_for(&self, position: &UserPosition) -> Result<u64> {
        match self.state {
            MarketState::Active => err!(MarketError::MarketNotFinalized),
            MarketState::Cancelled => position.total_stake(),
            MarketState::Resolved => {
                let (winning_pool, losing_pool) = match self.winning_outcome {
                    Outcome::Yes => (self.yes_pool, self.no_pool),
                    Outcome::No => (self.no_pool, self.yes_pool),
                    Outcome::Unresolved => return err!(MarketError::InvalidOutcome),
                };

                let stake = position.stake_on(self.winning_outcome);
                if stake == 0 || winning_pool == 0 {
                    return Ok(0);
                }

                let share = (stake as u128)
                    .checked_mul(losing_pool as u128)
                    .ok_or(MarketError::Overflow)?
                    / winning_pool as u128;
                let share = u64::try_from(share).map_err(|_| MarketError::Overflow)?;

                Ok(stake.checked_add(share).ok_or(MarketError::Overflow)?)
            }
        }
    }

    /// Read-only projection of `claim`: 0 while Active or once claimed.
    pub fn projected_payout(&self, position: &UserPosition) -> Result<u64> {
        if !self.is_finalized() || position.claimed {
            return Ok(0);
        }
        self.payout_for(position)
    }

    /// Settle `position` and return the amount owed to its holder.
    ///
    /// The position is marked claimed here, before any funds leave the
    /// vault. A losing position settles for 0.
    pub fn claim(&mut self, position: &mut UserPosition) -> Result<u64> {
        require!(self.is_finalized(), MarketError::MarketNotFinalized);
        require!(!position.claimed, MarketError::AlreadyClaimed);
        require!(position.has_stake(), MarketError::NoStake);

        let payout = self.payout_for(position)?;
        let total_paid_out = self
            .total_paid_out
            .checked_add(payout)
            .ok_or(MarketError::Overflow)?;
        let claims_count = self
            .claims_count
            .checked_add(1)
            .ok_or(MarketError::Overflow)?;

        position.claimed = true;
        position.payout = payout;
        self.total_paid_out = total_paid_out;
        self.claims_count = claims_count;

        Ok(payout)
    }
}

/// ─── Market State ─────────────────────────────────────────────────
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum MarketState {
    /// Market is accepting bets (until its resolution timestamp).
    #[default]
    Active,

    /// Outcome has been determined; winners can claim.
    Resolved,

    /// Market was cancelled; every stake is refundable.
    Cancelled,
}

/// ─── Outcome ──────────────────────────────────────────────────────
///
/// Side selector for bets and the winning side of a resolved market.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Outcome {
    #[default]
    Unresolved,
    Yes,
    No,
}

/// ─── User Position ────────────────────────────────────────────────
///
/// PDA: seeds = [b"position", market.key, user.key]
///
/// A user's cumulative stake on each side of one market.
#[account]
#[derive(Default, Debug)]
pub struct UserPosition {
    /// The market this position belongs to.
    pub market: Pubkey,

    /// The user who owns this position.
    pub user: Pubkey,

    /// Total staked on YES.
    pub yes_bet: u64,

    /// Total staked on NO.
    pub no_bet: u64,

    /// Whether this position has been claimed.
    pub claimed: bool,

    /// Amount paid out (set at claim).
    pub payout: u64,

    /// Bump seed.
    pub bump: u8,
}

impl UserPosition {
    pub const SIZE: usize = 8  // discriminator
        + 32                    // market
        + 32                    // user
        + 8                     // yes_bet
        + 8                     // no_bet
        + 1                     // claimed
        + 8                     // payout
        + 1;                    // bump

    pub fn stake_on(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Yes => self.yes_bet,
            Outcome::No => self.no_bet,
            Outcome::Unresolved => 0,
        }
    }

    pub fn total_stake(&self) -> Result<u64> {
        Ok(self
            .yes_bet
            .checked_add(self.no_bet)
            .ok_or(MarketError::Overflow)?)
    }

    pub fn has_stake(&self) -> bool {
        self.yes_bet > 0 || self.no_bet > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    const NOW: i64 = 1_700_000_000;
    const DEADLINE: i64 = NOW + 3_600;

    fn config() -> GlobalConfig {
        GlobalConfig {
            admin: Pubkey::new_unique(),
            fee_recipient: Pubkey::new_unique(),
            max_fee_basis_points: 250,
            asset_mint: Pubkey::new_unique(),
            ..Default::default()
        }
    }

    fn market() -> Market {
        Market::open(
            1,
            Pubkey::new_unique(),
            "Will it rain tomorrow?".to_string(),
            DEADLINE,
            0,
            config().snapshot(),
            NOW,
        )
        .unwrap()
    }

    fn position() -> UserPosition {
        UserPosition {
            market: Pubkey::new_unique(),
            user: Pubkey::new_unique(),
            ..Default::default()
        }
    }

    fn bet(market: &mut Market, outcome: Outcome, amount: u64) -> UserPosition {
        let mut position = position();
        market.record_bet(&mut position, outcome, amount, NOW).unwrap();
        position
    }

    #[test]
    fn open_initializes_active_market() {
        let cfg = config();
        let market = Market::open(7, Pubkey::new_unique(), "Q".into(), DEADLINE, 25, cfg.snapshot(), NOW)
            .unwrap();

        assert_eq!(market.market_id, 7);
        assert_eq!(market.state, MarketState::Active);
        assert_eq!(market.winning_outcome, Outcome::Unresolved);
        assert_eq!((market.yes_pool, market.no_pool), (0, 0));
        assert_eq!(market.creation_fee, 25);
        assert_eq!(market.created_at, NOW);
        assert_eq!(market.config.fee_recipient, cfg.fee_recipient);
        assert_eq!(market.config.max_fee_basis_points, 250);
    }

    #[test]
    fn open_rejects_bad_terms() {
        let snap = config().snapshot();
        let creator = Pubkey::new_unique();

        let err = Market::open(1, creator, String::new(), DEADLINE, 0, snap, NOW).unwrap_err();
        assert_eq!(err, Error::from(MarketError::EmptyQuestion));

        let long = "x".repeat(MAX_QUESTION_LEN + 1);
        let err = Market::open(1, creator, long, DEADLINE, 0, snap, NOW).unwrap_err();
        assert_eq!(err, Error::from(MarketError::QuestionTooLong));

        let err = Market::open(1, creator, "Q".into(), NOW, 0, snap, NOW).unwrap_err();
        assert_eq!(err, Error::from(MarketError::ResolutionTimeInPast));

        let err = Market::open(1, creator, "Q".into(), NOW - 1, 0, snap, NOW).unwrap_err();
        assert_eq!(err, Error::from(MarketError::ResolutionTimeInPast));
    }

    #[test]
    fn market_ids_are_sequential_from_one() {
        let mut cfg = config();
        assert_eq!(cfg.next_market_seed(), 1u64.to_le_bytes());
        assert_eq!(cfg.register_market().unwrap(), 1);
        assert_eq!(cfg.register_market().unwrap(), 2);
        assert_eq!(cfg.market_count, 2);

        assert!(cfg.ensure_market_exists(1).is_ok());
        assert!(cfg.ensure_market_exists(2).is_ok());
        assert_eq!(
            cfg.ensure_market_exists(0).unwrap_err(),
            Error::from(MarketError::MarketNotFound)
        );
        assert_eq!(
            cfg.ensure_market_exists(3).unwrap_err(),
            Error::from(MarketError::MarketNotFound)
        );
    }

    #[test]
    fn admin_check_rejects_strangers() {
        let cfg = config();
        assert!(cfg.ensure_admin(&cfg.admin).is_ok());
        assert_eq!(
            cfg.ensure_admin(&Pubkey::new_unique()).unwrap_err(),
            Error::from(MarketError::Unauthorized)
        );
    }

    #[test]
    fn pause_and_unpause_reject_repeats() {
        let mut cfg = config();
        assert_eq!(cfg.set_paused(false).unwrap_err(), Error::from(MarketError::NotPaused));

        cfg.set_paused(true).unwrap();
        assert_eq!(cfg.ensure_not_paused().unwrap_err(), Error::from(MarketError::Paused));
        assert_eq!(cfg.set_paused(true).unwrap_err(), Error::from(MarketError::AlreadyPaused));

        cfg.set_paused(false).unwrap();
        assert!(cfg.ensure_not_paused().is_ok());
    }

    #[test]
    fn fee_policy_is_capped_and_snapshot_is_frozen() {
        let mut cfg = config();
        let market = Market::open(1, Pubkey::new_unique(), "Q".into(), DEADLINE, 0, cfg.snapshot(), NOW)
            .unwrap();
        let original = market.config;

        let err = cfg.set_fee_policy(Pubkey::new_unique(), MAX_FEE_BASIS_POINTS + 1).unwrap_err();
        assert_eq!(err, Error::from(MarketError::FeeTooHigh));
        assert_eq!(cfg.max_fee_basis_points, 250);

        let recipient = Pubkey::new_unique();
        cfg.set_fee_policy(recipient, MAX_FEE_BASIS_POINTS).unwrap();
        assert_eq!(cfg.snapshot().fee_recipient, recipient);
        assert_eq!(market.config, original);
    }

    #[test]
    fn bets_accumulate_and_hedge() {
        let mut market = market();
        let mut alice = position();

        market.record_bet(&mut alice, Outcome::Yes, 40, NOW).unwrap();
        market.record_bet(&mut alice, Outcome::Yes, 60, NOW).unwrap();
        market.record_bet(&mut alice, Outcome::No, 50, NOW).unwrap();
        let bob = bet(&mut market, Outcome::No, 25);

        assert_eq!((alice.yes_bet, alice.no_bet), (100, 50));
        assert_eq!(market.yes_pool, alice.yes_bet + bob.yes_bet);
        assert_eq!(market.no_pool, alice.no_bet + bob.no_bet);
        assert_eq!(market.total_pool().unwrap(), 175);
    }

    #[test]
    fn bet_boundary_at_resolution_timestamp() {
        let mut market = market();
        let mut pos = position();

        market.record_bet(&mut pos, Outcome::Yes, 10, DEADLINE - 1).unwrap();
        let err = market.record_bet(&mut pos, Outcome::Yes, 10, DEADLINE).unwrap_err();
        assert_eq!(err, Error::from(MarketError::MarketExpired));
        assert_eq!(pos.yes_bet, 10);
        assert_eq!(market.yes_pool, 10);
    }

    #[test]
    fn bet_rejects_invalid_input() {
        let mut market = market();
        let mut pos = position();

        let err = market.record_bet(&mut pos, Outcome::Yes, 0, NOW).unwrap_err();
        assert_eq!(err, Error::from(MarketError::ZeroAmount));

        let err = market.record_bet(&mut pos, Outcome::Unresolved, 10, NOW).unwrap_err();
        assert_eq!(err, Error::from(MarketError::InvalidOutcome));

        assert!(!pos.has_stake());
        assert_eq!(market.total_pool().unwrap(), 0);
    }

    #[test]
    fn bet_rejected_once_finalized() {
        let mut market = market();
        bet(&mut market, Outcome::Yes, 10);
        market.cancel(DEADLINE).unwrap();

        let mut pos = position();
        let err = market.record_bet(&mut pos, Outcome::Yes, 10, NOW).unwrap_err();
        assert_eq!(err, Error::from(MarketError::MarketNotActive));
    }

    #[test]
    fn bet_overflow_leaves_state_untouched() {
        let mut market = market();
        let mut pos = position();
        market.record_bet(&mut pos, Outcome::No, u64::MAX, NOW).unwrap();

        let err = market.record_bet(&mut pos, Outcome::No, 1, NOW).unwrap_err();
        assert_eq!(err, Error::from(MarketError::Overflow));
        assert_eq!(market.no_pool, u64::MAX);
        assert_eq!(pos.no_bet, u64::MAX);
    }

    #[test]
    fn resolve_preconditions() {
        let mut market = market();
        bet(&mut market, Outcome::Yes, 10);
        bet(&mut market, Outcome::No, 10);

        let err = market.resolve(Outcome::Yes, DEADLINE - 1).unwrap_err();
        assert_eq!(err, Error::from(MarketError::MarketNotExpired));

        let err = market.resolve(Outcome::Unresolved, DEADLINE).unwrap_err();
        assert_eq!(err, Error::from(MarketError::InvalidOutcome));
        assert_eq!(market.state, MarketState::Active);

        market.resolve(Outcome::No, DEADLINE).unwrap();
        assert_eq!(market.state, MarketState::Resolved);
        assert_eq!(market.winning_outcome, Outcome::No);
        assert_eq!(market.finalized_at, DEADLINE);
    }

    #[test]
    fn cancel_requires_deadline() {
        let mut market = market();
        let err = market.cancel(DEADLINE - 1).unwrap_err();
        assert_eq!(err, Error::from(MarketError::MarketNotExpired));

        market.cancel(DEADLINE).unwrap();
        assert_eq!(market.state, MarketState::Cancelled);
        assert_eq!(market.winning_outcome, Outcome::Unresolved);
    }

    #[test]
    fn finalized_state_is_terminal() {
        let mut resolved = market();
        bet(&mut resolved, Outcome::Yes, 10);
        bet(&mut resolved, Outcome::No, 10);
        resolved.resolve(Outcome::Yes, DEADLINE).unwrap();

        assert_eq!(
            resolved.resolve(Outcome::No, DEADLINE + 1).unwrap_err(),
            Error::from(MarketError::MarketFinalized)
        );
        assert_eq!(
            resolved.cancel(DEADLINE + 1).unwrap_err(),
            Error::from(MarketError::MarketFinalized)
        );
        assert_eq!(resolved.state, MarketState::Resolved);
        assert_eq!(resolved.winning_outcome, Outcome::Yes);

        let mut cancelled = market();
        cancelled.cancel(DEADLINE).unwrap();
        assert_eq!(
            cancelled.resolve(Outcome::Yes, DEADLINE + 1).unwrap_err(),
            Error::from(MarketError::MarketFinalized)
        );
        assert_eq!(
            cancelled.cancel(DEADLINE + 1).unwrap_err(),
            Error::from(MarketError::MarketFinalized)
        );
        assert_eq!(cancelled.state, MarketState::Cancelled);
    }

    #[test]
    fn claim_before_finalization_fails() {
        let mut market = market();
        let mut alice = bet(&mut market, Outcome::Yes, 10);

        assert_eq!(
            market.claim(&mut alice).unwrap_err(),
            Error::from(MarketError::MarketNotFinalized)
        );
        assert_eq!(market.projected_payout(&alice).unwrap(), 0);
        assert!(!alice.claimed);
    }

    #[test]
    fn scenario_simple_win() {
        let mut market = market();
        let mut alice = bet(&mut market, Outcome::Yes, 100);
        let mut bob = bet(&mut market, Outcome::No, 50);
        market.resolve(Outcome::Yes, DEADLINE).unwrap();

        assert_eq!(market.projected_payout(&alice).unwrap(), 150);
        assert_eq!(market.claim(&mut alice).unwrap(), 150);
        assert_eq!(market.claim(&mut bob).unwrap(), 0);

        assert!(alice.claimed && bob.claimed);
        assert_eq!(market.total_paid_out, 150);
        assert_eq!(market.claims_count, 2);
    }

    #[test]
    fn scenario_hedged_position() {
        let mut market = market();
        let mut alice = position();
        market.record_bet(&mut alice, Outcome::Yes, 100, NOW).unwrap();
        market.record_bet(&mut alice, Outcome::No, 50, NOW).unwrap();
        let mut bob = bet(&mut market, Outcome::No, 100);
        market.resolve(Outcome::Yes, DEADLINE).unwrap();

        // Her Yes stake is the whole winning pool, so it takes the full No
        // pool of 150, her own losing No stake included.
        assert_eq!(market.claim(&mut alice).unwrap(), 250);
        assert_eq!(market.claim(&mut bob).unwrap(), 0);
    }

    #[test]
    fn scenario_one_sided_market_is_refunded() {
        let mut market = market();
        let mut alice = bet(&mut market, Outcome::Yes, 100);

        let err = market.resolve(Outcome::Yes, DEADLINE).unwrap_err();
        assert_eq!(err, Error::from(MarketError::NoOpposition));
        assert_eq!(market.state, MarketState::Active);

        market.cancel(DEADLINE).unwrap();
        assert_eq!(market.claim(&mut alice).unwrap(), 100);
    }

    #[test]
    fn scenario_three_way_split_truncates() {
        let mut market = market();
        let mut winners = vec![
            bet(&mut market, Outcome::Yes, 60),
            bet(&mut market, Outcome::Yes, 60),
            bet(&mut market, Outcome::Yes, 55),
        ];
        let mut loser = bet(&mut market, Outcome::No, 100);
        market.resolve(Outcome::Yes, DEADLINE).unwrap();

        let payouts: Vec<u64> = winners
            .iter_mut()
            .map(|p| market.claim(p).unwrap())
            .collect();
        assert_eq!(payouts, vec![94, 94, 86]);
        assert_eq!(market.claim(&mut loser).unwrap(), 0);

        let total: u64 = payouts.iter().sum();
        assert!(total <= 275);
        assert!(275 - total <= 2);
    }

    #[test]
    fn second_claim_fails() {
        let mut market = market();
        let mut alice = bet(&mut market, Outcome::Yes, 100);
        bet(&mut market, Outcome::No, 50);
        market.resolve(Outcome::Yes, DEADLINE).unwrap();

        market.claim(&mut alice).unwrap();
        assert_eq!(
            market.claim(&mut alice).unwrap_err(),
            Error::from(MarketError::AlreadyClaimed)
        );
        assert_eq!(market.total_paid_out, 150);
        assert_eq!(market.claims_count, 1);
        assert_eq!(alice.payout, 150);
        assert_eq!(market.projected_payout(&alice).unwrap(), 0);
    }

    #[test]
    fn claim_without_stake_fails() {
        let mut market = market();
        bet(&mut market, Outcome::Yes, 10);
        market.cancel(DEADLINE).unwrap();

        let mut stranger = position();
        assert_eq!(
            market.claim(&mut stranger).unwrap_err(),
            Error::from(MarketError::NoStake)
        );
        assert!(!stranger.claimed);
    }

    #[test]
    fn cancelled_refunds_are_exact() {
        let mut market = market();
        let mut alice = position();
        market.record_bet(&mut alice, Outcome::Yes, 33, NOW).unwrap();
        market.record_bet(&mut alice, Outcome::No, 17, NOW).unwrap();
        let bob = bet(&mut market, Outcome::No, 71);
        let carol = bet(&mut market, Outcome::Yes, 9);
        market.cancel(DEADLINE).unwrap();

        let total: u64 = [&alice, &bob, &carol]
            .iter()
            .map(|p| market.projected_payout(p).unwrap())
            .sum();
        assert_eq!(total, market.total_pool().unwrap());
        assert_eq!(market.projected_payout(&alice).unwrap(), 50);
    }

    #[test]
    fn resolved_payouts_conserve_pot_up_to_dust() {
        // Deterministic LCG so the stake mix is reproducible.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = |bound: u64| {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            (seed >> 33) % bound + 1
        };

        for round in 0..50 {
            let mut market = market();
            let mut positions = Vec::new();
            let users = next(12) as usize + 1;
            for _ in 0..users {
                let mut pos = position();
                market.record_bet(&mut pos, Outcome::Yes, next(1_000), NOW).unwrap();
                if next(3) == 1 {
                    market.record_bet(&mut pos, Outcome::No, next(1_000), NOW).unwrap();
                }
                positions.push(pos);
            }
            if market.no_pool == 0 {
                positions.push(bet(&mut market, Outcome::No, next(1_000)));
            }

            let outcome = if round % 2 == 0 { Outcome::Yes } else { Outcome::No };
            market.resolve(outcome, DEADLINE).unwrap();

            let total: u64 = positions
                .iter()
                .map(|p| market.projected_payout(p).unwrap())
                .sum();
            let winners = positions.iter().filter(|p| p.stake_on(outcome) > 0).count() as u64;
            let pot = market.total_pool().unwrap();

            assert!(total <= pot, "round {round}: paid {total} of {pot}");
            assert!(pot - total < winners.max(1), "round {round}: dust {}", pot - total);
        }
    }
}
