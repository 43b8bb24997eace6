use anchor_lang::prelude::*;

/// Custom error codes for the Pot Markets program.
///
/// Error codes are offset from 6000 (Anchor convention).
#[error_code]
pub enum MarketError {
    // ─── Input validation ───
    /// Question must contain at least one byte.
    #[msg("Question cannot be empty")]
    EmptyQuestion,

    /// Question exceeds maximum length (256 bytes).
    #[msg("Question too long (max 256 bytes)")]
    QuestionTooLong,

    /// Resolution timestamp must be strictly in the future.
    #[msg("Resolution time must be in the future")]
    ResolutionTimeInPast,

    /// Bet amount must be greater than zero.
    #[msg("Amount must be > 0")]
    ZeroAmount,

    /// Outcome selector must be Yes or No.
    #[msg("Invalid outcome")]
    InvalidOutcome,

    /// Requested fee cap exceeds the absolute limit (1000 bps).
    #[msg("Fee cap exceeds 1000 basis points")]
    FeeTooHigh,

    // ─── State machine ───
    /// No market with this id has been created.
    #[msg("Market not found")]
    MarketNotFound,

    /// Market is not accepting bets.
    #[msg("Market is not active")]
    MarketNotActive,

    /// Market deadline has already passed; no more bets accepted.
    #[msg("Market deadline has passed")]
    MarketExpired,

    /// Market has not yet reached its resolution timestamp.
    #[msg("Market has not reached its resolution time")]
    MarketNotExpired,

    /// Market is already resolved or cancelled.
    #[msg("Market already finalized")]
    MarketFinalized,

    /// One side of the market has no stake; cancel instead.
    #[msg("No opposition: both pools must be non-empty to resolve")]
    NoOpposition,

    // ─── Authorization ───
    /// Only the protocol admin can perform this action.
    #[msg("Unauthorized: not the admin")]
    Unauthorized,

    // ─── Funding ───
    /// Token account balance is below the requested amount.
    #[msg("Insufficient balance")]
    InsufficientBalance,

    /// Signer is not authorized to move this many tokens from the account.
    #[msg("Insufficient allowance")]
    InsufficientAllowance,

    /// Token account does not hold the settlement asset.
    #[msg("Token account mint mismatch")]
    InvalidMint,

    /// Token account is not owned by the expected wallet.
    #[msg("Token account owner mismatch")]
    InvalidTokenOwner,

    /// A creation fee was requested but no fee recipient token account given.
    #[msg("Fee recipient token account required")]
    FeeAccountRequired,

    /// Vault does not hold enough to cover the transfer (should be impossible).
    #[msg("Vault insolvency detected")]
    VaultInsolvency,

    // ─── Claims ───
    /// Market is still Active; nothing to claim yet.
    #[msg("Market not finalized")]
    MarketNotFinalized,

    /// Position has already been claimed.
    #[msg("Position already claimed")]
    AlreadyClaimed,

    /// User has no stake in this market.
    #[msg("No stake in this market")]
    NoStake,

    // ─── Operational ───
    /// Registry is paused; creation and betting are disabled.
    #[msg("Protocol is paused")]
    Paused,

    /// Registry is already paused.
    #[msg("Protocol already paused")]
    AlreadyPaused,

    /// Registry is not paused.
    #[msg("Protocol not paused")]
    NotPaused,

    /// A mutating operation is already in progress.
    #[msg("Reentrant call")]
    Reentrancy,

    /// Overflow in arithmetic operation.
    #[msg("Arithmetic overflow")]
    Overflow,
}
