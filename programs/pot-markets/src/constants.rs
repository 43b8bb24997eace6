pub const SEED_CONFIG: &[u8] = b"config";
pub const SEED_MARKET: &[u8] = b"market";
pub const SEED_VAULT: &[u8] = b"vault";
pub const SEED_POSITION: &[u8] = b"position";

/// Absolute ceiling for `GlobalConfig::max_fee_basis_points` (10%).
pub const MAX_FEE_BASIS_POINTS: u16 = 1_000;

/// Maximum question length in bytes.
pub const MAX_QUESTION_LEN: usize = 256;

/// Remaining accounts supplied per market id to `claim_multiple`:
/// `[market, position, vault]`.
pub const CLAIM_ACCOUNTS_PER_MARKET: usize = 3;
