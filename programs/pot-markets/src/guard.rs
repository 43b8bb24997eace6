use std::ops::{Deref, DerefMut};

use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::state::GlobalConfig;

/// Exclusive lock over the protocol config for the duration of a mutating
/// instruction.
///
/// Acquiring sets `GlobalConfig::locked` and writes it through to the
/// account data at once, so any instruction entered while the guard is
/// held (e.g. during a token CPI) reads `locked = true` and is rejected.
/// Dropping the guard clears the flag; Anchor persists the cleared value
/// when the instruction exits, and a failed instruction is rolled back as
/// a whole.
pub struct ReentrancyGuard<'a, 'info> {
    config: &'a mut Account<'info, GlobalConfig>,
}

impl<'a, 'info> ReentrancyGuard<'a, 'info> {
    pub fn acquire(config: &'a mut Account<'info, GlobalConfig>) -> Result<Self> {
        require!(!config.locked, MarketError::Reentrancy);
        config.locked = true;
        config.exit(&crate::ID)?;
        Ok(Self { config })
    }
}

impl Deref for ReentrancyGuard<'_, '_> {
    type Target = GlobalConfig;

    fn deref(&self) -> &GlobalConfig {
        &**self.config
    }
}

impl DerefMut for ReentrancyGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut GlobalConfig {
        &mut **self.config
    }
}

impl Drop for ReentrancyGuard<'_, '_> {
    fn drop(&mut self) {
        self.config.locked = false;
    }
}
