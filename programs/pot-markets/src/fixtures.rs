//! In-memory accounts for exercising account-level code without a validator.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_pack::Pack;
use anchor_spl::token::spl_token;
use anchor_spl::token::spl_token::state::{Account as SplTokenAccount, AccountState};

pub struct TestAccount {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
    pub is_writable: bool,
}

impl TestAccount {
    pub fn new(key: Pubkey, owner: Pubkey, data: Vec<u8>) -> Self {
        Self {
            key,
            owner,
            lamports: 1_000_000,
            data,
            is_writable: true,
        }
    }

    /// Program-owned account holding `value`, padded to `space` bytes.
    pub fn program<T: AccountSerialize>(key: Pubkey, value: &T, space: usize) -> Self {
        let mut data = Vec::with_capacity(space);
        value.try_serialize(&mut data).unwrap();
        data.resize(space, 0);
        Self::new(key, crate::ID, data)
    }

    pub fn token(key: Pubkey, mint: Pubkey, owner: Pubkey, amount: u64) -> Self {
        let mut data = vec![0u8; SplTokenAccount::LEN];
        let account = SplTokenAccount {
            mint,
            owner,
            amount,
            state: AccountState::Initialized,
            ..Default::default()
        };
        SplTokenAccount::pack(account, &mut data).unwrap();
        Self::new(key, spl_token::ID, data)
    }

    pub fn read_only(mut self) -> Self {
        self.is_writable = false;
        self
    }

    pub fn to_info(&mut self) -> AccountInfo<'_> {
        AccountInfo::new(
            &self.key,
            false,
            self.is_writable,
            &mut self.lamports,
            &mut self.data,
            &self.owner,
            false,
            0,
        )
    }

    pub fn read<T: AccountDeserialize>(&self) -> T {
        T::try_deserialize(&mut &self.data[..]).unwrap()
    }
}
