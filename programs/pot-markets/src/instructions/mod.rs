pub mod admin;
pub mod cancel;
pub mod claim;
pub mod claim_multiple;
pub mod create_market;
pub mod initialize;
pub mod place_bet;
pub mod resolve;
pub mod views;

pub use admin::*;
pub use cancel::*;
pub use claim::*;
pub use claim_multiple::*;
pub use create_market::*;
pub use initialize::*;
pub use place_bet::*;
pub use resolve::*;
pub use views::*;
