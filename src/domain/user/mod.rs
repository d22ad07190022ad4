//! User domain module.

mod aggregate;
mod values;

pub use aggregate::User;
pub use values::{Email, WalletAddress};
