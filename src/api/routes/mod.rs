//! API Routes
//!
//! Route handlers organized by functionality.

pub mod health;
pub mod leveraged_tokens;
pub mod markets;
pub mod vaults;
