//! Database access layer

pub mod admins;
pub mod businesses;
pub mod campaigns;
pub mod cascade;
pub mod customers;
pub mod refresh_tokens;
pub mod stats;
pub mod wallets;
