//! Session tokens and the admin access policy

pub mod admin_auth;
pub mod session;

pub use admin_auth::AdminIdentity;
