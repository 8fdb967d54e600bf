//! Route modules for the server
//!
//! - transactions: Transaction list, search, pagination

pub mod transactions;
