//! Route modules for the verification API surface.

pub mod health;
pub mod receipts;
pub mod verify;
