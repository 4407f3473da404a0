pub mod account;
pub mod authorization;
pub mod tx;
