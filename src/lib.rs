pub mod catalog;
pub mod config;
pub mod fingerprint;
pub mod log;
pub mod persist;
pub mod release;
