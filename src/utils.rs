#![forbid(unsafe_code)]

pub mod config;
pub mod errors;
pub mod srv_utils;
pub mod store;
