//! Command implementations for the wmx2obj CLI

pub mod convert;
pub mod info;
