//! Infrastructure layer - Oracles, storage, logging and metrics

pub mod logging;
pub mod observability;
pub mod storage;
pub mod username;
