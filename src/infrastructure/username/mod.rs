//! Username infrastructure module
//!
//! Built-in oracles for the fingerprint pipeline, repository implementations
//! and the directory service that enforces fingerprint uniqueness.

mod confusables;
mod decorative;
mod factory;
mod postgres_repository;
mod repository;
mod service;
mod word_list;

pub use confusables::ConfusableTable;
pub use decorative::TransliteratingFlattener;
pub use factory::{
    build_normalizer, build_validator, default_normalizer, default_validator,
    normalize_fingerprint, validate_username,
};
pub use postgres_repository::PostgresUsernameRepository;
pub use repository::InMemoryUsernameRepository;
pub use service::{CreateOutcome, CreateUsernameRequest, UsernameService, UsernameServiceTrait};
pub use word_list::WordListOracle;
