//! Header validation, difficulty retargeting, challenge chaining and the PoC proof-verifier
//! boundary.
//!
//! This crate answers exactly one question: does a candidate header extend the canonical chain
//! under proof-of-capacity rules? It does not execute transactions and does not finalize
//! rewards — see `poc-economy` for that.

pub mod batch;
pub mod challenge;
pub mod difficulty;
pub mod error;
pub mod proof;
pub mod validator;

pub use batch::{validate_batch, AbortSignal, BatchItem};
pub use challenge::calc_next_challenge;
pub use difficulty::calc_difficulty;
pub use error::ValidationError;
pub use proof::ProofVerifier;
pub use validator::{validate_header, ValidationParams};
