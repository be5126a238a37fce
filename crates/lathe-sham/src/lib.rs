//! Deterministic, resettable fixture-value generation.
//!
//! `lathe-sham` produces unique test-fixture values ("shams") from
//! named generator functions. Each generator keeps a pre-generated pool
//! of values served in order, so a seeded run yields the same sequence
//! every time, and reset scopes rewind the sequence between tests.
//!
//! # Quick start
//!
//! ```
//! use rand::Rng;
//! use serde_json::json;
//!
//! let mut shams = lathe_sham::ShamRegistry::new();
//! shams.seed(42u64);
//! shams.define("email", |rng| {
//!     json!(format!("user{}@example.com", rng.gen_range(0..100_000u32)))
//! })?;
//!
//! let first = shams.fetch("email")?;
//! shams.reset(lathe_sham::ResetScope::BeforeAll);
//! assert_eq!(shams.fetch("email")?, first);
//! # Ok::<(), lathe_sham::ShamError>(())
//! ```
//!
//! # Reset scopes
//!
//! - [`ResetScope::BeforeAll`] rewinds every generator to its first
//!   value, for the top of a suite.
//! - [`ResetScope::BeforeEach`] captures a checkpoint on its first call
//!   and restores it on later calls, so each test replays the values
//!   consumed since the suite-level setup ran.
//!
//! # Concurrency
//!
//! The default registry is lock-guarded but semantically
//! single-threaded: generators share one seed and one read offset per
//! name. Parallel test workers should run in separate processes or hold
//! their own [`ShamRegistry`] instances.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod generator;
pub mod registry;
pub mod seed;

pub use error::{ShamError, ShamResult};
pub use generator::{GeneratorFn, ResetScope, Sham};
pub use registry::{
	ShamRegistry, clear, define, define_with, disable_seeding, fetch, is_defined, reset, seed,
};
pub use seed::Seed;
