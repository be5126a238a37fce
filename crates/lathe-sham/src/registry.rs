//! Named generator registry with global seed state.
//!
//! A [`ShamRegistry`] owns every defined generator plus the seed that
//! drives pool generation. The process-wide default registry backs the
//! free functions ([`define`], [`fetch`], ...) that test suites normally
//! use; isolated instances can be constructed for tests of the registry
//! itself.
//!
//! The registry is guarded by a mutex for data-race freedom, but the
//! semantics (shared seed, shared offsets) are single-threaded by
//! design: parallel test workers must use separate processes or their
//! own registry instances.

use std::collections::HashMap;
use std::hash::Hash;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use serde_json::Value;

use crate::error::{ShamError, ShamResult};
use crate::generator::{GeneratorFn, ResetScope, Sham};
use crate::seed::Seed;

/// Mapping from generator name to [`Sham`], plus the current seed.
#[derive(Debug, Default)]
pub struct ShamRegistry {
	shams: HashMap<String, Sham>,
	seed: Seed,
}

impl ShamRegistry {
	/// Creates an empty registry with the default seed (`1`).
	pub fn new() -> Self {
		Self::default()
	}

	/// Defines a generator with unique-value filtering enabled.
	///
	/// The initial value pool is generated immediately under the
	/// registry's current seed. Defining the same name twice is an
	/// error ([`ShamError::DuplicateDefinition`]); call
	/// [`clear`](Self::clear) first to start over.
	pub fn define<F>(&mut self, name: impl Into<String>, generator: F) -> ShamResult<()>
	where
		F: Fn(&mut StdRng) -> Value + Send + Sync + 'static,
	{
		self.define_with(name, true, generator)
	}

	/// Defines a generator, choosing whether duplicate values are kept.
	pub fn define_with<F>(
		&mut self,
		name: impl Into<String>,
		unique: bool,
		generator: F,
	) -> ShamResult<()>
	where
		F: Fn(&mut StdRng) -> Value + Send + Sync + 'static,
	{
		let name = name.into();
		if self.shams.contains_key(&name) {
			return Err(ShamError::DuplicateDefinition { name });
		}
		tracing::debug!(name = %name, unique, "defining sham");
		let sham = Sham::new(
			name.clone(),
			Box::new(generator) as GeneratorFn,
			unique,
			&self.seed,
		);
		self.shams.insert(name, sham);
		Ok(())
	}

	/// Returns the next value from the named generator.
	pub fn fetch(&mut self, name: &str) -> ShamResult<Value> {
		let sham = self
			.shams
			.get_mut(name)
			.ok_or_else(|| ShamError::UndefinedGenerator {
				name: name.to_string(),
			})?;
		sham.fetch_value(&self.seed)
	}

	/// Broadcasts a reset to every generator.
	///
	/// Also restores the default deterministic seed when seeding had
	/// been disabled, so a reset suite is reproducible again.
	pub fn reset(&mut self, scope: ResetScope) {
		tracing::debug!(?scope, "resetting shams");
		for sham in self.shams.values_mut() {
			sham.reset(scope);
		}
		if self.seed == Seed::Random {
			self.seed = Seed::default();
		}
	}

	/// Sets the seed from any hashable value.
	pub fn seed(&mut self, value: impl Hash) {
		self.set_seed(Seed::of(value));
	}

	/// Switches to entropy-backed, non-reproducible generation.
	pub fn disable_seeding(&mut self) {
		self.set_seed(Seed::Random);
	}

	/// Installs an explicit [`Seed`].
	pub fn set_seed(&mut self, seed: Seed) {
		self.seed = seed;
	}

	/// Removes every defined generator. The seed is left untouched.
	pub fn clear(&mut self) {
		self.shams.clear();
	}

	/// Whether a generator exists under `name`.
	pub fn is_defined(&self, name: &str) -> bool {
		self.shams.contains_key(name)
	}

	/// Number of defined generators.
	pub fn len(&self) -> usize {
		self.shams.len()
	}

	/// True when no generators are defined.
	pub fn is_empty(&self) -> bool {
		self.shams.is_empty()
	}
}

/// Process-wide default registry backing the free functions.
static SHAMS: Lazy<Mutex<ShamRegistry>> = Lazy::new(|| Mutex::new(ShamRegistry::new()));

/// Defines a generator in the default registry.
///
/// # Example
///
/// ```
/// use serde_json::json;
///
/// lathe_sham::define("username", |rng| {
///     use rand::Rng;
///     json!(format!("user{}", rng.gen_range(0..100_000u32)))
/// })
/// .unwrap();
///
/// let first = lathe_sham::fetch("username").unwrap();
/// assert!(first.as_str().unwrap().starts_with("user"));
/// # lathe_sham::clear();
/// ```
pub fn define<F>(name: impl Into<String>, generator: F) -> ShamResult<()>
where
	F: Fn(&mut StdRng) -> Value + Send + Sync + 'static,
{
	SHAMS.lock().define(name, generator)
}

/// Defines a generator in the default registry, choosing uniqueness.
pub fn define_with<F>(name: impl Into<String>, unique: bool, generator: F) -> ShamResult<()>
where
	F: Fn(&mut StdRng) -> Value + Send + Sync + 'static,
{
	SHAMS.lock().define_with(name, unique, generator)
}

/// Fetches the next value from a generator in the default registry.
pub fn fetch(name: &str) -> ShamResult<Value> {
	SHAMS.lock().fetch(name)
}

/// Broadcasts a reset across the default registry.
pub fn reset(scope: ResetScope) {
	SHAMS.lock().reset(scope);
}

/// Seeds the default registry from any hashable value.
pub fn seed(value: impl Hash) {
	SHAMS.lock().seed(value);
}

/// Disables deterministic seeding in the default registry.
pub fn disable_seeding() {
	SHAMS.lock().disable_seeding();
}

/// Clears every generator in the default registry (primarily for tests).
pub fn clear() {
	SHAMS.lock().clear();
}

/// Whether the default registry has a generator under `name`.
pub fn is_defined(name: &str) -> bool {
	SHAMS.lock().is_defined(name)
}
