//! A single named value generator and its value pool.

use rand::rngs::StdRng;
use serde_json::Value;

use crate::error::{ShamError, ShamResult};
use crate::seed::Seed;

/// Number of values generated when a sham is first defined.
pub(crate) const INITIAL_POOL_SIZE: usize = 12;

/// Generator function type: a pure function of the RNG state.
///
/// Purity matters because pool growth regenerates the whole pool from
/// scratch with the same seed; an impure generator makes the regrown
/// pool diverge from the original prefix.
pub type GeneratorFn = Box<dyn Fn(&mut StdRng) -> Value + Send + Sync>;

/// Scope of a [`Sham::reset`] broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
	/// Rewind to the very first value and forget any checkpoint.
	BeforeAll,
	/// Checkpoint/restore: the first call in an outer scope captures the
	/// current offset, later calls rewind to it.
	BeforeEach,
}

/// A named generator with a growable pool of pre-generated values.
///
/// Values are served in order from the pool, which is regenerated at
/// double size when the read offset runs off the end. With `unique`
/// (the default) duplicates are dropped preserving first occurrence.
pub struct Sham {
	name: String,
	generator: GeneratorFn,
	unique: bool,
	offset: usize,
	before_offset: Option<usize>,
	values: Vec<Value>,
}

impl Sham {
	pub(crate) fn new(name: String, generator: GeneratorFn, unique: bool, seed: &Seed) -> Self {
		let mut sham = Sham {
			name,
			generator,
			unique,
			offset: 0,
			before_offset: None,
			values: Vec::new(),
		};
		sham.generate_values(INITIAL_POOL_SIZE, seed);
		sham
	}

	/// Name this generator was defined under.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the next pooled value, growing the pool if exhausted.
	pub(crate) fn fetch_value(&mut self, seed: &Seed) -> ShamResult<Value> {
		if self.offset >= self.values.len() {
			let target = (self.values.len() * 2).max(1);
			self.generate_values(target, seed);
			if self.offset >= self.values.len() {
				return Err(ShamError::ExhaustedUniqueValues {
					name: self.name.clone(),
				});
			}
		}
		let value = self.values[self.offset].clone();
		self.offset += 1;
		Ok(value)
	}

	pub(crate) fn reset(&mut self, scope: ResetScope) {
		match scope {
			ResetScope::BeforeAll => {
				self.offset = 0;
				self.before_offset = None;
			}
			ResetScope::BeforeEach => {
				if let Some(checkpoint) = self.before_offset {
					self.offset = checkpoint;
				} else {
					self.before_offset = Some(self.offset);
				}
			}
		}
	}

	/// Regenerates the pool from scratch under `seed`.
	///
	/// Always restarts at value one rather than appending, so a grown
	/// pool is exactly what a larger initial pool would have been.
	fn generate_values(&mut self, count: usize, seed: &Seed) {
		tracing::debug!(name = %self.name, count, "generating sham value pool");
		let mut rng = seed.rng();
		self.values = (0..count).map(|_| (self.generator)(&mut rng)).collect();
		if self.unique {
			let mut seen: Vec<Value> = Vec::with_capacity(self.values.len());
			self.values.retain(|value| {
				if seen.contains(value) {
					false
				} else {
					seen.push(value.clone());
					true
				}
			});
		}
	}
}

impl std::fmt::Debug for Sham {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Sham")
			.field("name", &self.name)
			.field("unique", &self.unique)
			.field("offset", &self.offset)
			.field("pool_size", &self.values.len())
			.finish()
	}
}
