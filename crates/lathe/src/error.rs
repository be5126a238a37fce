//! Error types for blueprint building.

use lathe_sham::ShamError;
use thiserror::Error;

/// Error type hosts use to report storage failures.
pub type HostError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while building objects from blueprints.
#[derive(Debug, Error)]
pub enum BuildError {
	/// No blueprint is registered under the requested model name.
	#[error("No blueprint defined for model `{0}`")]
	UndefinedBlueprint(String),

	/// An override or blueprint entry named an attribute the model does
	/// not have. Produced by the host's plain-assignment path.
	#[error("Unknown attribute `{attribute}` on model `{model}`")]
	UnknownAttribute {
		/// Model being built.
		model: String,
		/// Attribute that was not recognised.
		attribute: String,
	},

	/// The host storage rejected a save. Never retried; fixture
	/// construction failures abort the test.
	#[error("Failed to persist `{model}`: {source}")]
	PersistenceFailed {
		/// Model being persisted.
		model: String,
		/// Underlying storage error, propagated as-is.
		#[source]
		source: HostError,
	},

	/// A sham fetch inside a blueprint attribute failed.
	#[error(transparent)]
	Sham(#[from] ShamError),
}

/// Result type alias for build operations.
pub type BuildResult<T> = Result<T, BuildError>;
