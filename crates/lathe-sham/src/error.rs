//! Error types for Sham value generation.

use thiserror::Error;

/// Errors that can occur while defining or fetching generated values.
#[derive(Debug, Error)]
pub enum ShamError {
	/// A value was fetched for a name that was never defined.
	#[error("No sham defined for `{name}`")]
	UndefinedGenerator {
		/// Name the caller asked for.
		name: String,
	},

	/// A generator was defined twice under the same name.
	#[error("Sham `{name}` is already defined")]
	DuplicateDefinition {
		/// Name of the existing generator.
		name: String,
	},

	/// The generator cannot produce enough distinct values.
	///
	/// Raised after a single pool regeneration at double size still
	/// leaves the read offset past the end of the unique pool. This is
	/// fatal; it is not retried.
	#[error("Can't generate more unique values for sham `{name}`")]
	ExhaustedUniqueValues {
		/// Name of the exhausted generator.
		name: String,
	},
}

/// Result type alias for Sham operations.
pub type ShamResult<T> = Result<T, ShamError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn undefined_generator_message_names_the_sham() {
		let error = ShamError::UndefinedGenerator {
			name: "email".to_string(),
		};
		assert_eq!(error.to_string(), "No sham defined for `email`");
	}

	#[rstest]
	fn exhausted_message_names_the_sham() {
		let error = ShamError::ExhaustedUniqueValues {
			name: "coin_flip".to_string(),
		};
		assert_eq!(
			error.to_string(),
			"Can't generate more unique values for sham `coin_flip`"
		);
	}
}
