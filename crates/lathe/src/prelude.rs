//! Convenience re-exports for common usage.
//!
//! ```
//! use lathe::prelude::*;
//! ```

// Error types
pub use crate::error::{BuildError, BuildResult, HostError};

// Host capability surface
pub use crate::model::{
	AssociationKind, AssociationMeta, AttrValue, Model, ModelHandle, handle,
};

// Blueprints and building
pub use crate::blueprint::{AttrThunk, Blueprint, BlueprintRegistry, ConstructorFn};
pub use crate::builder::{BuildContext, Lathe, Overrides};

// Adapter operations
pub use crate::adapter::{
	assign_attribute, flatten_assigned_attributes, is_association, target_model,
};

// Persistence suppression
pub use crate::nerf::{NerfGuard, nerfed, with_save_nerfed};

// Overrides macro
pub use crate::attrs;

// Sham value generation
pub use lathe_sham::{self as sham, ResetScope, Seed, ShamError, ShamRegistry, ShamResult};
