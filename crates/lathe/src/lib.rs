//! Blueprint-based test-data factories.
//!
//! `lathe` lets test suites declare blueprints (named, reusable
//! attribute templates) for their object-relational models, then
//! stamp out fully-formed objects with blueprint defaults overridden
//! at the call site:
//!
//! - [`BlueprintRegistry::make`] builds and persists an object.
//! - [`BlueprintRegistry::make_unsaved`] builds one entirely in
//!   memory, suppressing persistence for every nested build too.
//! - [`BlueprintRegistry::plan`] returns the flattened column mapping
//!   (associations become foreign-key values) instead of an object.
//!
//! Association attributes are resolved by the [`adapter`]: while saves
//! are suppressed the linked object is attached as an in-memory edge;
//! otherwise assignment goes through the host's live setter and its
//! normal foreign-key wiring.
//!
//! Fixture values come from the re-exported [`lathe_sham`] engine:
//! deterministic, seedable, unique-by-default generators with
//! suite/test reset scopes.
//!
//! # Example
//!
//! ```ignore
//! use lathe::prelude::*;
//!
//! let mut blueprints = BlueprintRegistry::new();
//! blueprints.define(
//!     Blueprint::new("User", || handle(User::default()))
//!         .attr("email", |cx| Ok(cx.sham("email")?.into())),
//! );
//! blueprints.define(
//!     Blueprint::new("Post", || handle(Post::default()))
//!         .value("title", "hello")
//!         .attr("author", |cx| Ok(cx.make("User", attrs! {})?.into())),
//! );
//!
//! let post = blueprints.make("Post", attrs! { "title" => "override" })?;
//! let unsaved = blueprints.make_unsaved("Post", attrs! {})?;
//! let columns = blueprints.plan("Post", attrs! {})?;
//! # Ok::<(), BuildError>(())
//! ```
//!
//! # Concurrency
//!
//! Building is single-threaded and synchronous. Objects are shared via
//! `Rc<RefCell<_>>`, and the persistence-suppression scope is
//! thread-local. Parallel test workers need separate processes or
//! per-worker registries.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adapter;
pub mod blueprint;
pub mod builder;
pub mod error;
pub mod model;
pub mod nerf;
pub mod prelude;

// Re-export commonly used types at crate root
pub use blueprint::{Blueprint, BlueprintRegistry};
pub use builder::{BuildContext, Lathe, Overrides};
pub use error::{BuildError, BuildResult, HostError};
pub use model::{AssociationKind, AssociationMeta, AttrValue, Model, ModelHandle, handle};
pub use nerf::{NerfGuard, nerfed, with_save_nerfed};
