//! Build orchestration: `make`, `make_unsaved`, and `plan`.
//!
//! The [`Lathe`] turns a blueprint plus call-site overrides into an
//! assigned object, routing every attribute through the adapter. The
//! entry points live on [`BlueprintRegistry`] so blueprint thunks can
//! reach back into the same registry for associated models.

use std::collections::HashMap;

use serde_json::Value;

use crate::adapter;
use crate::blueprint::{Blueprint, BlueprintRegistry};
use crate::error::{BuildError, BuildResult};
use crate::model::{AttrValue, ModelHandle};
use crate::nerf;

/// Call-site attribute overrides, applied before blueprint defaults.
pub type Overrides = Vec<(String, AttrValue)>;

/// Builds an [`Overrides`] list.
///
/// # Example
///
/// ```
/// use lathe::attrs;
///
/// let overrides = attrs! { "title" => "hello", "views" => 3 };
/// assert_eq!(overrides.len(), 2);
/// ```
#[macro_export]
macro_rules! attrs {
	() => {
		$crate::builder::Overrides::new()
	};
	($($name:expr => $value:expr),+ $(,)?) => {{
		let mut overrides = $crate::builder::Overrides::new();
		$(overrides.push(($name.to_string(), $crate::model::AttrValue::from($value)));)+
		overrides
	}};
}

/// Context handed to blueprint attribute thunks.
///
/// Lets thunks build associated models against the owning registry
/// (inheriting the current nerf scope) and draw values from the
/// process-wide sham registry.
pub struct BuildContext<'a> {
	registry: &'a BlueprintRegistry,
}

impl<'a> BuildContext<'a> {
	pub(crate) fn new(registry: &'a BlueprintRegistry) -> Self {
		BuildContext { registry }
	}

	/// The registry this build is running against.
	pub fn registry(&self) -> &'a BlueprintRegistry {
		self.registry
	}

	/// Builds an associated model through the same registry.
	pub fn make(&self, model: &str, overrides: Overrides) -> BuildResult<ModelHandle> {
		self.registry.make(model, overrides)
	}

	/// Fetches the next value from a process-wide sham generator.
	pub fn sham(&self, name: &str) -> BuildResult<Value> {
		Ok(lathe_sham::fetch(name)?)
	}
}

/// One build in progress: the object plus its assigned attributes.
pub struct Lathe {
	object: ModelHandle,
	assigned: Vec<(String, AttrValue)>,
}

impl Lathe {
	/// Constructs the object and applies overrides, then blueprint
	/// entries not already overridden, each through the adapter under
	/// the current nerf state.
	pub(crate) fn run(
		context: &BuildContext<'_>,
		blueprint: &Blueprint,
		overrides: Overrides,
	) -> BuildResult<Lathe> {
		let nerfed = nerf::nerfed();
		let mut lathe = Lathe {
			object: blueprint.construct(),
			assigned: Vec::new(),
		};

		// Call-site overrides win; within them, last occurrence wins.
		for (index, (attribute, value)) in overrides.iter().enumerate() {
			if overrides[index + 1..]
				.iter()
				.any(|(later, _)| later == attribute)
			{
				continue;
			}
			lathe.assign(attribute, value.clone(), nerfed)?;
		}

		for (attribute, thunk) in blueprint.effective_attributes() {
			if lathe.is_assigned(attribute) {
				continue;
			}
			let value = thunk(context)?;
			lathe.assign(attribute, value, nerfed)?;
		}

		Ok(lathe)
	}

	fn assign(&mut self, attribute: &str, value: AttrValue, nerfed: bool) -> BuildResult<()> {
		adapter::assign_attribute(&mut *self.object.borrow_mut(), attribute, &value, nerfed)?;
		self.assigned.push((attribute.to_string(), value));
		Ok(())
	}

	fn is_assigned(&self, attribute: &str) -> bool {
		self.assigned.iter().any(|(name, _)| name == attribute)
	}

	/// The object under construction.
	pub fn object(&self) -> ModelHandle {
		self.object.clone()
	}

	/// Attributes assigned so far, in assignment order.
	pub fn assigned_attributes(&self) -> &[(String, AttrValue)] {
		&self.assigned
	}

	pub(crate) fn into_object(self) -> ModelHandle {
		self.object
	}
}

impl BlueprintRegistry {
	/// Builds and persists an object from its blueprint plus overrides.
	///
	/// Persistence failures surface as
	/// [`BuildError::PersistenceFailed`] with the host's storage error
	/// attached. Inside an active nerf scope the save step is skipped,
	/// which is what makes nested builds under
	/// [`make_unsaved`](Self::make_unsaved) stay in memory.
	pub fn make(&self, model: &str, overrides: Overrides) -> BuildResult<ModelHandle> {
		let blueprint = self
			.get(model)
			.ok_or_else(|| BuildError::UndefinedBlueprint(model.to_string()))?;
		let context = BuildContext::new(self);
		let lathe = Lathe::run(&context, blueprint, overrides)?;
		if !nerf::nerfed() {
			tracing::debug!(model, "persisting built object");
			lathe
				.object()
				.borrow_mut()
				.save()
				.map_err(|source| BuildError::PersistenceFailed {
					model: model.to_string(),
					source,
				})?;
		}
		Ok(lathe.into_object())
	}

	/// [`make`](Self::make), then runs `block` on the persisted object.
	pub fn make_with<R>(
		&self,
		model: &str,
		overrides: Overrides,
		block: impl FnOnce(&ModelHandle) -> R,
	) -> BuildResult<ModelHandle> {
		let object = self.make(model, overrides)?;
		block(&object);
		Ok(object)
	}

	/// Builds without persisting anything.
	///
	/// Suppression is dynamically scoped: association thunks that make
	/// related models transitively inherit it. The scope is released on
	/// every exit path, errors included.
	pub fn make_unsaved(&self, model: &str, overrides: Overrides) -> BuildResult<ModelHandle> {
		nerf::with_save_nerfed(|| self.make(model, overrides))
	}

	/// [`make_unsaved`](Self::make_unsaved), then runs `block` *after*
	/// suppression lifts: objects built inside the block are persisted
	/// normally, which is how nested fixtures opt back in.
	pub fn make_unsaved_with<R>(
		&self,
		model: &str,
		overrides: Overrides,
		block: impl FnOnce(&ModelHandle) -> R,
	) -> BuildResult<ModelHandle> {
		let object = self.make_unsaved(model, overrides)?;
		block(&object);
		Ok(object)
	}

	/// Builds like [`make_unsaved`](Self::make_unsaved) but returns the
	/// flattened column mapping instead of the object.
	///
	/// The top-level object is never saved. Associated objects built by
	/// blueprint thunks to satisfy many-to-one attributes ARE persisted:
	/// only the top-level save is withheld on this path. A plan carries
	/// real foreign-key values, which only persisted associates have.
	pub fn plan(&self, model: &str, overrides: Overrides) -> BuildResult<HashMap<String, Value>> {
		let blueprint = self
			.get(model)
			.ok_or_else(|| BuildError::UndefinedBlueprint(model.to_string()))?;
		let context = BuildContext::new(self);
		let lathe = Lathe::run(&context, blueprint, overrides)?;
		let object = lathe.object();
		let flattened =
			adapter::flatten_assigned_attributes(&*object.borrow(), lathe.assigned_attributes());
		Ok(flattened)
	}
}
