//! Blueprints: named, reusable attribute templates per model.
//!
//! A [`Blueprint`] pairs a constructor with an ordered list of
//! attribute thunks; a [`BlueprintRegistry`] maps model names to
//! blueprints and is the entry point for building (`make`,
//! `make_unsaved`, `plan`; see [`crate::builder`]).
//!
//! The registry is a plain value, not hidden module state: test
//! harnesses own one and can build isolated instances at will.

use std::collections::HashMap;

use crate::builder::BuildContext;
use crate::error::BuildResult;
use crate::model::{AttrValue, ModelHandle};

/// Constructs a fresh, unsaved instance of the blueprint's model.
pub type ConstructorFn = Box<dyn Fn() -> ModelHandle>;

/// Produces one attribute value at build time.
///
/// Thunks run once per build, in blueprint order, and receive a
/// [`BuildContext`] so association attributes can recursively build
/// related models or draw sham values.
pub type AttrThunk = Box<dyn Fn(&BuildContext<'_>) -> BuildResult<AttrValue>>;

/// A named attribute template for one model.
pub struct Blueprint {
	model: String,
	constructor: ConstructorFn,
	attributes: Vec<(String, AttrThunk)>,
}

impl Blueprint {
	/// Creates a blueprint for `model` built by `constructor`.
	pub fn new(model: impl Into<String>, constructor: impl Fn() -> ModelHandle + 'static) -> Self {
		Blueprint {
			model: model.into(),
			constructor: Box::new(constructor),
			attributes: Vec::new(),
		}
	}

	/// Appends a computed attribute.
	///
	/// Entries apply in order; a later entry under the same name
	/// replaces an earlier one, which is how derived blueprints
	/// override their base.
	pub fn attr(
		mut self,
		name: impl Into<String>,
		thunk: impl Fn(&BuildContext<'_>) -> BuildResult<AttrValue> + 'static,
	) -> Self {
		self.attributes.push((name.into(), Box::new(thunk)));
		self
	}

	/// Appends a constant attribute.
	pub fn value(self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
		let value = value.into();
		self.attr(name, move |_| Ok(value.clone()))
	}

	/// Model name this blueprint builds.
	pub fn model(&self) -> &str {
		&self.model
	}

	pub(crate) fn construct(&self) -> ModelHandle {
		(self.constructor)()
	}

	/// Attribute entries with same-named duplicates resolved to the
	/// last occurrence, so each setter runs at most once per build.
	pub(crate) fn effective_attributes(&self) -> impl Iterator<Item = &(String, AttrThunk)> {
		self.attributes
			.iter()
			.enumerate()
			.filter(|(index, (name, _))| {
				!self.attributes[index + 1..]
					.iter()
					.any(|(later, _)| later == name)
			})
			.map(|(_, entry)| entry)
	}
}

impl std::fmt::Debug for Blueprint {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Blueprint")
			.field("model", &self.model)
			.field(
				"attributes",
				&self
					.attributes
					.iter()
					.map(|(name, _)| name.as_str())
					.collect::<Vec<_>>(),
			)
			.finish()
	}
}

/// Mapping from model name to blueprint.
#[derive(Debug, Default)]
pub struct BlueprintRegistry {
	blueprints: HashMap<String, Blueprint>,
}

impl BlueprintRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a blueprint under its model name.
	///
	/// Re-defining a model replaces the previous blueprint; suites
	/// commonly re-declare blueprints per test file.
	pub fn define(&mut self, blueprint: Blueprint) {
		tracing::debug!(model = %blueprint.model(), "defining blueprint");
		self.blueprints.insert(blueprint.model().to_string(), blueprint);
	}

	pub(crate) fn get(&self, model: &str) -> Option<&Blueprint> {
		self.blueprints.get(model)
	}

	/// Whether a blueprint exists for `model`.
	pub fn is_defined(&self, model: &str) -> bool {
		self.blueprints.contains_key(model)
	}

	/// Number of registered blueprints.
	pub fn len(&self) -> usize {
		self.blueprints.len()
	}

	/// True when no blueprints are registered.
	pub fn is_empty(&self) -> bool {
		self.blueprints.is_empty()
	}

	/// Removes every blueprint.
	pub fn clear(&mut self) {
		self.blueprints.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{AssociationMeta, Model};
	use rstest::rstest;
	use serde_json::Value;
	use std::any::Any;

	struct Widget;

	impl Model for Widget {
		fn model_name(&self) -> &str {
			"Widget"
		}

		fn association(&self, _attribute: &str) -> Option<&AssociationMeta> {
			None
		}

		fn set_attribute(&mut self, _attribute: &str, _value: &AttrValue) -> BuildResult<()> {
			Ok(())
		}

		fn link_association(&mut self, _attribute: &str, _value: Option<ModelHandle>) {}

		fn primary_key(&self) -> Value {
			Value::Null
		}

		fn save(&mut self) -> Result<(), crate::error::HostError> {
			Ok(())
		}

		fn as_any(&self) -> &dyn Any {
			self
		}

		fn as_any_mut(&mut self) -> &mut dyn Any {
			self
		}
	}

	fn widget_blueprint() -> Blueprint {
		Blueprint::new("Widget", || crate::model::handle(Widget))
	}

	#[rstest]
	fn later_entries_shadow_earlier_same_named_ones() {
		let blueprint = widget_blueprint()
			.value("size", 1)
			.value("color", "red")
			.value("size", 2);
		let names: Vec<&str> = blueprint
			.effective_attributes()
			.map(|(name, _)| name.as_str())
			.collect();
		assert_eq!(names, vec!["color", "size"]);
	}

	#[rstest]
	fn registry_lookup_and_redefinition() {
		let mut registry = BlueprintRegistry::new();
		assert!(registry.is_empty());
		registry.define(widget_blueprint().value("size", 1));
		registry.define(widget_blueprint().value("size", 2));
		assert_eq!(registry.len(), 1);
		assert!(registry.is_defined("Widget"));
		assert!(!registry.is_defined("Gadget"));
		registry.clear();
		assert!(registry.is_empty());
	}
}
