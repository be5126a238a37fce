//! Host capability surface: the model trait and attribute values.
//!
//! The builder never inspects a host object model directly. Everything
//! it needs (association metadata, plain assignment, in-memory
//! association linking, primary keys, persistence) is behind the
//! [`Model`] trait, which any object-relational framework can
//! implement for its entities.
//!
//! Objects are shared as [`ModelHandle`]s (`Rc<RefCell<dyn Model>>`):
//! building is a single-threaded, synchronous affair, and association
//! attributes need shared ownership of the linked object.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::error::{BuildResult, HostError};

/// Shared handle to a built (or in-progress) model object.
pub type ModelHandle = Rc<RefCell<dyn Model>>;

/// Wraps a concrete model in a [`ModelHandle`].
pub fn handle<M: Model + 'static>(model: M) -> ModelHandle {
	Rc::new(RefCell::new(model))
}

/// Kind of a declared relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationKind {
	/// A foreign-key relationship to a single parent row.
	ManyToOne,
	/// Any other relationship kind; flattening leaves these untouched.
	Other,
}

/// Metadata for one declared association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationMeta {
	/// Relationship kind.
	pub kind: AssociationKind,
	/// Declared foreign-key column, when the host declares one.
	pub key: Option<String>,
	/// Model name of the associated entity.
	pub target: String,
}

impl AssociationMeta {
	/// Many-to-one association with the default `<name>_id` key.
	pub fn many_to_one(target: impl Into<String>) -> Self {
		AssociationMeta {
			kind: AssociationKind::ManyToOne,
			key: None,
			target: target.into(),
		}
	}

	/// Sets an explicit foreign-key column.
	pub fn with_key(mut self, key: impl Into<String>) -> Self {
		self.key = Some(key.into());
		self
	}

	/// The foreign-key column: the declared key, or `<attribute>_id`.
	pub fn foreign_key(&self, attribute: &str) -> String {
		self.key
			.clone()
			.unwrap_or_else(|| format!("{attribute}_id"))
	}
}

/// A value assigned to one attribute during building.
#[derive(Clone)]
pub enum AttrValue {
	/// A plain scalar (including `Null`).
	Scalar(Value),
	/// A reference to another model object, for association attributes.
	Linked(ModelHandle),
}

impl AttrValue {
	/// The null scalar.
	pub fn null() -> Self {
		AttrValue::Scalar(Value::Null)
	}

	/// The linked object, when this value carries one.
	pub fn as_handle(&self) -> Option<ModelHandle> {
		match self {
			AttrValue::Linked(handle) => Some(handle.clone()),
			AttrValue::Scalar(_) => None,
		}
	}

	/// True for the null scalar.
	pub fn is_null(&self) -> bool {
		matches!(self, AttrValue::Scalar(Value::Null))
	}
}

impl std::fmt::Debug for AttrValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			AttrValue::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
			AttrValue::Linked(handle) => f
				.debug_tuple("Linked")
				.field(&handle.borrow().model_name())
				.finish(),
		}
	}
}

impl From<Value> for AttrValue {
	fn from(value: Value) -> Self {
		AttrValue::Scalar(value)
	}
}

impl From<&str> for AttrValue {
	fn from(value: &str) -> Self {
		AttrValue::Scalar(Value::from(value))
	}
}

impl From<String> for AttrValue {
	fn from(value: String) -> Self {
		AttrValue::Scalar(Value::from(value))
	}
}

impl From<bool> for AttrValue {
	fn from(value: bool) -> Self {
		AttrValue::Scalar(Value::from(value))
	}
}

impl From<i32> for AttrValue {
	fn from(value: i32) -> Self {
		AttrValue::Scalar(Value::from(value))
	}
}

impl From<i64> for AttrValue {
	fn from(value: i64) -> Self {
		AttrValue::Scalar(Value::from(value))
	}
}

impl From<f64> for AttrValue {
	fn from(value: f64) -> Self {
		AttrValue::Scalar(Value::from(value))
	}
}

impl From<ModelHandle> for AttrValue {
	fn from(handle: ModelHandle) -> Self {
		AttrValue::Linked(handle)
	}
}

impl From<Option<ModelHandle>> for AttrValue {
	fn from(handle: Option<ModelHandle>) -> Self {
		match handle {
			Some(handle) => AttrValue::Linked(handle),
			None => AttrValue::null(),
		}
	}
}

/// Capability interface a host object model implements per entity.
pub trait Model: Any {
	/// Model name, used for blueprint lookup and error reporting.
	fn model_name(&self) -> &str;

	/// Association metadata for `attribute`, or `None` for plain fields.
	fn association(&self, attribute: &str) -> Option<&AssociationMeta>;

	/// Plain attribute assignment.
	///
	/// For a live many-to-one association this is expected to perform
	/// the host's normal foreign-key wiring. Unknown attribute names
	/// must be reported as [`BuildError::UnknownAttribute`].
	///
	/// [`BuildError::UnknownAttribute`]: crate::error::BuildError::UnknownAttribute
	fn set_attribute(&mut self, attribute: &str, value: &AttrValue) -> BuildResult<()>;

	/// Records an in-memory association edge without touching foreign
	/// keys or triggering persistence. Used while saves are suppressed.
	fn link_association(&mut self, attribute: &str, value: Option<ModelHandle>);

	/// Primary-key value, `Null` while unpersisted.
	fn primary_key(&self) -> Value;

	/// Persists the object, failing loudly on validation or constraint
	/// errors.
	fn save(&mut self) -> Result<(), HostError>;

	/// Upcast for host-side downcasting to the concrete model type.
	fn as_any(&self) -> &dyn Any;

	/// Mutable upcast for host-side downcasting.
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl std::fmt::Debug for dyn Model {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Model")
			.field("name", &self.model_name())
			.finish_non_exhaustive()
	}
}
