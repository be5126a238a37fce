//! Attribute resolution: association-aware assignment and flattening.
//!
//! The adapter decides, per attribute, whether a value goes through the
//! host's plain setter or is linked in memory, and knows how to flatten
//! assigned attributes into a scalar column mapping for planning.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::BuildResult;
use crate::model::{AssociationKind, AttrValue, Model};

/// Whether `attribute` is a declared association on the object's model.
pub fn is_association(object: &dyn Model, attribute: &str) -> bool {
	object.association(attribute).is_some()
}

/// Model name of the entity `attribute` associates to, if any.
pub fn target_model<'a>(object: &'a dyn Model, attribute: &str) -> Option<&'a str> {
	object
		.association(attribute)
		.map(|meta| meta.target.as_str())
}

/// Assigns one attribute, choosing the strategy by nerf state.
///
/// With saves suppressed, association attributes are linked in memory:
/// going through the live setter would wire foreign keys and let the
/// host cascade-save the associated row, which is exactly what
/// suppression must prevent. Everything else takes the plain setter.
pub fn assign_attribute(
	object: &mut dyn Model,
	attribute: &str,
	value: &AttrValue,
	nerfed: bool,
) -> BuildResult<()> {
	if nerfed && is_association(object, attribute) {
		object.link_association(attribute, value.as_handle());
		Ok(())
	} else {
		object.set_attribute(attribute, value)
	}
}

/// Flattens assigned attributes into a column-name → scalar mapping.
///
/// Many-to-one attributes are replaced by their foreign-key column
/// (declared key, or `<attribute>_id`) mapped to the linked object's
/// primary key; an association explicitly set to null flattens to a
/// null foreign key rather than being dropped. Plain attributes keep
/// their name and value.
pub fn flatten_assigned_attributes(
	object: &dyn Model,
	assigned: &[(String, AttrValue)],
) -> HashMap<String, Value> {
	let mut flattened = HashMap::with_capacity(assigned.len());
	for (attribute, value) in assigned {
		match object.association(attribute) {
			Some(meta) if meta.kind == AssociationKind::ManyToOne => {
				let primary_key = match value {
					AttrValue::Linked(linked) => linked.borrow().primary_key(),
					AttrValue::Scalar(scalar) => scalar.clone(),
				};
				flattened.insert(meta.foreign_key(attribute), primary_key);
			}
			_ => {
				let scalar = match value {
					AttrValue::Scalar(scalar) => scalar.clone(),
					AttrValue::Linked(linked) => linked.borrow().primary_key(),
				};
				flattened.insert(attribute.clone(), scalar);
			}
		}
	}
	flattened
}
