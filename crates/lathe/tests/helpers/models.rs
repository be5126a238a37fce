//! In-memory toy object model for integration tests.
//!
//! `Storage` stands in for the host database: it allocates primary
//! keys, counts saves, and can be told to reject the next one. `User`
//! and `Post` implement the `Model` capability the way an ORM entity
//! would, including live foreign-key wiring on the `author` setter.

// Each test binary uses a different slice of these helpers.
#![allow(dead_code)]

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use lathe::prelude::*;
use serde_json::{Value, json};

/// Fake storage backend shared by all models in a test.
#[derive(Debug, Default)]
pub struct Storage {
	next_id: Cell<i64>,
	saves: Cell<usize>,
	fail_next: Cell<bool>,
}

impl Storage {
	pub fn new() -> Rc<Storage> {
		Rc::new(Storage::default())
	}

	fn allocate(&self) -> i64 {
		let id = self.next_id.get() + 1;
		self.next_id.set(id);
		id
	}

	/// Number of successful saves across all models.
	pub fn saves(&self) -> usize {
		self.saves.get()
	}

	/// Makes the next save fail with a constraint error.
	pub fn fail_next_save(&self) {
		self.fail_next.set(true);
	}

	fn save(&self) -> Result<i64, HostError> {
		if self.fail_next.take() {
			return Err("constraint violation: NOT NULL".into());
		}
		self.saves.set(self.saves.get() + 1);
		Ok(self.allocate())
	}
}

pub struct User {
	storage: Rc<Storage>,
	pub id: Value,
	pub email: Value,
	pub name: Value,
}

impl User {
	pub fn new(storage: Rc<Storage>) -> Self {
		User {
			storage,
			id: Value::Null,
			email: Value::Null,
			name: Value::Null,
		}
	}
}

impl Model for User {
	fn model_name(&self) -> &str {
		"User"
	}

	fn association(&self, _attribute: &str) -> Option<&AssociationMeta> {
		None
	}

	fn set_attribute(&mut self, attribute: &str, value: &AttrValue) -> BuildResult<()> {
		let scalar = match value {
			AttrValue::Scalar(scalar) => scalar.clone(),
			AttrValue::Linked(linked) => linked.borrow().primary_key(),
		};
		match attribute {
			"email" => self.email = scalar,
			"name" => self.name = scalar,
			other => {
				return Err(BuildError::UnknownAttribute {
					model: "User".to_string(),
					attribute: other.to_string(),
				});
			}
		}
		Ok(())
	}

	fn link_association(&mut self, _attribute: &str, _value: Option<ModelHandle>) {}

	fn primary_key(&self) -> Value {
		self.id.clone()
	}

	fn save(&mut self) -> Result<(), HostError> {
		self.id = json!(self.storage.save()?);
		Ok(())
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

pub struct Post {
	storage: Rc<Storage>,
	pub id: Value,
	pub title: Value,
	pub author_id: Value,
	/// `Some` once the association was assigned; inner `None` for an
	/// explicit null link.
	pub author: Option<Option<ModelHandle>>,
	author_meta: AssociationMeta,
}

impl Post {
	pub fn new(storage: Rc<Storage>) -> Self {
		Post {
			storage,
			id: Value::Null,
			title: Value::Null,
			author_id: Value::Null,
			author: None,
			author_meta: AssociationMeta::many_to_one("User"),
		}
	}
}

impl Model for Post {
	fn model_name(&self) -> &str {
		"Post"
	}

	fn association(&self, attribute: &str) -> Option<&AssociationMeta> {
		(attribute == "author").then_some(&self.author_meta)
	}

	fn set_attribute(&mut self, attribute: &str, value: &AttrValue) -> BuildResult<()> {
		match attribute {
			"title" => {
				if let AttrValue::Scalar(scalar) = value {
					self.title = scalar.clone();
				}
				Ok(())
			}
			"author" => {
				// Live setter: wire the foreign key from the linked
				// object's primary key, like an ORM association setter.
				let linked = value.as_handle();
				self.author_id = linked
					.as_ref()
					.map(|handle| handle.borrow().primary_key())
					.unwrap_or(Value::Null);
				self.author = Some(linked);
				Ok(())
			}
			other => Err(BuildError::UnknownAttribute {
				model: "Post".to_string(),
				attribute: other.to_string(),
			}),
		}
	}

	fn link_association(&mut self, attribute: &str, value: Option<ModelHandle>) {
		if attribute == "author" {
			self.author = Some(value);
		}
	}

	fn primary_key(&self) -> Value {
		self.id.clone()
	}

	fn save(&mut self) -> Result<(), HostError> {
		self.id = json!(self.storage.save()?);
		Ok(())
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// Standard blueprint set: a `User` with generated emails and a `Post`
/// whose `author` builds a `User` through the registry.
pub fn blueprints(storage: &Rc<Storage>) -> BlueprintRegistry {
	let mut registry = BlueprintRegistry::new();

	let user_storage = storage.clone();
	let email_counter = Cell::new(0u32);
	registry.define(
		Blueprint::new("User", move || handle(User::new(user_storage.clone())))
			.attr("email", move |_| {
				let n = email_counter.get() + 1;
				email_counter.set(n);
				Ok(json!(format!("user{n}@example.com")).into())
			})
			.value("name", "Anonymous"),
	);

	let post_storage = storage.clone();
	registry.define(
		Blueprint::new("Post", move || handle(Post::new(post_storage.clone())))
			.value("title", "Hello world")
			.attr("author", |cx| Ok(cx.make("User", attrs! {})?.into())),
	);

	registry
}

/// Borrows the concrete model out of a handle for assertions.
pub fn with_model<M: 'static, R>(handle: &ModelHandle, f: impl FnOnce(&M) -> R) -> R {
	let borrowed = handle.borrow();
	let model = borrowed
		.as_any()
		.downcast_ref::<M>()
		.expect("unexpected model type");
	f(model)
}
