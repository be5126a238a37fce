//! Dynamically-scoped persistence suppression ("nerfing").
//!
//! While a nerf scope is active, `make` skips the save step and the
//! adapter links associations in memory instead of going through the
//! host's live setters. The scope is dynamic: nested builds triggered
//! by association attributes inherit it.
//!
//! The state is a thread-local depth counter, not a boolean, so nested
//! scopes compose and an inner exit never lifts an outer suppression.
//! The guard releases on drop, which covers every exit path including
//! panics.

use std::cell::Cell;

thread_local! {
	static NERF_DEPTH: Cell<u32> = const { Cell::new(0) };
}

/// True while at least one nerf scope is active on this thread.
pub fn nerfed() -> bool {
	NERF_DEPTH.with(|depth| depth.get() > 0)
}

/// RAII scope during which persistence is suppressed.
///
/// # Example
///
/// ```
/// assert!(!lathe::nerfed());
/// {
///     let _guard = lathe::NerfGuard::new();
///     assert!(lathe::nerfed());
/// }
/// assert!(!lathe::nerfed());
/// ```
#[derive(Debug)]
pub struct NerfGuard(());

impl NerfGuard {
	/// Enters a nerf scope.
	pub fn new() -> Self {
		NERF_DEPTH.with(|depth| depth.set(depth.get() + 1));
		tracing::trace!("entered nerf scope");
		NerfGuard(())
	}
}

impl Default for NerfGuard {
	fn default() -> Self {
		Self::new()
	}
}

impl Drop for NerfGuard {
	fn drop(&mut self) {
		NERF_DEPTH.with(|depth| depth.set(depth.get() - 1));
		tracing::trace!("left nerf scope");
	}
}

/// Runs `f` with saves suppressed, restoring on all exit paths.
pub fn with_save_nerfed<T>(f: impl FnOnce() -> T) -> T {
	let _guard = NerfGuard::new();
	f()
}
