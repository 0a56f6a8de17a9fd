//! # Actions: the units of work a run executes.
//!
//! - [`Action`] - trait for a named, retryable async operation
//! - [`ActionFn`] - closure-backed implementation
//! - [`ActionRef`] - shared handle (`Arc<dyn Action>`)

mod action;
mod action_fn;

pub use action::{Action, ActionRef};
pub use action_fn::ActionFn;
