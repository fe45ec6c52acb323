//! Sprout: decide where a new wiki page goes.
//!
//! Given the page a request was made on and the raw request parameters,
//! Sprout works out the address of the page to create, whether it is a leaf
//! document or a space with a homepage, and which template seeds it. The
//! answer is an [`Outcome`](model::Outcome): committed, incomplete (more
//! input needed), a template scope violation, or a conflict with existing
//! content.
//!
//! Lookups go through the [`ReferenceResolver`](reference::ReferenceResolver),
//! [`TemplateRegistry`](registry::TemplateRegistry) and
//! [`ContentStore`](registry::ContentStore) traits; [`storage::Storage`]
//! implements the latter two on `SQLite`.

pub mod config;
pub mod conflict;
pub mod create;
pub mod gate;
pub mod model;
pub mod normalize;
pub mod reference;
pub mod registry;
pub mod resolve;
pub mod storage;

#[cfg(test)]
mod testing;
