//! Dockforge artifact synthesis engine.
//!
//! Turns a loosely-typed environment description into a container build
//! file and/or an orchestration manifest. Everything in this crate is pure
//! and synchronous except the [`generate`] pipeline, which talks to the
//! history collaborator through the [`store::HistoryStore`] trait.

pub mod buildfile;
pub mod bundle;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod normalize;
pub mod spec;
pub mod store;
pub mod tokens;
pub mod types;
