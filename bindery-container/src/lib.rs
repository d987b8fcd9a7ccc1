//! Core container implementation for bindery.
//!
//! Resolution runs on the tokio runtime: [`Container::get`] spawns one
//! task per requested name.

pub mod container;
pub mod error;
pub mod factory;
pub mod key;
pub mod provider;
mod registry;
pub mod resolved;
pub mod settings;
pub mod sharing;

pub use container::{BindingBuilder, Container, ContainerBuilder, prelude};
pub use error::{BinderyError, Result};
pub use factory::{Completion, Factory};
pub use key::IntoKeys;
pub use provider::Provider;
pub use resolved::{Instance, Resolved};
pub use settings::Settings;
pub use sharing::Sharing;
