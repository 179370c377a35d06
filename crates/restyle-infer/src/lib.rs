//! Model loading and execution for the restyle pipeline.
//!
//! A [`Backend`] turns a [`ModelSource`] into a [`Session`]; the
//! [`BackendRegistry`] holds the available backends, and [`load_runner`]
//! resolves a load path (model file or descriptor directory) into a
//! [`Runner`] on the first backend that accepts the model.

pub mod backend;
pub mod backendregistry;
pub mod backends;
pub mod descriptor;
pub mod device;
pub mod error;
pub mod modelsource;
pub mod runner;
pub mod session;

pub use backend::Backend;
pub use backendregistry::{BackendRegistry, create_registry};
pub use descriptor::{DESCRIPTOR_FILE, ModelDescriptor, resolve_model};
pub use device::Device;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use runner::{Runner, load_runner};
pub use session::Session;
