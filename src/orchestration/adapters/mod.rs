//! Adapter implementations for orchestration ports.

pub mod capabilities;
pub mod memory;

pub use capabilities::{
    ReadSourceCapability, ScaffoldCapability, VerifyCapability, WriteCodeCapability,
};
pub use memory::{ScriptedClassifier, StaticDrafter};
