//! Capabilities binding worker units to the code-generation pipeline.

mod scaffold;
mod source;
mod verify;
mod writer;

pub use scaffold::ScaffoldCapability;
pub use source::ReadSourceCapability;
pub use verify::VerifyCapability;
pub use writer::WriteCodeCapability;
