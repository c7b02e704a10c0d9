//! Adapters for code-generation ports.

pub mod http;
pub mod memory;
pub mod process;

pub use http::{DEFAULT_TEMPLATE_ENDPOINT, HttpTemplateService};
pub use memory::{ProcessLog, ScriptEnd, ScriptedBuildLauncher, StaticTemplateService};
pub use process::TokioBuildLauncher;
