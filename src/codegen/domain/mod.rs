//! Code-generation domain values.

mod error;
mod scaffold;
mod template;
mod verification;

pub use error::{CodegenError, CodegenResult};
pub use scaffold::{ScaffoldResult, is_key_file};
pub use template::TemplateParams;
pub use verification::{BuildCommand, VerificationResult, VerifierSettings};
