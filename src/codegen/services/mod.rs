//! Code-generation services: scaffold fetch, file access and verification.

mod files;
mod scaffold;
mod verifier;

pub use files::SourceFiles;
pub use scaffold::ScaffoldFetcher;
pub use verifier::BuildVerifier;
