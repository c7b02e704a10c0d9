//! The code-generation pipeline driven by the orchestration workers.
//!
//! - [`services::ScaffoldFetcher`] downloads a project template archive
//!   and extracts it into a target directory.
//! - [`services::SourceFiles`] writes generated files and reads sources.
//! - [`services::BuildVerifier`] runs the project's build wrapper and
//!   waits for the application to report that it started.
//!
//! External systems sit behind the ports in [`ports`]: the template
//! service and the build process launcher.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
