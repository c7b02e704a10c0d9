//! Atelier: supervised worker orchestration for scaffold-driven code
//! generation.
//!
//! A single supervisor inspects the conversation so far and picks the next
//! single-purpose worker (scaffold, verify, read source, write code) or ends
//! the run. Workers drive an external code-generation pipeline: fetching and
//! extracting a project scaffold, writing generated sources into it, and
//! running the project's build tool to confirm the application starts.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types and invariants with no infrastructure
//! - **Ports**: Trait seams for the language-model, HTTP and process
//!   collaborators
//! - **Adapters**: Concrete implementations of those seams
//! - **Services**: The orchestration and pipeline logic
//!
//! # Modules
//!
//! - [`orchestration`]: Conversation state, router, worker units and the
//!   step-bounded graph
//! - [`codegen`]: Scaffold fetching, file writing and build/run
//!   verification
//! - [`config`]: Per-run configuration
//! - [`assembly`]: Wiring a complete code-generation graph from a
//!   [`config::RunConfig`]

pub mod assembly;
pub mod codegen;
pub mod config;
pub mod orchestration;
