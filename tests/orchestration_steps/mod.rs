//! Step definitions for supervised code-generation runs.

mod given;
mod then;
mod when;
pub mod world;
