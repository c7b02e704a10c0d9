//! Unit tests for the orchestration context.

mod support;
