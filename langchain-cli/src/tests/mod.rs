//! Unit tests for langchain-cli, organized by module.
//!
//! Each submodule documents the behaviour under test. Everything runs against the
//! mock chat model; no network.

mod pipelines;
