//! Workspace-level tooling crate.
//!
//! Exists only to host the pre-commit hook configuration; see the member
//! crates under `crates/` for the actual service.
