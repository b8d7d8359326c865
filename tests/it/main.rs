//! Single test binary entry point.
//!
//! All integration tests compile into one binary to keep link time down.
//!
//! Structure:
//! - helpers: Template builder and gesture drivers
//! - integration: Multi-step editing workflows through `EditorSession`
//! - unit: Single-component tests against the public API

mod helpers;
mod integration;
mod unit;
