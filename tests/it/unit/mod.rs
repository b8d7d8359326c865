//! Unit tests against the public API.

mod coords_tests;
mod hit_testing_tests;
mod snapshot_tests;
mod store_tests;
mod validation_tests;
