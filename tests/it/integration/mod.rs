//! Integration tests - multi-step editing workflows.

mod session_io_tests;
