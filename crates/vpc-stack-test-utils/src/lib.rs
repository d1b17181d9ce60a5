//! Shared test helpers for vpc-stack
//!
//! ## Modules
//!
//! - [`aws`]: AWS region detection and unique stack names for integration tests

pub mod aws;

pub use aws::{get_test_region, test_availability_zone, test_stack_name};
