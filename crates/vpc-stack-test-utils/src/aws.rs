//! AWS test utilities
//!
//! Provides region detection and unique stack names for AWS integration tests.

use chrono::Utc;

/// Region used when neither `AWS_REGION` nor `AWS_DEFAULT_REGION` is set
pub const FALLBACK_REGION: &str = "ap-southeast-1";

/// Get the AWS region for tests.
///
/// Checks environment variables in order:
/// 1. AWS_REGION
/// 2. AWS_DEFAULT_REGION
/// 3. Falls back to ap-southeast-1
pub fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| FALLBACK_REGION.to_string())
}

/// First availability zone of `region` (`{region}a`)
pub fn test_availability_zone(region: &str) -> String {
    format!("{region}a")
}

/// Generate a unique stack name for test resources.
///
/// Format: `vpc-stack-test-{timestamp_ms}-{counter}`, so stacks created by
/// tests starting at the same instant still get distinct tags.
///
/// # Example
///
/// ```
/// use vpc_stack_test_utils::aws::test_stack_name;
///
/// let name = test_stack_name();
/// assert!(name.starts_with("vpc-stack-test-"));
/// ```
pub fn test_stack_name() -> String {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let ts = Utc::now().timestamp_millis();
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("vpc-stack-test-{ts}-{counter}")
}
