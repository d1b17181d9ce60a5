//! AWS error classification
//!
//! Provides typed errors for EC2 operations using the `.code()` method
//! instead of string matching on Debug format. Classification never changes
//! control flow of the build beyond tolerating duplicate rules; it exists to
//! tell the user what went wrong.

use aws_sdk_ec2::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_ec2::operation::{
    associate_route_table::AssociateRouteTableError,
    attach_internet_gateway::AttachInternetGatewayError,
    authorize_security_group_egress::AuthorizeSecurityGroupEgressError,
    authorize_security_group_ingress::AuthorizeSecurityGroupIngressError,
    create_internet_gateway::CreateInternetGatewayError, create_route::CreateRouteError,
    create_route_table::CreateRouteTableError, create_security_group::CreateSecurityGroupError,
    create_subnet::CreateSubnetError, create_vpc::CreateVpcError,
    modify_subnet_attribute::ModifySubnetAttributeError,
    modify_vpc_attribute::ModifyVpcAttributeError,
};
use std::error::Error as StdError;
use thiserror::Error;

/// AWS error categories
#[derive(Debug, Error)]
pub enum AwsError {
    /// A referenced resource does not exist
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    /// Resource or rule already exists
    #[error("Resource already exists")]
    AlreadyExists,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    Throttled,

    /// Resource has dependent objects
    #[error("Resource has dependent objects")]
    DependencyViolation,

    /// An account quota was hit (VPCs, gateways, rules per group, ...)
    #[error("Limit exceeded: {code}")]
    LimitExceeded { code: String },

    /// Credentials lack permission for the call
    #[error("Not authorized: {message}")]
    Unauthorized { message: String },

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Check if this is an "already exists" error
    pub fn is_already_exists(&self) -> bool {
        matches!(self, AwsError::AlreadyExists)
    }

    /// Error code, when AWS supplied one
    pub fn code(&self) -> Option<&str> {
        match self {
            AwsError::LimitExceeded { code } => Some(code),
            AwsError::Sdk { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            AwsError::Throttled => suggestion_for_code("RequestLimitExceeded"),
            AwsError::Unauthorized { .. } => suggestion_for_code("UnauthorizedOperation"),
            other => other.code().and_then(suggestion_for_code),
        }
    }
}

/// Known AWS error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &[
    "InvalidVpcID.NotFound",
    "InvalidSubnetID.NotFound",
    "InvalidInternetGatewayID.NotFound",
    "InvalidRouteTableID.NotFound",
    "InvalidGroup.NotFound",
];

/// Known AWS error codes for "already exists" conditions
const ALREADY_EXISTS_CODES: &[&str] = &[
    "InvalidPermission.Duplicate",
    "InvalidGroup.Duplicate",
    "Resource.AlreadyAssociated",
    "RouteAlreadyExists",
];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

/// Known AWS error codes for dependency violations (resource still in use)
const DEPENDENCY_CODES: &[&str] = &["DependencyViolation"];

/// Known AWS error codes for account quotas
const LIMIT_CODES: &[&str] = &[
    "VpcLimitExceeded",
    "SubnetLimitExceeded",
    "InternetGatewayLimitExceeded",
    "RouteTableLimitExceeded",
    "RouteLimitExceeded",
    "SecurityGroupLimitExceeded",
    "RulesPerSecurityGroupLimitExceeded",
];

/// Known AWS error codes for missing permissions
const UNAUTHORIZED_CODES: &[&str] = &["UnauthorizedOperation", "AuthFailure"];

/// Classify an AWS SDK error using the error code.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound { message },
        Some(c) if ALREADY_EXISTS_CODES.contains(&c) => AwsError::AlreadyExists,
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled,
        Some(c) if DEPENDENCY_CODES.contains(&c) => AwsError::DependencyViolation,
        Some(c) if LIMIT_CODES.contains(&c) => AwsError::LimitExceeded {
            code: c.to_string(),
        },
        Some(c) if UNAUTHORIZED_CODES.contains(&c) => AwsError::Unauthorized { message },
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

type Metadata = (Option<String>, Option<String>);

/// Code and message of `cause` if it is an `SdkError` for operation error `E`
fn sdk_metadata<E>(cause: &(dyn StdError + 'static)) -> Option<Metadata>
where
    E: ProvideErrorMetadata + StdError + Send + Sync + 'static,
{
    cause.downcast_ref::<SdkError<E>>().map(|e| {
        let meta = ProvideErrorMetadata::meta(e);
        (
            meta.code().map(str::to_string),
            meta.message().map(str::to_string),
        )
    })
}

/// Every EC2 operation the stack calls
const EXTRACTORS: &[fn(&(dyn StdError + 'static)) -> Option<Metadata>] = &[
    sdk_metadata::<CreateVpcError>,
    sdk_metadata::<ModifyVpcAttributeError>,
    sdk_metadata::<CreateSubnetError>,
    sdk_metadata::<ModifySubnetAttributeError>,
    sdk_metadata::<CreateInternetGatewayError>,
    sdk_metadata::<AttachInternetGatewayError>,
    sdk_metadata::<CreateRouteTableError>,
    sdk_metadata::<CreateRouteError>,
    sdk_metadata::<AssociateRouteTableError>,
    sdk_metadata::<CreateSecurityGroupError>,
    sdk_metadata::<AuthorizeSecurityGroupIngressError>,
    sdk_metadata::<AuthorizeSecurityGroupEgressError>,
];

/// Classify an error from an anyhow::Error by extracting the AWS error code.
///
/// Walks the error chain looking for an EC2 `SdkError` and reads `.code()`
/// and `.message()` from it. Falls back to string matching on the Debug
/// representation if no typed error is found.
pub fn classify_anyhow_error(error: &anyhow::Error) -> AwsError {
    for cause in error.chain() {
        if let Some((code, message)) = EXTRACTORS.iter().find_map(|extract| extract(cause)) {
            return classify_aws_error(code.as_deref(), message.as_deref());
        }
    }

    // Fallback: extract error code from debug string representation
    let debug_str = format!("{:?}", error);
    if let Some(code) = extract_error_code(&debug_str) {
        return classify_aws_error(Some(&code), Some(&error.to_string()));
    }

    AwsError::Sdk {
        code: None,
        message: error.to_string(),
    }
}

/// Extract an AWS error code from a debug string representation
fn extract_error_code(debug_str: &str) -> Option<String> {
    let known = NOT_FOUND_CODES
        .iter()
        .chain(ALREADY_EXISTS_CODES)
        .chain(THROTTLING_CODES)
        .chain(DEPENDENCY_CODES)
        .chain(LIMIT_CODES)
        .chain(UNAUTHORIZED_CODES);
    for code in known {
        if debug_str.contains(code) {
            return Some((*code).to_string());
        }
    }

    // Try to extract any code from `code: Some("...")` pattern
    if let Some(start) = debug_str.find("code: Some(\"") {
        let rest = &debug_str[start + 12..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_string());
        }
    }

    None
}

/// Error code to user-friendly suggestion mapping
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "VpcLimitExceeded",
        "Delete unused VPCs or request a quota increase via the Service Quotas console.",
    ),
    (
        "SubnetLimitExceeded",
        "Delete unused subnets or request a quota increase via the Service Quotas console.",
    ),
    (
        "InternetGatewayLimitExceeded",
        "Delete detached internet gateways or request a quota increase.",
    ),
    (
        "RouteTableLimitExceeded",
        "Delete unused route tables or request a quota increase.",
    ),
    (
        "RouteLimitExceeded",
        "The route table is full; remove unused routes.",
    ),
    (
        "SecurityGroupLimitExceeded",
        "Delete unused security groups or request a quota increase.",
    ),
    (
        "RulesPerSecurityGroupLimitExceeded",
        "The security group has too many rules; remove unused rules.",
    ),
    (
        "InvalidSubnet.Conflict",
        "The subnet CIDR overlaps an existing subnet; choose another block.",
    ),
    (
        "InvalidSubnet.Range",
        "The subnet CIDR must lie within the VPC CIDR and be between /16 and /28.",
    ),
    (
        "InvalidVpc.Range",
        "The VPC CIDR must be between /16 and /28.",
    ),
    (
        "InvalidParameterValue",
        "Check the availability zone exists in the selected region.",
    ),
    (
        "UnauthorizedOperation",
        "The credentials lack EC2 permissions; check the IAM policy or --aws-profile.",
    ),
    (
        "RequestLimitExceeded",
        "AWS API rate limit hit. Wait a moment and re-run; the stack does not retry.",
    ),
];

/// Get a user-friendly suggestion for a known error code.
fn suggestion_for_code(code: &str) -> Option<String> {
    SUGGESTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| (*s).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_codes() {
        for code in NOT_FOUND_CODES {
            let err = classify_aws_error(Some(code), Some("some message"));
            assert!(
                matches!(err, AwsError::NotFound { .. }),
                "Expected NotFound for code: {code}"
            );
        }
    }

    #[test]
    fn already_exists_codes() {
        for code in ALREADY_EXISTS_CODES {
            let err = classify_aws_error(Some(code), Some("msg"));
            assert!(
                err.is_already_exists(),
                "Expected AlreadyExists for code: {code}"
            );
        }
    }

    #[test]
    fn throttling_codes() {
        for code in THROTTLING_CODES {
            let err = classify_aws_error(Some(code), Some("msg"));
            assert!(matches!(err, AwsError::Throttled));
            assert!(err.suggestion().is_some());
        }
    }

    #[test]
    fn limit_codes_keep_code_and_suggest() {
        for code in LIMIT_CODES {
            let err = classify_aws_error(Some(code), Some("msg"));
            assert_eq!(err.code(), Some(*code));
            assert!(err.suggestion().is_some(), "No suggestion for code: {code}");
        }
    }

    #[test]
    fn unauthorized() {
        let err = classify_aws_error(Some("UnauthorizedOperation"), Some("not allowed"));
        assert!(matches!(err, AwsError::Unauthorized { .. }));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn unknown_and_missing_codes() {
        let err = classify_aws_error(Some("InvalidSubnet.Conflict"), Some("overlap"));
        assert!(matches!(err, AwsError::Sdk { .. }));
        assert!(err.suggestion().is_some());

        let err2 = classify_aws_error(None, Some("something failed"));
        assert!(matches!(err2, AwsError::Sdk { code: None, .. }));
        assert!(err2.suggestion().is_none());
    }

    #[test]
    fn classify_from_debug_string() {
        let err = anyhow::anyhow!("service error: code: Some(\"VpcLimitExceeded\")");
        assert!(matches!(
            classify_anyhow_error(&err),
            AwsError::LimitExceeded { .. }
        ));

        let plain = anyhow::anyhow!("connection refused");
        assert!(matches!(
            classify_anyhow_error(&plain),
            AwsError::Sdk { code: None, .. }
        ));
    }

    #[test]
    fn extract_code_from_code_field() {
        let debug_str = r#"SdkError { code: Some("SomeRandomCode"), message: "fail" }"#;
        assert_eq!(
            extract_error_code(debug_str).as_deref(),
            Some("SomeRandomCode")
        );
    }

    #[test]
    fn suggestions_for_known_codes() {
        for (code, _) in SUGGESTIONS {
            assert!(
                suggestion_for_code(code).is_some(),
                "No suggestion for code: {code}"
            );
        }
        assert!(suggestion_for_code("SomeUnknownCode").is_none());
    }
}
