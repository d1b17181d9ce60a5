//! EC2 tag specifications for stack resources

use aws_sdk_ec2::types::{ResourceType, Tag, TagSpecification};
use vpc_stack_common::tags::{
    TAG_CREATED_AT, TAG_LOGICAL_NAME, TAG_NAME, TAG_STACK, TAG_TOOL, TAG_TOOL_VALUE,
    format_created_at,
};

/// Build an EC2 TagSpecification with the standard stack tags.
///
/// `display_name` becomes the `Name` tag shown in the console.
pub fn ec2_tag_spec(
    resource_type: ResourceType,
    stack: &str,
    logical_name: &str,
    display_name: &str,
) -> TagSpecification {
    let created_at = format_created_at(chrono::Utc::now());
    TagSpecification::builder()
        .resource_type(resource_type)
        .tags(Tag::builder().key(TAG_NAME).value(display_name).build())
        .tags(Tag::builder().key(TAG_TOOL).value(TAG_TOOL_VALUE).build())
        .tags(Tag::builder().key(TAG_STACK).value(stack).build())
        .tags(Tag::builder().key(TAG_LOGICAL_NAME).value(logical_name).build())
        .tags(Tag::builder().key(TAG_CREATED_AT).value(created_at).build())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_value<'a>(spec: &'a TagSpecification, key: &str) -> Option<&'a str> {
        spec.tags()
            .iter()
            .find(|t| t.key() == Some(key))
            .and_then(|t| t.value())
    }

    #[test]
    fn test_standard_tags() {
        let spec = ec2_tag_spec(ResourceType::Subnet, "my-vpc", "public-subnet", "public-subnet");
        assert_eq!(spec.resource_type(), Some(&ResourceType::Subnet));
        assert_eq!(tag_value(&spec, TAG_NAME), Some("public-subnet"));
        assert_eq!(tag_value(&spec, TAG_TOOL), Some(TAG_TOOL_VALUE));
        assert_eq!(tag_value(&spec, TAG_STACK), Some("my-vpc"));
        assert_eq!(tag_value(&spec, TAG_LOGICAL_NAME), Some("public-subnet"));
        assert!(tag_value(&spec, TAG_CREATED_AT).is_some());
    }
}
