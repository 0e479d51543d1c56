//! Member model, embedded inside a class record.

use serde::{Deserialize, Serialize};

/// Role assigned to a member when none is given.
pub const DEFAULT_MEMBER_ROLE: &str = "Member";

/// A person on a class roster. Members have no storage of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub role: String,
    pub class_id: String,
}

impl Member {
    /// Build a member with a freshly generated id. A missing or blank role becomes the default.
    pub fn new(class_id: &str, name: &str, role: Option<&str>) -> Self {
        let role = role
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(DEFAULT_MEMBER_ROLE);

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            role: role.to_string(),
            class_id: class_id.to_string(),
        }
    }
}

/// Request body for adding a member, also used for each entry of a roster replacement.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRequest {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Request body for changing a member's role.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRoleRequest {
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_member() {
        let member = Member::new("class-1", "Ana", None);
        assert_eq!(member.role, DEFAULT_MEMBER_ROLE);
        assert_eq!(member.class_id, "class-1");
        assert!(uuid::Uuid::parse_str(&member.id).is_ok());
    }

    #[test]
    fn test_blank_role_defaults_to_member() {
        assert_eq!(Member::new("class-1", "Ana", Some("")).role, "Member");
        assert_eq!(Member::new("class-1", "Ana", Some("   ")).role, "Member");
        assert_eq!(Member::new("class-1", "Ana", Some("Lead")).role, "Lead");
    }

    #[test]
    fn test_member_serializes_camel_case() {
        let member = Member::new("class-1", "Bea", Some("Lead"));
        let value = serde_json::to_value(&member).unwrap();
        assert_eq!(value["classId"], "class-1");
        assert_eq!(value["role"], "Lead");
    }

    #[test]
    fn test_member_request_ignores_client_id() {
        let request: MemberRequest =
            serde_json::from_str(r#"{"id": "old-id", "name": "Ana"}"#).unwrap();
        assert_eq!(request.name, "Ana");
        assert!(request.role.is_none());
    }
}
