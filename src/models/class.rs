//! Class model and its request bodies.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Member, MemberRequest};

/// A tracked class (course section) with its roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: String,
    pub name: String,
    pub code: String,
    pub git_repository: Option<String>,
    pub system_url: Option<String>,
    /// `None` when the stored row carries no member list at all
    pub members: Option<Vec<Member>>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields of a class that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub code: String,
    pub git_repository: Option<String>,
    pub system_url: Option<String>,
    pub members: Vec<Member>,
}

/// Request body for creating a new class.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub git_repository: Option<String>,
    #[serde(default)]
    pub system_url: Option<String>,
}

/// Request body for updating an existing class.
///
/// Name and code are fixed after creation. A supplied `members` list replaces the roster.
/// Link fields are `None` when absent and `Some(None)` when sent as `null`, which clears them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    #[serde(default, deserialize_with = "present")]
    pub git_repository: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub system_url: Option<Option<String>>,
    #[serde(default)]
    pub members: Option<Vec<MemberRequest>>,
}

/// Mark a field as present even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let request: UpdateClassRequest =
            serde_json::from_str(r#"{"gitRepository": null}"#).unwrap();
        assert_eq!(request.git_repository, Some(None));
        assert_eq!(request.system_url, None);

        let request: UpdateClassRequest =
            serde_json::from_str(r#"{"systemUrl": "https://example.com"}"#).unwrap();
        assert_eq!(
            request.system_url,
            Some(Some("https://example.com".to_string()))
        );
        assert!(request.members.is_none());
    }
}
