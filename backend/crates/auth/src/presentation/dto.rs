//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::profile::ProfileOutput;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Register response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: i32,
    pub username: String,
}

// ============================================================================
// Profile
// ============================================================================

/// Profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl From<ProfileOutput> for ProfileResponse {
    fn from(output: ProfileOutput) -> Self {
        Self {
            id: output.user_id,
            username: output.user_name,
            email: output.email,
            display_name: output.display_name,
        }
    }
}

/// Profile update request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

// ============================================================================
// Password
// ============================================================================

/// Password change request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_response_is_camel_case() {
        let json = serde_json::to_value(ProfileResponse {
            id: 1,
            username: "admin".to_string(),
            email: None,
            display_name: Some("Admin".to_string()),
        })
        .unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "username": "admin",
                "email": null,
                "displayName": "Admin"
            })
        );
    }

    #[test]
    fn test_change_password_request_field_names() {
        let req: ChangePasswordRequest = serde_json::from_value(serde_json::json!({
            "currentPassword": "old",
            "newPassword": "new"
        }))
        .unwrap();
        assert_eq!(req.current_password, "old");
        assert_eq!(req.new_password, "new");
    }

    #[test]
    fn test_update_profile_fields_are_optional() {
        let req: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_none());
        assert!(req.display_name.is_none());
    }
}
