//! Profile domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::{validate_phone_number, validate_plain_text};

/// Role granted by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Subcontractor,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Subcontractor => write!(f, "subcontractor"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "subcontractor" => Ok(Role::Subcontractor),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// A subcontractor or administrator identity.
///
/// The profile ID equals the subject of the provider-issued token; rows are
/// self-provisioned on first authenticated access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Profile {
    pub id: Uuid,
    pub company_name: String,
    pub contact_person: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for updating one's own profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 200, message = "Company name must be 1-200 characters"))]
    #[validate(custom(function = "validate_plain_text"))]
    pub company_name: Option<String>,

    #[validate(length(max = 200, message = "Contact person must not exceed 200 characters"))]
    #[validate(custom(function = "validate_plain_text"))]
    pub contact_person: Option<String>,

    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,

    #[validate(length(max = 500, message = "Address must not exceed 500 characters"))]
    #[validate(custom(function = "validate_plain_text"))]
    pub address: Option<String>,
}

/// Profile representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub company_name: String,
    pub contact_person: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            company_name: profile.company_name,
            contact_person: profile.contact_person,
            phone_number: profile.phone_number,
            address: profile.address,
            role: profile.role,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}
