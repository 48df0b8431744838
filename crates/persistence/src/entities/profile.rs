//! Profile entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Profile, Role};

/// Database row mapping for the profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileEntity {
    pub id: Uuid,
    pub company_name: String,
    pub contact_person: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileEntity {
    /// Convert to domain model. Unknown role strings fall back to the
    /// least-privileged role.
    pub fn into_domain(self) -> Profile {
        let role = self.role.parse::<Role>().unwrap_or(Role::Subcontractor);

        Profile {
            id: self.id,
            company_name: self.company_name,
            contact_person: self.contact_person,
            phone_number: self.phone_number,
            address: self.address,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<ProfileEntity> for Profile {
    fn from(entity: ProfileEntity) -> Self {
        entity.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entity() -> ProfileEntity {
        ProfileEntity {
            id: Uuid::new_v4(),
            company_name: "Muster Bau GmbH".to_string(),
            contact_person: Some("A. Muster".to_string()),
            phone_number: None,
            address: None,
            role: "subcontractor".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_entity_to_domain() {
        let entity = create_test_entity();
        let profile: Profile = entity.clone().into();

        assert_eq!(profile.id, entity.id);
        assert_eq!(profile.company_name, entity.company_name);
        assert_eq!(profile.role, Role::Subcontractor);
    }

    #[test]
    fn test_entity_admin_role() {
        let mut entity = create_test_entity();
        entity.role = "admin".to_string();

        let profile: Profile = entity.into();
        assert_eq!(profile.role, Role::Admin);
    }

    #[test]
    fn test_entity_unknown_role_defaults_to_subcontractor() {
        let mut entity = create_test_entity();
        entity.role = "superuser".to_string();

        let profile: Profile = entity.into();
        assert_eq!(profile.role, Role::Subcontractor);
    }
}
