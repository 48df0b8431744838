//! Profile repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ProfileEntity;
use crate::metrics::QueryTimer;

/// Input data for updating a profile. `None` fields keep current values.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdateInput {
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Repository for profile database operations.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Creates a new ProfileRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Find profile by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_profile_by_id");
        let result = sqlx::query_as::<_, ProfileEntity>(
            r#"
            SELECT id, company_name, contact_person, phone_number, address, role, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Ensure a profile row exists for an authenticated subject.
    ///
    /// First authenticated access self-provisions the row with the role
    /// from the token; an existing row is left untouched (role changes at
    /// the provider do not retroactively rewrite it here).
    pub async fn ensure_profile(
        &self,
        id: Uuid,
        role: &str,
    ) -> Result<ProfileEntity, sqlx::Error> {
        let timer = QueryTimer::new("ensure_profile");

        sqlx::query(
            r#"
            INSERT INTO profiles (id, role)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(role)
        .execute(&self.pool)
        .await?;

        let entity = self
            .find_by_id(id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        timer.record();
        Ok(entity)
    }

    /// Update a profile's own fields.
    pub async fn update_profile(
        &self,
        id: Uuid,
        input: ProfileUpdateInput,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_profile");
        let result = sqlx::query_as::<_, ProfileEntity>(
            r#"
            UPDATE profiles
            SET company_name = COALESCE($2, company_name),
                contact_person = COALESCE($3, contact_person),
                phone_number = COALESCE($4, phone_number),
                address = COALESCE($5, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, company_name, contact_person, phone_number, address, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.company_name)
        .bind(&input.contact_person)
        .bind(&input.phone_number)
        .bind(&input.address)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
