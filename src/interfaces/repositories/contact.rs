use async_trait::async_trait;
use sqlx::{types::Json, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::contact::{Contact, ContactInsert, ContactRow, UpdateContactRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxContactRepo,
};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn get_contact(&self) -> Result<Option<Contact>, AppError>;
    async fn get_contact_by_id(&self, id: &Uuid) -> Result<Option<Contact>, AppError>;
    async fn create_contact(&self, contact: &ContactInsert) -> Result<Contact, AppError>;
    async fn update_contact(&self, id: &Uuid, patch: &UpdateContactRequest) -> Result<Option<Contact>, AppError>;
    async fn delete_contact(&self, id: &Uuid) -> Result<Option<Contact>, AppError>;
}

impl SqlxContactRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxContactRepo { pool }
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepo {
    async fn get_contact(&self) -> Result<Option<Contact>, AppError> {
        let row = sqlx::query_as::<_, ContactRow>("SELECT * FROM contact WHERE singleton")
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Contact::from))
    }

    async fn get_contact_by_id(&self, id: &Uuid) -> Result<Option<Contact>, AppError> {
        let row = sqlx::query_as::<_, ContactRow>("SELECT * FROM contact WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Contact::from))
    }

    async fn create_contact(&self, contact: &ContactInsert) -> Result<Contact, AppError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contact (id, email, phone, socials, address, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#
        )
        .bind(contact.id)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(contact.socials.as_ref().map(Json))
        .bind(&contact.address)
        .bind(contact.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_contact(&self, id: &Uuid, patch: &UpdateContactRequest) -> Result<Option<Contact>, AppError> {
        let Some(mut builder) = contact_update_query(*id, patch) else {
            return self.get_contact_by_id(id).await;
        };

        let row = builder
            .build_query_as::<ContactRow>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Contact::from))
    }

    async fn delete_contact(&self, id: &Uuid) -> Result<Option<Contact>, AppError> {
        let row = sqlx::query_as::<_, ContactRow>("DELETE FROM contact WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Contact::from))
    }
}

fn contact_update_query(id: Uuid, patch: &UpdateContactRequest) -> Option<QueryBuilder<'static, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut builder = QueryBuilder::new("UPDATE contact SET ");
    {
        let mut set = builder.separated(", ");

        if let Some(email) = &patch.email {
            set.push("email = ").push_bind_unseparated(email.clone());
        }
        if !patch.phone.is_unchanged() {
            set.push("phone = ").push_bind_unseparated(patch.phone.flatten_cloned());
        }
        if !patch.socials.is_unchanged() {
            set.push("socials = ").push_bind_unseparated(patch.socials.flatten_cloned().map(Json));
        }
        if !patch.address.is_unchanged() {
            set.push("address = ").push_bind_unseparated(patch.address.flatten_cloned());
        }
    }

    builder.push(" WHERE id = ").push_bind(id);
    builder.push(" RETURNING *");

    Some(builder)
}
