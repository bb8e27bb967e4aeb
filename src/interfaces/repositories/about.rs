use async_trait::async_trait;
use sqlx::{types::Json, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::about::{About, AboutInsert, AboutRow, UpdateAboutRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxAboutRepo,
};

#[async_trait]
pub trait AboutRepository: Send + Sync {
    /// Retrieves the "About" content, if it has been written yet
    async fn get_about(&self) -> Result<Option<About>, AppError>;

    async fn get_about_by_id(&self, id: &Uuid) -> Result<Option<About>, AppError>;

    /// Creates the "About" content; fails with a conflict when it already exists
    async fn create_about(&self, about: &AboutInsert) -> Result<About, AppError>;

    async fn update_about(&self, id: &Uuid, patch: &UpdateAboutRequest) -> Result<Option<About>, AppError>;

    async fn delete_about(&self, id: &Uuid) -> Result<Option<About>, AppError>;
}

impl SqlxAboutRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxAboutRepo { pool }
    }
}

#[async_trait]
impl AboutRepository for SqlxAboutRepo {
    async fn get_about(&self) -> Result<Option<About>, AppError> {
        let row = sqlx::query_as::<_, AboutRow>("SELECT * FROM about WHERE singleton")
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(About::from))
    }

    async fn get_about_by_id(&self, id: &Uuid) -> Result<Option<About>, AppError> {
        let row = sqlx::query_as::<_, AboutRow>("SELECT * FROM about WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(About::from))
    }

    async fn create_about(&self, about: &AboutInsert) -> Result<About, AppError> {
        let row = sqlx::query_as::<_, AboutRow>(
            r#"
            INSERT INTO about (id, bio, skills, experience, hero, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#
        )
        .bind(about.id)
        .bind(&about.bio)
        .bind(Json(&about.skills))
        .bind(about.experience.as_ref().map(Json))
        .bind(about.hero.as_ref().map(Json))
        .bind(about.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_about(&self, id: &Uuid, patch: &UpdateAboutRequest) -> Result<Option<About>, AppError> {
        let Some(mut builder) = about_update_query(*id, patch) else {
            return self.get_about_by_id(id).await;
        };

        let row = builder
            .build_query_as::<AboutRow>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(About::from))
    }

    async fn delete_about(&self, id: &Uuid) -> Result<Option<About>, AppError> {
        let row = sqlx::query_as::<_, AboutRow>("DELETE FROM about WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(About::from))
    }
}

fn about_update_query(id: Uuid, patch: &UpdateAboutRequest) -> Option<QueryBuilder<'static, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut builder = QueryBuilder::new("UPDATE about SET ");
    {
        let mut set = builder.separated(", ");

        if let Some(bio) = &patch.bio {
            set.push("bio = ").push_bind_unseparated(bio.clone());
        }
        if let Some(skills) = &patch.skills {
            set.push("skills = ").push_bind_unseparated(Json(skills.clone()));
        }
        if !patch.experience.is_unchanged() {
            set.push("experience = ").push_bind_unseparated(patch.experience.flatten_cloned().map(Json));
        }
        if !patch.hero.is_unchanged() {
            set.push("hero = ").push_bind_unseparated(patch.hero.flatten_cloned().map(Json));
        }
    }

    builder.push(" WHERE id = ").push_bind(id);
    builder.push(" RETURNING *");

    Some(builder)
}
