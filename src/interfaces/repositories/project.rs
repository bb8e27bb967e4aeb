use async_trait::async_trait;
use uuid::Uuid;
use sqlx::{self, types::Json, PgPool, Postgres, QueryBuilder};

use crate::{
    entities::project::{Project, ProjectInsert, ProjectRow, UpdateProjectRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

#[async_trait]
pub trait ProjectRepository: Sync + Send {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn get_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError>;
    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError>;
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;
    async fn update_project(&self, id: &Uuid, patch: &UpdateProjectRequest) -> Result<Option<Project>, AppError>;
    async fn delete_project(&self, id: &Uuid) -> Result<Option<Project>, AppError>;
    async fn list_projects_in_category(&self, category: &str, exclude_slug: &str, limit: i64) -> Result<Vec<Project>, AppError>;
    async fn list_projects_outside_category(&self, category: &str, exclude_slug: &str, limit: i64) -> Result<Vec<Project>, AppError>;
    async fn list_featured_projects(&self, limit: i64) -> Result<Vec<Project>, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }

    async fn fetch_all(&self, sql: &str) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query_as::<_, ProjectRow>(sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn fetch_filtered(&self, sql: &str, category: &str, exclude_slug: &str, limit: i64) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query_as::<_, ProjectRow>(sql)
            .bind(category)
            .bind(exclude_slug)
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.fetch_all("SELECT * FROM projects ORDER BY created_at DESC").await
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Project::from))
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Project::from))
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (
                id, title, slug, category, tags, thumbnail, images, client, year,
                description, challenge, solution, featured, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.slug)
        .bind(&project.category)
        .bind(Json(&project.tags))
        .bind(project.thumbnail.as_ref().map(Json))
        .bind(Json(&project.images))
        .bind(&project.client)
        .bind(project.year)
        .bind(&project.description)
        .bind(&project.challenge)
        .bind(&project.solution)
        .bind(project.featured)
        .bind(project.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_project(&self, id: &Uuid, patch: &UpdateProjectRequest) -> Result<Option<Project>, AppError> {
        let Some(mut builder) = project_update_query(*id, patch) else {
            return self.get_project_by_id(id).await;
        };

        let row = builder
            .build_query_as::<ProjectRow>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Project::from))
    }

    async fn delete_project(&self, id: &Uuid) -> Result<Option<Project>, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>("DELETE FROM projects WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Project::from))
    }

    async fn list_projects_in_category(&self, category: &str, exclude_slug: &str, limit: i64) -> Result<Vec<Project>, AppError> {
        self.fetch_filtered(
            r#"
            SELECT * FROM projects
            WHERE category = $1 AND slug <> $2
            ORDER BY created_at DESC
            LIMIT $3
            "#,
            category,
            exclude_slug,
            limit,
        ).await
    }

    async fn list_projects_outside_category(&self, category: &str, exclude_slug: &str, limit: i64) -> Result<Vec<Project>, AppError> {
        self.fetch_filtered(
            r#"
            SELECT * FROM projects
            WHERE category <> $1 AND slug <> $2
            ORDER BY created_at DESC
            LIMIT $3
            "#,
            category,
            exclude_slug,
            limit,
        ).await
    }

    async fn list_featured_projects(&self, limit: i64) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM projects WHERE featured = TRUE ORDER BY created_at DESC LIMIT $1"
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }
}

/// Builds `UPDATE projects SET ... RETURNING *` touching only the columns
/// present in `patch`. Returns `None` for an empty patch.
pub fn project_update_query(id: Uuid, patch: &UpdateProjectRequest) -> Option<QueryBuilder<'static, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut builder = QueryBuilder::new("UPDATE projects SET ");
    {
        let mut set = builder.separated(", ");

        if let Some(title) = &patch.title {
            set.push("title = ").push_bind_unseparated(title.clone());
        }
        if let Some(category) = &patch.category {
            set.push("category = ").push_bind_unseparated(category.clone());
        }
        if let Some(tags) = &patch.tags {
            set.push("tags = ").push_bind_unseparated(Json(tags.clone()));
        }
        if !patch.thumbnail.is_unchanged() {
            set.push("thumbnail = ").push_bind_unseparated(patch.thumbnail.flatten_cloned().map(Json));
        }
        if let Some(images) = &patch.images {
            set.push("images = ").push_bind_unseparated(Json(images.clone()));
        }
        if !patch.client.is_unchanged() {
            set.push("client = ").push_bind_unseparated(patch.client.flatten_cloned());
        }
        if !patch.year.is_unchanged() {
            set.push("year = ").push_bind_unseparated(patch.year.flatten_cloned());
        }
        if let Some(description) = &patch.description {
            set.push("description = ").push_bind_unseparated(description.clone());
        }
        if !patch.challenge.is_unchanged() {
            set.push("challenge = ").push_bind_unseparated(patch.challenge.flatten_cloned());
        }
        if !patch.solution.is_unchanged() {
            set.push("solution = ").push_bind_unseparated(patch.solution.flatten_cloned());
        }
        if let Some(featured) = patch.featured {
            set.push("featured = ").push_bind_unseparated(featured);
        }
    }

    builder.push(" WHERE id = ").push_bind(id);
    builder.push(" RETURNING *");

    Some(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::option_fields::OptionField;

    #[test]
    fn empty_patch_builds_no_statement() {
        assert!(project_update_query(Uuid::new_v4(), &UpdateProjectRequest::default()).is_none());
    }

    #[test]
    fn only_present_columns_are_set() {
        let patch = UpdateProjectRequest {
            title: Some("New title".into()),
            featured: Some(true),
            ..Default::default()
        };

        let builder = project_update_query(Uuid::new_v4(), &patch).unwrap();
        assert_eq!(
            builder.sql(),
            "UPDATE projects SET title = $1, featured = $2 WHERE id = $3 RETURNING *"
        );
    }

    #[test]
    fn cleared_nullable_columns_are_written() {
        let patch = UpdateProjectRequest {
            client: OptionField::SetToNull,
            year: OptionField::SetToValue(2022),
            tags: Some(vec!["motion".into()]),
            ..Default::default()
        };

        let builder = project_update_query(Uuid::new_v4(), &patch).unwrap();
        assert_eq!(
            builder.sql(),
            "UPDATE projects SET tags = $1, client = $2, year = $3 WHERE id = $4 RETURNING *"
        );
    }
}
