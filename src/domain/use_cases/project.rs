use validator::Validate;

use crate::{
    cache::InvalidationQueue,
    entities::project::{NewProject, Project, ProjectInsert, UpdateProjectRequest},
    errors::AppError,
    repositories::project::ProjectRepository,
    use_cases::pages::project_pages,
    utils::valid_uuid::valid_uuid,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
    pub invalidation: InvalidationQueue,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R, invalidation: InvalidationQueue) -> Self {
        ProjectHandler { project_repo, invalidation }
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects().await
    }

    pub async fn get_project_by_id(&self, id: &str) -> Result<Option<Project>, AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.get_project_by_id(&valid_id).await
    }

    /// Exact, case-sensitive slug lookup
    pub async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError> {
        self.project_repo.get_project_by_slug(slug).await
    }

    pub async fn create_project(&self, request: NewProject) -> Result<Project, AppError> {
        let insert = ProjectInsert::try_from(request)?;

        let project = self.project_repo.create_project(&insert).await?;

        self.invalidation.notify(project_pages(&[&project.slug]));
        Ok(project)
    }

    /// Applies a partial update; `Ok(None)` when no project has this id.
    pub async fn update_project(
        &self,
        id: &str,
        patch: UpdateProjectRequest,
    ) -> Result<Option<Project>, AppError> {
        patch.validate()?;
        let valid_id = valid_uuid(id)?;

        let Some(updated) = self.project_repo.update_project(&valid_id, &patch).await? else {
            return Ok(None);
        };

        if !patch.is_empty() {
            self.invalidation.notify(project_pages(&[&updated.slug]));
        }

        Ok(Some(updated))
    }

    pub async fn delete_project(&self, id: &str) -> Result<Option<Project>, AppError> {
        let valid_id = valid_uuid(id)?;

        let deleted = self.project_repo.delete_project(&valid_id).await?;

        if let Some(project) = &deleted {
            self.invalidation.notify(project_pages(&[&project.slug]));
        }
        Ok(deleted)
    }

    /// Same-category projects first, then others to fill up to `limit`.
    /// The project identified by `slug` is never included.
    pub async fn get_related_projects(
        &self,
        slug: &str,
        category: &str,
        limit: u32,
    ) -> Result<Vec<Project>, AppError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let limit = limit as i64;
        let mut related = self.project_repo
            .list_projects_in_category(category, slug, limit)
            .await?;
        related.truncate(limit as usize);

        let remaining = limit - related.len() as i64;
        if remaining > 0 {
            let padding = self.project_repo
                .list_projects_outside_category(category, slug, remaining)
                .await?;
            related.extend(padding.into_iter().take(remaining as usize));
        }

        Ok(related)
    }

    pub async fn get_featured_projects(&self, limit: u32) -> Result<Vec<Project>, AppError> {
        let mut featured = self.project_repo.list_featured_projects(limit as i64).await?;
        featured.retain(|p| p.featured);
        featured.truncate(limit as usize);
        Ok(featured)
    }
}
