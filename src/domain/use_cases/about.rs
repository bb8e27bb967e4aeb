use validator::Validate;

use crate::{
    cache::InvalidationQueue,
    entities::about::{About, NewAbout, UpdateAboutRequest},
    errors::AppError,
    presentation::timeline::{experience_timeline, TimelineItem},
    repositories::about::AboutRepository,
    use_cases::pages::about_pages,
    utils::valid_uuid::valid_uuid,
};

pub struct AboutHandler<R>
where
    R: AboutRepository,
{
    pub about_repo: R,
    pub invalidation: InvalidationQueue,
}

impl<R> AboutHandler<R>
where
    R: AboutRepository,
{
    pub fn new(about_repo: R, invalidation: InvalidationQueue) -> Self {
        AboutHandler { about_repo, invalidation }
    }

    /// Retrieves the "About" content, `None` until it has been created
    pub async fn get_about(&self) -> Result<Option<About>, AppError> {
        self.about_repo.get_about().await
    }

    pub async fn get_about_by_id(&self, id: &str) -> Result<Option<About>, AppError> {
        let valid_id = valid_uuid(id)?;
        self.about_repo.get_about_by_id(&valid_id).await
    }

    /// Work history laid out for the timeline; empty when there is none.
    pub async fn get_timeline(&self) -> Result<Vec<TimelineItem>, AppError> {
        let about = self.about_repo.get_about().await?;

        Ok(about
            .and_then(|a| a.experience)
            .map(|experience| experience_timeline(&experience))
            .unwrap_or_default())
    }

    pub async fn create_about(&self, request: NewAbout) -> Result<About, AppError> {
        request.validate()?;

        let about = self.about_repo.create_about(&request.prepare_for_insert()).await?;

        self.invalidation.notify(about_pages());
        Ok(about)
    }

    pub async fn update_about(
        &self,
        id: &str,
        patch: UpdateAboutRequest,
    ) -> Result<Option<About>, AppError> {
        patch.validate()?;
        let valid_id = valid_uuid(id)?;

        let updated = self.about_repo.update_about(&valid_id, &patch).await?;

        if updated.is_some() && !patch.is_empty() {
            self.invalidation.notify(about_pages());
        }
        Ok(updated)
    }

    pub async fn delete_about(&self, id: &str) -> Result<Option<About>, AppError> {
        let valid_id = valid_uuid(id)?;

        let deleted = self.about_repo.delete_about(&valid_id).await?;

        if deleted.is_some() {
            self.invalidation.notify(about_pages());
        }
        Ok(deleted)
    }
}
