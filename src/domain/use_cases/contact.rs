use validator::Validate;

use crate::{
    cache::InvalidationQueue,
    entities::contact::{Contact, NewContact, UpdateContactRequest},
    errors::AppError,
    repositories::contact::ContactRepository,
    use_cases::pages::contact_pages,
    utils::valid_uuid::valid_uuid,
};

pub struct ContactHandler<R>
where
    R: ContactRepository,
{
    pub contact_repo: R,
    pub invalidation: InvalidationQueue,
}

impl<R> ContactHandler<R>
where
    R: ContactRepository,
{
    pub fn new(contact_repo: R, invalidation: InvalidationQueue) -> Self {
        ContactHandler { contact_repo, invalidation }
    }

    pub async fn get_contact(&self) -> Result<Option<Contact>, AppError> {
        self.contact_repo.get_contact().await
    }

    pub async fn get_contact_by_id(&self, id: &str) -> Result<Option<Contact>, AppError> {
        let valid_id = valid_uuid(id)?;
        self.contact_repo.get_contact_by_id(&valid_id).await
    }

    pub async fn create_contact(&self, request: NewContact) -> Result<Contact, AppError> {
        request.validate()?;

        let contact = self.contact_repo.create_contact(&request.prepare_for_insert()).await?;

        self.invalidation.notify(contact_pages());
        Ok(contact)
    }

    pub async fn update_contact(
        &self,
        id: &str,
        patch: UpdateContactRequest,
    ) -> Result<Option<Contact>, AppError> {
        patch.validate()?;
        let valid_id = valid_uuid(id)?;

        let updated = self.contact_repo.update_contact(&valid_id, &patch).await?;

        if updated.is_some() && !patch.is_empty() {
            self.invalidation.notify(contact_pages());
        }
        Ok(updated)
    }

    pub async fn delete_contact(&self, id: &str) -> Result<Option<Contact>, AppError> {
        let valid_id = valid_uuid(id)?;

        let deleted = self.contact_repo.delete_contact(&valid_id).await?;

        if deleted.is_some() {
            self.invalidation.notify(contact_pages());
        }
        Ok(deleted)
    }
}
