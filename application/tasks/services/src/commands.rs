use database_traits::Document;
use task_errors::ServiceError;
use task_responses::ServiceResponse;
use tracing::{info, instrument};

use crate::{EntityService, Operation, Resource, parse_id};

impl<R: Resource> EntityService<R> {
    /// Inserts a new entity. Only the collection key is evicted since no item
    /// key can exist for a fresh id.
    #[instrument(skip(self), fields(entity = R::KIND.name()))]
    pub async fn create(&self, command: R::Command) -> ServiceResponse<R::Response> {
        match self.try_create(command).await {
            Ok(created) => {
                ServiceResponse::created(
                    created,
                    format!("{} created successfully.", R::KIND.label()),
                )
            }
            Err(err) => self.fail(Operation::Create, err),
        }
    }

    /// Replaces the entity named by the command's id.
    ///
    /// Yields 204 when the record changed and 304 when nothing matched or
    /// the content was identical.
    #[instrument(skip(self), fields(entity = R::KIND.name()))]
    pub async fn update(&self, command: R::Command) -> ServiceResponse<()> {
        match self.try_update(command).await {
            Ok(true) => {
                ServiceResponse::no_content(format!(
                    "{} updated successfully.",
                    R::KIND.label()
                ))
            }
            Ok(false) => {
                ServiceResponse::not_modified(format!(
                    "No changes made to the {}.",
                    R::KIND.name()
                ))
            }
            Err(err) => self.fail(Operation::Update, err),
        }
    }

    /// Sets the soft-delete flag.
    #[instrument(skip(self), fields(entity = R::KIND.name()))]
    pub async fn delete(&self, id: &str) -> ServiceResponse<()> {
        match self.try_delete(id).await {
            Ok(()) => {
                ServiceResponse::no_content(format!(
                    "{} deleted successfully.",
                    R::KIND.label()
                ))
            }
            Err(err) => self.fail(Operation::Delete, err),
        }
    }

    async fn try_create(&self, command: R::Command) -> Result<R::Response, ServiceError> {
        R::validate(&command).map_err(ServiceError::Validation)?;

        let document = R::into_document(command);
        if self
            .store
            .exists_by_unique_field(&document.unique_fields())
            .await?
        {
            return Err(ServiceError::Conflict(R::conflict_message(&document)));
        }

        let record = self.store.insert(document).await?;
        info!("{} {} created", R::KIND.label(), record.id);

        self.evict(Operation::Create, None).await;

        Ok(R::Response::from(record))
    }

    async fn try_update(&self, command: R::Command) -> Result<bool, ServiceError> {
        let id = parse_id(R::KIND, R::command_id(&command).unwrap_or_default())?;
        R::validate(&command).map_err(ServiceError::Validation)?;

        let modified = self
            .store
            .replace_by_id(&id, R::into_document(command))
            .await?;

        if modified {
            info!("{} {} updated", R::KIND.label(), id);
            self.evict(Operation::Update, Some(&id)).await;
        }

        Ok(modified)
    }

    async fn try_delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        let id = parse_id(R::KIND, raw_id)?;
        let not_found = || {
            ServiceError::NotFound(format!(
                "{} with ID {} not found.",
                R::KIND.label(),
                raw_id
            ))
        };

        if !self.store.exists_by_id(&id).await? {
            return Err(not_found());
        }

        // a concurrent delete may have won since the existence check
        if !self.store.set_deleted_flag(&id).await? {
            return Err(not_found());
        }

        info!("{} {} deleted", R::KIND.label(), id);
        self.evict(Operation::Delete, Some(&id)).await;

        Ok(())
    }
}
