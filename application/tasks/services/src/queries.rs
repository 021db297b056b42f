use task_cache_keys::{collection_key, item_key};
use task_errors::ServiceError;
use task_responses::ServiceResponse;
use tracing::{debug, instrument};

use crate::{EntityService, Operation, Resource, parse_id};

impl<R: Resource> EntityService<R> {
    /// All active entities, served from the collection key when cached.
    #[instrument(skip(self), fields(entity = R::KIND.name()))]
    pub async fn list(&self) -> ServiceResponse<Vec<R::Response>> {
        match self.load_all().await {
            Ok(items) => {
                let message = if items.is_empty() {
                    format!("No {} found.", R::KIND.plural())
                }
                else {
                    format!("{} retrieved successfully.", R::KIND.plural_label())
                };
                ServiceResponse::ok(items, message)
            }
            Err(err) => self.fail(Operation::List, err),
        }
    }

    /// One active entity, served from its item key when cached.
    #[instrument(skip(self), fields(entity = R::KIND.name()))]
    pub async fn get_by_id(&self, id: &str) -> ServiceResponse<R::Response> {
        match self.load_one(id).await {
            Ok(item) => {
                ServiceResponse::ok(
                    item,
                    format!("{} retrieved successfully.", R::KIND.label()),
                )
            }
            Err(err) => self.fail(Operation::Get, err),
        }
    }

    async fn load_all(&self) -> Result<Vec<R::Response>, ServiceError> {
        let key = collection_key(R::KIND);
        let store = &self.store;

        let items = self
            .cache
            .get_or_set(&key, &self.policy, || {
                async move {
                    debug!("Loading all {} from store", R::KIND.plural());
                    let records = store.list_active().await?;
                    let items: Vec<R::Response> =
                        records.into_iter().map(R::Response::from).collect();
                    Ok::<_, ServiceError>(Some(items))
                }
            })
            .await?;

        Ok(items.unwrap_or_default())
    }

    async fn load_one(&self, raw_id: &str) -> Result<R::Response, ServiceError> {
        let id = parse_id(R::KIND, raw_id)?;
        let key = item_key(R::KIND, &id);
        let store = &self.store;
        let lookup = &id;

        let item = self
            .cache
            .get_or_set(&key, &self.policy, || {
                async move {
                    debug!("Loading {} {} from store", R::KIND.name(), lookup);
                    let record = store.get_by_id(lookup).await?;
                    Ok::<_, ServiceError>(record.map(R::Response::from))
                }
            })
            .await?;

        item.ok_or_else(|| {
            ServiceError::NotFound(format!(
                "{} with ID {} not found.",
                R::KIND.label(),
                raw_id
            ))
        })
    }
}
