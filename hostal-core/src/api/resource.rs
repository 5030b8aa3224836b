use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::client::ApiClient;
use super::pagination::{Page, PageRequest};
use crate::error::{HostalError, HostalResult};

/// A REST resource exposed by the backend under a fixed path.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    /// Collection path relative to the API base URL.
    const PATH: &'static str;
    /// Entity name used in backend error parameters.
    const LABEL: &'static str;

    fn id(&self) -> Option<i64>;
}

/// CRUD wrapper for one resource type.
pub struct ResourceService<'a, T> {
    api: &'a ApiClient,
    _resource: PhantomData<T>,
}

impl<'a, T: Resource> ResourceService<'a, T> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub fn api(&self) -> &'a ApiClient {
        self.api
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", T::PATH, id)
    }

    pub async fn list(&self, page: &PageRequest) -> HostalResult<Page<T>> {
        self.api.get_page(T::PATH, page, &[]).await
    }

    /// Lists with backend criteria such as `reservaId.equals=3`.
    pub async fn list_where(
        &self,
        page: &PageRequest,
        filters: &[(String, String)],
    ) -> HostalResult<Page<T>> {
        self.api.get_page(T::PATH, page, filters).await
    }

    /// Walks every page until the collection is exhausted.
    pub async fn list_all(&self, page_size: u32) -> HostalResult<Vec<T>> {
        self.list_all_where(page_size, &[]).await
    }

    pub async fn list_all_where(
        &self,
        page_size: u32,
        filters: &[(String, String)],
    ) -> HostalResult<Vec<T>> {
        let mut request = PageRequest::new(0, page_size);
        let mut items = Vec::new();
        let mut previous_first: Option<i64> = None;

        loop {
            let page = self.list_where(&request, filters).await?;
            let first = page.items.first().and_then(Resource::id);
            if first.is_some() && first == previous_first {
                warn!(
                    path = T::PATH,
                    page = request.page,
                    "Backend repeated the previous page, stopping"
                );
                break;
            }
            previous_first = first;

            let fetched = page.items.len();
            let has_next = page.has_next();
            items.extend(page.items);

            if fetched < request.size as usize || !has_next {
                break;
            }
            request = request.next_page();
        }

        Ok(items)
    }

    pub async fn get(&self, id: i64) -> HostalResult<T> {
        self.api.get_json(&Self::item_path(id), &[]).await
    }

    pub async fn create(&self, entity: &T) -> HostalResult<T> {
        if entity.id().is_some() {
            return Err(HostalError::IdExists(T::LABEL.to_string()));
        }

        let created: T = self.api.post_json(T::PATH, entity).await?;
        info!(resource = T::LABEL, id = ?created.id(), "Created");
        Ok(created)
    }

    pub async fn update(&self, entity: &T) -> HostalResult<T> {
        let id = entity
            .id()
            .ok_or_else(|| HostalError::IdNull(T::LABEL.to_string()))?;

        let updated: T = self.api.put_json(&Self::item_path(id), entity).await?;
        info!(resource = T::LABEL, id, "Updated");
        Ok(updated)
    }

    /// Sends only the given fields; `id` is filled in when missing.
    pub async fn patch(&self, id: i64, fields: serde_json::Value) -> HostalResult<T> {
        let body = match fields {
            serde_json::Value::Object(mut map) => {
                map.entry("id").or_insert(serde_json::Value::from(id));
                serde_json::Value::Object(map)
            }
            _ => {
                return Err(HostalError::Validation(
                    "patch body must be a JSON object".to_string(),
                ))
            }
        };

        let patched: T = self.api.patch_json(&Self::item_path(id), &body).await?;
        info!(resource = T::LABEL, id, "Patched");
        Ok(patched)
    }

    pub async fn delete(&self, id: i64) -> HostalResult<()> {
        self.api.delete(&Self::item_path(id)).await?;
        info!(resource = T::LABEL, id, "Deleted");
        Ok(())
    }

    pub async fn activate(&self, id: i64) -> HostalResult<()> {
        self.api
            .put_action(&format!("{}/activate", Self::item_path(id)))
            .await?;
        info!(resource = T::LABEL, id, "Activated");
        Ok(())
    }

    pub async fn deactivate(&self, id: i64) -> HostalResult<()> {
        self.api
            .put_action(&format!("{}/deactivate", Self::item_path(id)))
            .await?;
        info!(resource = T::LABEL, id, "Deactivated");
        Ok(())
    }

    /// Activates or deactivates depending on the current flag.
    pub async fn toggle_active(&self, id: i64, currently_active: bool) -> HostalResult<bool> {
        if currently_active {
            self.deactivate(id).await?;
        } else {
            self.activate(id).await?;
        }
        Ok(!currently_active)
    }
}
