use serde_json::Value;
use tracing::instrument;

use super::{parse_body, Reply};
use crate::clients::CategoryClient;
use crate::domain::{CategoryCreate, CategoryPatch};

/// Category endpoints.
#[derive(Clone)]
pub struct CategoryHandlers {
    client: CategoryClient,
}

impl CategoryHandlers {
    pub fn new(client: CategoryClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, body))]
    pub async fn create_category(&self, body: Value) -> Reply {
        let params: CategoryCreate = match parse_body(body) {
            Ok(params) => params,
            Err(reply) => return reply,
        };
        match self.client.create_category(params).await {
            Ok(category) => Reply::created(category),
            Err(e) => e.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: String) -> Reply {
        match self.client.get_category(id).await {
            Ok(category) => Reply::ok(category),
            Err(e) => e.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Reply {
        match self.client.list_categories().await {
            Ok(categories) => Reply::ok(categories),
            Err(e) => e.into(),
        }
    }

    #[instrument(skip(self, body))]
    pub async fn update_category(&self, id: String, body: Value) -> Reply {
        let patch: CategoryPatch = match parse_body(body) {
            Ok(patch) => patch,
            Err(reply) => return reply,
        };
        match self.client.update_category(id, patch).await {
            Ok(category) => Reply::ok(category),
            Err(e) => e.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: String) -> Reply {
        match self.client.delete_category(id).await {
            Ok(_) => Reply::notice(200, "Category removed"),
            Err(e) => e.into(),
        }
    }
}
