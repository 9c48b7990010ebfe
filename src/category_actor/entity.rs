use std::cmp::Ordering;

use chrono::Utc;

use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{Category, CategoryCreate, CategoryPatch};

fn require_title(title: String) -> Result<String, FrameworkError> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(FrameworkError::Validation("Title is required".to_string()));
    }
    Ok(title)
}

impl Entity for Category {
    type Id = String;
    type CreateParams = CategoryCreate;
    type Patch = CategoryPatch;
    type Action = ();
    type ActionResult = ();

    const KIND: &'static str = "Category";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: CategoryCreate) -> Result<Self, FrameworkError> {
        Ok(Self {
            id,
            title: require_title(params.title)?,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, patch: CategoryPatch) -> Result<(), FrameworkError> {
        if let Some(title) = patch.title {
            self.title = require_title(title)?;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), FrameworkError> {
        Ok(())
    }

    /// Newest first.
    fn list_order(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}
