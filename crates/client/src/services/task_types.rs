use serde_json::json;

use rhc_core::TaskTypeId;

use super::ResourceService;
use crate::dto::TaskType;
use crate::error::ApiError;
use crate::resource::TaskTypes;

impl ResourceService<TaskTypes> {
    pub async fn toggle_active(&self, id: TaskTypeId, active: bool) -> Result<TaskType, ApiError> {
        self.put(Self::item_path(id), &json!({ "active": active })).await
    }
}
