use rhc_core::TaskTypeId;

use super::{Operation, ResourceStore};
use crate::resource::TaskTypes;

impl ResourceStore<TaskTypes> {
    pub async fn toggle_active(&mut self, id: TaskTypeId, active: bool) -> bool {
        self.begin();
        let result = self.service().toggle_active(id, active).await;
        let Some(updated) = self.settle(Operation::ToggleActive, result) else {
            return false;
        };
        self.apply_updated(&updated).await;
        true
    }

    /// Task types that can be assigned to new tasks.
    pub fn active(&self) -> impl Iterator<Item = &crate::dto::TaskType> {
        self.items().iter().filter(|t| t.active)
    }
}
