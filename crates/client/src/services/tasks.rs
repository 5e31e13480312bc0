use rhc_core::{ClientId, EmployeeId};

use super::ResourceService;
use crate::dto::{Task, TaskFilters, TaskStatus};
use crate::error::ApiError;
use crate::resource::Tasks;

impl ResourceService<Tasks> {
    pub async fn by_client(&self, client_id: ClientId) -> Result<Vec<Task>, ApiError> {
        self.list(&TaskFilters {
            client_id: Some(client_id),
            ..Default::default()
        })
        .await
    }

    pub async fn by_employee(&self, employee_id: EmployeeId) -> Result<Vec<Task>, ApiError> {
        self.list(&TaskFilters {
            employee_id: Some(employee_id),
            ..Default::default()
        })
        .await
    }

    pub async fn by_status(&self, status: TaskStatus) -> Result<Vec<Task>, ApiError> {
        self.list(&TaskFilters {
            status: Some(status),
            ..Default::default()
        })
        .await
    }
}
