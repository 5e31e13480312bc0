use serde_json::json;

use rhc_core::EmployeeId;

use super::ResourceService;
use crate::dto::{
    ChangePasswordRequest, ChangePasswordResponse, ChangeUserRoleRequest, ChangeUserRoleResponse, Employee, Validate,
};
use crate::error::ApiError;
use crate::resource::Employees;

impl ResourceService<Employees> {
    pub async fn toggle_active(&self, id: EmployeeId, active: bool) -> Result<Employee, ApiError> {
        self.put(Self::item_path(id), &json!({ "active": active })).await
    }

    /// Admin-only on the backend.
    pub async fn change_password(
        &self,
        id: EmployeeId,
        request: &ChangePasswordRequest,
    ) -> Result<ChangePasswordResponse, ApiError> {
        request.validate()?;
        self.put(format!("{}/password", Self::item_path(id)), request).await
    }

    /// Admin-only on the backend; the employee must have a linked user.
    pub async fn change_user_role(
        &self,
        id: EmployeeId,
        request: &ChangeUserRoleRequest,
    ) -> Result<ChangeUserRoleResponse, ApiError> {
        self.put(format!("{}/user-role", Self::item_path(id)), request).await
    }
}
