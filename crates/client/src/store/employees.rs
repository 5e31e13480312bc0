use rhc_core::EmployeeId;

use super::{Operation, ResourceStore};
use crate::dto::{ChangePasswordRequest, ChangeUserRoleRequest, EmployeeRole};
use crate::resource::Employees;

impl ResourceStore<Employees> {
    pub async fn toggle_active(&mut self, id: EmployeeId, active: bool) -> bool {
        self.begin();
        let result = self.service().toggle_active(id, active).await;
        let Some(updated) = self.settle(Operation::ToggleActive, result) else {
            return false;
        };
        self.apply_updated(&updated).await;
        true
    }

    pub async fn change_password(&mut self, id: EmployeeId, new_password: impl Into<String>) -> bool {
        self.begin();
        let request = ChangePasswordRequest {
            new_password: new_password.into(),
        };
        let result = self.service().change_password(id, &request).await;
        self.settle(Operation::ChangePassword, result).is_some()
    }

    /// Change the linked user's role and record it on the cached employee.
    pub async fn change_user_role(&mut self, id: EmployeeId, user_role: EmployeeRole) -> bool {
        self.begin();
        let result = self
            .service()
            .change_user_role(id, &ChangeUserRoleRequest { user_role })
            .await;
        let Some(response) = self.settle(Operation::ChangeRole, result) else {
            return false;
        };
        if let Some(employee) = self.items.iter_mut().find(|e| e.id == id) {
            employee.user_role = Some(response.new_user_role);
        }
        true
    }
}
