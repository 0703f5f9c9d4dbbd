//! Employee mutation logic: validate, check uniqueness, persist.

use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};
use serde_json::Value;

use crate::db::{Column, EmployeeStore, Predicate};
use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeChanges};
use crate::services::duplicates::check_duplicates;
use crate::utils::validation::{validate_employee_update, validate_new_employee};

pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    /// Creates an employee. Only the email is checked for an existing owner
    /// here; name uniqueness on insert is left to the store.
    pub async fn create(&self, input: &Value) -> Result<Employee, AppError> {
        let new_employee = validate_new_employee(input).map_err(AppError::Validation)?;

        let by_email = Predicate::eq(Column::Email, new_employee.email.as_str());
        if self.store.find_first(&by_email).await?.is_some() {
            warn!("Rejected create, email {} already in use", new_employee.email);
            return Err(AppError::Conflict("Employee already exists".to_string()));
        }

        let created = self.store.insert(new_employee).await?;
        info!("Created employee {}", created.id);
        Ok(created)
    }

    pub async fn update(&self, input: &Value) -> Result<Employee, AppError> {
        let update = validate_employee_update(input).map_err(AppError::Validation)?;

        if self.store.find_by_id(update.id).await?.is_none() {
            return Err(AppError::NotFound("Employee not found".to_string()));
        }

        if let Some(duplicate) = check_duplicates(self.store.as_ref(), &update, update.id).await? {
            warn!(
                "Rejected update of employee {}, collides with employee {}",
                update.id, duplicate.id
            );
            return Err(AppError::Conflict(
                "Employee with this email or name already exists".to_string(),
            ));
        }

        let changes = EmployeeChanges {
            name: update.name,
            email: update.email,
            position: update.position,
            updated_at: Utc::now(),
        };
        let updated = self.store.update_by_id(update.id, changes).await?;
        info!("Updated employee {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Employee does not exist".to_string()));
        }

        self.store.delete_by_id(id).await?;
        info!("Deleted employee {}", id);
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.store.list_all().await?)
    }
}
