use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{Column, EmployeeStore, Predicate, StoreError, StoreResult};
use crate::models::employee::{Employee, EmployeeChanges, NewEmployee};

/// Process-local store with the same uniqueness guarantees as the
/// `employees` table. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct InMemoryEmployeeStore {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    next_id: i64,
    rows: Vec<Employee>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                rows: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Database("employee store lock poisoned".to_string()))
    }
}

impl Default for InMemoryEmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn ensure_unique(&self, column: Column, value: &str, except: Option<i64>) -> StoreResult<()> {
        let mut terms = vec![Predicate::eq(column, value)];
        if let Some(id) = except {
            terms.push(Predicate::IdNe(id));
        }
        let taken = Predicate::And(terms);
        if self.rows.iter().any(|row| taken.matches(row)) {
            return Err(StoreError::UniqueViolation(format!(
                "employees_{}_key",
                column.as_str()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Employee>> {
        let inner = self.lock()?;
        Ok(inner.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn find_first(&self, predicate: &Predicate) -> StoreResult<Option<Employee>> {
        let inner = self.lock()?;
        Ok(inner.rows.iter().find(|row| predicate.matches(row)).cloned())
    }

    async fn insert(&self, employee: NewEmployee) -> StoreResult<Employee> {
        let mut inner = self.lock()?;
        inner.ensure_unique(Column::Name, &employee.name, None)?;
        inner.ensure_unique(Column::Email, &employee.email, None)?;

        let now = Utc::now();
        let created = Employee {
            id: inner.next_id,
            name: employee.name,
            email: employee.email,
            position: employee.position,
            created_at: now,
            updated_at: now,
        };
        inner.next_id += 1;
        inner.rows.push(created.clone());
        Ok(created)
    }

    async fn update_by_id(&self, id: i64, changes: EmployeeChanges) -> StoreResult<Employee> {
        let mut inner = self.lock()?;
        if !inner.rows.iter().any(|row| row.id == id) {
            return Err(StoreError::NotFound(id));
        }
        if let Some(name) = &changes.name {
            inner.ensure_unique(Column::Name, name, Some(id))?;
        }
        if let Some(email) = &changes.email {
            inner.ensure_unique(Column::Email, email, Some(id))?;
        }

        let row = inner
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(StoreError::NotFound(id))?;
        changes.apply_to(row);
        Ok(row.clone())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.lock()?;
        let before = inner.rows.len();
        inner.rows.retain(|row| row.id != id);
        if inner.rows.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<Employee>> {
        let inner = self.lock()?;
        Ok(inner.rows.clone())
    }
}
