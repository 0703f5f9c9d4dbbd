//! Record store abstraction for employees.
//!
//! The service only sees [`EmployeeStore`]; Postgres and in-memory backends
//! implement it.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::employee::{Employee, EmployeeChanges, NewEmployee};

pub use memory::InMemoryEmployeeStore;
pub use postgres::PgEmployeeStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Employee {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Email,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Email => "email",
        }
    }

    fn value_of<'a>(&self, employee: &'a Employee) -> &'a str {
        match self {
            Column::Name => &employee.name,
            Column::Email => &employee.email,
        }
    }
}

/// A search condition over employee records.
///
/// An empty `And` matches everything and an empty `Or` matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq(Column, String),
    IdNe(i64),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn eq(column: Column, value: impl Into<String>) -> Self {
        Predicate::Eq(column, value.into())
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        match self {
            Predicate::Eq(column, value) => column.value_of(employee) == value,
            Predicate::IdNe(id) => employee.id != *id,
            Predicate::And(terms) => terms.iter().all(|t| t.matches(employee)),
            Predicate::Or(terms) => terms.iter().any(|t| t.matches(employee)),
        }
    }
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Employee>>;

    /// First record matching `predicate`, if any.
    async fn find_first(&self, predicate: &Predicate) -> StoreResult<Option<Employee>>;

    async fn insert(&self, employee: NewEmployee) -> StoreResult<Employee>;

    /// Applies `changes` to the record and returns it as stored.
    async fn update_by_id(&self, id: i64, changes: EmployeeChanges) -> StoreResult<Employee>;

    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;

    async fn list_all(&self) -> StoreResult<Vec<Employee>>;
}
