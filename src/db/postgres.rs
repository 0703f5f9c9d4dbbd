use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{EmployeeStore, Predicate, StoreError, StoreResult};
use crate::models::employee::{Employee, EmployeeChanges, NewEmployee};

const UNIQUE_VIOLATION: &str = "23505";
const COLUMNS: &str = "id, name, email, position, created_at, updated_at";

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("employees").to_string();
                return StoreError::UniqueViolation(constraint);
            }
        }
        StoreError::Database(err.to_string())
    }
}

/// Employee store backed by the `employees` table (see `schema.sql`).
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Appends `predicate` as a parenthesised SQL condition with bound values.
pub fn push_predicate(query: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    match predicate {
        Predicate::Eq(column, value) => {
            query.push(column.as_str()).push(" = ").push_bind(value.clone());
        }
        Predicate::IdNe(id) => {
            query.push("id <> ").push_bind(*id);
        }
        Predicate::And(terms) | Predicate::Or(terms) if terms.is_empty() => {
            query.push(if matches!(predicate, Predicate::And(_)) { "TRUE" } else { "FALSE" });
        }
        Predicate::And(terms) => push_group(query, terms, " AND "),
        Predicate::Or(terms) => push_group(query, terms, " OR "),
    }
}

fn push_group(query: &mut QueryBuilder<'_, Postgres>, terms: &[Predicate], joiner: &str) {
    query.push("(");
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            query.push(joiner);
        }
        push_predicate(query, term);
    }
    query.push(")");
}

/// `UPDATE` touching only the supplied columns plus `updated_at`.
fn update_query(id: i64, changes: EmployeeChanges) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::<Postgres>::new("UPDATE employees SET ");
    let mut separated = query.separated(", ");

    if let Some(name) = changes.name {
        separated.push("name = ");
        separated.push_bind_unseparated(name);
    }
    if let Some(email) = changes.email {
        separated.push("email = ");
        separated.push_bind_unseparated(email);
    }
    if let Some(position) = changes.position {
        separated.push("position = ");
        separated.push_bind_unseparated(position);
    }
    separated.push("updated_at = ");
    separated.push_bind_unseparated(changes.updated_at);

    query.push(" WHERE id = ");
    query.push_bind(id);
    query.push(format!(" RETURNING {}", COLUMNS));
    query
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Employee>> {
        let sql = format!("SELECT {} FROM employees WHERE id = $1", COLUMNS);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn find_first(&self, predicate: &Predicate) -> StoreResult<Option<Employee>> {
        let mut query = QueryBuilder::new(format!("SELECT {} FROM employees WHERE ", COLUMNS));
        push_predicate(&mut query, predicate);
        query.push(" LIMIT 1");

        let employee = query
            .build_query_as::<Employee>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn insert(&self, employee: NewEmployee) -> StoreResult<Employee> {
        let sql = format!(
            "INSERT INTO employees (name, email, position) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        );
        let created = sqlx::query_as::<_, Employee>(&sql)
            .bind(employee.name)
            .bind(employee.email)
            .bind(employee.position)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn update_by_id(&self, id: i64, changes: EmployeeChanges) -> StoreResult<Employee> {
        let mut query = update_query(id, changes);
        query
            .build_query_as::<Employee>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<Employee>> {
        let sql = format!("SELECT {} FROM employees", COLUMNS);
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Column;
    use chrono::Utc;

    fn render(predicate: &Predicate) -> String {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM employees WHERE ");
        push_predicate(&mut query, predicate);
        query.sql().to_string()
    }

    #[test]
    fn renders_duplicate_predicate_with_binds() {
        let predicate = Predicate::And(vec![
            Predicate::Or(vec![
                Predicate::eq(Column::Email, "alice@x.com"),
                Predicate::eq(Column::Name, "Alice"),
            ]),
            Predicate::IdNe(1),
        ]);

        assert_eq!(
            render(&predicate),
            "SELECT * FROM employees WHERE ((email = $1 OR name = $2) AND id <> $3)"
        );
    }

    #[test]
    fn renders_empty_groups_as_constants() {
        assert_eq!(render(&Predicate::Or(vec![])), "SELECT * FROM employees WHERE FALSE");
        assert_eq!(render(&Predicate::And(vec![])), "SELECT * FROM employees WHERE TRUE");
    }

    #[test]
    fn update_sets_only_supplied_columns() {
        let changes = EmployeeChanges {
            name: None,
            email: None,
            position: Some("Senior Engineer".to_string()),
            updated_at: Utc::now(),
        };

        assert_eq!(
            update_query(1, changes).sql(),
            format!(
                "UPDATE employees SET position = $1, updated_at = $2 WHERE id = $3 RETURNING {}",
                COLUMNS
            )
        );
    }

    #[test]
    fn update_binds_every_supplied_column_in_order() {
        let changes = EmployeeChanges {
            name: Some("Alice".to_string()),
            email: Some("alice@x.com".to_string()),
            position: None,
            updated_at: Utc::now(),
        };

        assert_eq!(
            update_query(7, changes).sql(),
            format!(
                "UPDATE employees SET name = $1, email = $2, updated_at = $3 WHERE id = $4 RETURNING {}",
                COLUMNS
            )
        );
    }
}
