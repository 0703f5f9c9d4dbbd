use serde::Serialize;
use chrono::{DateTime, Utc};

#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub position: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated create payload, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub position: String,
}

/// A validated update payload. `None` fields were not supplied and keep
/// their stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeUpdate {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
}

/// The column changes written by a partial update.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeChanges {
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(name) = &self.name {
            employee.name = name.clone();
        }
        if let Some(email) = &self.email {
            employee.email = email.clone();
        }
        if let Some(position) = &self.position {
            employee.position = position.clone();
        }
        employee.updated_at = self.updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Employee {
        let now = Utc::now();
        Employee {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            position: "Engineer".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut employee = alice();
        let stamp = employee.updated_at + chrono::Duration::seconds(5);
        let changes = EmployeeChanges {
            name: None,
            email: None,
            position: Some("Senior Engineer".to_string()),
            updated_at: stamp,
        };

        changes.apply_to(&mut employee);

        assert_eq!(employee.name, "Alice");
        assert_eq!(employee.email, "alice@x.com");
        assert_eq!(employee.position, "Senior Engineer");
        assert_eq!(employee.updated_at, stamp);
    }

    #[test]
    fn serializes_with_camel_case_timestamps() {
        let value = serde_json::to_value(alice()).unwrap();
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["id"], 1);
    }
}
