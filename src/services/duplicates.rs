use log::debug;

use crate::db::{Column, EmployeeStore, Predicate, StoreResult};
use crate::models::employee::{Employee, EmployeeUpdate};

/// Builds the collision predicate for `candidate`, or `None` when it carries
/// neither a name nor an email to check.
pub fn duplicate_predicate(candidate: &EmployeeUpdate, exclude_id: i64) -> Option<Predicate> {
    let mut any_of = Vec::new();
    if let Some(email) = candidate.email.as_deref().filter(|e| !e.is_empty()) {
        any_of.push(Predicate::eq(Column::Email, email));
    }
    if let Some(name) = candidate.name.as_deref().filter(|n| !n.is_empty()) {
        any_of.push(Predicate::eq(Column::Name, name));
    }

    if any_of.is_empty() {
        return None;
    }
    Some(Predicate::And(vec![Predicate::Or(any_of), Predicate::IdNe(exclude_id)]))
}

/// Finds another employee already using the candidate's name or email.
pub async fn check_duplicates(
    store: &dyn EmployeeStore,
    candidate: &EmployeeUpdate,
    exclude_id: i64,
) -> StoreResult<Option<Employee>> {
    let Some(predicate) = duplicate_predicate(candidate, exclude_id) else {
        debug!("No name or email supplied for employee {}, skipping duplicate scan", exclude_id);
        return Ok(None);
    };

    let duplicate = store.find_first(&predicate).await?;
    if let Some(found) = &duplicate {
        debug!("Employee {} collides with employee {}", exclude_id, found.id);
    }
    Ok(duplicate)
}
