use appraisal_db::{Id, Result};

use crate::database::Database;

/// Minimal projection of an employee row. Employees are persisted elsewhere;
/// this crate only ever resolves them by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: Id,
    pub name: String,
}

/// Resolve an employee reference by identifier. Injected wherever a review
/// validates its `employee_id`, so tests can substitute a fake resolver.
pub trait EmployeeDirectory {
    fn find(&self, id: Id) -> Result<Option<Employee>>;
}

impl EmployeeDirectory for Database {
    fn find(&self, id: Id) -> Result<Option<Employee>> {
        match self
            .prepare("SELECT id, name FROM employees WHERE id = ? LIMIT 1")?
            .query_row([id], |row| {
                Ok(Employee {
                    id: row.get("id")?,
                    name: row.get("name")?,
                })
            }) {
            Ok(employee) => Ok(Some(employee)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::prelude::{assert_eq, Result, *};

    #[test]
    fn find_resolves_seeded_employee() -> Result<()> {
        let db = test::db()?;
        let employee = test::employee(&db, "Lee")?;

        let found = EmployeeDirectory::find(&db, employee.id)?;
        assert_eq!(Some(employee), found);

        Ok(())
    }

    #[test]
    fn find_absent_is_none() -> Result<()> {
        let db = test::db()?;

        assert_eq!(None, EmployeeDirectory::find(&db, Id::from(404))?);

        Ok(())
    }
}
