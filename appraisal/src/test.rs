#![cfg(test)]

use crate::database::Database;
use crate::employee::{Employee, EmployeeDirectory};

use anyhow::Result;
use appraisal_db::{DatabaseTrait, Id};

pub mod prelude {
    pub use crate::test;
    pub use anyhow::Result;
    pub use pretty_assertions::{assert_eq, assert_ne};
}

pub fn db() -> Result<Database> {
    let db = Database::memory()?;
    db.setup()?;

    // employees are persisted elsewhere; tests own a minimal table
    db.execute(
        "
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );
        ",
        (),
    )?;

    Ok(db)
}

pub fn employee(db: &Database, name: &str) -> Result<Employee> {
    db.execute("INSERT INTO employees (name) VALUES (?)", [name])?;

    Ok(Employee {
        id: db.last_insert_rowid().into(),
        name: name.to_string(),
    })
}

/// Storage-free employee resolver.
pub struct Roster(pub Vec<Employee>);

impl EmployeeDirectory for Roster {
    fn find(&self, id: Id) -> appraisal_db::Result<Option<Employee>> {
        Ok(self.0.iter().find(|employee| employee.id == id).cloned())
    }
}

/// A roster holding a single employee with id 1.
pub fn roster() -> Roster {
    Roster(vec![Employee {
        id: Id::from(1),
        name: "Avery".to_string(),
    }])
}
