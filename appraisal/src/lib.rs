pub mod database;
pub mod employee;
pub mod review;

pub mod test;

pub use appraisal_db::{Connection, DatabaseTrait, Entity, Error, Id, Registry, Result};
pub use database::Database;
pub use employee::{Employee, EmployeeDirectory};
pub use review::Review;
