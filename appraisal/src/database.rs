use appraisal_db::{Connection, DatabaseTrait, Result};

use semver::Version;

use crate::review::Review;

#[derive(
    derive_more::From,
    derive_more::Into,
    derive_more::Deref,
    derive_more::DerefMut,
)]
pub struct Database(Connection);

impl DatabaseTrait for Database {
    fn upgrade_from(&self, version: &Version) -> Result<()> {
        log::debug!("upgrading database from {version}");

        Review::create_table(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn setup_creates_reviews_table() -> Result<()> {
        let db = Database::memory()?;
        db.setup()?;

        let count: i64 = db
            .prepare("SELECT COUNT(*) FROM sqlite_schema WHERE name = 'reviews'")?
            .query_row([], |row| row.get(0))?;
        assert_eq!(1, count);

        Ok(())
    }
}
