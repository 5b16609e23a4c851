use appraisal_db::{Connection, Entity, Error, Id, Registry, Result, Tag};

use crate::employee::EmployeeDirectory;

/// A yearly performance review for one employee.
///
/// Two construction paths: [`Review::new`] validates every field, while the
/// `TryFrom<&rusqlite::Row>` impl trusts values coming back out of storage
/// and skips validation entirely.
#[derive(Debug, Clone)]
pub struct Review {
    id: Option<Id>,
    year: i64,
    summary: String,
    employee_id: Id,
    tag: Tag,
}

impl Review {
    pub fn new<D>(
        year: i64,
        summary: &str,
        employee_id: Id,
        directory: &D,
    ) -> Result<Review>
    where
        D: EmployeeDirectory + ?Sized,
    {
        Ok(Review {
            id: None,
            year: check_year(year)?,
            summary: check_summary(summary)?,
            employee_id: check_employee(employee_id, directory)?,
            tag: Tag::next(),
        })
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> Id {
        self.employee_id
    }

    pub fn set_year(&mut self, year: i64) -> Result<()> {
        self.year = check_year(year)?;
        Ok(())
    }

    pub fn set_summary(&mut self, summary: &str) -> Result<()> {
        self.summary = check_summary(summary)?;
        Ok(())
    }

    pub fn set_employee_id<D>(&mut self, employee_id: Id, directory: &D) -> Result<()>
    where
        D: EmployeeDirectory + ?Sized,
    {
        self.employee_id = check_employee(employee_id, directory)?;
        Ok(())
    }

    pub fn create_table(db: &Connection) -> Result<()> {
        log::debug!("ensuring reviews table");

        db.execute(
            "
            CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY,
                year INT,
                summary TEXT,
                employee_id INTEGER,
                FOREIGN KEY (employee_id) REFERENCES employees(id)
            );
            ",
            (),
        )?;
        Ok(())
    }

    pub fn drop_table(db: &Connection) -> Result<()> {
        db.execute("DROP TABLE IF EXISTS reviews;", ())?;
        Ok(())
    }

    /// Construct and immediately persist a review.
    pub fn create<D>(
        db: &Connection,
        registry: &mut Registry<Review>,
        directory: &D,
        year: i64,
        summary: &str,
        employee_id: Id,
    ) -> Result<Review>
    where
        D: EmployeeDirectory + ?Sized,
    {
        let mut review = Review::new(year, summary, employee_id, directory)?;
        review.save(db, registry)?;
        Ok(review)
    }

    /// Overwrite the backing row with the current in-memory values.
    pub fn update(&self, db: &Connection) -> Result<()> {
        let Some(id) = self.id else {
            return Err(Error::NotPersisted);
        };

        db.execute(
            "
            UPDATE reviews
            SET year = :year, summary = :summary, employee_id = :employee_id
            WHERE id = :id
            ",
            rusqlite::named_params! {
                ":year": self.year,
                ":summary": self.summary,
                ":employee_id": self.employee_id,
                ":id": id,
            },
        )?;
        Ok(())
    }

    /// Delete the backing row, evict the registry entry and mark the
    /// instance unsaved. A no-op for instances that were never persisted.
    ///
    /// The row is removed before the registry is consulted, so deleting a
    /// hydrated instance that never went through `save` leaves the row gone
    /// and fails with [`Error::NotRegistered`].
    pub fn delete(&mut self, db: &Connection, registry: &mut Registry<Review>) -> Result<()> {
        let Some(id) = self.id else {
            return Ok(());
        };

        db.execute("DELETE FROM reviews WHERE id = ?", [id])?;
        registry.remove(id)?;
        self.id = None;

        log::debug!("deleted review {id:?}");
        Ok(())
    }

    /// Every persisted review, in storage order. Does not touch the registry.
    pub fn all(db: &Connection) -> Result<Vec<Review>> {
        let mut statement =
            db.prepare("SELECT id, year, summary, employee_id FROM reviews")?;
        let rows = statement.query_map([], |row| Review::try_from(row))?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn check_year(year: i64) -> Result<i64> {
    if year >= 2000 {
        Ok(year)
    } else {
        Err(Error::Invalid("year must be 2000 or later".to_string()))
    }
}

fn check_summary(summary: &str) -> Result<String> {
    if summary.is_empty() {
        Err(Error::Invalid("summary must not be empty".to_string()))
    } else {
        Ok(summary.to_string())
    }
}

fn check_employee<D>(employee_id: Id, directory: &D) -> Result<Id>
where
    D: EmployeeDirectory + ?Sized,
{
    match directory.find(employee_id)? {
        Some(_) => Ok(employee_id),
        None => Err(Error::Invalid(
            "employee_id must reference a known employee".to_string(),
        )),
    }
}

impl TryFrom<&rusqlite::Row<'_>> for Review {
    type Error = rusqlite::Error;

    fn try_from(row: &rusqlite::Row) -> rusqlite::Result<Review> {
        Ok(Review {
            id: Some(row.get("id")?),
            year: row.get("year")?,
            summary: row.get("summary")?,
            employee_id: row.get("employee_id")?,
            tag: Tag::next(),
        })
    }
}

impl Entity for Review {
    fn id(&self) -> Option<Id> {
        self.id
    }

    fn tag(&self) -> Tag {
        self.tag
    }

    fn find(db: &Connection, id: Id) -> Result<Option<Review>> {
        match db
            .prepare(
                "SELECT id, year, summary, employee_id FROM reviews
                WHERE id = ? LIMIT 1",
            )?
            .query_row([id], |row| Review::try_from(row))
        {
            Ok(review) => Ok(Some(review)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, db: &Connection, registry: &mut Registry<Review>) -> Result<()> {
        match self.id {
            None => {
                db.execute(
                    "
                    INSERT INTO reviews (year, summary, employee_id)
                    VALUES (:year, :summary, :employee_id)
                    ",
                    rusqlite::named_params! {
                        ":year": self.year,
                        ":summary": self.summary,
                        ":employee_id": self.employee_id,
                    },
                )?;
                self.id = Some(db.last_insert_rowid().into());

                log::debug!("inserted review {:?}", self.id);
            }
            Some(id) => {
                registry.claim(id, self.tag)?;
                self.update(db)?;
            }
        }

        registry.register(self)
    }
}
