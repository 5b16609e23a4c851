use crate::Id;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Sqlite error")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Not persisted")]
    NotPersisted,
    #[error("Not registered")]
    NotRegistered(Id),
    #[error("Already registered to another instance")]
    AlreadyRegistered(Id),
    #[error("Invalid")]
    Invalid(String),
    #[error("Parsing version information")]
    Version(#[from] semver::Error),
}
