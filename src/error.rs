use std::{error::Error, fmt};

#[derive(Debug)]
pub enum StoreError {
    DuplicateUrl(String),
    Db(Box<dyn Error + Send + Sync + 'static>),
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use StoreError::*;
        match self {
            Db(e) => Some(e.as_ref() as &dyn Error),
            _ => None,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use StoreError::*;
        match self {
            DuplicateUrl(url) => write!(f, "DuplicateUrl: {}", url),
            Db(e) => write!(f, "Db: {}", e),
        }
    }
}

impl From<libsql::Error> for StoreError {
    fn from(error: libsql::Error) -> Self {
        StoreError::Db(Box::new(error))
    }
}
