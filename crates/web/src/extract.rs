use std::ops::{Deref, DerefMut};

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use storage::{Database, UnitOfWork};

use crate::error::WebError;

/// Read-only unit of work for GET handlers.
///
/// Each extraction opens a new deferred transaction on the shared pool; it is
/// dropped uncommitted when the handler returns. Write handlers validate their
/// body first and then open their own unit of work with
/// [`Database::begin_write`].
pub struct Session(pub UnitOfWork);

#[async_trait]
impl FromRequestParts<Database> for Session {
    type Rejection = WebError;

    async fn from_request_parts(_parts: &mut Parts, db: &Database) -> Result<Self, Self::Rejection> {
        Ok(Self(db.begin().await?))
    }
}

impl Deref for Session {
    type Target = UnitOfWork;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
