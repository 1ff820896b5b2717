//! Static error definitions.
//!
//! Each crate declares its outward errors as `ErrDef` constants so that the
//! machine-readable code, title and status travel together.

use crate::problem::Problem;
use http::StatusCode;

const TYPE_BASE: &str = "https://errors.barbergate.dev/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
}

impl ErrDef {
    #[must_use]
    pub const fn new(status: u16, title: &'static str, code: &'static str) -> Self {
        Self {
            status,
            title,
            code,
        }
    }

    /// Falls back to 500 when the catalog carries an invalid status.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    #[must_use]
    pub fn type_url(&self) -> String {
        format!("{TYPE_BASE}{}", self.code)
    }

    /// Build a problem for one occurrence of this error.
    #[inline]
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        Problem::new(self.status_code(), self.title, detail)
            .with_code(self.code)
            .with_type(self.type_url())
    }
}
