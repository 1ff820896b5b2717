//! Closed set of access denials and their outward representation.

use gatekit_errors::{ErrDef, Problem};
use http::StatusCode;
use thiserror::Error;

pub const UNAUTHORIZED: ErrDef = ErrDef::new(401, "Unauthorized", "UNAUTHORIZED");
pub const FORBIDDEN: ErrDef = ErrDef::new(403, "Forbidden", "FORBIDDEN");
pub const ACCOUNT_SUSPENDED: ErrDef = ErrDef::new(403, "Forbidden", "ACCOUNT_SUSPENDED");
pub const PASSWORD_CHANGE_REQUIRED: ErrDef =
    ErrDef::new(403, "Forbidden", "PASSWORD_CHANGE_REQUIRED");
pub const BAD_REQUEST: ErrDef = ErrDef::new(400, "Bad Request", "BAD_REQUEST");
pub const BARBERSHOP_NOT_FOUND: ErrDef = ErrDef::new(404, "Not Found", "BARBERSHOP_NOT_FOUND");
pub const BARBERSHOP_SUSPENDED: ErrDef = ErrDef::new(403, "Forbidden", "BARBERSHOP_SUSPENDED");
pub const BARBERSHOP_IN_SETUP: ErrDef = ErrDef::new(403, "Forbidden", "BARBERSHOP_IN_SETUP");
pub const RATE_LIMIT: ErrDef = ErrDef::new(429, "Too Many Requests", "RATE_LIMIT");
pub const TOO_MANY_ATTEMPTS: ErrDef = ErrDef::new(429, "Too Many Requests", "TOO_MANY_ATTEMPTS");
pub const INVALID_CREDENTIALS: ErrDef = ErrDef::new(401, "Unauthorized", "INVALID_CREDENTIALS");
pub const INTERNAL_ERROR: ErrDef = ErrDef::new(500, "Internal Server Error", "INTERNAL_ERROR");

/// Why a request was refused.
///
/// Variants that must not leak which check failed share one code and
/// message: every authentication failure is `Unauthenticated`, and both a
/// missing membership and a disallowed role are `AccessDenied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("account suspended")]
    AccountSuspended,

    #[error("password change required")]
    PasswordChangeRequired,

    #[error("barbershop id required")]
    TenantRequired,

    #[error("access denied")]
    AccessDenied,

    #[error("barbershop not found")]
    TenantNotFound,

    #[error("barbershop suspended")]
    TenantSuspended,

    #[error("barbershop still in setup")]
    TenantInSetup,

    #[error("rate limited")]
    RateLimited,

    #[error("too many login attempts")]
    LoginThrottled,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("internal error")]
    Internal,
}

impl Denial {
    #[must_use]
    pub fn err_def(self) -> ErrDef {
        match self {
            Denial::Unauthenticated => UNAUTHORIZED,
            Denial::AccountSuspended => ACCOUNT_SUSPENDED,
            Denial::PasswordChangeRequired => PASSWORD_CHANGE_REQUIRED,
            Denial::TenantRequired => BAD_REQUEST,
            Denial::AccessDenied => FORBIDDEN,
            Denial::TenantNotFound => BARBERSHOP_NOT_FOUND,
            Denial::TenantSuspended => BARBERSHOP_SUSPENDED,
            Denial::TenantInSetup => BARBERSHOP_IN_SETUP,
            Denial::RateLimited => RATE_LIMIT,
            Denial::LoginThrottled => TOO_MANY_ATTEMPTS,
            Denial::InvalidCredentials => INVALID_CREDENTIALS,
            Denial::Internal => INTERNAL_ERROR,
        }
    }

    #[must_use]
    pub fn status(self) -> StatusCode {
        self.err_def().status_code()
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        self.err_def().code
    }

    /// User-facing message.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Denial::Unauthenticated => "N\u{e3}o autenticado",
            Denial::AccountSuspended => "Conta suspensa",
            Denial::PasswordChangeRequired => "Altere sua senha antes de continuar",
            Denial::TenantRequired => "ID da barbearia \u{e9} obrigat\u{f3}rio",
            Denial::AccessDenied => "Acesso negado",
            Denial::TenantNotFound => "Barbearia n\u{e3}o encontrada",
            Denial::TenantSuspended => "Barbearia suspensa",
            Denial::TenantInSetup => "Barbearia ainda est\u{e1} em configura\u{e7}\u{e3}o",
            Denial::RateLimited => "Muitas requisi\u{e7}\u{f5}es. Tente novamente.",
            Denial::LoginThrottled => "Muitas tentativas. Tente novamente mais tarde.",
            Denial::InvalidCredentials => "Email ou senha inv\u{e1}lidos",
            Denial::Internal => "Erro interno do servidor",
        }
    }

    /// 429s clear on their own; everything else needs a different request.
    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(self, Denial::RateLimited | Denial::LoginThrottled)
    }

    pub fn to_problem(self) -> Problem {
        self.err_def().as_problem(self.message())
    }
}

impl From<Denial> for Problem {
    fn from(denial: Denial) -> Self {
        denial.to_problem()
    }
}
