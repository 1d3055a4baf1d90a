//! Value parsing for session toggles.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// A boolean environment toggle with its debug-build default.
pub(super) struct BoolToggle {
    name: &'static str,
    debug_default: bool,
}

impl BoolToggle {
    pub(super) const fn new(name: &'static str, debug_default: bool) -> Self {
        Self {
            name,
            debug_default,
        }
    }

    pub(super) fn read<E: Env>(&self, env: &E, mode: BuildMode) -> Result<bool, SessionConfigError> {
        let name = self.name;
        let fallback = self.debug_default;
        let Some(value) = env.string(name) else {
            return lenient(mode, fallback, SessionConfigError::MissingEnv { name }, || {
                warn!(toggle = name, fallback, "session toggle not set; using default");
            });
        };
        if let Some(flag) = parse_bool(&value) {
            return Ok(flag);
        }
        let error = SessionConfigError::InvalidEnv {
            name,
            value: value.clone(),
            expected: BOOL_EXPECTED,
        };
        lenient(mode, fallback, error, || {
            warn!(toggle = name, %value, fallback, "invalid session toggle; using default");
        })
    }
}

/// `Ok(fallback)` after `on_debug` in debug builds, `Err(error)` otherwise.
pub(super) fn lenient<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    on_debug: impl FnOnce(),
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        on_debug();
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(super) fn parse_same_site(
    value: String,
    mode: BuildMode,
    cookie_secure: bool,
    fallback: SameSite,
) -> Result<SameSite, SessionConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => lenient(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it"),
        ),
        _ => {
            let error = SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            };
            lenient(mode, fallback, error, || {
                warn!(%value, "invalid SESSION_SAMESITE; using default");
            })
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
