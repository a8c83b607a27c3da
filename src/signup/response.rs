//! Classification of signup replies into user-facing errors.

use super::client::SignupReply;
use super::criteria::Criterion;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::warn;

pub const MSG_UNAUTHENTICATED: &str = "Not authenticated to access this resource.";
pub const MSG_GENERIC: &str = "Something went wrong, please try again.";
pub const MSG_NOT_ALLOWED: &str =
    "Sorry, the entered password is not allowed, please try a different one.";

/// Policy code the service sends for a password that passes every rule but
/// is refused anyway (e.g. a known-breached password).
pub const CODE_NOT_ALLOWED: &str = "not_allowed";

/// Why a submission did not create the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// 401 or 403.
    Unauthenticated,
    /// 400.
    BadRequest,
    /// 422 with a JSON body listing policy codes.
    Policy {
        criteria: Vec<Criterion>,
        not_allowed: bool,
    },
    /// Any other status, or a 422 that cannot be decoded.
    Unexpected(StatusCode),
    /// The request never produced a response.
    Network,
}

impl Rejection {
    /// The single API error message to show, if any.
    #[must_use]
    pub fn api_error(&self) -> Option<&'static str> {
        match self {
            Self::Unauthenticated => Some(MSG_UNAUTHENTICATED),
            Self::BadRequest | Self::Unexpected(_) | Self::Network => Some(MSG_GENERIC),
            Self::Policy { not_allowed, .. } => not_allowed.then_some(MSG_NOT_ALLOWED),
        }
    }

    /// Per-rule messages reported by the service, in the order it sent them.
    #[must_use]
    pub fn criteria_errors(&self) -> Vec<String> {
        match self {
            Self::Policy { criteria, .. } => criteria
                .iter()
                .map(|criterion| criterion.message().to_string())
                .collect(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Created,
    Rejected(Rejection),
}

/// True if the media type of `content_type` is `application/json`,
/// ignoring parameters such as `charset`.
#[must_use]
pub fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

#[must_use]
pub fn classify(reply: &SignupReply) -> Verdict {
    let status = reply.status;

    if status.is_success() {
        return Verdict::Created;
    }

    let rejection = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Rejection::Unauthenticated,
        StatusCode::BAD_REQUEST => Rejection::BadRequest,
        StatusCode::UNPROCESSABLE_ENTITY
            if reply
                .content_type
                .as_deref()
                .is_some_and(is_json_content_type) =>
        {
            policy_rejection(&reply.body).unwrap_or(Rejection::Unexpected(status))
        }
        _ => Rejection::Unexpected(status),
    };

    Verdict::Rejected(rejection)
}

/// Decode `{"errors": [...]}`. A missing or non-array `errors` field is an
/// empty list; unknown and non-string codes are dropped. Returns `None` when
/// the body is not JSON at all.
fn policy_rejection(body: &[u8]) -> Option<Rejection> {
    let json: Value = match serde_json::from_slice(body) {
        Ok(json) => json,
        Err(e) => {
            warn!("Error parsing 422 response body: {e}");
            return None;
        }
    };

    let codes = json
        .get("errors")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut criteria = Vec::new();
    let mut not_allowed = false;

    for code in codes.iter().filter_map(Value::as_str) {
        if code == CODE_NOT_ALLOWED {
            not_allowed = true;
        } else if let Some(criterion) = Criterion::from_code(code) {
            criteria.push(criterion);
        }
    }

    Some(Rejection::Policy {
        criteria,
        not_allowed,
    })
}
