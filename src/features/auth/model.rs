use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::constants::ANONYMOUS_EMAIL;

/// Identity of the caller, resolved from an optional bearer token.
///
/// Anonymous callers have no email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerIdentity {
    pub email: Option<String>,
}

impl CallerIdentity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.email.is_some()
    }

    /// Email to record on submitted documents
    pub fn email_or_anonymous(&self) -> &str {
        self.email.as_deref().unwrap_or(ANONYMOUS_EMAIL)
    }
}

/// Claims accepted from a bearer token. The email may sit at the top level
/// or inside an object-valued `sub`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: u64,
}

impl IdentityClaims {
    pub fn email(&self) -> Option<String> {
        self.email
            .clone()
            .or_else(|| {
                self.sub
                    .as_ref()
                    .and_then(|sub| sub.get("email"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .filter(|e| !e.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_from_top_level_claim() {
        let claims = IdentityClaims {
            sub: Some(json!("user-1")),
            email: Some("a@example.com".to_string()),
            exp: 0,
        };
        assert_eq!(claims.email(), Some("a@example.com".to_string()));
    }

    #[test]
    fn test_email_from_object_subject() {
        let claims = IdentityClaims {
            sub: Some(json!({"email": "b@example.com"})),
            email: None,
            exp: 0,
        };
        assert_eq!(claims.email(), Some("b@example.com".to_string()));
    }

    #[test]
    fn test_string_subject_has_no_email() {
        let claims = IdentityClaims {
            sub: Some(json!("b@example.com")),
            email: None,
            exp: 0,
        };
        assert_eq!(claims.email(), None);
    }

    #[test]
    fn test_anonymous_identity() {
        let caller = CallerIdentity::anonymous();
        assert!(!caller.is_authenticated());
        assert_eq!(caller.email_or_anonymous(), "anonymous");
    }
}
