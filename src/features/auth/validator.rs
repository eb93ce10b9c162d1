use base64::prelude::*;
use jsonwebtoken::{crypto, decode_header, Algorithm, DecodingKey};
use std::time::Duration;

use super::model::{CallerIdentity, IdentityClaims};
use crate::core::error::AppError;

/// Validates HS256 bearer tokens issued by the auth service.
pub struct JwtValidator {
    key: Option<DecodingKey>,
    leeway: u64,
}

impl JwtValidator {
    pub fn new(secret: Option<&str>, leeway: Duration) -> Self {
        Self {
            key: secret.map(|s| DecodingKey::from_secret(s.as_bytes())),
            leeway: leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<CallerIdentity, AppError> {
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("Token validation is not configured".to_string()))?;

        let header =
            decode_header(token).map_err(|e| AppError::Unauthorized(e.to_string()))?;
        if header.alg != Algorithm::HS256 {
            return Err(AppError::Unauthorized(format!(
                "Unsupported token algorithm: {:?}",
                header.alg
            )));
        }

        // Claims are read by hand: `sub` may be an object, which the
        // library's own claim validation refuses.
        let (message, signature) = token
            .rsplit_once('.')
            .ok_or_else(|| AppError::Unauthorized("Malformed token".to_string()))?;
        let (_, payload) = message
            .split_once('.')
            .ok_or_else(|| AppError::Unauthorized("Malformed token".to_string()))?;

        let verified = crypto::verify(signature, message.as_bytes(), key, Algorithm::HS256)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;
        if !verified {
            return Err(AppError::Unauthorized("Invalid token signature".to_string()));
        }

        let payload = BASE64_URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;
        let claims: IdentityClaims = serde_json::from_slice(&payload)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0);
        if claims.exp.saturating_add(self.leeway) < now {
            return Err(AppError::Unauthorized("Token has expired".to_string()));
        }

        claims
            .email()
            .map(CallerIdentity::with_email)
            .ok_or_else(|| AppError::Unauthorized("Email not found in token".to_string()))
    }

    /// Resolve an `Authorization` header value to an identity. Never fails:
    /// anything other than a valid bearer token is anonymous.
    pub fn identify(&self, authorization: Option<&str>) -> CallerIdentity {
        let Some(token) = authorization.and_then(|h| h.strip_prefix("Bearer ")) else {
            return CallerIdentity::anonymous();
        };

        match self.validate_token(token.trim()) {
            Ok(identity) => identity,
            Err(e) => {
                tracing::debug!("Ignoring bearer token: {}", e);
                CallerIdentity::anonymous()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{token_for, TEST_SECRET};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn sign(claims: &serde_json::Value, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_one_hour() -> u64 {
        (chrono::Utc::now().timestamp() + 3600) as u64
    }

    fn validator() -> JwtValidator {
        JwtValidator::new(Some(TEST_SECRET), Duration::from_secs(0))
    }

    #[test]
    fn test_valid_token_yields_email() {
        let token = token_for("user@example.com", TEST_SECRET, 3600);
        let identity = validator().validate_token(&token).unwrap();
        assert_eq!(identity.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn test_object_sub_claim_yields_email() {
        let token = sign(
            &json!({"sub": {"email": "b@example.com"}, "exp": in_one_hour()}),
            TEST_SECRET,
        );
        let identity = validator().validate_token(&token).unwrap();
        assert_eq!(identity.email.as_deref(), Some("b@example.com"));
    }

    #[test]
    fn test_top_level_email_claim_yields_email() {
        let token = sign(
            &json!({"email": "a@example.com", "exp": in_one_hour()}),
            TEST_SECRET,
        );
        let identity = validator().validate_token(&token).unwrap();
        assert_eq!(identity.email.as_deref(), Some("a@example.com"));
    }

    #[test]
    fn test_token_without_email_is_rejected() {
        let token = sign(&json!({"sub": "42", "exp": in_one_hour()}), TEST_SECRET);
        assert!(validator().validate_token(&token).is_err());
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let token = token_for("user@example.com", TEST_SECRET, 3600);
        let forged = sign(
            &json!({"sub": {"email": "admin@example.com"}, "exp": in_one_hour()}),
            "other-secret",
        );

        let parts: Vec<&str> = token.split('.').collect();
        let forged_payload = forged.split('.').nth(1).unwrap();
        let tampered = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);
        assert!(validator().validate_token(&tampered).is_err());
    }

    #[test]
    fn test_leeway_accepts_recently_expired_token() {
        let token = token_for("user@example.com", TEST_SECRET, -30);
        assert!(validator().validate_token(&token).is_err());

        let lenient = JwtValidator::new(Some(TEST_SECRET), Duration::from_secs(120));
        assert!(lenient.validate_token(&token).is_ok());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = token_for("user@example.com", "other-secret", 3600);
        assert!(validator().validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = token_for("user@example.com", TEST_SECRET, -3600);
        assert!(validator().validate_token(&token).is_err());
    }

    #[test]
    fn test_identify_falls_back_to_anonymous() {
        let validator = validator();
        assert_eq!(validator.identify(None), CallerIdentity::anonymous());
        assert_eq!(
            validator.identify(Some("Basic abc")),
            CallerIdentity::anonymous()
        );
        assert_eq!(
            validator.identify(Some("Bearer not-a-jwt")),
            CallerIdentity::anonymous()
        );

        let token = token_for("user@example.com", TEST_SECRET, 3600);
        let header = format!("Bearer {}", token);
        assert!(validator.identify(Some(&header)).is_authenticated());
    }

    #[test]
    fn test_without_secret_everyone_is_anonymous() {
        let validator = JwtValidator::new(None, Duration::from_secs(0));
        let token = token_for("user@example.com", TEST_SECRET, 3600);
        let header = format!("Bearer {}", token);
        assert!(!validator.identify(Some(&header)).is_authenticated());
    }
}
