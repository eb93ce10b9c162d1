#[cfg(test)]
use chrono::{DateTime, Utc};
#[cfg(test)]
use fake::{faker::lorem::en::Sentence, Fake};
#[cfg(test)]
use jsonwebtoken::{encode, EncodingKey, Header};
#[cfg(test)]
use serde_json::{json, Value};
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::features::auth::model::IdentityClaims;
#[cfg(test)]
use crate::features::reports::models::Report;
#[cfg(test)]
use crate::shared::constants::{ANONYMOUS_EMAIL, DEFAULT_REPORT_STATUS};
#[cfg(test)]
use crate::shared::timestamp::RawTimestamp;

#[cfg(test)]
pub const TEST_SECRET: &str = "test-secret";

/// HS256 token carrying `email` inside an object-valued `sub` claim
#[cfg(test)]
pub fn token_for(email: &str, secret: &str, expires_in_secs: i64) -> String {
    let exp = (Utc::now().timestamp() + expires_in_secs).max(0) as u64;
    let claims = IdentityClaims {
        sub: Some(json!({ "email": email })),
        email: None,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Builder for stored reports. Defaults to an unresolved, low priority
/// "Leak" stamped with the current instant.
#[cfg(test)]
pub struct ReportBuilder {
    report: Report,
}

#[cfg(test)]
#[allow(dead_code)]
impl ReportBuilder {
    pub fn new(location: &str) -> Self {
        Self {
            report: Report {
                id: Uuid::now_v7(),
                issue_type: Some("Leak".to_string()),
                location: Some(location.to_string()),
                priority: "LOW".to_string(),
                details: Sentence(3..6).fake(),
                timestamp: Some(RawTimestamp::Native(Utc::now())),
                user_email: ANONYMOUS_EMAIL.to_string(),
                status: DEFAULT_REPORT_STATUS.to_string(),
            },
        }
    }

    /// Legacy document without a location field
    pub fn without_location() -> Self {
        let mut builder = Self::new("");
        builder.report.location = None;
        builder
    }

    pub fn priority(mut self, priority: &str) -> Self {
        self.report.priority = priority.to_string();
        self
    }

    pub fn issue_type(mut self, issue_type: &str) -> Self {
        self.report.issue_type = Some(issue_type.to_string());
        self
    }

    pub fn no_issue_type(mut self) -> Self {
        self.report.issue_type = None;
        self
    }

    pub fn at(mut self, at: DateTime<Utc>) -> Self {
        self.report.timestamp = Some(RawTimestamp::Native(at));
        self
    }

    pub fn epoch_millis(mut self, millis: f64) -> Self {
        self.report.timestamp = Some(RawTimestamp::EpochMillis(millis));
        self
    }

    pub fn raw_text(mut self, text: &str) -> Self {
        self.report.timestamp = Some(RawTimestamp::Text(text.to_string()));
        self
    }

    pub fn raw_json(mut self, value: Value) -> Self {
        self.report.timestamp = RawTimestamp::from_json(value);
        self
    }

    pub fn no_timestamp(mut self) -> Self {
        self.report.timestamp = None;
        self
    }

    pub fn build(self) -> Report {
        self.report
    }
}
