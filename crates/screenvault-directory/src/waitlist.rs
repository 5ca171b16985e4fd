use crate::error::{Result, StoreError};
use crate::query::Fields;
use crate::store::DocumentStore;
use chrono::Utc;
use regex::Regex;
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use tracing::info;

pub const WAITLIST: &str = "waitlist";

/// Result of a signup attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    Joined,
    AlreadyJoined,
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

/// Trimmed, lowercased address, or `None` when it is not an email
pub fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim().to_lowercase();
    // '/' would split the document path
    let valid = !email.contains('/') && email_regex().is_some_and(|re| re.is_match(&email));
    valid.then_some(email)
}

pub struct Waitlist {
    store: Arc<dyn DocumentStore>,
}

impl Waitlist {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Record a signup once per address
    ///
    /// The document id is the normalized address, so a repeat signup finds
    /// the existing entry. Two concurrent first signups both write the same
    /// document; the later write wins.
    pub async fn signup(&self, email: &str, source: Option<&str>) -> Result<SignupOutcome> {
        let normalized =
            normalize_email(email).ok_or_else(|| StoreError::InvalidEmail(email.to_string()))?;

        if self.store.get(WAITLIST, &normalized).await?.is_some() {
            info!("Waitlist signup for {} already recorded", normalized);
            return Ok(SignupOutcome::AlreadyJoined);
        }

        let mut data = Fields::new();
        data.insert("email".into(), Value::String(normalized.clone()));
        if let Some(source) = source {
            data.insert("source".into(), Value::String(source.to_string()));
        }
        data.insert("createdAt".into(), Value::String(Utc::now().to_rfc3339()));

        self.store.set(WAITLIST, &normalized, data).await?;
        info!("Added {} to the waitlist", normalized);
        Ok(SignupOutcome::Joined)
    }

    pub async fn count(&self) -> Result<usize> {
        self.store.count(WAITLIST).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Ada@Example.COM "),
            Some("ada@example.com".to_string())
        );
        assert_eq!(normalize_email("no-at-sign.com"), None);
        assert_eq!(normalize_email("a@nodot"), None);
        assert_eq!(normalize_email("two words@example.com"), None);
        assert_eq!(normalize_email("a/b@example.com"), None);
        assert_eq!(normalize_email(""), None);
    }

    #[tokio::test]
    async fn test_signup_detects_duplicates() {
        let waitlist = Waitlist::new(Arc::new(MemoryStore::new()));

        assert_eq!(
            waitlist.signup("ada@example.com", Some("landing")).await.unwrap(),
            SignupOutcome::Joined
        );
        assert_eq!(
            waitlist.signup("ADA@example.com ", None).await.unwrap(),
            SignupOutcome::AlreadyJoined
        );
        assert_eq!(waitlist.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_signup_rejects_invalid_email() {
        let waitlist = Waitlist::new(Arc::new(MemoryStore::new()));
        let err = waitlist.signup("not-an-email", None).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidEmail(ref e) if e == "not-an-email"));
        assert_eq!(waitlist.count().await.unwrap(), 0);
    }
}
