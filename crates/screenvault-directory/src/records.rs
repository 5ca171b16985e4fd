//! Typed views over directory documents
//!
//! Documents come from many writers and are frequently incomplete. Every record
//! decodes infallibly: a missing name reads "Unknown", missing numbers read 0,
//! a missing status reads "unknown" and a missing timestamp reads `None`.

use crate::query::Document;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNKNOWN_STATUS: &str = "unknown";

/// Decode a record from a stored document without failing
pub trait FromDocument: Sized {
    fn from_document(doc: &Document) -> Self;
}

/// Read a timestamp stored as RFC 3339 text or as epoch milliseconds
pub fn timestamp(doc: &Document, field: &str) -> Option<DateTime<Utc>> {
    match doc.field(field)? {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        // Exported server timestamps: {"seconds": .., "nanoseconds": ..}
        Value::Object(map) => {
            let seconds = map.get("seconds").and_then(Value::as_i64)?;
            let nanos = map
                .get("nanoseconds")
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            Utc.timestamp_opt(seconds, nanos).single()
        }
        _ => None,
    }
}

fn name_of(doc: &Document, fields: &[&str]) -> String {
    fields
        .iter()
        .find_map(|f| doc.str_field(f))
        .unwrap_or(UNKNOWN_NAME)
        .to_string()
}

fn status_of(doc: &Document) -> String {
    doc.str_field("status")
        .map(str::to_lowercase)
        .unwrap_or_else(|| UNKNOWN_STATUS.to_string())
}

fn text_of(doc: &Document, field: &str) -> String {
    doc.str_field(field).unwrap_or_default().to_string()
}

fn optional_text(doc: &Document, field: &str) -> Option<String> {
    doc.str_field(field).map(str::to_string)
}

/// A registered agent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub skills: Vec<String>,
    pub verified: bool,
    pub reputation: f64,
    pub tasks_completed: u64,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl FromDocument for Agent {
    fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            name: name_of(doc, &["name", "displayName"]),
            description: text_of(doc, "description"),
            skills: doc.strings_field("skills"),
            verified: doc.bool_field("verified").unwrap_or(false),
            reputation: doc.f64_field("reputation").unwrap_or(0.0),
            tasks_completed: doc.u64_field("tasksCompleted").unwrap_or(0),
            status: status_of(doc),
            created_at: timestamp(doc, "createdAt"),
        }
    }
}

/// Funds held against a task until release
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Escrow {
    pub id: String,
    pub task_id: Option<String>,
    pub client_id: Option<String>,
    pub agent_id: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl FromDocument for Escrow {
    fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            task_id: optional_text(doc, "taskId"),
            client_id: optional_text(doc, "clientId"),
            agent_id: optional_text(doc, "agentId"),
            amount: doc.f64_field("amount").unwrap_or(0.0),
            currency: currency_of(doc),
            status: status_of(doc),
            created_at: timestamp(doc, "createdAt"),
        }
    }
}

fn currency_of(doc: &Document) -> String {
    doc.str_field("currency")
        .map(str::to_uppercase)
        .unwrap_or_else(|| "USDC".to_string())
}

/// Money moving into the platform
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub id: String,
    pub agent_id: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub tx_hash: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl FromDocument for Deposit {
    fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            agent_id: optional_text(doc, "agentId"),
            amount: doc.f64_field("amount").unwrap_or(0.0),
            currency: currency_of(doc),
            status: status_of(doc),
            tx_hash: optional_text(doc, "txHash"),
            created_at: timestamp(doc, "createdAt"),
        }
    }
}

/// Money moving out of the platform
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub id: String,
    pub agent_id: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub destination: Option<String>,
    pub status: String,
    pub tx_hash: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl FromDocument for Withdrawal {
    fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            agent_id: optional_text(doc, "agentId"),
            amount: doc.f64_field("amount").unwrap_or(0.0),
            currency: currency_of(doc),
            destination: optional_text(doc, "destination"),
            status: status_of(doc),
            tx_hash: optional_text(doc, "txHash"),
            created_at: timestamp(doc, "createdAt"),
        }
    }
}

/// A posted task with a reward
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounty {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reward: f64,
    pub currency: String,
    pub skills: Vec<String>,
    pub poster: String,
    pub claim_count: u64,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
}

impl FromDocument for Bounty {
    fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            title: name_of(doc, &["title", "name"]),
            description: text_of(doc, "description"),
            reward: doc.f64_field("reward").unwrap_or(0.0),
            currency: currency_of(doc),
            skills: doc.strings_field("skills"),
            poster: name_of(doc, &["posterName", "poster"]),
            claim_count: doc.u64_field("claimCount").unwrap_or(0),
            status: status_of(doc),
            created_at: timestamp(doc, "createdAt"),
            deadline: timestamp(doc, "deadline"),
        }
    }
}

/// An agent's claim on a bounty
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: String,
    pub agent_id: Option<String>,
    pub agent_name: String,
    pub submission_url: Option<String>,
    pub status: String,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl FromDocument for Claim {
    fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            agent_id: optional_text(doc, "agentId"),
            agent_name: name_of(doc, &["agentName"]),
            submission_url: optional_text(doc, "submissionUrl"),
            status: status_of(doc),
            submitted_at: timestamp(doc, "submittedAt").or_else(|| timestamp(doc, "createdAt")),
        }
    }
}

/// A waitlist signup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: String,
    pub email: String,
    pub source: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl FromDocument for WaitlistEntry {
    fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            email: doc
                .str_field("email")
                .map(str::to_string)
                .unwrap_or_else(|| doc.id.clone()),
            source: optional_text(doc, "source"),
            created_at: timestamp(doc, "createdAt"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        Document::new(id, value.as_object().cloned().unwrap())
    }

    #[test]
    fn test_empty_agent_uses_fallbacks() {
        let agent = Agent::from_document(&doc("a1", json!({})));
        assert_eq!(agent.name, "Unknown");
        assert_eq!(agent.reputation, 0.0);
        assert_eq!(agent.tasks_completed, 0);
        assert_eq!(agent.status, "unknown");
        assert!(!agent.verified);
        assert!(agent.skills.is_empty());
        assert!(agent.created_at.is_none());
    }

    #[test]
    fn test_agent_with_wrong_types() {
        let agent = Agent::from_document(&doc(
            "a2",
            json!({
                "displayName": "Atlas",
                "reputation": "4.5",
                "tasksCompleted": -3,
                "verified": "yes",
                "status": "ACTIVE",
                "createdAt": "not a date"
            }),
        ));
        assert_eq!(agent.name, "Atlas");
        assert_eq!(agent.reputation, 4.5);
        assert_eq!(agent.tasks_completed, 0);
        assert!(!agent.verified);
        assert_eq!(agent.status, "active");
        assert!(agent.created_at.is_none());
    }

    #[test]
    fn test_timestamp_formats() {
        let d = doc(
            "t",
            json!({
                "text": "2026-03-01T12:00:00Z",
                "millis": 1772366400000i64,
                "server": {"seconds": 1772366400, "nanoseconds": 0}
            }),
        );
        let expected = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(timestamp(&d, "text"), Some(expected));
        assert_eq!(timestamp(&d, "millis"), Some(expected));
        assert_eq!(timestamp(&d, "server"), Some(expected));
        assert_eq!(timestamp(&d, "missing"), None);
    }

    #[test]
    fn test_bounty_and_money_defaults() {
        let bounty = Bounty::from_document(&doc("b", json!({"reward": 120, "currency": "eth"})));
        assert_eq!(bounty.title, "Unknown");
        assert_eq!(bounty.poster, "Unknown");
        assert_eq!(bounty.reward, 120.0);
        assert_eq!(bounty.currency, "ETH");

        let deposit = Deposit::from_document(&doc("d", json!({"amount": null})));
        assert_eq!(deposit.amount, 0.0);
        assert_eq!(deposit.currency, "USDC");
        assert_eq!(deposit.status, "unknown");
    }

    #[test]
    fn test_waitlist_email_falls_back_to_id() {
        let entry = WaitlistEntry::from_document(&doc("ada@example.com", json!({})));
        assert_eq!(entry.email, "ada@example.com");
    }
}
