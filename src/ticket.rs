//! Ticket descriptor and assignment types
//!
//! The descriptor is the normalized routing input derived from a submitted
//! ticket. The full ticket entity in the document store carries more fields
//! (title, description, AI summary, suggested reply); only the fields the
//! routing decision reads are carried here.

use crate::error::{RoutingError, RoutingResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical ticket categories offered by the submission form.
pub const TICKET_CATEGORIES: [&str; 6] = [
    "Technical Support",
    "Billing",
    "Account Issues",
    "Feature Request",
    "Bug Report",
    "General Inquiry",
];

/// True when the category is one of the canonical submission-form
/// categories. Routing accepts free text; this only flags descriptors
/// that bypassed the form.
pub fn is_known_category(category: &str) -> bool {
    TICKET_CATEGORIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(category.trim()))
}

/// Ticket priority as selected by the submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

/// Sentiment classification produced by the summarization collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Ticket lifecycle status in the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

/// Routing input derived from a ticket at submission time.
///
/// Descriptors are ephemeral: built by the submission handler, consumed by
/// the router, and discarded once the assignment is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketDescriptor {
    /// Ticket identifier in the backing store
    pub ticket_id: String,
    /// Display title, used for reminder summaries
    pub title: String,
    /// Free-text category, matched case-insensitively against agent skills
    pub category: String,
    /// Submitter-selected priority
    pub priority: Priority,
    /// Sentiment from the summarization pass, absent when that pass failed
    pub sentiment: Option<Sentiment>,
}

impl TicketDescriptor {
    pub fn new(
        ticket_id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        priority: Priority,
        sentiment: Option<Sentiment>,
    ) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            title: title.into(),
            category: category.into(),
            priority,
            sentiment,
        }
    }

    /// True when the ticket should be escalated to a senior agent:
    /// negative sentiment or urgent priority.
    pub fn needs_escalation(&self) -> bool {
        self.sentiment == Some(Sentiment::Negative) || self.priority == Priority::Urgent
    }

    /// A descriptor with a blank category cannot be routed.
    pub fn has_routable_category(&self) -> bool {
        !self.category.trim().is_empty()
    }

    /// Reject malformed descriptors. A blank ticket id is a programmer
    /// error in the caller; a blank category is not, it only means the
    /// ticket queues unassigned.
    pub fn validate(&self) -> RoutingResult<()> {
        if self.ticket_id.trim().is_empty() {
            return Err(RoutingError::invalid_descriptor(
                "ticket_id must not be blank",
            ));
        }
        Ok(())
    }
}

/// A directed assignment edge from agent to ticket.
///
/// Created at most once per ticket under normal operation; reassignment
/// overwrites the edge rather than accumulating a second one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub agent_id: String,
    pub ticket_id: String,
    pub assigned_at: DateTime<Utc>,
}

impl Assignment {
    pub fn new(agent_id: impl Into<String>, ticket_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            ticket_id: ticket_id.into(),
            assigned_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(priority: Priority, sentiment: Option<Sentiment>) -> TicketDescriptor {
        TicketDescriptor::new(
            "ticket-1",
            "Login broken",
            "Technical Support",
            priority,
            sentiment,
        )
    }

    #[test]
    fn test_escalation_on_negative_sentiment() {
        let ticket = descriptor(Priority::Low, Some(Sentiment::Negative));
        assert!(ticket.needs_escalation());
    }

    #[test]
    fn test_escalation_on_urgent_priority() {
        let ticket = descriptor(Priority::Urgent, Some(Sentiment::Positive));
        assert!(ticket.needs_escalation());
    }

    #[test]
    fn test_no_escalation_for_neutral_high() {
        let ticket = descriptor(Priority::High, Some(Sentiment::Neutral));
        assert!(!ticket.needs_escalation());
    }

    #[test]
    fn test_no_escalation_for_missing_sentiment() {
        let ticket = descriptor(Priority::Medium, None);
        assert!(!ticket.needs_escalation());
    }

    #[test]
    fn test_blank_category_is_not_routable() {
        let mut ticket = descriptor(Priority::Low, None);
        ticket.category = "   ".to_string();
        assert!(!ticket.has_routable_category());
    }

    #[test]
    fn test_known_category_is_case_insensitive_and_trimmed() {
        assert!(is_known_category("Billing"));
        assert!(is_known_category("  bug report "));
        assert!(!is_known_category("Underwater Basketry"));
        assert!(!is_known_category(""));
    }

    #[test]
    fn test_validate_rejects_blank_ticket_id() {
        let mut ticket = descriptor(Priority::Low, None);
        assert!(ticket.validate().is_ok());

        ticket.ticket_id = "  ".to_string();
        let err = ticket.validate().unwrap_err();
        assert!(matches!(err, RoutingError::InvalidDescriptor { .. }));
    }

    #[test]
    fn test_priority_serialization() {
        assert_eq!(
            serde_json::to_string(&Priority::Urgent).unwrap(),
            "\"urgent\""
        );
        let parsed: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, Priority::Low);
    }

    #[test]
    fn test_status_serialization_uses_kebab_case() {
        assert_eq!(
            serde_json::to_string(&TicketStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
    }
}
