//! Collaborator interfaces consumed by the routing core
//!
//! The document store, notification fan-out, and calendar live outside
//! this crate; routing only sees these traits. Implementations adapt
//! store-specific record shapes into the crate's value types immediately
//! on read, so nothing downstream deals with collaborator field naming.

use crate::agent::Agent;
use crate::error::RoutingResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Roster source, backed by the user directory in the document store.
#[async_trait]
pub trait AgentDirectory: Send + Sync {
    /// Fetch the current roster of users with the agent role.
    async fn list_agents(&self) -> RoutingResult<Vec<Agent>>;
}

/// Durable assignment and load writes against the backing stores.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Durably link an agent to a ticket. Re-assignment overwrites the
    /// ticket's assigned-agent fields, it does not accumulate edges.
    async fn record_assignment(&self, agent_id: &str, ticket_id: &str) -> RoutingResult<()>;

    /// Durably apply a load change for an agent. `delta` is +1 on
    /// assignment and -1 on resolution or reassignment-away.
    async fn persist_load_delta(&self, agent_id: &str, delta: i32) -> RoutingResult<()>;
}

/// Best-effort downstream notification. Failures must never fail the
/// routing operation.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user_id: &str, message: &str) -> RoutingResult<()>;
}

/// Best-effort follow-up reminder scheduling on the agent's calendar.
#[async_trait]
pub trait ReminderScheduler: Send + Sync {
    /// Returns the created event id, or `None` when the calendar declined
    /// the event without erroring.
    async fn schedule_reminder(
        &self,
        ticket_id: &str,
        title: &str,
        agent_email: &str,
        when: DateTime<Utc>,
    ) -> RoutingResult<Option<String>>;
}
