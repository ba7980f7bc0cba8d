//! Mock collaborator implementations for testing
//!
//! Each mock records the calls it receives and can be constructed in a
//! failing mode to exercise the degraded paths.

use crate::agent::Agent;
use crate::collaborators::{AgentDirectory, AssignmentStore, Notifier, ReminderScheduler};
use crate::error::{RoutingError, RoutingResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock roster source backed by an in-memory agent list
#[derive(Debug, Default)]
pub struct MockDirectory {
    pub agents: Arc<Mutex<Vec<Agent>>>,
    pub should_fail: bool,
}

impl MockDirectory {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self {
            agents: Arc::new(Mutex::new(agents)),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    pub async fn set_agents(&self, agents: Vec<Agent>) {
        *self.agents.lock().await = agents;
    }
}

#[async_trait]
impl AgentDirectory for MockDirectory {
    async fn list_agents(&self) -> RoutingResult<Vec<Agent>> {
        if self.should_fail {
            return Err(RoutingError::collaborator("directory", "mock directory failure"));
        }
        Ok(self.agents.lock().await.clone())
    }
}

/// Mock durable store recording assignments and load deltas
#[derive(Debug, Default)]
pub struct MockAssignmentStore {
    pub recorded_assignments: Arc<Mutex<Vec<(String, String)>>>,
    pub load_deltas: Arc<Mutex<Vec<(String, i32)>>>,
    pub fail_assignments: bool,
    pub fail_load_deltas: bool,
}

impl MockAssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_assignments() -> Self {
        Self {
            fail_assignments: true,
            ..Default::default()
        }
    }

    pub fn failing_load_deltas() -> Self {
        Self {
            fail_load_deltas: true,
            ..Default::default()
        }
    }

    pub async fn assignments(&self) -> Vec<(String, String)> {
        self.recorded_assignments.lock().await.clone()
    }

    pub async fn deltas(&self) -> Vec<(String, i32)> {
        self.load_deltas.lock().await.clone()
    }
}

#[async_trait]
impl AssignmentStore for MockAssignmentStore {
    async fn record_assignment(&self, agent_id: &str, ticket_id: &str) -> RoutingResult<()> {
        if self.fail_assignments {
            return Err(RoutingError::collaborator("ticket-store", "mock write failure"));
        }
        self.recorded_assignments
            .lock()
            .await
            .push((agent_id.to_string(), ticket_id.to_string()));
        Ok(())
    }

    async fn persist_load_delta(&self, agent_id: &str, delta: i32) -> RoutingResult<()> {
        if self.fail_load_deltas {
            return Err(RoutingError::collaborator("ticket-store", "mock write failure"));
        }
        self.load_deltas
            .lock()
            .await
            .push((agent_id.to_string(), delta));
        Ok(())
    }
}

/// Mock notifier recording delivered messages
#[derive(Debug, Default)]
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub should_fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    pub async fn messages(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, user_id: &str, message: &str) -> RoutingResult<()> {
        if self.should_fail {
            return Err(RoutingError::collaborator("notifier", "mock delivery failure"));
        }
        self.sent
            .lock()
            .await
            .push((user_id.to_string(), message.to_string()));
        Ok(())
    }
}

/// A reminder captured by the mock scheduler
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledReminder {
    pub ticket_id: String,
    pub title: String,
    pub agent_email: String,
    pub when: DateTime<Utc>,
}

/// Mock calendar recording scheduled reminders
#[derive(Debug, Default)]
pub struct MockScheduler {
    pub scheduled: Arc<Mutex<Vec<ScheduledReminder>>>,
    pub should_fail: bool,
    /// Calendar accepts the call but declines to create an event
    pub declines: bool,
}

impl MockScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    pub fn declining() -> Self {
        Self {
            declines: true,
            ..Default::default()
        }
    }

    pub async fn reminders(&self) -> Vec<ScheduledReminder> {
        self.scheduled.lock().await.clone()
    }
}

#[async_trait]
impl ReminderScheduler for MockScheduler {
    async fn schedule_reminder(
        &self,
        ticket_id: &str,
        title: &str,
        agent_email: &str,
        when: DateTime<Utc>,
    ) -> RoutingResult<Option<String>> {
        if self.should_fail {
            return Err(RoutingError::collaborator("calendar", "mock calendar failure"));
        }
        if self.declines {
            return Ok(None);
        }
        let reminder = ScheduledReminder {
            ticket_id: ticket_id.to_string(),
            title: title.to_string(),
            agent_email: agent_email.to_string(),
            when,
        };
        self.scheduled.lock().await.push(reminder);
        Ok(Some(uuid::Uuid::new_v4().to_string()))
    }
}
