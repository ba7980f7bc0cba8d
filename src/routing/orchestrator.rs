//! Ticket routing orchestration
//!
//! Composes the expertise-graph lookup with the local selection engine and
//! owns the commit sequence: route, reserve capacity, persist, then fire
//! the best-effort side effects. The sequence is strictly ordered; nothing
//! here runs in parallel.
//!
//! Two-tier routing: the expertise graph can encode topic taxonomies the
//! flat skill tags cannot, so its candidate is taken as authoritative when
//! it answers. It is also an unreliable network dependency, so the local
//! engine is always ready as the fallback and a graph failure never
//! reaches the caller as an error.

use crate::agent::{Agent, AgentRegistry};
use crate::collaborators::{AgentDirectory, AssignmentStore, Notifier, ReminderScheduler};
use crate::config::RoutingSection;
use crate::error::RoutingResult;
use crate::routing::engine::select_agent;
use crate::routing::expertise::{ExpertiseClient, ExpertiseOutcome};
use crate::ticket::{is_known_category, Assignment, TicketDescriptor};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How the winning agent was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSource {
    /// The expertise graph named the agent
    Expertise,
    /// The local selection engine ranked the pool
    Engine,
}

/// Result of routing one ticket
#[derive(Debug, Clone)]
pub enum RouteOutcome {
    /// An agent took the ticket. `warnings` carries degraded side effects
    /// (reminder or notification failures) to surface non-blockingly.
    Assigned {
        assignment: Assignment,
        agent: Agent,
        source: RouteSource,
        warnings: Vec<String>,
    },
    /// No eligible agent exists; the ticket stays unassigned and waits.
    Queued,
}

impl RouteOutcome {
    pub fn is_assigned(&self) -> bool {
        matches!(self, RouteOutcome::Assigned { .. })
    }

    pub fn assigned_agent_id(&self) -> Option<&str> {
        match self {
            RouteOutcome::Assigned { agent, .. } => Some(&agent.id),
            RouteOutcome::Queued => None,
        }
    }
}

/// Orchestrates routing, capacity commit, persistence, and side effects.
pub struct TicketRouter {
    registry: AgentRegistry,
    expertise: Option<ExpertiseClient>,
    directory: Arc<dyn AgentDirectory>,
    store: Arc<dyn AssignmentStore>,
    notifier: Arc<dyn Notifier>,
    scheduler: Arc<dyn ReminderScheduler>,
    config: RoutingSection,
}

impl TicketRouter {
    pub fn new(
        registry: AgentRegistry,
        directory: Arc<dyn AgentDirectory>,
        store: Arc<dyn AssignmentStore>,
        notifier: Arc<dyn Notifier>,
        scheduler: Arc<dyn ReminderScheduler>,
        mut config: RoutingSection,
    ) -> Self {
        // A zero-attempt commit loop would queue every ticket
        config.max_commit_attempts = config.max_commit_attempts.max(1);
        Self {
            registry,
            expertise: None,
            directory,
            store,
            notifier,
            scheduler,
            config,
        }
    }

    /// Enable the expertise-graph tier.
    pub fn with_expertise(mut self, client: ExpertiseClient) -> Self {
        self.expertise = Some(client);
        self
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Route a newly submitted ticket to an agent.
    ///
    /// Returns `Queued` when no eligible agent exists; that is a normal
    /// outcome the caller surfaces as "queued, awaiting an agent".
    /// Collaborator failures along the way degrade the result instead of
    /// failing it; only a failed durable assignment write is an error.
    pub async fn route_ticket(&self, ticket: &TicketDescriptor) -> RoutingResult<RouteOutcome> {
        ticket.validate()?;
        if !ticket.has_routable_category() {
            warn!(ticket_id = %ticket.ticket_id, "Ticket has no category, queueing unassigned");
            return Ok(RouteOutcome::Queued);
        }
        if !is_known_category(&ticket.category) {
            debug!(
                ticket_id = %ticket.ticket_id,
                category = %ticket.category,
                "Routing a category outside the canonical submission-form list"
            );
        }

        let mut warnings = Vec::new();
        self.refresh_roster(&mut warnings).await;

        // Tier 1: expertise graph. Its candidate is authoritative when it
        // resolves to an eligible registry agent.
        if let Some(agent) = self.expertise_candidate(ticket, &mut warnings).await {
            match self.registry.reserve(&agent.id) {
                Ok(reserved) => {
                    return self
                        .commit(ticket, reserved, RouteSource::Expertise, warnings)
                        .await;
                }
                Err(e) => {
                    warn!(
                        ticket_id = %ticket.ticket_id,
                        agent_id = %agent.id,
                        error = %e,
                        "Expertise candidate not eligible, falling back to local engine"
                    );
                    warnings.push(format!("expertise candidate unavailable: {e}"));
                }
            }
        }

        // Tier 2: local engine over the registry snapshot, with an
        // optimistic retry loop. The snapshot can go stale between ranking
        // and reserve; a rejected reservation re-ranks a fresh snapshot.
        for attempt in 1..=self.config.max_commit_attempts {
            let pool = self.registry.snapshot();
            let Some(selected) = select_agent(ticket, &pool) else {
                info!(ticket_id = %ticket.ticket_id, "No eligible agent, queueing ticket");
                return Ok(RouteOutcome::Queued);
            };
            let agent_id = selected.id.clone();

            match self.registry.reserve(&agent_id) {
                Ok(reserved) => {
                    return self
                        .commit(ticket, reserved, RouteSource::Engine, warnings)
                        .await;
                }
                Err(e) => {
                    debug!(
                        ticket_id = %ticket.ticket_id,
                        agent_id = %agent_id,
                        attempt,
                        error = %e,
                        "Reservation lost to a concurrent assignment, re-ranking"
                    );
                }
            }
        }

        warn!(
            ticket_id = %ticket.ticket_id,
            attempts = self.config.max_commit_attempts,
            "Exhausted commit attempts under contention, queueing ticket"
        );
        Ok(RouteOutcome::Queued)
    }

    /// Release an agent's slot when their ticket is resolved and notify
    /// the involved parties. Returns non-blocking warnings for degraded
    /// side effects.
    pub async fn resolve_ticket(
        &self,
        ticket_id: &str,
        agent_id: &str,
        submitter_id: Option<&str>,
    ) -> RoutingResult<Vec<String>> {
        self.registry.release(agent_id)?;
        let mut warnings = Vec::new();

        if let Err(e) = self.store.persist_load_delta(agent_id, -1).await {
            warn!(agent_id = %agent_id, error = %e, "Failed to persist load decrement");
            warnings.push(format!("load update not persisted: {e}"));
        }

        self.notify_best_effort(
            agent_id,
            &format!("Ticket #{ticket_id} marked as resolved."),
            &mut warnings,
        )
        .await;
        if let Some(submitter) = submitter_id {
            self.notify_best_effort(
                submitter,
                &format!("Your ticket #{ticket_id} has been resolved."),
                &mut warnings,
            )
            .await;
        }

        info!(ticket_id = %ticket_id, agent_id = %agent_id, "Ticket resolved");
        Ok(warnings)
    }

    /// Move a ticket to a different agent. The new agent's eligibility is
    /// checked under the same serialized reserve path as routing; an
    /// ineligible target is an `InvariantViolation` the caller surfaces.
    pub async fn reassign_ticket(
        &self,
        ticket_id: &str,
        from_agent_id: Option<&str>,
        to_agent_id: &str,
    ) -> RoutingResult<(Assignment, Vec<String>)> {
        let reserved = self.registry.reserve(to_agent_id)?;
        let mut warnings = Vec::new();

        // The durable write commits the move; the previous agent is only
        // released once the ticket is durably theirs no longer.
        let assignment = Assignment::new(&reserved.id, ticket_id);
        if let Err(e) = self.store.record_assignment(&reserved.id, ticket_id).await {
            let _ = self.registry.release(&reserved.id);
            return Err(e);
        }
        if let Err(e) = self.store.persist_load_delta(&reserved.id, 1).await {
            warnings.push(format!("load update not persisted: {e}"));
        }

        if let Some(from) = from_agent_id {
            if let Err(e) = self.registry.release(from) {
                warn!(agent_id = %from, error = %e, "Could not release previous agent");
                warnings.push(format!("previous agent not released: {e}"));
            } else if let Err(e) = self.store.persist_load_delta(from, -1).await {
                warnings.push(format!("load update not persisted: {e}"));
            }
        }

        self.notify_best_effort(
            to_agent_id,
            &format!("Ticket #{ticket_id} has been assigned to you."),
            &mut warnings,
        )
        .await;

        info!(
            ticket_id = %ticket_id,
            from = from_agent_id.unwrap_or("unassigned"),
            to = %to_agent_id,
            "Ticket reassigned"
        );
        Ok((assignment, warnings))
    }

    /// Pull a fresh roster from the directory. A directory failure is a
    /// degraded outcome: routing continues over the last known roster.
    async fn refresh_roster(&self, warnings: &mut Vec<String>) {
        match self.directory.list_agents().await {
            Ok(agents) => self.registry.replace_all(agents),
            Err(e) => {
                warn!(error = %e, "Directory fetch failed, routing over last known roster");
                warnings.push(format!("agent roster may be stale: {e}"));
            }
        }
    }

    /// Run the expertise lookup and resolve its candidate to a registry
    /// agent. Every miss path logs the degradation and returns `None`.
    async fn expertise_candidate(
        &self,
        ticket: &TicketDescriptor,
        warnings: &mut Vec<String>,
    ) -> Option<Agent> {
        let client = self.expertise.as_ref()?;

        match client.lookup(&ticket.category).await {
            ExpertiseOutcome::Found(candidate) => {
                match self.registry.find_by_email(&candidate.email) {
                    Some(agent) => Some(agent),
                    None => {
                        warn!(
                            ticket_id = %ticket.ticket_id,
                            expert_email = %candidate.email,
                            "Expertise candidate not in the roster, falling back"
                        );
                        None
                    }
                }
            }
            ExpertiseOutcome::NotFound => {
                debug!(ticket_id = %ticket.ticket_id, "No expert for topic, using local engine");
                None
            }
            ExpertiseOutcome::Failed(reason) => {
                warn!(
                    ticket_id = %ticket.ticket_id,
                    reason = %reason,
                    "Expertise lookup degraded, using local engine"
                );
                warnings.push(format!("expertise lookup unavailable: {reason}"));
                None
            }
        }
    }

    /// Persist the assignment and fire side effects. The reservation is
    /// rolled back only when the durable assignment write fails; a failed
    /// reminder or notification is reported, never retried or rolled back.
    async fn commit(
        &self,
        ticket: &TicketDescriptor,
        agent: Agent,
        source: RouteSource,
        mut warnings: Vec<String>,
    ) -> RoutingResult<RouteOutcome> {
        let assignment = Assignment::new(&agent.id, &ticket.ticket_id);

        if let Err(e) = self
            .store
            .record_assignment(&agent.id, &ticket.ticket_id)
            .await
        {
            let _ = self.registry.release(&agent.id);
            return Err(e);
        }
        if let Err(e) = self.store.persist_load_delta(&agent.id, 1).await {
            warn!(agent_id = %agent.id, error = %e, "Failed to persist load increment");
            warnings.push(format!("load update not persisted: {e}"));
        }

        let remind_at = Utc::now() + Duration::hours(self.config.follow_up_hours);
        match self
            .scheduler
            .schedule_reminder(&ticket.ticket_id, &ticket.title, &agent.email, remind_at)
            .await
        {
            Ok(Some(event_id)) => {
                debug!(ticket_id = %ticket.ticket_id, event_id = %event_id, "Follow-up reminder scheduled");
            }
            Ok(None) => {
                debug!(ticket_id = %ticket.ticket_id, "Calendar declined the reminder");
            }
            Err(e) => {
                warn!(ticket_id = %ticket.ticket_id, error = %e, "Reminder scheduling failed");
                warnings.push(format!("follow-up reminder not scheduled: {e}"));
            }
        }

        self.notify_best_effort(
            &agent.id,
            &format!("Ticket #{} has been assigned to you.", ticket.ticket_id),
            &mut warnings,
        )
        .await;

        info!(
            ticket_id = %ticket.ticket_id,
            agent_id = %agent.id,
            agent_load = agent.current_load,
            source = ?source,
            degraded = !warnings.is_empty(),
            "Ticket assigned"
        );

        Ok(RouteOutcome::Assigned {
            assignment,
            agent,
            source,
            warnings,
        })
    }

    async fn notify_best_effort(&self, user_id: &str, message: &str, warnings: &mut Vec<String>) {
        if let Err(e) = self.notifier.notify(user_id, message).await {
            warn!(user_id = %user_id, error = %e, "Notification failed");
            warnings.push(format!("notification not delivered: {e}"));
        }
    }
}
