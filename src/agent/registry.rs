//! Thread-safe agent registry
//!
//! Holds the in-memory roster snapshot the routing engine ranks over, and
//! owns the only mutation path for `current_load`. Load changes go through
//! [`AgentRegistry::reserve`] and [`AgentRegistry::release`], which
//! re-check eligibility under the write lock so two concurrently routed
//! tickets cannot both take an agent's last capacity slot.

use crate::agent::Agent;
use crate::error::{RoutingError, RoutingResult};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct RegistryInner {
    agents: HashMap<String, Agent>,
    /// Registration order, so snapshots are deterministic. The engine's
    /// tie-break is "original list order", which a bare HashMap would
    /// scramble between calls.
    order: Vec<String>,
}

/// Shared registry of support agents
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl AgentRegistry {
    /// Create a new empty agent registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new agent or update an existing one in place.
    /// Updates keep the agent's original position in the snapshot order.
    pub fn register_agent(&self, agent: Agent) {
        let mut inner = self.inner.write().unwrap();
        let agent_id = agent.id.clone();
        let is_new = !inner.agents.contains_key(&agent_id);

        if is_new {
            inner.order.push(agent_id.clone());
            info!(agent_id = %agent_id, "Registered new agent");
        } else {
            debug!(agent_id = %agent_id, "Updated agent record");
        }
        inner.agents.insert(agent_id, agent);
    }

    /// Replace the whole roster, e.g. after a directory sync.
    pub fn replace_all(&self, agents: Vec<Agent>) {
        let mut inner = self.inner.write().unwrap();
        inner.agents.clear();
        inner.order.clear();
        for agent in agents {
            inner.order.push(agent.id.clone());
            inner.agents.insert(agent.id.clone(), agent);
        }
        info!(count = inner.order.len(), "Replaced agent roster");
    }

    /// Get agent record by ID
    pub fn get_agent(&self, agent_id: &str) -> Option<Agent> {
        let inner = self.inner.read().unwrap();
        inner.agents.get(agent_id).cloned()
    }

    /// Find an agent by email. Expertise-graph candidates identify agents
    /// by name and email only, so email is the join key.
    pub fn find_by_email(&self, email: &str) -> Option<Agent> {
        let inner = self.inner.read().unwrap();
        inner
            .agents
            .values()
            .find(|agent| agent.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// All agents in registration order.
    pub fn snapshot(&self) -> Vec<Agent> {
        let inner = self.inner.read().unwrap();
        inner
            .order
            .iter()
            .filter_map(|id| inner.agents.get(id).cloned())
            .collect()
    }

    /// Agents that are available and under capacity, in registration order.
    pub fn eligible_snapshot(&self) -> Vec<Agent> {
        self.snapshot()
            .into_iter()
            .filter(Agent::is_eligible)
            .collect()
    }

    /// Get count of registered agents
    pub fn agent_count(&self) -> usize {
        let inner = self.inner.read().unwrap();
        inner.agents.len()
    }

    /// Get count of eligible agents
    pub fn eligible_count(&self) -> usize {
        let inner = self.inner.read().unwrap();
        inner.agents.values().filter(|a| a.is_eligible()).count()
    }

    /// Claim one unit of an agent's capacity.
    ///
    /// Eligibility is re-checked under the write lock. A ranking decision
    /// is made against a snapshot that may have gone stale; this is where
    /// the capacity invariant is actually enforced. Returns the updated
    /// agent record on success.
    pub fn reserve(&self, agent_id: &str) -> RoutingResult<Agent> {
        let mut inner = self.inner.write().unwrap();
        let agent = inner
            .agents
            .get_mut(agent_id)
            .ok_or_else(|| RoutingError::UnknownAgent(agent_id.to_string()))?;

        if !agent.is_eligible() {
            warn!(
                agent_id = %agent_id,
                current_load = agent.current_load,
                max_load = agent.max_load,
                is_available = agent.is_available,
                "Rejected reservation for ineligible agent"
            );
            return Err(RoutingError::invariant(
                agent_id,
                format!(
                    "agent is no longer eligible (load {}/{}, available: {})",
                    agent.current_load, agent.max_load, agent.is_available
                ),
            ));
        }

        agent.current_load += 1;
        debug!(
            agent_id = %agent_id,
            current_load = agent.current_load,
            max_load = agent.max_load,
            "Reserved agent capacity"
        );
        Ok(agent.clone())
    }

    /// Return one unit of an agent's capacity, clamped at zero.
    /// Used on ticket resolution and on reassignment away from an agent.
    pub fn release(&self, agent_id: &str) -> RoutingResult<Agent> {
        let mut inner = self.inner.write().unwrap();
        let agent = inner
            .agents
            .get_mut(agent_id)
            .ok_or_else(|| RoutingError::UnknownAgent(agent_id.to_string()))?;

        agent.current_load = agent.current_load.saturating_sub(1);
        debug!(
            agent_id = %agent_id,
            current_load = agent.current_load,
            "Released agent capacity"
        );
        Ok(agent.clone())
    }
}
