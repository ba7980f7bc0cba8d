//! SynapSolve ticket routing core
//!
//! Assigns newly submitted support tickets to agents. Given a ticket's
//! category, priority, and sentiment, and a pool of agents with skills,
//! load, and capacity, the router deterministically picks the best agent,
//! claims one unit of their capacity, and records the assignment.
//!
//! # Overview
//!
//! - A pure selection engine ranks the agent pool: eligibility filter,
//!   senior escalation for urgent or negative-sentiment tickets, skill
//!   matching against the category, load balancing as the final key.
//! - An expertise-graph lookup runs first when configured; its candidate
//!   is authoritative, and any failure falls back to the local engine.
//! - The registry serializes all load changes and re-checks eligibility
//!   at commit time, so concurrent routing cannot oversubscribe an agent.
//! - Persistence, reminders, and notifications are collaborator traits;
//!   reminder and notification failures degrade the outcome instead of
//!   failing it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use synapsolve_routing::agent::AgentRegistry;
//! use synapsolve_routing::config::RoutingSection;
//! use synapsolve_routing::routing::TicketRouter;
//! use synapsolve_routing::testing::{
//!     MockAssignmentStore, MockDirectory, MockNotifier, MockScheduler,
//! };
//! use synapsolve_routing::ticket::{Priority, Sentiment, TicketDescriptor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let router = TicketRouter::new(
//!     AgentRegistry::new(),
//!     Arc::new(MockDirectory::new(vec![])),
//!     Arc::new(MockAssignmentStore::new()),
//!     Arc::new(MockNotifier::new()),
//!     Arc::new(MockScheduler::new()),
//!     RoutingSection::default(),
//! );
//!
//! let ticket = TicketDescriptor::new(
//!     "ticket-42",
//!     "Cannot log in",
//!     "Technical Support",
//!     Priority::High,
//!     Some(Sentiment::Neutral),
//! );
//!
//! let outcome = router.route_ticket(&ticket).await?;
//! if let Some(agent_id) = outcome.assigned_agent_id() {
//!     println!("assigned to {agent_id}");
//! } else {
//!     println!("queued, awaiting an agent");
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod observability;
pub mod routing;
pub mod testing;
pub mod ticket;

pub use agent::{Agent, AgentRegistry};
pub use config::RouterConfig;
pub use error::{RoutingError, RoutingResult};
pub use routing::{
    select_agent, ExpertiseClient, ExpertiseConfig, ExpertiseOutcome, RouteOutcome, RouteSource,
    TicketRouter,
};
pub use ticket::{Assignment, Priority, Sentiment, TicketDescriptor, TicketStatus};
