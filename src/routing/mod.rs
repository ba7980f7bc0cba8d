//! Ticket routing
//!
//! Two-tier routing for incoming tickets:
//!
//! ```text
//! Ticket submitted
//!       |
//!       v
//! TicketRouter ── expertise graph answered? ──> authoritative candidate
//!       |                                              |
//!       | no / failed                                  v
//!       v                                       reserve capacity
//! selection engine (escalation,                        |
//! skill match, load balancing)                         v
//!       |                               persist assignment, reminder,
//!       +────────────────────────────>  notification (best effort)
//! ```
//!
//! - [`engine`]: pure agent selection over a roster snapshot
//! - [`expertise`]: HTTP client for the topic-expertise graph service
//! - [`orchestrator`]: composition, capacity commit, and side effects

pub mod engine;
pub mod expertise;
pub mod orchestrator;

pub use engine::select_agent;
pub use expertise::{ExpertCandidate, ExpertiseClient, ExpertiseConfig, ExpertiseOutcome};
pub use orchestrator::{RouteOutcome, RouteSource, TicketRouter};
