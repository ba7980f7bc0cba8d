//! Local agent selection
//!
//! The fallback ranking that runs when the expertise graph has no answer.
//! A pure, synchronous decision over a roster snapshot: no I/O, no
//! mutation, deterministic for identical input.
//!
//! The cascade, in order:
//!
//! 1. keep eligible agents only; an empty result is "no capacity", not an
//!    error
//! 2. for negative-sentiment or urgent tickets, prefer senior agents, but
//!    only when at least one senior is eligible - escalation never empties
//!    the candidate set
//! 3. keep agents whose skills match the category (bidirectional substring
//!    test), ranked by match count then by current load
//! 4. if nothing matched a skill, fall back to pure load balancing across
//!    the candidates
//!
//! All sorts are stable, so agents with equal keys keep their original
//! pool order.

use crate::agent::Agent;
use crate::ticket::TicketDescriptor;
use tracing::debug;

/// Select the best agent for a ticket from a pool snapshot.
///
/// Returns `None` when the pool is empty, every agent is ineligible, or
/// the ticket category is blank. The input is never mutated and the
/// decision is deterministic: calling twice with identical input returns
/// the same agent.
pub fn select_agent<'a>(ticket: &TicketDescriptor, agents: &'a [Agent]) -> Option<&'a Agent> {
    if !ticket.has_routable_category() {
        debug!(ticket_id = %ticket.ticket_id, "Ticket has no routable category");
        return None;
    }

    let eligible: Vec<&Agent> = agents.iter().filter(|a| a.is_eligible()).collect();
    if eligible.is_empty() {
        debug!(ticket_id = %ticket.ticket_id, "No eligible agents in pool");
        return None;
    }

    // Senior preference for high-risk tickets. Falls through to the full
    // eligible set when no senior has capacity.
    let candidates: Vec<&Agent> = if ticket.needs_escalation() {
        let seniors: Vec<&Agent> = eligible
            .iter()
            .copied()
            .filter(|a| a.senior_level)
            .collect();
        if seniors.is_empty() {
            eligible
        } else {
            debug!(
                ticket_id = %ticket.ticket_id,
                seniors = seniors.len(),
                "Escalating to senior agents"
            );
            seniors
        }
    } else {
        eligible
    };

    let mut skill_matched: Vec<(&Agent, usize)> = candidates
        .iter()
        .map(|a| (*a, a.skill_match_score(&ticket.category)))
        .filter(|(_, score)| *score > 0)
        .collect();

    let selected = if skill_matched.is_empty() {
        // No skill overlap anywhere: degrade to load balancing so an
        // assignment still happens whenever any candidate exists.
        let mut by_load = candidates;
        by_load.sort_by_key(|a| a.current_load);
        by_load.into_iter().next()?
    } else {
        skill_matched.sort_by(|(a, a_score), (b, b_score)| {
            b_score
                .cmp(a_score)
                .then_with(|| a.current_load.cmp(&b.current_load))
        });
        skill_matched.into_iter().next().map(|(agent, _)| agent)?
    };

    debug!(
        ticket_id = %ticket.ticket_id,
        agent_id = %selected.id,
        current_load = selected.current_load,
        score = selected.skill_match_score(&ticket.category),
        "Selected agent"
    );
    Some(selected)
}
