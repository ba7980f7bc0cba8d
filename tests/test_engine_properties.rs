//! Property tests for the selection engine's guarantees: never assigns
//! beyond capacity, honors escalation, degrades to load balancing, and
//! stays deterministic.

use proptest::prelude::*;
use synapsolve_routing::agent::Agent;
use synapsolve_routing::routing::select_agent;
use synapsolve_routing::ticket::{Priority, Sentiment, TicketDescriptor};

fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
        Just(Priority::Urgent),
    ]
}

fn arb_sentiment() -> impl Strategy<Value = Option<Sentiment>> {
    prop_oneof![
        Just(None),
        Just(Some(Sentiment::Positive)),
        Just(Some(Sentiment::Neutral)),
        Just(Some(Sentiment::Negative)),
    ]
}

fn arb_skills() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            Just("Technical Support".to_string()),
            Just("Billing".to_string()),
            Just("Account Issues".to_string()),
            Just("Bug Report".to_string()),
            Just("API".to_string()),
        ],
        0..4,
    )
}

fn arb_pool() -> impl Strategy<Value = Vec<Agent>> {
    prop::collection::vec(
        (
            arb_skills(),
            0u32..12,
            1u32..10,
            any::<bool>(),
            any::<bool>(),
        ),
        0..8,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (skills, current_load, max_load, is_available, senior_level))| {
                Agent::new(
                    format!("agent-{i}"),
                    format!("agent-{i}@synapsolve.com"),
                    format!("Agent {i}"),
                )
                .with_skills(skills)
                .with_load(current_load, max_load)
                .with_availability(is_available)
                .with_seniority(senior_level)
            })
            .collect()
    })
}

fn arb_ticket() -> impl Strategy<Value = TicketDescriptor> {
    (
        prop_oneof![
            Just("Technical Support".to_string()),
            Just("Billing".to_string()),
            Just("API Issues".to_string()),
            Just("Something Unmatched".to_string()),
        ],
        arb_priority(),
        arb_sentiment(),
    )
        .prop_map(|(category, priority, sentiment)| {
            TicketDescriptor::new("ticket-prop", "prop test", category, priority, sentiment)
        })
}

proptest! {
    #[test]
    fn selected_agent_is_always_eligible(ticket in arb_ticket(), pool in arb_pool()) {
        if let Some(agent) = select_agent(&ticket, &pool) {
            prop_assert!(agent.is_available);
            prop_assert!(agent.current_load < agent.max_load);
        }
    }

    #[test]
    fn escalation_picks_a_senior_when_one_is_eligible(
        ticket in arb_ticket(),
        pool in arb_pool(),
    ) {
        let senior_eligible = pool.iter().any(|a| a.is_eligible() && a.senior_level);
        if ticket.needs_escalation() && senior_eligible {
            let selected = select_agent(&ticket, &pool);
            prop_assert!(selected.is_some());
            prop_assert!(selected.unwrap().senior_level);
        }
    }

    #[test]
    fn no_skill_overlap_selects_least_loaded(pool in arb_pool()) {
        let ticket = TicketDescriptor::new(
            "ticket-prop",
            "prop test",
            // Nothing in the skill universe matches this
            "Zzz Completely Unrelated Zzz",
            Priority::Medium,
            Some(Sentiment::Neutral),
        );

        let eligible: Vec<&Agent> = pool.iter().filter(|a| a.is_eligible()).collect();
        let selected = select_agent(&ticket, &pool);

        if eligible.is_empty() {
            prop_assert!(selected.is_none());
        } else {
            let min_load = eligible.iter().map(|a| a.current_load).min().unwrap();
            prop_assert_eq!(selected.unwrap().current_load, min_load);
        }
    }

    #[test]
    fn empty_or_ineligible_pool_returns_none(ticket in arb_ticket(), pool in arb_pool()) {
        if pool.iter().all(|a| !a.is_eligible()) {
            prop_assert!(select_agent(&ticket, &pool).is_none());
        }
    }

    #[test]
    fn selection_is_idempotent(ticket in arb_ticket(), pool in arb_pool()) {
        let first = select_agent(&ticket, &pool).map(|a| a.id.clone());
        let second = select_agent(&ticket, &pool).map(|a| a.id.clone());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn selection_never_mutates_the_pool(ticket in arb_ticket(), pool in arb_pool()) {
        let before = pool.clone();
        let _ = select_agent(&ticket, &pool);
        prop_assert_eq!(pool, before);
    }
}
