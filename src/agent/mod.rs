//! Support agent records and the shared agent registry
//!
//! Agents come from two collaborators with different field shapes (the
//! document store roster and the expertise graph). Both are adapted into
//! the one [`Agent`] value type at the boundary; everything downstream
//! speaks this type only.

pub mod registry;

pub use registry::AgentRegistry;

use serde::{Deserialize, Serialize};

/// A support agent as seen by the routing core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Opaque unique identifier
    pub id: String,
    /// Contact email, also the join key against expertise-graph candidates
    pub email: String,
    /// Display name for notifications and dashboards
    pub display_name: String,
    /// Keyword skill tags, matched against ticket categories
    #[serde(default)]
    pub skills: Vec<String>,
    /// Number of currently assigned open tickets
    #[serde(default)]
    pub current_load: u32,
    /// Capacity ceiling, always > 0
    #[serde(default = "default_max_load")]
    pub max_load: u32,
    /// Administratively toggled availability
    #[serde(default = "default_true")]
    pub is_available: bool,
    /// Senior agents absorb escalated tickets
    #[serde(default)]
    pub senior_level: bool,
}

fn default_max_load() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

impl Agent {
    pub fn new(id: impl Into<String>, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: display_name.into(),
            skills: Vec::new(),
            current_load: 0,
            max_load: default_max_load(),
            is_available: true,
            senior_level: false,
        }
    }

    /// Builder method to set skills for fluent construction
    pub fn with_skills(mut self, skills: Vec<String>) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_load(mut self, current: u32, max: u32) -> Self {
        self.current_load = current;
        self.max_load = max;
        self
    }

    pub fn with_seniority(mut self, senior: bool) -> Self {
        self.senior_level = senior;
        self
    }

    pub fn with_availability(mut self, available: bool) -> Self {
        self.is_available = available;
        self
    }

    /// An agent is eligible for new work when available and under capacity.
    pub fn is_eligible(&self) -> bool {
        self.is_available && self.current_load < self.max_load
    }

    /// Count of skill tags that match the ticket category.
    ///
    /// The substring test is bidirectional and case-insensitive: a category
    /// "API Issues" matches the skill "API", and the category "Billing"
    /// matches the skill "Billing and Payments". Either side may be the
    /// abbreviation.
    pub fn skill_match_score(&self, category: &str) -> usize {
        let category = category.to_lowercase();
        self.skills
            .iter()
            .filter(|skill| {
                let skill = skill.to_lowercase();
                category.contains(&skill) || skill.contains(&category)
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligibility_requires_availability_and_capacity() {
        let agent = Agent::new("a1", "a1@synapsolve.com", "Agent One").with_load(2, 5);
        assert!(agent.is_eligible());

        let at_capacity = agent.clone().with_load(5, 5);
        assert!(!at_capacity.is_eligible());

        let toggled_off = agent.with_availability(false);
        assert!(!toggled_off.is_eligible());
    }

    #[test]
    fn test_skill_match_is_case_insensitive() {
        let agent = Agent::new("a1", "a1@synapsolve.com", "Agent One")
            .with_skills(vec!["Billing".to_string()]);
        assert_eq!(agent.skill_match_score("billing"), 1);
        assert_eq!(agent.skill_match_score("BILLING"), 1);
    }

    #[test]
    fn test_skill_match_is_bidirectional() {
        let agent = Agent::new("a1", "a1@synapsolve.com", "Agent One")
            .with_skills(vec!["Technical Support".to_string()]);
        // Category contains the skill
        assert_eq!(agent.skill_match_score("Advanced Technical Support"), 1);
        // Skill contains the category
        assert_eq!(agent.skill_match_score("Technical"), 1);
    }

    #[test]
    fn test_skill_match_counts_all_matching_tags() {
        let agent = Agent::new("a1", "a1@synapsolve.com", "Agent One").with_skills(vec![
            "Billing".to_string(),
            "Billing Disputes".to_string(),
            "Technical Support".to_string(),
        ]);
        assert_eq!(agent.skill_match_score("Billing Disputes"), 2);
    }

    #[test]
    fn test_no_skill_match() {
        let agent = Agent::new("a1", "a1@synapsolve.com", "Agent One")
            .with_skills(vec!["Billing".to_string()]);
        assert_eq!(agent.skill_match_score("Feature Request"), 0);
    }

    #[test]
    fn test_deserialization_fills_defaults() {
        let agent: Agent = serde_json::from_str(
            r#"{"id": "a1", "email": "a1@synapsolve.com", "display_name": "Agent One"}"#,
        )
        .unwrap();
        assert_eq!(agent.current_load, 0);
        assert_eq!(agent.max_load, 5);
        assert!(agent.is_available);
        assert!(!agent.senior_level);
    }
}
