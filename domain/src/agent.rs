//! Agent roles and pipeline stages.
//!
//! Each [`AgentRole`] is one LLM invocation with a fixed persona and its
//! own sampling temperature. The Generator runs hot so drafts vary; the
//! Marker runs cool so verdicts are consistent; the Refiner runs cold so
//! the rewrite tracks the critique faithfully.

use serde::{Deserialize, Serialize};

/// The persona an LLM session is created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentRole {
    /// Drafts questions from the request (and retrieved context).
    Generator,
    /// Critiques a draft against the marking rubric.
    Marker,
    /// Rewrites a draft to resolve every critique point.
    Refiner,
}

impl AgentRole {
    /// Sampling temperature for this role.
    pub fn temperature(&self) -> f32 {
        match self {
            AgentRole::Generator => 0.7,
            AgentRole::Marker => 0.2,
            AgentRole::Refiner => 0.0,
        }
    }

    /// Stable identifier used in logs and transcripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Generator => "generator",
            AgentRole::Marker => "marker",
            AgentRole::Refiner => "refiner",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stage of the document-grounded pipeline.
///
/// The pipeline is linear with one conditional branch:
/// `Retrieve → Generate → Critique → [accepted?] → done | Refine → done`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Retrieve,
    Generate,
    Critique,
    Refine,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Retrieve => "retrieve",
            Stage::Generate => "generate",
            Stage::Critique => "critique",
            Stage::Refine => "refine",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_temperatures_ordered() {
        // The chain cools down stage by stage
        assert!(AgentRole::Generator.temperature() > AgentRole::Marker.temperature());
        assert!(AgentRole::Marker.temperature() > AgentRole::Refiner.temperature());
        assert_eq!(AgentRole::Refiner.temperature(), 0.0);
    }

    #[test]
    fn test_display_identifiers() {
        assert_eq!(AgentRole::Generator.to_string(), "generator");
        assert_eq!(Stage::Critique.to_string(), "critique");
    }
}
