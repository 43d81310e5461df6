//! Part-writing rules and the engine that runs them.

pub mod engine;
pub mod rule;
pub mod rules;
pub mod types;

pub use engine::RuleEngine;
pub use rule::{FnRule, Rule, RulePriority};
pub use rules::{
    basic_rules, ParallelFifthsRule, ParallelOctavesRule, VoiceCrossingRule, VoiceRangeRule,
};
pub use types::{ValidationError, ValidationResult};
