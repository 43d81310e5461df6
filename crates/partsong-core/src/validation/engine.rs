//! The chapter-cumulative rule engine.
//!
//! Rules are registered under the chapter that introduces them. Validating
//! "at chapter N" runs every rule from chapters 1 through N, so a student
//! working on a later chapter is still held to everything learned before.
//!
//! # Example
//!
//! ```
//! use partsong_core::validation::RuleEngine;
//!
//! let engine = RuleEngine::with_basic_rules();
//! assert_eq!(engine.rules_for_chapter(1).len(), 4);
//! assert!(engine.rules_for_chapter(0).is_empty());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use super::rule::Rule;
use super::rules::basic_rules;
use super::types::{ValidationError, ValidationResult};
use crate::model::ChordProgression;

/// Registry of rules keyed by chapter.
#[derive(Default)]
pub struct RuleEngine {
    chapters: BTreeMap<u32, Vec<Box<dyn Rule>>>,
}

impl fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: BTreeMap<u32, Vec<&str>> = self
            .chapters
            .iter()
            .map(|(chapter, rules)| (*chapter, rules.iter().map(|r| r.id()).collect()))
            .collect();
        f.debug_struct("RuleEngine").field("chapters", &ids).finish()
    }
}

impl RuleEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine preloaded with the four chapter 1 rules.
    #[must_use]
    pub fn with_basic_rules() -> Self {
        let mut engine = Self::new();
        engine.register_all(basic_rules());
        engine
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Add a rule under its own chapter.
    ///
    /// A rule with the same id is replaced. Within the same chapter the
    /// replacement takes the old rule's slot; a replacement for another
    /// chapter leaves its old chapter and is appended to the new one. The
    /// chapter's rules stay sorted by ascending priority; equal priorities
    /// keep registration order.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        let id = rule.id().to_string();
        let chapter = rule.chapter();
        log::debug!("Registering rule {id} (chapter {chapter}, priority {})", rule.priority());

        for (bucket, rules) in &mut self.chapters {
            if *bucket != chapter {
                rules.retain(|existing| existing.id() != id);
            }
        }
        self.chapters.retain(|_, rules| !rules.is_empty());

        let rules = self.chapters.entry(chapter).or_default();
        match rules.iter().position(|existing| existing.id() == id) {
            Some(slot) => rules[slot] = rule,
            None => rules.push(rule),
        }
        rules.sort_by_key(|r| r.priority());
    }

    pub fn register_all(&mut self, rules: impl IntoIterator<Item = Box<dyn Rule>>) {
        for rule in rules {
            self.register(rule);
        }
    }

    /// Drop every registered rule.
    pub fn clear(&mut self) {
        self.chapters.clear();
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Every rule active at `chapter`: the union of chapters `1..=chapter`,
    /// sorted by ascending priority with ties in chapter then registration
    /// order.
    #[must_use]
    pub fn rules_for_chapter(&self, chapter: u32) -> Vec<&dyn Rule> {
        if chapter == 0 {
            return Vec::new();
        }
        let mut rules: Vec<&dyn Rule> = self
            .chapters
            .range(1..=chapter)
            .flat_map(|(_, rules)| rules.iter().map(|rule| &**rule))
            .collect();
        rules.sort_by_key(|r| r.priority());
        rules
    }

    /// Whether any rule is registered at exactly `chapter`.
    #[must_use]
    pub fn has_rules_for_chapter(&self, chapter: u32) -> bool {
        self.chapters.get(&chapter).is_some_and(|rules| !rules.is_empty())
    }

    #[must_use]
    pub fn rule(&self, id: &str) -> Option<&dyn Rule> {
        self.chapters
            .values()
            .flatten()
            .find(|r| r.id() == id)
            .map(|rule| &**rule)
    }

    /// All registered rules, by chapter then priority.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.chapters.values().flatten().map(|rule| &**rule)
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.chapters.values().map(Vec::len).sum()
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Run every rule active at `chapter` over every chord of `progression`.
    ///
    /// Errors come back sorted by their rule's priority. Within one priority
    /// they appear in chord order, then rule order.
    #[must_use]
    pub fn validate(&self, progression: &ChordProgression, chapter: u32) -> ValidationResult {
        let rules = self.rules_for_chapter(chapter);
        if rules.is_empty() || progression.len() <= 1 {
            return ValidationResult::success();
        }

        let mut found: Vec<(u32, ValidationError)> = Vec::new();
        for chord_index in 0..progression.len() {
            for rule in &rules {
                let priority = rule.priority();
                found.extend(
                    rule.validate(progression, chord_index)
                        .errors
                        .into_iter()
                        .map(|error| (priority, error)),
                );
            }
        }
        found.sort_by_key(|(priority, _)| *priority);

        log::debug!(
            "Validated {} chord(s) against {} rule(s) at chapter {chapter}: {} error(s)",
            progression.len(),
            rules.len(),
            found.len()
        );

        ValidationResult::from_errors(found.into_iter().map(|(_, error)| error).collect())
    }
}
