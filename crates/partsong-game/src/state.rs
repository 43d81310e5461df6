use partsong_core::{ChordProgression, ExerciseId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelStatus {
    #[default]
    Locked,
    Unlocked,
    InProgress,
    Completed,
}

impl fmt::Display for LevelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// A player's record on one level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub status: LevelStatus,

    /// Score of the latest submission.
    pub score: u32,

    /// Best score of any completing submission.
    pub best_score: u32,

    /// Times the level was started.
    pub attempts: u32,

    /// Work in progress, or the latest submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_progression: Option<ChordProgression>,
}

impl LevelProgress {
    #[must_use]
    pub fn with_status(status: LevelStatus) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }
}

/// Progress across every level of a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Level most recently started.
    pub current_level: Option<ExerciseId>,

    pub levels: BTreeMap<ExerciseId, LevelProgress>,

    /// Sum of first-completion scores.
    pub total_score: u32,

    /// Number of distinct levels completed.
    pub completed_levels: u32,
}

impl GameState {
    /// A fresh game with two levels for each of `chapters` chapters. Only
    /// level 1-1 starts unlocked.
    #[must_use]
    pub fn new(chapters: u32) -> Self {
        Self::with_levels(
            (1..=chapters)
                .flat_map(|chapter| [ExerciseId::new(chapter, 1), ExerciseId::new(chapter, 2)]),
        )
    }

    /// A fresh game over the given levels. Only level 1-1 starts unlocked.
    #[must_use]
    pub fn with_levels(ids: impl IntoIterator<Item = ExerciseId>) -> Self {
        let first = ExerciseId::new(1, 1);
        let levels = ids
            .into_iter()
            .map(|id| {
                let status = if id == first {
                    LevelStatus::Unlocked
                } else {
                    LevelStatus::Locked
                };
                (id, LevelProgress::with_status(status))
            })
            .collect();
        Self {
            levels,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn level(&self, id: ExerciseId) -> Option<&LevelProgress> {
        self.levels.get(&id)
    }

    pub fn level_mut(&mut self, id: ExerciseId) -> Option<&mut LevelProgress> {
        self.levels.get_mut(&id)
    }

    #[must_use]
    pub fn is_unlocked(&self, id: ExerciseId) -> bool {
        self.level(id).is_some_and(|l| l.status != LevelStatus::Locked)
    }

    #[must_use]
    pub fn is_completed(&self, id: ExerciseId) -> bool {
        self.level(id).is_some_and(|l| l.status == LevelStatus::Completed)
    }

    /// Every level that is not locked, in order.
    #[must_use]
    pub fn unlocked(&self) -> Vec<ExerciseId> {
        self.ids_where(|l| l.status != LevelStatus::Locked)
    }

    /// Every completed level, in order.
    #[must_use]
    pub fn completed(&self) -> Vec<ExerciseId> {
        self.ids_where(|l| l.status == LevelStatus::Completed)
    }

    fn ids_where(&self, keep: impl Fn(&LevelProgress) -> bool) -> Vec<ExerciseId> {
        self.levels
            .iter()
            .filter(|(_, level)| keep(level))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Unlock `id` if it exists and is locked. Returns whether it changed.
    pub(crate) fn unlock(&mut self, id: ExerciseId) -> bool {
        match self.level_mut(id) {
            Some(level) if level.status == LevelStatus::Locked => {
                level.status = LevelStatus::Unlocked;
                true
            }
            _ => false,
        }
    }
}
