//! Pipeline stage labels.

use serde::{Deserialize, Serialize};

/// The strictly sequential stages of one pipeline run.
///
/// `Failed` is terminal; a failed run restarts from `Ingesting`, there is
/// no checkpoint/resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Idle,
    Ingesting,
    Cleaning,
    Projecting,
    Sorting,
    Filtering,
    Persisting,
    Tiling,
    Done,
    Failed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Ingesting => "ingesting",
            Stage::Cleaning => "cleaning",
            Stage::Projecting => "projecting",
            Stage::Sorting => "sorting",
            Stage::Filtering => "filtering",
            Stage::Persisting => "persisting",
            Stage::Tiling => "tiling",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
