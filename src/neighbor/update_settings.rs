use serde::{Deserialize, Serialize};

/// How staleness of the neighbor list is judged from particle displacements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebuildTrigger {
    /// Rebuild when the two largest displacements sum past the skin
    #[default]
    TwoLargest,
    /// Rebuild when twice the largest displacement exceeds the skin
    MaxDisplacement,
}

/// Settings for checking and rebuilding a neighbor list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateSettings {
    /// Only check on steps that are a multiple of this
    pub every: usize,
    pub trigger: RebuildTrigger,
}

impl UpdateSettings {
    pub fn new(every: usize, trigger: RebuildTrigger) -> Self {
        Self { every, trigger }
    }
    pub fn check_due(&self, step: usize) -> bool {
        self.every <= 1 || step % self.every == 0
    }
}
impl Default for UpdateSettings {
    fn default() -> Self {
        Self::new(1, RebuildTrigger::default())
    }
}
