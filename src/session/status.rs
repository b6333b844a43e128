use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    WaitingForOpponent,
    Active,
    Finished,
    /// A participant left before the game ended.
    Abandoned,
}

impl SessionStatus {
    /// No further moves will ever be accepted.
    pub fn is_over(self) -> bool {
        matches!(self, SessionStatus::Finished | SessionStatus::Abandoned)
    }
}
