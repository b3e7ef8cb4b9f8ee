use serde::{Deserialize, Serialize};

/// 单个参与人的分摊金额
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantShare {
    pub name: String,
    pub amount: i64,
}
