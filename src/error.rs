use thiserror::Error;

/// 拆分计算错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// 条目的分摊集合为空, 无法按人数均摊
    #[error("item {0} has an empty split set")]
    InvalidSplit(i64),
}

/// 编辑操作被拒绝 (账单保持原样)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("cannot remove the last remaining participant")]
    LastParticipant,

    #[error("cannot remove the bill creator")]
    CreatorProtected,

    #[error("cannot remove the last remaining item")]
    LastItem,

    #[error("participant {0} not found")]
    UnknownParticipant(i64),

    #[error("item {0} not found")]
    UnknownItem(i64),

    #[error("an item must be split with at least one participant")]
    EmptySplitSelection,
}

/// 载入校验错误 (从后端读入账单时的结构检查)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duplicate participant id {0}")]
    DuplicateParticipant(i64),

    #[error("duplicate item id {0}")]
    DuplicateItem(i64),

    #[error("item {0} has an empty split set")]
    EmptySplit(i64),

    #[error("item {item_id} split references unknown participant {participant_id}")]
    UnknownSplitParticipant { item_id: i64, participant_id: i64 },

    #[error("bill must have exactly one creator, found {0}")]
    CreatorCount(usize),
}
