use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 支付状态 (后端持久化值)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

/// 后端持久化的分摊记录 (只读输入)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSplit {
    pub item: i64,
    pub participant: i64,
    pub share_amount: BigDecimal,
    pub payment_status: PaymentStatus,
}

/// 单个参与人的已付/待付汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTotals {
    pub paid: i64,
    pub pending: i64,
}

/// 整单结清状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    Paid,
    Partial,
    Unpaid,
}

impl SettlementStatus {
    /// 三分类: 无待付即结清; 有待付且有已付为部分支付; 其余未支付
    pub fn classify(paid: i64, pending: i64) -> Self {
        if pending == 0 {
            SettlementStatus::Paid
        } else if paid > 0 {
            SettlementStatus::Partial
        } else {
            SettlementStatus::Unpaid
        }
    }
}

/// 整单支付汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillPaymentState {
    pub paid: i64,
    pub pending: i64,
    pub status: SettlementStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(SettlementStatus::classify(0, 0), SettlementStatus::Paid);
        assert_eq!(SettlementStatus::classify(50, 0), SettlementStatus::Paid);
        assert_eq!(SettlementStatus::classify(50, 10), SettlementStatus::Partial);
        assert_eq!(SettlementStatus::classify(0, 10), SettlementStatus::Unpaid);
    }
}
