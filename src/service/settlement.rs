use crate::models::{
    Bill, BillPaymentState, PaymentSplit, PaymentStatus, PaymentTotals, SettlementStatus,
};
use crate::service::SplitCalculator;
use bigdecimal::{BigDecimal, Zero};

/// 结算服务 - 基于后端分摊记录的已付/待付汇总
pub struct SettlementService;

impl SettlementService {
    /// 单个参与人的已付/待付金额
    /// 创建人的份额一律视为已结清 (固定业务规则, 不依据记录状态)
    pub fn participant_paid_and_pending(
        bill: &Bill,
        participant_id: i64,
        splits: &[PaymentSplit],
    ) -> PaymentTotals {
        let mut paid = BigDecimal::zero();
        let mut pending = BigDecimal::zero();
        for split in splits.iter().filter(|s| s.participant == participant_id) {
            match split.payment_status {
                PaymentStatus::Completed => paid += &split.share_amount,
                PaymentStatus::Pending => pending += &split.share_amount,
            }
        }

        let is_creator = bill
            .participant(participant_id)
            .map(|p| p.is_creator)
            .unwrap_or(false);
        if is_creator {
            let owed = &paid + &pending;
            return PaymentTotals {
                paid: SplitCalculator::round_amount(&owed),
                pending: 0,
            };
        }

        PaymentTotals {
            paid: SplitCalculator::round_amount(&paid),
            pending: SplitCalculator::round_amount(&pending),
        }
    }

    /// 整单支付汇总与三分类状态
    pub fn bill_payment_status(bill: &Bill, splits: &[PaymentSplit]) -> BillPaymentState {
        let mut paid = 0i64;
        let mut pending = 0i64;
        for p in &bill.participants {
            let totals = Self::participant_paid_and_pending(bill, p.id, splits);
            paid += totals.paid;
            pending += totals.pending;
        }

        BillPaymentState {
            paid,
            pending,
            status: SettlementStatus::classify(paid, pending),
        }
    }
}
