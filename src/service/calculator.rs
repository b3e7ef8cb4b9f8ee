use crate::error::SplitError;
use crate::models::{Bill, BillItem, ParticipantShare};
use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};
use indexmap::IndexMap;

/// 拆分计算服务 - 对账单做纯算术计算, 无状态无副作用
pub struct SplitCalculator;

impl SplitCalculator {
    /// 金额取整: 取到整数货币单位, 0.5 远离零
    pub fn round_amount(value: &BigDecimal) -> i64 {
        value
            .with_scale_round(0, RoundingMode::HalfUp)
            .to_i64()
            .unwrap_or(0)
    }

    /// 条目税额 = round(基础金额 * 税率 / 100)
    pub fn item_tax_amount(
        base_price: Option<&BigDecimal>,
        tax_percent: Option<&BigDecimal>,
    ) -> i64 {
        let base = effective(base_price);
        let percent = effective(tax_percent);
        Self::round_amount(&percent_amount(&base, &percent))
    }

    /// 条目服务费 = round(基础金额 * 服务费率 / 100)
    pub fn item_service_amount(
        base_price: Option<&BigDecimal>,
        service_percent: Option<&BigDecimal>,
    ) -> i64 {
        let base = effective(base_price);
        let percent = effective(service_percent);
        Self::round_amount(&percent_amount(&base, &percent))
    }

    /// 条目合计
    /// 税费/服务费分量不预先取整, 三项求和后再取整一次;
    /// 因此展示用的分量之和与合计可能相差一个货币单位
    pub fn item_total(item: &BillItem) -> i64 {
        let base = effective(item.base_price.as_ref());
        let tax = percent_amount(&base, &effective(item.tax_percent.as_ref()));
        let service = percent_amount(&base, &effective(item.service_charge_percent.as_ref()));
        Self::round_amount(&(&base + &tax + &service))
    }

    /// 整单合计 (条目合计已是整数, 直接求和)
    pub fn grand_total(items: &[BillItem]) -> i64 {
        items.iter().map(Self::item_total).sum()
    }

    /// 每人分摊 = round(条目合计 / 分摊人数)
    pub fn amount_per_participant(item: &BillItem) -> Result<i64, SplitError> {
        let count = item.split_with.len();
        if count == 0 {
            return Err(SplitError::InvalidSplit(item.id));
        }
        let total = BigDecimal::from(Self::item_total(item));
        Ok(Self::round_amount(&(&total / BigDecimal::from(count as i64))))
    }

    /// 每人分摊汇总, 按参与人插入顺序输出
    /// 每条目的人均金额只计算一次, 均摊不尽时不做差额重分配
    pub fn participant_summary(
        bill: &Bill,
    ) -> Result<IndexMap<i64, ParticipantShare>, SplitError> {
        let mut summary: IndexMap<i64, ParticipantShare> =
            IndexMap::with_capacity(bill.participants.len());
        for p in &bill.participants {
            summary.insert(
                p.id,
                ParticipantShare {
                    name: p.name.clone(),
                    amount: 0,
                },
            );
        }

        for item in &bill.items {
            let per_person = Self::amount_per_participant(item)?;
            for pid in &item.split_with {
                if let Some(share) = summary.get_mut(pid) {
                    share.amount += per_person;
                }
            }
        }

        Ok(summary)
    }
}

/// 数值清洗: 缺失或为负按 0 处理
fn effective(value: Option<&BigDecimal>) -> BigDecimal {
    match value {
        Some(v) if *v > BigDecimal::zero() => v.clone(),
        _ => BigDecimal::zero(),
    }
}

/// 未取整的百分比金额
fn percent_amount(base: &BigDecimal, percent: &BigDecimal) -> BigDecimal {
    base * percent / BigDecimal::from(100)
}
