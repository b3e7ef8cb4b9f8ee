use crate::error::ValidationError;
use crate::models::{Bill, BillItem, Participant, PaymentSplit, PaymentStatus};
use crate::service::SplitCalculator;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 账单持久化载荷 (与后端创建/更新接口字段一一对应)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub date: NaiveDate,
    pub total_amount: i64,
    pub participants: Vec<ParticipantPayload>,
    pub items: Vec<BillItemPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantPayload {
    pub id: i64,
    pub name: String,
    pub is_creator: bool,
}

/// 条目载荷, 携带计算后的税费/服务费/合计金额
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItemPayload {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub base_price: Option<BigDecimal>,
    #[serde(default)]
    pub tax_percent: Option<BigDecimal>,
    #[serde(default)]
    pub service_charge_percent: Option<BigDecimal>,
    pub tax_amount: i64,
    pub service_amount: i64,
    pub total_amount: i64,
    pub split_with: Vec<i64>,
    /// 分摊记录只在读取方向出现
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub splits: Vec<ItemSplitPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSplitPayload {
    pub participant: i64,
    pub share_amount: BigDecimal,
    pub payment_status: PaymentStatus,
}

impl BillPayload {
    /// 由账单构建创建/更新载荷 (逐条目计算金额)
    pub fn from_bill(bill: &Bill) -> Self {
        Self {
            name: bill.name.clone(),
            description: bill.description.clone(),
            category: bill.category.clone(),
            date: bill.date,
            total_amount: SplitCalculator::grand_total(&bill.items),
            participants: bill
                .participants
                .iter()
                .map(|p| ParticipantPayload {
                    id: p.id,
                    name: p.name.clone(),
                    is_creator: p.is_creator,
                })
                .collect(),
            items: bill.items.iter().map(BillItemPayload::from_item).collect(),
        }
    }

    /// 载入为账单与分摊记录, 入口处做结构校验
    pub fn into_bill(self) -> Result<(Bill, Vec<PaymentSplit>), ValidationError> {
        let mut splits = Vec::new();
        for item in &self.items {
            for split in &item.splits {
                splits.push(PaymentSplit {
                    item: item.id,
                    participant: split.participant,
                    share_amount: split.share_amount.clone(),
                    payment_status: split.payment_status,
                });
            }
        }

        let bill = Bill {
            name: self.name,
            description: self.description,
            category: self.category,
            date: self.date,
            participants: self
                .participants
                .into_iter()
                .map(|p| Participant {
                    id: p.id,
                    name: p.name,
                    is_creator: p.is_creator,
                })
                .collect(),
            items: self
                .items
                .into_iter()
                .map(|i| BillItem {
                    id: i.id,
                    name: i.name,
                    base_price: i.base_price,
                    tax_percent: i.tax_percent,
                    service_charge_percent: i.service_charge_percent,
                    split_with: i.split_with.into_iter().collect(),
                })
                .collect(),
        };
        bill.validate()?;

        Ok((bill, splits))
    }
}

impl BillItemPayload {
    fn from_item(item: &BillItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            base_price: item.base_price.clone(),
            tax_percent: item.tax_percent.clone(),
            service_charge_percent: item.service_charge_percent.clone(),
            tax_amount: SplitCalculator::item_tax_amount(
                item.base_price.as_ref(),
                item.tax_percent.as_ref(),
            ),
            service_amount: SplitCalculator::item_service_amount(
                item.base_price.as_ref(),
                item.service_charge_percent.as_ref(),
            ),
            total_amount: SplitCalculator::item_total(item),
            split_with: item.split_with.iter().copied().collect(),
            splits: Vec::new(),
        }
    }
}
