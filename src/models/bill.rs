use crate::error::ValidationError;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 参与人
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub name: String,
    pub is_creator: bool,
}

impl Participant {
    /// 展示名 (名字为空时回退为 "Person {id}")
    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Person {}", self.id)
        } else {
            self.name.clone()
        }
    }
}

/// 账单条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillItem {
    pub id: i64,
    pub name: String,
    pub base_price: Option<BigDecimal>,             // 基础金额
    pub tax_percent: Option<BigDecimal>,            // 税率 (%)
    pub service_charge_percent: Option<BigDecimal>, // 服务费率 (%)
    pub split_with: IndexSet<i64>,                  // 分摊人ID (保序去重)
}

/// 账单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub name: String,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    pub participants: Vec<Participant>,
    pub items: Vec<BillItem>,
}

impl Bill {
    /// 新建账单, 创建人自动成为 1 号参与人
    pub fn new(name: &str, category: &str, date: NaiveDate, creator_name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
            date,
            participants: vec![Participant {
                id: 1,
                name: creator_name.to_string(),
                is_creator: true,
            }],
            items: Vec::new(),
        }
    }

    pub fn participant(&self, participant_id: i64) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == participant_id)
    }

    pub fn item(&self, item_id: i64) -> Option<&BillItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// 结构校验: 从后端载入账单时在入口处调用
    /// 检查参与人/条目ID唯一、创建人唯一、分摊集合非空且引用存在的参与人
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut participant_ids = HashSet::new();
        for p in &self.participants {
            if !participant_ids.insert(p.id) {
                return Err(ValidationError::DuplicateParticipant(p.id));
            }
        }

        let creators = self.participants.iter().filter(|p| p.is_creator).count();
        if creators != 1 {
            return Err(ValidationError::CreatorCount(creators));
        }

        let mut item_ids = HashSet::new();
        for item in &self.items {
            if !item_ids.insert(item.id) {
                return Err(ValidationError::DuplicateItem(item.id));
            }
            if item.split_with.is_empty() {
                return Err(ValidationError::EmptySplit(item.id));
            }
            for pid in &item.split_with {
                if !participant_ids.contains(pid) {
                    return Err(ValidationError::UnknownSplitParticipant {
                        item_id: item.id,
                        participant_id: *pid,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_display_name_falls_back_for_empty_names() {
        let unnamed = Participant {
            id: 7,
            name: "  ".to_string(),
            is_creator: false,
        };
        assert_eq!(unnamed.display_name(), "Person 7");

        let named = Participant {
            id: 7,
            name: "dana".to_string(),
            is_creator: false,
        };
        assert_eq!(named.display_name(), "dana");
    }

    #[test]
    fn test_new_bill_seeds_creator() {
        let bill = Bill::new("dinner", "Food", date(), "alice");
        assert_eq!(bill.participants.len(), 1);
        assert_eq!(bill.participants[0].id, 1);
        assert!(bill.participants[0].is_creator);
        assert!(bill.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_participant() {
        let mut bill = Bill::new("dinner", "Food", date(), "alice");
        bill.participants.push(Participant {
            id: 1,
            name: "bob".to_string(),
            is_creator: false,
        });
        assert_eq!(
            bill.validate(),
            Err(ValidationError::DuplicateParticipant(1))
        );
    }

    #[test]
    fn test_validate_rejects_unknown_split_reference() {
        let mut bill = Bill::new("dinner", "Food", date(), "alice");
        bill.items.push(BillItem {
            id: 1,
            name: "mains".to_string(),
            base_price: None,
            tax_percent: None,
            service_charge_percent: None,
            split_with: [1, 9].into_iter().collect(),
        });
        assert_eq!(
            bill.validate(),
            Err(ValidationError::UnknownSplitParticipant {
                item_id: 1,
                participant_id: 9,
            })
        );
    }

    #[test]
    fn test_validate_rejects_second_creator() {
        let mut bill = Bill::new("dinner", "Food", date(), "alice");
        bill.participants.push(Participant {
            id: 2,
            name: "bob".to_string(),
            is_creator: true,
        });
        assert_eq!(bill.validate(), Err(ValidationError::CreatorCount(2)));
    }
}
