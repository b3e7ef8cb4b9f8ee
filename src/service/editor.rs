use crate::error::EditError;
use crate::models::{Bill, BillItem, Participant};
use bigdecimal::BigDecimal;

/// 账单编辑服务 - 参与人/条目的增删与分摊切换
/// 所有被拒绝的操作保持账单原样
pub struct BillEditor;

impl BillEditor {
    /// 新增参与人, 返回分配的ID
    pub fn add_participant(bill: &mut Bill, name: &str) -> i64 {
        let id = next_id(bill.participants.iter().map(|p| p.id));
        bill.participants.push(Participant {
            id,
            name: name.to_string(),
            is_creator: false,
        });
        id
    }

    /// 删除参与人: 最后一人或创建人不可删
    /// 成功后从所有条目的分摊集合中清除该ID
    pub fn remove_participant(bill: &mut Bill, participant_id: i64) -> Result<(), EditError> {
        if bill.participants.len() <= 1 {
            tracing::warn!(
                "Participant {} is the only one left, removal rejected",
                participant_id
            );
            return Err(EditError::LastParticipant);
        }
        let participant = bill
            .participant(participant_id)
            .ok_or(EditError::UnknownParticipant(participant_id))?;
        if participant.is_creator {
            tracing::warn!(
                "Participant {} is the bill creator, removal rejected",
                participant_id
            );
            return Err(EditError::CreatorProtected);
        }

        bill.participants.retain(|p| p.id != participant_id);
        for item in &mut bill.items {
            item.split_with.shift_remove(&participant_id);
        }
        Ok(())
    }

    /// 新增条目, 分摊人选择必须非空且全部存在
    pub fn add_item(
        bill: &mut Bill,
        name: &str,
        base_price: Option<BigDecimal>,
        tax_percent: Option<BigDecimal>,
        service_charge_percent: Option<BigDecimal>,
        split_with: &[i64],
    ) -> Result<i64, EditError> {
        if split_with.is_empty() {
            return Err(EditError::EmptySplitSelection);
        }
        for pid in split_with {
            if bill.participant(*pid).is_none() {
                return Err(EditError::UnknownParticipant(*pid));
            }
        }

        let id = next_id(bill.items.iter().map(|i| i.id));
        bill.items.push(BillItem {
            id,
            name: name.to_string(),
            base_price,
            tax_percent,
            service_charge_percent,
            split_with: split_with.iter().copied().collect(),
        });
        Ok(id)
    }

    /// 删除条目: 最后一条不可删
    pub fn remove_item(bill: &mut Bill, item_id: i64) -> Result<(), EditError> {
        if bill.items.len() <= 1 {
            tracing::warn!("Item {} is the only one left, removal rejected", item_id);
            return Err(EditError::LastItem);
        }
        if bill.item(item_id).is_none() {
            return Err(EditError::UnknownItem(item_id));
        }
        bill.items.retain(|i| i.id != item_id);
        Ok(())
    }

    /// 切换参与人在条目分摊中的成员关系
    /// 移除会清空分摊集合时静默忽略, 返回 Ok(false)
    pub fn toggle_split(
        bill: &mut Bill,
        item_id: i64,
        participant_id: i64,
    ) -> Result<bool, EditError> {
        if bill.participant(participant_id).is_none() {
            return Err(EditError::UnknownParticipant(participant_id));
        }
        let item = bill
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(EditError::UnknownItem(item_id))?;

        if item.split_with.contains(&participant_id) {
            if item.split_with.len() == 1 {
                tracing::debug!(
                    "Item {} would be left with no participants, toggle ignored",
                    item_id
                );
                return Ok(false);
            }
            item.split_with.shift_remove(&participant_id);
        } else {
            item.split_with.insert(participant_id);
        }
        Ok(true)
    }
}

/// ID 分配: max(现有ID) + 1, 空集合从 1 开始; 删除后的ID不回收
fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dec(value: &str) -> BigDecimal {
        value.parse().unwrap()
    }

    fn sample_bill() -> Bill {
        Bill::new(
            "dinner",
            "Food",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            "alice",
        )
    }

    #[test]
    fn test_add_participant_assigns_max_plus_one() {
        let mut bill = sample_bill();
        assert_eq!(BillEditor::add_participant(&mut bill, "bob"), 2);
        assert_eq!(BillEditor::add_participant(&mut bill, "carol"), 3);
    }

    #[test]
    fn test_first_item_gets_id_one() {
        let mut bill = sample_bill();
        let id = BillEditor::add_item(&mut bill, "mains", Some(dec("100")), None, None, &[1]);
        assert_eq!(id, Ok(1));
    }

    #[test]
    fn test_remove_last_participant_rejected() {
        let mut bill = sample_bill();
        assert_eq!(
            BillEditor::remove_participant(&mut bill, 1),
            Err(EditError::LastParticipant)
        );
        assert_eq!(bill.participants.len(), 1);
    }

    #[test]
    fn test_remove_creator_rejected() {
        let mut bill = sample_bill();
        BillEditor::add_participant(&mut bill, "bob");
        assert_eq!(
            BillEditor::remove_participant(&mut bill, 1),
            Err(EditError::CreatorProtected)
        );
        assert_eq!(bill.participants.len(), 2);
    }

    #[test]
    fn test_remove_participant_purges_item_splits() {
        let mut bill = sample_bill();
        let bob = BillEditor::add_participant(&mut bill, "bob");
        let item_id =
            BillEditor::add_item(&mut bill, "mains", Some(dec("100")), None, None, &[1, bob])
                .unwrap();

        assert_eq!(BillEditor::remove_participant(&mut bill, bob), Ok(()));

        let item = bill.item(item_id).unwrap();
        assert!(!item.split_with.contains(&bob));
        assert!(item.split_with.contains(&1));
    }

    #[test]
    fn test_remove_last_item_rejected() {
        let mut bill = sample_bill();
        let item_id =
            BillEditor::add_item(&mut bill, "mains", Some(dec("100")), None, None, &[1]).unwrap();
        assert_eq!(
            BillEditor::remove_item(&mut bill, item_id),
            Err(EditError::LastItem)
        );
        assert_eq!(bill.items.len(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut bill = sample_bill();
        let mains =
            BillEditor::add_item(&mut bill, "mains", Some(dec("100")), None, None, &[1]).unwrap();
        let drinks =
            BillEditor::add_item(&mut bill, "drinks", Some(dec("30")), None, None, &[1]).unwrap();
        assert_eq!(BillEditor::remove_item(&mut bill, mains), Ok(()));
        assert_eq!(bill.items.len(), 1);
        assert_eq!(bill.items[0].id, drinks);
    }

    #[test]
    fn test_toggle_split_adds_and_removes_membership() {
        let mut bill = sample_bill();
        let bob = BillEditor::add_participant(&mut bill, "bob");
        let item_id =
            BillEditor::add_item(&mut bill, "mains", Some(dec("100")), None, None, &[1]).unwrap();

        assert_eq!(BillEditor::toggle_split(&mut bill, item_id, bob), Ok(true));
        assert!(bill.item(item_id).unwrap().split_with.contains(&bob));

        assert_eq!(BillEditor::toggle_split(&mut bill, item_id, bob), Ok(true));
        assert!(!bill.item(item_id).unwrap().split_with.contains(&bob));
    }

    #[test]
    fn test_toggle_sole_member_is_silent_noop() {
        let mut bill = sample_bill();
        let bob = BillEditor::add_participant(&mut bill, "bob");
        let item_id =
            BillEditor::add_item(&mut bill, "mains", Some(dec("100")), None, None, &[bob]).unwrap();

        assert_eq!(BillEditor::toggle_split(&mut bill, item_id, bob), Ok(false));
        let item = bill.item(item_id).unwrap();
        assert_eq!(item.split_with.len(), 1);
        assert!(item.split_with.contains(&bob));
    }

    #[test]
    fn test_add_item_rejects_empty_or_unknown_selection() {
        let mut bill = sample_bill();
        assert_eq!(
            BillEditor::add_item(&mut bill, "mains", Some(dec("100")), None, None, &[]),
            Err(EditError::EmptySplitSelection)
        );
        assert_eq!(
            BillEditor::add_item(&mut bill, "mains", Some(dec("100")), None, None, &[1, 4]),
            Err(EditError::UnknownParticipant(4))
        );
        assert!(bill.items.is_empty());
    }
}
