use crate::models::{Bill, PaymentSplit};
use crate::service::{SettlementService, SplitCalculator};
use csv::Writer;
use std::fs::File;
use std::path::Path;

/// 导出每人分摊与结清状态到 CSV 文件
pub fn export_settlement_to_csv(
    bill: &Bill,
    splits: &[PaymentSplit],
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let summary = SplitCalculator::participant_summary(bill)?;
    tracing::debug!("开始导出分摊汇总, {} 个参与人", summary.len());

    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(["participant_id", "name", "share_amount", "paid", "pending"])?;

    for (participant_id, share) in &summary {
        let totals = SettlementService::participant_paid_and_pending(bill, *participant_id, splits);
        let display_name = bill
            .participant(*participant_id)
            .map(|p| p.display_name())
            .unwrap_or_default();
        writer.write_record(&[
            participant_id.to_string(),
            display_name,
            share.amount.to_string(),
            totals.paid.to_string(),
            totals.pending.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
