pub mod bill;
pub mod payload;
pub mod payment;
pub mod summary;

pub use bill::{Bill, BillItem, Participant};
pub use payload::{BillItemPayload, BillPayload, ItemSplitPayload, ParticipantPayload};
pub use payment::{BillPaymentState, PaymentSplit, PaymentStatus, PaymentTotals, SettlementStatus};
pub use summary::ParticipantShare;
