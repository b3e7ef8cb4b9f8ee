pub mod error;
pub mod export;
pub mod models;
pub mod service;

pub use error::{EditError, SplitError, ValidationError};
pub use export::export_settlement_to_csv;
pub use service::{BillEditor, SettlementService, SplitCalculator};
