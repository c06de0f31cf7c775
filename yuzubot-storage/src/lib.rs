//! Storage crate: the bot's hosted tables behind small repository types.
//!
//! ## Modules
//!
//! - [`models`] – SnapshotRecord, MemberCount
//! - [`fortune_repo`] – one fortune draw per (sender, day)
//! - [`snapshot_repo`] – insert-only room-counter snapshots
//! - [`counts_repo`] – per (room, sender, day) message counter
//! - [`time_report_repo`] – rooms opted into the hourly time report
//! - [`sqlite_pool`] – SqlitePoolManager

mod counts_repo;
mod fortune_repo;
mod models;
mod snapshot_repo;
mod sqlite_pool;
mod time_report_repo;


pub use counts_repo::MessageCountRepository;
pub use fortune_repo::FortuneRepository;
pub use models::{MemberCount, SnapshotRecord};
pub use snapshot_repo::SnapshotRepository;
pub use sqlite_pool::SqlitePoolManager;
pub use time_report_repo::TimeReportRepository;
