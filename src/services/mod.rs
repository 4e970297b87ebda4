// Service exports
pub mod records;
pub mod writeback;

pub use records::format_records;
pub use writeback::{chunk, plan_link_batches, LinkUpdate, DEFAULT_WRITE_BATCH_SIZE};
