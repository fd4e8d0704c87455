pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileRecordRepository;
pub use memory::InMemoryRecordRepository;
pub use traits::RecordRepository;
