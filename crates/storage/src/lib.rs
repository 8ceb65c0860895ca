pub mod dto;
pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod services;
pub mod sheets;
pub mod store;

pub use error::{Result, StorageError};
pub use memory::{MemorySeed, MemoryTables};
pub use sheets::{SheetsClient, SheetsConfig};
pub use store::{CellValue, Record, Spreadsheet, Table, TableStore};
