//! Vault hosts: capability contracts plus filesystem and in-memory implementations.

mod contract;
mod fs;
mod memory;

pub use contract::{ContentReader, FileDeleter, FileLister, FileMover};
pub use fs::{DeleteMode, FsVault};
pub use memory::MemoryVault;
