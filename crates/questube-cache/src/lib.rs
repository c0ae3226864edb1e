//! Cache implementations for resolved media formats.

pub mod memory;

pub use memory::MemoryFormatCache;
