pub mod memory;

pub use memory::RingStore;
