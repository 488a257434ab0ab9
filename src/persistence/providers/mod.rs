pub mod memory;

pub use memory::InMemoryProvider;
