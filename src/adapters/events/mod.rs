//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus with event capture

mod in_memory;

pub use in_memory::InMemoryEventBus;
