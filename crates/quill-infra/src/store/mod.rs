//! Post store implementations.

mod memory;
mod mongo;

pub use memory::InMemoryPostStore;
pub use mongo::MongoPostStore;
