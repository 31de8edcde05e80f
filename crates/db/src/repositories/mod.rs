//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for record store operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod memory;
pub mod resource;

pub use memory::MemoryResourceRepository;
pub use resource::ResourceRepository;
