pub mod identity;
pub mod memory;
pub mod todo;

pub use identity::PostgresIdentityRepository;
pub use memory::InMemoryIdentityRepository;
pub use memory::InMemoryTodoRepository;
pub use todo::PostgresTodoRepository;
