pub mod memory;
pub mod postgres;

pub use memory::InMemoryAccountDirectory;
pub use postgres::PostgresAccountDirectory;
