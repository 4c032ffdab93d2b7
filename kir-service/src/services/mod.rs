pub mod database;
pub mod filter;
pub mod memory;
pub mod metrics;

pub use database::{create_document, get_documents, DocumentStore, MongoStore};
pub use filter::DocumentFilter;
pub use memory::InMemoryStore;
pub use metrics::{get_metrics, init_metrics, record_document_created};
