//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_backend;
mod supabase_client;

pub use in_memory_backend::{IN_MEMORY_OBJECT_ROUTE, InMemoryBackend, StoredObject};
pub use supabase_client::{SupabaseClient, SupabaseConnector};
