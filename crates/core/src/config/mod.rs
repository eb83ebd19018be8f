//! Configuration loading, schema definitions and storage-root resolution

mod loader;
mod root;
mod schema;

pub use loader::Config;
pub use root::{default_data_dir, expand_path, resolve_storage_root};
pub use schema::*;
