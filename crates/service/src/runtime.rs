//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so startup prepares storage through
//! the same crate that owns the store files.

use std::path::Path;

/// Ensure the directory holding the store files exists.
pub async fn ensure_env(data_dir: &Path) -> anyhow::Result<()> {
    common::env::ensure_data_dir(data_dir).await
}
