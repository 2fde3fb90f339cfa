//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::info;

/// Ensure the data directory exists, creating it (and parents) if needed.
pub async fn ensure_data_dir(data_dir: &Path) -> anyhow::Result<()> {
    if tokio::fs::metadata(data_dir).await.is_err() {
        info!(data_dir = %data_dir.display(), "data directory missing; creating it");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_nested_data_dir() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("shop_env_{}", uuid::Uuid::new_v4()));
        let nested = root.join("a").join("b");
        ensure_data_dir(&nested).await?;
        assert!(tokio::fs::metadata(&nested).await?.is_dir());

        // idempotent
        ensure_data_dir(&nested).await?;

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
