use std::path::Path;

use tokio::fs;

use crate::error::{AppError, AppResult};

/// 创建目录 (已存在则跳过)
pub async fn ensure_dir(path: &Path) -> AppResult<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| AppError::create_dir_failed(path, e))
}

/// 写入文件，覆盖已有内容
pub async fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> AppResult<()> {
    fs::write(path, contents)
        .await
        .map_err(|e| AppError::file_write_failed(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).await.unwrap();
        ensure_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_file(&dir.path().join("missing").join("x.json"), "{}")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("x.json"));
    }
}
