//! Release archive download

use crate::error::{InstallError, SourceError};
use crate::progress::Progress;
use crate::registry::HttpClient;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Stream `url` into `dest`, reporting bytes to `progress`.
///
/// Returns the number of bytes written.
pub async fn download_archive(
    client: &HttpClient,
    url: &str,
    dest: &Path,
    progress: &mut Progress,
) -> Result<u64, InstallError> {
    tracing::info!("downloading {}", url);

    let mut response = client.get(url).await.map_err(|e| match e {
        SourceError::NotFound { url } => InstallError::ArchiveNotFound { url },
        other => InstallError::download_failed(url, other.to_string()),
    })?;

    let mut file = tokio::fs::File::create(dest)
        .await
        .map_err(|e| InstallError::io(dest, e))?;

    progress.start_download(response.content_length(), &format!("Downloading {}", url));

    let mut written = 0u64;
    loop {
        let chunk = match response.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => {
                progress.finish_and_clear();
                return Err(InstallError::download_failed(url, e.to_string()));
            }
        };

        file.write_all(&chunk)
            .await
            .map_err(|e| InstallError::io(dest, e))?;
        written += chunk.len() as u64;
        progress.inc_by(chunk.len() as u64);
    }

    file.flush().await.map_err(|e| InstallError::io(dest, e))?;
    progress.finish_and_clear();

    tracing::info!("download complete ({} bytes)", written);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::test_server::{serve, Reply};
    use std::time::Duration;

    #[tokio::test]
    async fn test_download_writes_body() {
        let base = serve(Reply::ok("go toolchain bytes")).await;
        let temp_dir = tempfile::tempdir().unwrap();
        let dest = temp_dir.path().join("go.tar.gz");
        let client = HttpClient::for_downloads(Duration::from_secs(5)).unwrap();

        let written = download_archive(
            &client,
            &format!("{}go.tar.gz", base),
            &dest,
            &mut Progress::new(false),
        )
        .await
        .unwrap();

        assert_eq!(written, 18);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "go toolchain bytes");
    }

    #[tokio::test]
    async fn test_slow_download_outlasting_idle_timeout_completes() {
        // Total transfer takes ~2.1s, each gap is 0.7s.
        let base = serve(Reply::ok("abc").trickle(1, Duration::from_millis(700))).await;
        let temp_dir = tempfile::tempdir().unwrap();
        let dest = temp_dir.path().join("go.tar.gz");
        let client = HttpClient::for_downloads(Duration::from_secs(1)).unwrap();

        let written = download_archive(
            &client,
            &format!("{}go.tar.gz", base),
            &dest,
            &mut Progress::new(false),
        )
        .await
        .unwrap();

        assert_eq!(written, 3);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_stalled_download_fails() {
        let base = serve(Reply::ok("abc").trickle(1, Duration::from_millis(1500))).await;
        let temp_dir = tempfile::tempdir().unwrap();
        let dest = temp_dir.path().join("go.tar.gz");
        let client = HttpClient::for_downloads(Duration::from_millis(300)).unwrap();

        let err = download_archive(
            &client,
            &format!("{}go.tar.gz", base),
            &dest,
            &mut Progress::new(false),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, InstallError::DownloadFailed { .. }));
    }

    #[tokio::test]
    async fn test_missing_archive() {
        let base = serve(Reply::not_found()).await;
        let temp_dir = tempfile::tempdir().unwrap();
        let url = format!("{}go1.21.5.plan9-arm64.tar.gz", base);
        let client = HttpClient::for_downloads(Duration::from_secs(5)).unwrap();

        let err = download_archive(
            &client,
            &url,
            &temp_dir.path().join("archive"),
            &mut Progress::new(false),
        )
        .await
        .unwrap_err();

        match err {
            InstallError::ArchiveNotFound { url: missing } => assert_eq!(missing, url),
            other => panic!("expected ArchiveNotFound, got {:?}", other),
        }
        assert!(!temp_dir.path().join("archive").exists());
    }
}
