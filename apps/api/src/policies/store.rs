//! Policy retrieval — lists every object under the `policies/` prefix and
//! converts each to a `Policy`. Text files decode directly, PDFs go through a
//! text-extraction pass, and corrupt files degrade to a placeholder string so
//! one bad upload never fails the whole batch.

use aws_sdk_s3::Client as S3Client;
use tracing::{info, warn};

use crate::models::policy::Policy;

/// Storage prefix all policy documents live under.
pub const POLICY_PREFIX: &str = "policies/";

#[derive(Clone)]
pub struct PolicyStore {
    s3: S3Client,
    bucket: String,
}

impl PolicyStore {
    pub fn new(s3: S3Client, bucket: String) -> Self {
        Self { s3, bucket }
    }

    /// Returns all policy documents.
    ///
    /// Storage-level failures degrade to an empty list (logged), so callers
    /// must treat zero policies as a valid state, not an error.
    pub async fn get_policies(&self) -> Vec<Policy> {
        let keys = match self.list_policy_keys().await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Failed to list policy objects, returning empty set: {e}");
                return Vec::new();
            }
        };

        let mut policies = Vec::with_capacity(keys.len());
        for key in keys {
            let content = match self.download(&key).await {
                Ok(bytes) => decode_object(&key, &bytes),
                Err(e) => {
                    warn!("Failed to download '{key}': {e}");
                    unreadable_placeholder(&key)
                }
            };
            policies.push(Policy {
                title: title_from_key(&key),
                id: key,
                content,
            });
        }

        info!("Loaded {} policy documents", policies.len());
        policies
    }

    async fn list_policy_keys(&self) -> Result<Vec<String>, anyhow::Error> {
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let page = self
                .s3
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(POLICY_PREFIX)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| anyhow::anyhow!("list_objects_v2 failed: {e}"))?;

            for object in page.contents() {
                let Some(key) = object.key() else { continue };
                // Folder markers show up as zero-byte keys ending in '/'
                if key.ends_with('/') || object.size().unwrap_or(0) == 0 {
                    continue;
                }
                keys.push(key.to_string());
            }

            match page.next_continuation_token() {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
        }

        Ok(keys)
    }

    async fn download(&self, key: &str) -> Result<bytes::Bytes, anyhow::Error> {
        let object = self
            .s3
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("get_object failed: {e}"))?;

        let body = object
            .body
            .collect()
            .await
            .map_err(|e| anyhow::anyhow!("failed to read object body: {e}"))?;

        Ok(body.into_bytes())
    }
}

/// Converts raw object bytes to text based on the file extension.
/// Any extension without an explicit handler is read as UTF-8 text.
pub fn decode_object(key: &str, bytes: &[u8]) -> String {
    match extension(key).as_deref() {
        Some("pdf") => extract_pdf_text(key, bytes),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn extract_pdf_text(key: &str, bytes: &[u8]) -> String {
    // pdf-extract panics on some malformed files, so the call is isolated
    let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
    match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF extraction failed for '{key}': {e}");
            unreadable_placeholder(key)
        }
        Err(_) => {
            warn!("PDF extraction panicked for '{key}'");
            unreadable_placeholder(key)
        }
    }
}

fn unreadable_placeholder(key: &str) -> String {
    format!("[Could not read '{key}'. The file may be corrupt or in an unsupported format.]")
}

fn extension(key: &str) -> Option<String> {
    std::path::Path::new(key)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

fn title_from_key(key: &str) -> String {
    let name = key.strip_prefix(POLICY_PREFIX).unwrap_or(key);
    std::path::Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_file_passes_through() {
        let content = decode_object("policies/leave-policy.txt", b"Annual leave is 25 days.");
        assert_eq!(content, "Annual leave is 25 days.");
    }

    #[test]
    fn test_unknown_extension_reads_as_utf8() {
        let content = decode_object("policies/notes.md", "# Notes\nBe kind.".as_bytes());
        assert_eq!(content, "# Notes\nBe kind.");
    }

    #[test]
    fn test_invalid_utf8_is_lossy_not_fatal() {
        let content = decode_object("policies/data.txt", &[0x66, 0x6f, 0xff, 0x6f]);
        assert!(content.contains('\u{FFFD}'));
    }

    #[test]
    fn test_corrupt_pdf_yields_placeholder_with_filename() {
        let content = decode_object("policies/broken.pdf", b"this is not a pdf");
        assert!(content.contains("policies/broken.pdf"));
        assert!(content.starts_with('['));
    }

    #[test]
    fn test_title_strips_prefix_and_extension() {
        assert_eq!(title_from_key("policies/remote-work.pdf"), "remote-work");
        assert_eq!(title_from_key("policies/code of conduct.txt"), "code of conduct");
    }
}
