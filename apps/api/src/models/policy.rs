use serde::{Deserialize, Serialize};

/// A policy document derived 1:1 from an object under the `policies/` prefix.
/// Ephemeral — recomputed on every read, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// The full object key, e.g. `policies/remote-work.pdf`.
    pub id: String,
    /// The file stem, e.g. `remote-work`.
    pub title: String,
    pub content: String,
}
