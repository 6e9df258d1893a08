use serde::{Deserialize, Serialize};

/// One node of the remote content tree, as returned by the contents API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// Leaf name, display only
    pub name: String,
    /// Path relative to the tree root; identifies both the request URL
    /// and the local destination
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// How `content` is encoded when present
    #[serde(default)]
    pub encoding: Option<String>,
    /// Inline file payload; decoding it yields the file bytes
    #[serde(default)]
    pub content: Option<String>,
    /// Content hash of this revision of the entry
    pub sha: String,
    /// API URL of the entry itself
    pub url: String,
    /// Raw endpoint the full bytes can be streamed from
    #[serde(default)]
    pub download_url: Option<String>,
}

impl RemoteEntry {
    /// Whether this entry carries anything to write locally.
    ///
    /// Entries with neither an inline payload nor a raw URL contribute
    /// no local artifact.
    pub fn has_content(&self) -> bool {
        self.content.is_some() || self.download_url.is_some()
    }
}

/// Kind of remote entry
///
/// Only `File` and `Dir` drive materialization. `Symlink` and `Submodule`
/// are recognized on the wire but fetch as generic nodes; no link creation
/// or submodule resolution happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
}

/// A metadata response, decided once at the parse boundary.
///
/// The contents API answers with a JSON array for a directory and a JSON
/// object for a single entry. The `Listing` arm must come first so arrays
/// are tried before objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NodeResponse {
    Listing(Vec<RemoteEntry>),
    Entry(RemoteEntry),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_entry() {
        let body = r#"{
            "name": "hello.txt",
            "path": "docs/hello.txt",
            "type": "file",
            "encoding": "base64",
            "content": "aGVsbG8=",
            "sha": "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0",
            "url": "https://api.example.com/repos/o/r/contents/docs/hello.txt",
            "download_url": "https://raw.example.com/o/r/main/docs/hello.txt"
        }"#;

        let node: NodeResponse = serde_json::from_str(body).unwrap();
        match node {
            NodeResponse::Entry(entry) => {
                assert_eq!(entry.name, "hello.txt");
                assert_eq!(entry.path, "docs/hello.txt");
                assert_eq!(entry.kind, EntryKind::File);
                assert_eq!(entry.encoding.as_deref(), Some("base64"));
                assert!(entry.has_content());
            }
            NodeResponse::Listing(_) => panic!("expected a single entry"),
        }
    }

    #[test]
    fn parses_listing_in_order() {
        let body = r#"[
            {"name": "sub", "path": "sub", "type": "dir",
             "sha": "a1", "url": "u1"},
            {"name": "a.txt", "path": "a.txt", "type": "file",
             "sha": "a2", "url": "u2", "download_url": "d2"}
        ]"#;

        let node: NodeResponse = serde_json::from_str(body).unwrap();
        match node {
            NodeResponse::Listing(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].kind, EntryKind::Dir);
                assert_eq!(entries[0].path, "sub");
                assert_eq!(entries[1].kind, EntryKind::File);
                assert_eq!(entries[1].path, "a.txt");
            }
            NodeResponse::Entry(_) => panic!("expected a listing"),
        }
    }

    #[test]
    fn recognizes_link_kinds() {
        let body = r#"{"name": "l", "path": "l", "type": "symlink",
                       "sha": "s", "url": "u"}"#;
        let node: NodeResponse = serde_json::from_str(body).unwrap();
        match node {
            NodeResponse::Entry(entry) => {
                assert_eq!(entry.kind, EntryKind::Symlink);
                assert!(!entry.has_content());
            }
            NodeResponse::Listing(_) => panic!("expected a single entry"),
        }
    }

    #[test]
    fn entry_without_payload_has_no_content() {
        let body = r#"{"name": "big.bin", "path": "big.bin", "type": "file",
                       "encoding": "none", "sha": "s", "url": "u",
                       "download_url": "https://raw.example.com/big.bin"}"#;
        let node: NodeResponse = serde_json::from_str(body).unwrap();
        match node {
            NodeResponse::Entry(entry) => {
                assert!(entry.content.is_none());
                assert!(entry.has_content());
            }
            NodeResponse::Listing(_) => panic!("expected a single entry"),
        }
    }
}
