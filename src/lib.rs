pub mod error;
pub mod github;
pub mod materialize;
pub mod mirror;
pub mod source;
pub mod types;

pub use error::{MirrorError, Result};
pub use github::GithubSource;
pub use mirror::Mirror;
pub use source::{ByteStream, RemoteSource};
pub use types::{EntryKind, NodeResponse, RemoteEntry};
