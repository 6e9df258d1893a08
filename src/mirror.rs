use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::{
    fs,
    sync::Semaphore,
    task::JoinSet,
};
use tracing::{debug, info, warn};

use crate::{
    error::{MirrorError, Result},
    materialize::materialize,
    source::RemoteSource,
    types::{EntryKind, NodeResponse},
};

/// One mirroring session: walks the remote tree depth-first and
/// recreates it under a local destination root.
///
/// Directory traversal is sequential, but file writes are detached as
/// background tasks; the permit pool caps how many fetch-or-write
/// operations are in flight at once, and [`Mirror::download`] does not
/// return until every detached write has finished.
pub struct Mirror<S> {
    source: Arc<S>,
    limiter: Arc<Semaphore>,
    tasks: JoinSet<Result<()>>,
}

impl<S: RemoteSource + 'static> Mirror<S> {
    /// Create a session allowing at most `tasks_limit` concurrent
    /// fetch-or-write operations.
    pub fn new(source: S, tasks_limit: NonZeroUsize) -> Self {
        Self {
            source: Arc::new(source),
            limiter: Arc::new(Semaphore::new(tasks_limit.get())),
            tasks: JoinSet::new(),
        }
    }

    /// Mirror the whole remote tree into `{download_path}/{name}`.
    ///
    /// Consumes the session; a failed or finished download cannot be
    /// reused. Any failure anywhere in the walk fails the download as a
    /// whole, but files already written stay on disk: there is no
    /// rollback, and in-flight writes are drained, not canceled, before
    /// the error is returned.
    pub async fn download(mut self, download_path: &Path) -> Result<()> {
        let root = download_path.join(self.source.name());
        fs::create_dir(&root).await?;
        info!(root = %root.display(), "mirroring into");

        let walked = self.walk(&root, "").await;
        let mut failure = walked.err();

        // Completion barrier: every spawned write finishes (or fails)
        // before we report anything to the caller.
        while let Some(joined) = self.tasks.join_next().await {
            let result = joined.unwrap_or_else(|e| Err(MirrorError::Task(e)));
            if let Err(err) = result {
                if failure.is_none() {
                    failure = Some(err);
                } else {
                    warn!(%err, "additional write failure");
                }
            }
        }

        match failure {
            Some(err) => Err(err),
            None => {
                info!("mirror complete");
                Ok(())
            }
        }
    }

    /// Walk one node. Holds a permit for the metadata fetch; for a file
    /// with content the same permit rides along into the background write,
    /// so the pool bounds concurrent transfers, not just listing fetches.
    fn walk<'a>(&'a mut self, root: &'a Path, path: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let permit = Arc::clone(&self.limiter).acquire_owned().await?;

            match self.source.fetch(path).await? {
                NodeResponse::Listing(entries) => {
                    // Recursion, not the listing fetch, is the expensive
                    // part; give the permit back before descending.
                    drop(permit);
                    for entry in entries {
                        if entry.kind == EntryKind::Dir {
                            // Created eagerly so child writes never race
                            // directory creation.
                            let local = root.join(&entry.path);
                            debug!(path = %entry.path, "creating directory");
                            fs::create_dir(local).await?;
                        }
                        self.walk(root, &entry.path).await?;
                    }
                }
                NodeResponse::Entry(entry) if entry.has_content() => {
                    let source = Arc::clone(&self.source);
                    let dest = root.join(&entry.path);
                    self.tasks.spawn(async move {
                        let result = materialize(source.as_ref(), &entry, &dest).await;
                        drop(permit);
                        result
                    });
                }
                NodeResponse::Entry(entry) => {
                    // Nothing to materialize; the permit drops here.
                    debug!(path = %entry.path, "entry carries no content, skipping");
                }
            }

            Ok(())
        })
    }
}
