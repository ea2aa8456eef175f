//! Asset loading seam between the scene and the host.
//!
//! Loads are one-shot and non-cancelable: a handle is requested once, moves
//! from `Pending` to `Ready` or `Failed`, and never changes again.

use std::path::{Path, PathBuf};

use orrery_lod::AssetRef;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Progress of a single texture load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Ready,
    Failed,
}

/// Resolves opaque texture handles on behalf of the scene.
pub trait AssetLoader {
    /// Start loading `handle` if it has not been requested yet.
    fn request(&mut self, handle: &AssetRef);

    /// Current status of `handle`. Unrequested handles are `Pending`.
    fn status(&self, handle: &AssetRef) -> LoadStatus;

    /// Advance in-flight loads. Called once at the start of every frame.
    fn poll(&mut self) {}
}

/// Resolves handles to files under a root directory.
///
/// A requested handle stays `Pending` until the next [`poll`](AssetLoader::poll),
/// which marks it `Ready` if the file exists and `Failed` otherwise.
pub struct FsAssetLoader {
    root: PathBuf,
    statuses: FxHashMap<AssetRef, LoadStatus>,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            statuses: FxHashMap::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path a handle resolves to. Leading slashes are relative to the root.
    pub fn resolve_path(&self, handle: &AssetRef) -> PathBuf {
        self.root.join(handle.as_str().trim_start_matches('/'))
    }

    /// Number of handles currently in each state: `(pending, ready, failed)`.
    pub fn counts(&self) -> (usize, usize, usize) {
        self.statuses
            .values()
            .fold((0, 0, 0), |(p, r, f), status| match status {
                LoadStatus::Pending => (p + 1, r, f),
                LoadStatus::Ready => (p, r + 1, f),
                LoadStatus::Failed => (p, r, f + 1),
            })
    }
}

impl AssetLoader for FsAssetLoader {
    fn request(&mut self, handle: &AssetRef) {
        if !self.statuses.contains_key(handle) {
            debug!(asset = %handle, "requested");
            self.statuses.insert(handle.clone(), LoadStatus::Pending);
        }
    }

    fn status(&self, handle: &AssetRef) -> LoadStatus {
        self.statuses
            .get(handle)
            .copied()
            .unwrap_or(LoadStatus::Pending)
    }

    fn poll(&mut self) {
        let pending: Vec<AssetRef> = self
            .statuses
            .iter()
            .filter(|(_, status)| **status == LoadStatus::Pending)
            .map(|(handle, _)| handle.clone())
            .collect();

        for handle in pending {
            let path = self.resolve_path(&handle);
            let status = if path.is_file() {
                LoadStatus::Ready
            } else {
                warn!(asset = %handle, path = %path.display(), "texture not found");
                LoadStatus::Failed
            };
            self.statuses.insert(handle, status);
        }
    }
}

/// Loader whose results are set by hand. Requested handles stay `Pending`
/// until marked, unless `ready_on_request` is set.
#[derive(Default)]
pub struct ManualAssetLoader {
    statuses: FxHashMap<AssetRef, LoadStatus>,
    requests: Vec<AssetRef>,
    ready_on_request: bool,
}

impl ManualAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader that completes every request immediately.
    pub fn instant() -> Self {
        Self {
            ready_on_request: true,
            ..Self::default()
        }
    }

    pub fn mark_ready(&mut self, handle: impl Into<AssetRef>) {
        self.statuses.insert(handle.into(), LoadStatus::Ready);
    }

    pub fn mark_failed(&mut self, handle: impl Into<AssetRef>) {
        self.statuses.insert(handle.into(), LoadStatus::Failed);
    }

    /// Handles in the order they were first requested.
    pub fn requests(&self) -> &[AssetRef] {
        &self.requests
    }
}

impl AssetLoader for ManualAssetLoader {
    fn request(&mut self, handle: &AssetRef) {
        if self.requests.contains(handle) {
            return;
        }
        self.requests.push(handle.clone());
        if self.ready_on_request {
            self.statuses.entry(handle.clone()).or_insert(LoadStatus::Ready);
        }
    }

    fn status(&self, handle: &AssetRef) -> LoadStatus {
        self.statuses
            .get(handle)
            .copied()
            .unwrap_or(LoadStatus::Pending)
    }
}
