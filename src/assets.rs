//! Asset preloading
//!
//! Sources are queued by name before `start()`; the scheduler's loading
//! phase pulls them in one at a time (cooperative, never blocking a tick for
//! more than a single fetch). Loaded assets are undecoded byte blobs in two
//! namespaces, images and sounds; decoding is the caller's business.

use std::collections::HashMap;
use std::io;

/// What a queued source is, which decides its namespace and fetch rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Sound,
}

/// A queued asset source
#[derive(Debug, Clone)]
pub struct AssetSource {
    pub name: String,
    pub kind: AssetKind,
    /// Path or URL fragment handed to the fetcher. Sound paths carry no
    /// extension; the fetcher picks one it can serve.
    pub path: String,
}

/// Retrieval seam between the engine and the host platform.
pub trait AssetFetch {
    fn fetch(&mut self, source: &AssetSource) -> io::Result<Vec<u8>>;
}

/// Filesystem fetcher rooted at a directory.
///
/// Sounds are probed as `<path>.mp3` first, then `<path>.ogg` — the same
/// preference order the original codec probe established.
#[cfg(not(target_arch = "wasm32"))]
pub struct DirFetch {
    root: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirFetch {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetFetch for DirFetch {
    fn fetch(&mut self, source: &AssetSource) -> io::Result<Vec<u8>> {
        match source.kind {
            AssetKind::Image => std::fs::read(self.root.join(&source.path)),
            AssetKind::Sound => {
                let mp3 = self.root.join(format!("{}.mp3", source.path));
                if mp3.exists() {
                    return std::fs::read(mp3);
                }
                std::fs::read(self.root.join(format!("{}.ogg", source.path)))
            }
        }
    }
}

/// Queued sources plus everything loaded so far.
#[derive(Default)]
pub struct Assets {
    sources: Vec<AssetSource>,
    cursor: usize,
    loaded: usize,
    images: HashMap<String, Vec<u8>>,
    sounds: HashMap<String, Vec<u8>>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(&mut self, name: &str, kind: AssetKind, path: &str) {
        self.sources.push(AssetSource {
            name: name.to_owned(),
            kind,
            path: path.to_owned(),
        });
    }

    /// Sources still waiting for a fetch
    pub fn pending(&self) -> usize {
        self.sources.len() - self.cursor
    }

    /// Sources fetched successfully
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn image(&self, name: &str) -> Option<&[u8]> {
        self.images.get(name).map(Vec::as_slice)
    }

    pub fn sound(&self, name: &str) -> Option<&[u8]> {
        self.sounds.get(name).map(Vec::as_slice)
    }

    /// Fetch the next queued source, if any.
    ///
    /// A failed fetch is logged and the asset stays absent; the load still
    /// completes so the engine can reach its running phase.
    pub(crate) fn load_next(&mut self, fetch: &mut dyn AssetFetch) {
        let Some(source) = self.sources.get(self.cursor) else {
            return;
        };
        self.cursor += 1;

        match fetch.fetch(source) {
            Ok(bytes) => {
                log::debug!("loaded {:?} asset {} ({} bytes)", source.kind, source.name, bytes.len());
                let store = match source.kind {
                    AssetKind::Image => &mut self.images,
                    AssetKind::Sound => &mut self.sounds,
                };
                store.insert(source.name.clone(), bytes);
                self.loaded += 1;
            }
            Err(err) => {
                log::warn!("failed to load asset {} from {}: {err}", source.name, source.path);
            }
        }
    }

    /// Drop everything still queued (used when no fetcher is installed).
    pub(crate) fn abandon_pending(&mut self) {
        self.cursor = self.sources.len();
    }
}
