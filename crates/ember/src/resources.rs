//! # Texture Cache
//!
//! Session-lifetime map from texture path to handle. Loading the pixels is
//! somebody else's problem; the cache only guarantees that one path always
//! maps to one handle.

use std::collections::HashMap;

use ember_fx::{TextureHandle, TextureResolver};

/// Path-to-handle cache implementing [`TextureResolver`].
#[derive(Debug, Default)]
pub struct TextureCache {
    handles: HashMap<String, TextureHandle>,
    paths: Vec<String>,
}

impl TextureCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct textures resolved so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True if nothing has been resolved yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Path a handle was resolved from.
    #[must_use]
    pub fn path(&self, handle: TextureHandle) -> Option<&str> {
        if handle.is_none() {
            return None;
        }
        self.paths.get(handle.index() as usize).map(String::as_str)
    }
}

impl TextureResolver for TextureCache {
    fn resolve(&mut self, path: &str) -> TextureHandle {
        if let Some(&handle) = self.handles.get(path) {
            return handle;
        }
        #[allow(clippy::cast_possible_truncation)]
        let handle = TextureHandle::new(self.paths.len() as u32);
        self.paths.push(path.to_string());
        self.handles.insert(path.to_string(), handle);
        tracing::debug!("Texture {} -> {:?}", path, handle);
        handle
    }
}
