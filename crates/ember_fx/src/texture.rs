//! # Texture Handles
//!
//! Particle systems hold a non-owning handle. Loading, caching and the
//! lifetime of the pixels belong to whoever implements [`TextureResolver`].

use crate::descriptor::EffectKind;

/// Opaque, non-owning reference to a texture held by a resource cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TextureHandle(u32);

impl TextureHandle {
    /// Handle that refers to nothing.
    pub const NONE: Self = Self(u32::MAX);

    /// Wraps a cache slot index.
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The cache slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Checks if this handle refers to nothing.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

impl Default for TextureHandle {
    fn default() -> Self {
        Self::NONE
    }
}

/// Resolves texture paths to handles.
///
/// Failure handling is the resolver's business; it may hand out
/// [`TextureHandle::NONE`] or a placeholder.
pub trait TextureResolver {
    /// Returns the handle for `path`, loading it on first use.
    fn resolve(&mut self, path: &str) -> TextureHandle;
}

/// Texture path for `kind`: `<fx_dir>/<name>.tga`.
#[must_use]
pub fn texture_path(fx_dir: &str, kind: EffectKind) -> String {
    let dir = fx_dir.trim_end_matches('/');
    if dir.is_empty() {
        format!("{}.tga", kind.texture_name())
    } else {
        format!("{dir}/{}.tga", kind.texture_name())
    }
}
