//! Lazily loaded textures addressed by arena handles.

use rustc_hash::FxHashMap;

/// Handle to a texture slot. Stable until the last reference is released.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Deferred texture loading.
///
/// `load` returns immediately; the pixels become available later and
/// `is_ready` is polled once per frame.
pub trait TextureLoader {
    /// Acquire a reference to the texture at `path`, starting the load if
    /// needed.
    fn load(&mut self, path: &str) -> TextureHandle;

    /// Whether the texture data is available.
    fn is_ready(&mut self, handle: TextureHandle) -> bool;

    /// Drop one reference acquired with [`TextureLoader::load`].
    fn release(&mut self, handle: TextureHandle);
}

#[derive(Debug)]
struct TextureSlot {
    path: String,
    refs: u32,
    ready: bool,
}

/// Arena of texture slots with use counts and a free list.
///
/// Loading completes when the back-end calls [`TextureCache::mark_ready`].
#[derive(Debug, Default)]
pub struct TextureCache {
    slots: Vec<Option<TextureSlot>>,
    free: Vec<u32>,
    by_path: FxHashMap<String, TextureHandle>,
    /// Paths that are available as soon as they are requested.
    preloaded: Vec<String>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag the texture at `path` as loaded. Paths never requested are
    /// remembered and will be ready on their first `load`.
    pub fn mark_ready(&mut self, path: &str) {
        match self.by_path.get(path) {
            Some(handle) => {
                if let Some(Some(slot)) = self.slots.get_mut(handle.0 as usize) {
                    slot.ready = true;
                }
            }
            None => self.preloaded.push(path.to_string()),
        }
    }

    /// Number of live references to `handle`.
    pub fn refs(&self, handle: TextureHandle) -> u32 {
        self.slot(handle).map_or(0, |s| s.refs)
    }

    /// Path of a live texture.
    pub fn path(&self, handle: TextureHandle) -> Option<&str> {
        self.slot(handle).map(|s| s.path.as_str())
    }

    /// Number of live textures.
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    fn slot(&self, handle: TextureHandle) -> Option<&TextureSlot> {
        self.slots.get(handle.0 as usize).and_then(Option::as_ref)
    }
}

impl TextureLoader for TextureCache {
    fn load(&mut self, path: &str) -> TextureHandle {
        if let Some(&handle) = self.by_path.get(path) {
            if let Some(Some(slot)) = self.slots.get_mut(handle.0 as usize) {
                slot.refs += 1;
            }
            return handle;
        }
        let ready = self.preloaded.iter().any(|p| p == path);
        let slot = TextureSlot {
            path: path.to_string(),
            refs: 1,
            ready,
        };
        let handle = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize] = Some(slot);
                TextureHandle(index)
            }
            None => {
                self.slots.push(Some(slot));
                TextureHandle(self.slots.len() as u32 - 1)
            }
        };
        log::debug!("Texture {path} requested as {handle:?}");
        self.by_path.insert(path.to_string(), handle);
        handle
    }

    fn is_ready(&mut self, handle: TextureHandle) -> bool {
        self.slot(handle).is_some_and(|s| s.ready)
    }

    fn release(&mut self, handle: TextureHandle) {
        let Some(Some(slot)) = self.slots.get_mut(handle.0 as usize) else {
            return;
        };
        slot.refs = slot.refs.saturating_sub(1);
        if slot.refs == 0 {
            self.by_path.remove(&slot.path);
            self.slots[handle.0 as usize] = None;
            self.free.push(handle.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_shares_slot_by_path() {
        let mut cache = TextureCache::new();
        let a = cache.load("img/ori.webp");
        let b = cache.load("img/ori.webp");
        assert_eq!(a, b);
        assert_eq!(cache.refs(a), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_ready_after_mark() {
        let mut cache = TextureCache::new();
        let h = cache.load("a.png");
        assert!(!cache.is_ready(h));
        cache.mark_ready("a.png");
        assert!(cache.is_ready(h));
    }

    #[test]
    fn test_preloaded_path_is_ready_on_load() {
        let mut cache = TextureCache::new();
        cache.mark_ready("b.png");
        let h = cache.load("b.png");
        assert!(cache.is_ready(h));
    }

    #[test]
    fn test_release_frees_slot_for_reuse() {
        let mut cache = TextureCache::new();
        let a = cache.load("a.png");
        cache.release(a);
        assert!(cache.is_empty());
        assert_eq!(cache.refs(a), 0);
        let b = cache.load("b.png");
        assert_eq!(a, b);
        assert_eq!(cache.path(b), Some("b.png"));
    }
}
