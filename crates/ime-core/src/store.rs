//! Named image store.
//!
//! Images live in the store for the lifetime of a session. Entries are
//! created by loading a file or by a filter writing its destination, and are
//! never removed. Names are case-sensitive and a store always overwrites.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::image::Image;

/// Mapping from image name to [`Image`].
pub trait ImageStore {
    /// Stores `image` under `name`, replacing any previous entry.
    fn store(&mut self, name: &str, image: Image);

    /// Looks up an image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageNotFound`] if nothing is stored under `name`.
    fn fetch(&self, name: &str) -> Result<&Image>;

    /// Returns `true` if an image is stored under `name`.
    fn contains(&self, name: &str) -> bool {
        self.fetch(name).is_ok()
    }
}

/// In-memory [`ImageStore`] backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    images: HashMap<String, Image>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns `true` if the store holds no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Stored names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.images.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl ImageStore for MemoryStore {
    fn store(&mut self, name: &str, image: Image) {
        self.images.insert(name.to_string(), image);
    }

    fn fetch(&self, name: &str) -> Result<&Image> {
        self.images
            .get(name)
            .ok_or_else(|| Error::image_not_found(name))
    }

    fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;

    #[test]
    fn test_store_and_fetch() {
        let mut store = MemoryStore::new();
        let img = Image::filled(1, 1, Pixel::WHITE).unwrap();
        store.store("koala", img.clone());
        assert_eq!(store.fetch("koala").unwrap(), &img);
        assert!(store.contains("koala"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_and_case_sensitive() {
        let mut store = MemoryStore::new();
        store.store("koala", Image::filled(1, 1, Pixel::WHITE).unwrap());
        let err = store.fetch("Koala").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_store_overwrites() {
        let mut store = MemoryStore::new();
        store.store("a", Image::filled(1, 1, Pixel::WHITE).unwrap());
        store.store("a", Image::filled(2, 1, Pixel::DIVIDER).unwrap());
        assert_eq!(store.fetch("a").unwrap().width(), 2);
        assert_eq!(store.names(), vec!["a"]);
    }
}
