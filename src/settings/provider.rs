//! Lazily-constructed settings holder
//!
//! An explicit, injectable holder rather than a hidden process global:
//! consumers receive a [`SettingsProvider`] and share the single
//! [`Settings`] instance it constructs on first use.

use std::sync::{Arc, RwLock};

use crate::error::Result;
use crate::settings::app::Settings;

/// Holder of the shared [`Settings`] instance.
///
/// The slot starts empty and is filled by the first [`get`](Self::get).
/// Construction happens outside the slot lock, so concurrent first calls
/// may construct twice and repeat the directory side effects; intended use
/// is single-threaded startup.
#[derive(Debug, Default)]
pub struct SettingsProvider {
    slot: RwLock<Option<Arc<Settings>>>,
}

impl SettingsProvider {
    /// Provider with an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared settings instance, constructed from environment-derived
    /// defaults on first call.
    ///
    /// Repeated calls return the same instance, identity-equal under
    /// [`Arc::ptr_eq`]. A failed construction leaves the slot empty and
    /// the error propagates.
    pub fn get(&self) -> Result<Arc<Settings>> {
        if let Some(settings) = self.slot.read().unwrap().as_ref() {
            return Ok(Arc::clone(settings));
        }
        self.rebuild()
    }

    /// Discard any held instance and construct a fresh one.
    ///
    /// The returned instance is always distinct in identity from previous
    /// ones. A failed rebuild leaves the previously held instance in
    /// place.
    pub fn reload(&self) -> Result<Arc<Settings>> {
        self.rebuild()
    }

    fn rebuild(&self) -> Result<Arc<Settings>> {
        let settings = Arc::new(Settings::new()?);
        *self.slot.write().unwrap() = Some(Arc::clone(&settings));
        Ok(settings)
    }
}
