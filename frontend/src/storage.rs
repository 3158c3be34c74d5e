use kiosk_shared::{KeyValueStore, MemoryStore};
use web_sys::{window, Storage};

/// Device identity kept in the browser's local storage.
pub struct LocalDeviceStore {
    storage: Storage,
}

impl KeyValueStore for LocalDeviceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if self.storage.set_item(key, value).is_err() {
            log::warn!("Could not persist {} to local storage", key);
        }
    }
}

/// Local storage when the browser allows it, otherwise a store that only
/// lives as long as the page.
pub fn device_store() -> Box<dyn KeyValueStore> {
    match window().and_then(|w| w.local_storage().ok().flatten()) {
        Some(storage) => Box::new(LocalDeviceStore { storage }),
        None => {
            log::warn!("Local storage unavailable, device id will not survive a reload");
            Box::new(MemoryStore::default())
        }
    }
}
