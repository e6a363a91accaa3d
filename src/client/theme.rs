//! Dark mode preference, persisted under the `darkMode` key.

use std::sync::Arc;

use crate::ports::{LocalStore, LocalStoreError};

pub const DARK_MODE_KEY: &str = "darkMode";

pub struct ThemePreference {
    store: Arc<dyn LocalStore>,
    dark_mode: bool,
}

impl ThemePreference {
    /// Reads the saved preference. Anything but `"true"` means light mode.
    pub async fn load(store: Arc<dyn LocalStore>) -> Result<Self, LocalStoreError> {
        let dark_mode = store.get(DARK_MODE_KEY).await?.as_deref() == Some("true");
        Ok(Self { store, dark_mode })
    }

    pub fn is_dark(&self) -> bool {
        self.dark_mode
    }

    /// Flips the preference and saves it. Returns the new value.
    pub async fn toggle(&mut self) -> Result<bool, LocalStoreError> {
        self.set_dark(!self.dark_mode).await?;
        Ok(self.dark_mode)
    }

    pub async fn set_dark(&mut self, dark_mode: bool) -> Result<(), LocalStoreError> {
        self.store
            .set(DARK_MODE_KEY, if dark_mode { "true" } else { "false" })
            .await?;
        self.dark_mode = dark_mode;
        Ok(())
    }
}
