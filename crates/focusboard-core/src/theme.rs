//! Light/dark theme preference, persisted as `"true"`/`"false"`.

use chrono::Utc;

use crate::events::Event;
use crate::sinks::{AlertChannel, DisplaySink};
use crate::storage::{PersistentStore, THEME_KEY};

pub struct ThemePreference<S> {
    dark: bool,
    store: S,
}

impl<S: PersistentStore> ThemePreference<S> {
    /// Anything other than a stored `"true"` means light.
    pub fn load(store: S) -> Self {
        let dark = match store.get(THEME_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                tracing::warn!(error = %e, "could not read theme preference");
                false
            }
        };
        Self { dark, store }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Flip the theme, persist it and re-render.
    ///
    /// A failed write is reported through `alert`; the flipped value is kept.
    pub fn toggle(&mut self, sink: &mut impl DisplaySink, alert: &mut impl AlertChannel) -> Event {
        self.dark = !self.dark;
        let value = if self.dark { "true" } else { "false" };
        if let Err(e) = self.store.set(THEME_KEY, value) {
            tracing::warn!(error = %e, "failed to save theme preference");
            alert.notify(&format!("Could not save theme: {e}"));
        }
        sink.render_theme(self.dark);
        Event::ThemeChanged {
            dark: self.dark,
            at: Utc::now(),
        }
    }
}
