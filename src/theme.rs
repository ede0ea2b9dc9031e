use eframe::egui;

/// Light/dark preference, stored as `"light"` / `"dark"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Theme> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn apply(self, ctx: &egui::Context) {
        ctx.set_theme(match self {
            Theme::Light => egui::Theme::Light,
            Theme::Dark => egui::Theme::Dark,
        });
    }
}

/// Reads and writes the theme preference under a fixed storage key.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    key: String,
}

impl ThemeStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Stored preference, else the system one, else light.
    pub fn load(
        &self,
        storage: Option<&dyn eframe::Storage>,
        system: Option<egui::Theme>,
    ) -> Theme {
        if let Some(theme) = storage
            .and_then(|s| s.get_string(&self.key))
            .and_then(|v| Theme::parse(&v))
        {
            return theme;
        }
        match system {
            Some(egui::Theme::Dark) => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage, theme: Theme) {
        storage.set_string(&self.key, theme.as_str().to_string());
        storage.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage {
        values: HashMap<String, String>,
        flushes: usize,
    }

    impl eframe::Storage for MemoryStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.values.insert(key.to_string(), value);
        }

        fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    #[test]
    fn stored_value_wins_over_system() {
        let store = ThemeStore::new("tomates_theme");
        let mut storage = MemoryStorage::default();
        store.save(&mut storage, Theme::Light);

        assert_eq!(storage.values["tomates_theme"], "light");
        assert_eq!(storage.flushes, 1);
        assert_eq!(store.load(Some(&storage), Some(egui::Theme::Dark)), Theme::Light);
    }

    #[test]
    fn falls_back_to_system_then_light() {
        let store = ThemeStore::new("tomates_theme");
        let storage = MemoryStorage::default();
        assert_eq!(store.load(Some(&storage), Some(egui::Theme::Dark)), Theme::Dark);
        assert_eq!(store.load(None, None), Theme::Light);
    }

    #[test]
    fn garbage_value_is_ignored() {
        let store = ThemeStore::new("k");
        let mut storage = MemoryStorage::default();
        storage.values.insert("k".into(), "sepia".into());
        assert_eq!(store.load(Some(&storage), None), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
