use std::cell::Cell;
use yew::prelude::*;

use crate::config;
use crate::error::PreferenceError;
use crate::i18n::{Language, Translations};

/// Key-value store that survives reloads.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Document-level attributes that follow the language.
pub trait DocumentAttributes {
    fn apply(&self, dir: &str, lang: &str) -> Result<(), PreferenceError>;
}

pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, PreferenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PreferenceError::StorageUnavailable)
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        Self::storage()?.set_item(key, value).map_err(|e| PreferenceError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

/// The `<html>` element's `dir` and `lang` attributes.
pub struct DocumentRoot;

impl DocumentAttributes for DocumentRoot {
    fn apply(&self, dir: &str, lang: &str) -> Result<(), PreferenceError> {
        let root = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
            .ok_or(PreferenceError::NoDocument)?;
        let write = |name: &str, value: &str| {
            root.set_attribute(name, value).map_err(|e| PreferenceError::Write {
                key: name.to_string(),
                reason: format!("{:?}", e),
            })
        };
        write("dir", dir)?;
        write("lang", lang)
    }
}

/// Owner of the language preference. Every change goes through
/// [`LanguageSettings::set`], which persists it and updates the document.
pub struct LanguageSettings<S = LocalStorage, D = DocumentRoot> {
    store: S,
    document: D,
    current: Cell<Language>,
}

impl<S: PreferenceStore, D: DocumentAttributes> LanguageSettings<S, D> {
    /// Reads the stored language (English when missing or unknown) and
    /// applies it to the document.
    pub fn init(store: S, document: D) -> Self {
        let language = store
            .get(config::LANGUAGE_STORAGE_KEY)
            .and_then(|code| code.parse::<Language>().ok())
            .unwrap_or_default();
        let settings = Self {
            store,
            document,
            current: Cell::new(language),
        };
        settings.apply_document(language);
        log::info!("Language initialised to {}", language);
        settings
    }

    pub fn get(&self) -> Language {
        self.current.get()
    }

    pub fn set(&self, language: Language) {
        self.current.set(language);
        if let Err(e) = self.store.set(config::LANGUAGE_STORAGE_KEY, language.code()) {
            log::warn!("Could not persist language: {}", e);
        }
        self.apply_document(language);
        log::info!("Language changed to {}", language);
    }

    fn apply_document(&self, language: Language) {
        if let Err(e) = self.document.apply(language.dir(), language.code()) {
            log::warn!("Could not update document direction: {}", e);
        }
    }
}

/// Shared with every component through a `ContextProvider`.
#[derive(Clone, PartialEq)]
pub struct LanguageContext {
    pub language: Language,
    pub change: Callback<Language>,
}

impl LanguageContext {
    pub fn translations(&self) -> Translations {
        Translations::new(self.language)
    }
}

#[hook]
pub fn use_language() -> LanguageContext {
    use_context::<LanguageContext>().unwrap_or_else(|| LanguageContext {
        language: Language::default(),
        change: Callback::from(|_| ()),
    })
}
