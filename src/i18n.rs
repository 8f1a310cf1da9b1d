use once_cell::sync::Lazy;
use serde_json::Value;
use std::fmt::{self, Display};
use std::str::FromStr;

static ENGLISH_TABLE: Lazy<Value> = Lazy::new(|| parse_table("en", include_str!("../locales/en.json")));
static ARABIC_TABLE: Lazy<Value> = Lazy::new(|| parse_table("ar", include_str!("../locales/ar.json")));

fn parse_table(code: &str, raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::error!("Failed to parse {} translations: {}", code, e);
        Value::Null
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Arabic,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    /// Text direction for the document root.
    pub fn dir(&self) -> &'static str {
        match self {
            Language::Arabic => "rtl",
            _ => "ltr",
        }
    }

    /// The language the toggle button switches to.
    pub fn other(&self) -> Language {
        match self {
            Language::English => Language::Arabic,
            Language::Arabic => Language::English,
        }
    }

    fn table(&self) -> &'static Value {
        match self {
            Language::English => &ENGLISH_TABLE,
            Language::Arabic => &ARABIC_TABLE,
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    /// Accepts bare codes and region tags such as `en-US` or `ar-AE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.split(['-', '_']).next().unwrap_or("") {
            "en" | "english" => Ok(Language::English),
            "ar" | "arabic" => Ok(Language::Arabic),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

/// Looks up display strings by dotted key (`validation.phone.required`).
pub trait Translator {
    fn t(&self, key: &str) -> String;
}

/// Embedded string tables for one language, falling back to English and
/// then to the key itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Translations {
    language: Language,
}

impl Translations {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    fn lookup<'a>(table: &'a Value, key: &str) -> Option<&'a str> {
        let pointer = format!("/{}", key.replace('.', "/"));
        table.pointer(&pointer).and_then(Value::as_str)
    }
}

impl Translator for Translations {
    fn t(&self, key: &str) -> String {
        Self::lookup(self.language.table(), key)
            .or_else(|| Self::lookup(Language::English.table(), key))
            .map(str::to_owned)
            .unwrap_or_else(|| {
                log::warn!("Missing translation for {} ({})", key, self.language);
                key.to_string()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_keys(value: &Value, prefix: &str, out: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (k, v) in map {
                    let next = if prefix.is_empty() { k.clone() } else { format!("{}.{}", prefix, k) };
                    leaf_keys(v, &next, out);
                }
            }
            _ => out.push(prefix.to_string()),
        }
    }

    #[test]
    fn direction_is_rtl_only_for_arabic() {
        assert_eq!(Language::Arabic.dir(), "rtl");
        assert_eq!(Language::English.dir(), "ltr");
    }

    #[test]
    fn parses_codes_and_region_tags() {
        assert_eq!("en".parse::<Language>(), Ok(Language::English));
        assert_eq!("en-US".parse::<Language>(), Ok(Language::English));
        assert_eq!("AR".parse::<Language>(), Ok(Language::Arabic));
        assert_eq!("ar_AE".parse::<Language>(), Ok(Language::Arabic));
        assert!("fr".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn tables_parse_and_share_keys() {
        assert!(ENGLISH_TABLE.is_object());
        assert!(ARABIC_TABLE.is_object());

        let mut en = Vec::new();
        leaf_keys(&ENGLISH_TABLE, "", &mut en);
        let mut ar = Vec::new();
        leaf_keys(&ARABIC_TABLE, "", &mut ar);
        en.sort();
        ar.sort();
        assert_eq!(en, ar);
    }

    #[test]
    fn looks_up_nested_keys() {
        let en = Translations::new(Language::English);
        assert_eq!(en.t("form.confirm"), "Confirm booking");
        let ar = Translations::new(Language::Arabic);
        assert_ne!(ar.t("form.confirm"), en.t("form.confirm"));
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let ar = Translations::new(Language::Arabic);
        assert_eq!(ar.t("does.not.exist"), "does.not.exist");
    }
}
