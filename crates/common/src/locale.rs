//! Language selection for result messages.
//!
//! Callers carry a language tag (e.g. `"zh_CN"`); everything that is not
//! simplified Chinese falls back to the English message set.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    ZhCn,
    #[default]
    En,
}

impl Locale {
    pub fn from_tag(tag: &str) -> Self {
        if tag == "zh_CN" {
            Locale::ZhCn
        } else {
            Locale::En
        }
    }
}

/// A result code with one text per supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub code: &'static str,
    pub zh_cn: &'static str,
    pub en: &'static str,
}

impl Message {
    pub const fn new(code: &'static str, zh_cn: &'static str, en: &'static str) -> Self {
        Self { code, zh_cn, en }
    }

    pub fn text(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::ZhCn => self.zh_cn,
            Locale::En => self.en,
        }
    }
}
