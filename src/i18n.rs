//! Localized processing-step labels shown while a response is generated
//!
//! Three locales are supported; anything else falls back to French, the
//! product default.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Supported interface languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
    Ar,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Parses a language code, falling back to French.
    pub fn parse_or_default(code: &str) -> Self {
        match code {
            "en" => Language::En,
            "ar" => Language::Ar,
            _ => Language::Fr,
        }
    }
}

/// One step of the AI pipeline as displayed to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingStep {
    pub id: &'static str,
    pub label: &'static str,
}

static STEPS_FR: Lazy<Vec<ProcessingStep>> = Lazy::new(|| {
    vec![
        ProcessingStep { id: "thinking", label: "Réflexion" },
        ProcessingStep { id: "searching", label: "Recherche en base" },
        ProcessingStep { id: "generating", label: "Génération de noms" },
        ProcessingStep { id: "validating", label: "Validation des règles" },
    ]
});

static STEPS_EN: Lazy<Vec<ProcessingStep>> = Lazy::new(|| {
    vec![
        ProcessingStep { id: "thinking", label: "Thinking" },
        ProcessingStep { id: "searching", label: "Searching database" },
        ProcessingStep { id: "generating", label: "Generating names" },
        ProcessingStep { id: "validating", label: "Validating rules" },
    ]
});

static STEPS_AR: Lazy<Vec<ProcessingStep>> = Lazy::new(|| {
    vec![
        ProcessingStep { id: "thinking", label: "التفكير" },
        ProcessingStep { id: "searching", label: "البحث في قاعدة البيانات" },
        ProcessingStep { id: "generating", label: "توليد الأسماء" },
        ProcessingStep { id: "validating", label: "التحقق من القواعد" },
    ]
});

/// Processing-step labels for the given language.
pub fn processing_steps(language: Language) -> &'static [ProcessingStep] {
    match language {
        Language::Fr => &STEPS_FR,
        Language::En => &STEPS_EN,
        Language::Ar => &STEPS_AR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_language_falls_back_to_french() {
        assert_eq!(Language::parse_or_default("de"), Language::Fr);
        assert_eq!(Language::parse_or_default("ar"), Language::Ar);
    }

    #[test]
    fn test_steps_have_stable_ids_across_locales() {
        let fr: Vec<_> = processing_steps(Language::Fr).iter().map(|s| s.id).collect();
        let ar: Vec<_> = processing_steps(Language::Ar).iter().map(|s| s.id).collect();
        assert_eq!(fr, ar);
        assert_eq!(fr, vec!["thinking", "searching", "generating", "validating"]);
    }
}
