//! Keyword index: maps question keywords to reference guides.
//!
//! The index is parsed from a plain-text resource with two sections:
//!
//! ```text
//! === DESCRIPCIÓN DE GUÍAS ===
//! G1 - Guía de estudio de mercado
//! G2 - Guía de costos de producción
//!
//! === PALABRAS CLAVE ===
//! oferta, demanda, mercado -> G1
//! costos, insumos -> G2
//! ```
//!
//! Lines that don't fit the current section's shape are skipped; a malformed
//! resource yields a partial (possibly empty) index, never an error.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Description reported for a guide with no entry in the descriptions section.
pub const MISSING_DESCRIPTION: &str = "Descripción no disponible";

static GUIDE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"G\d+").expect("guide reference pattern is valid"));

/// Keyword → guide id, plus guide id → description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordIndex {
    keywords: BTreeMap<String, String>,
    descriptions: BTreeMap<String, String>,
}

/// A guide selected by a keyword found in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub guide: String,
    pub description: String,
}

#[derive(Clone, Copy)]
enum Section {
    Descriptions,
    Keywords,
}

impl KeywordIndex {
    pub fn parse(text: &str) -> Self {
        let mut index = Self::default();
        let mut section = None;

        for line in text.lines() {
            if line.starts_with("===") {
                let marker = line.to_uppercase();
                if marker.contains("DESCRIPCIÓN") || marker.contains("DESCRIPCION") {
                    section = Some(Section::Descriptions);
                } else if marker.contains("PALABRAS CLAVE") {
                    section = Some(Section::Keywords);
                }
                continue;
            }

            if line.trim().is_empty() {
                continue;
            }

            match section {
                Some(Section::Descriptions) => index.parse_description(line),
                Some(Section::Keywords) => index.parse_keywords(line),
                None => {}
            }
        }

        index
    }

    fn parse_description(&mut self, line: &str) {
        let Some((guide_part, description)) = line.split_once('-') else {
            return;
        };
        if let Some(guide) = GUIDE_REF.find(guide_part) {
            self.descriptions
                .insert(guide.as_str().to_string(), description.trim().to_string());
        }
    }

    fn parse_keywords(&mut self, line: &str) {
        let Some((keywords, guide)) = line.split_once("->") else {
            return;
        };
        let guide = guide.trim();
        if guide.is_empty() {
            return;
        }
        for keyword in keywords.split(',') {
            let keyword = keyword.trim().to_lowercase();
            if !keyword.is_empty() {
                self.keywords.insert(keyword, guide.to_string());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Number of indexed keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn guide_for(&self, keyword: &str) -> Option<&str> {
        self.keywords.get(keyword).map(String::as_str)
    }

    pub fn description(&self, guide: &str) -> Option<&str> {
        self.descriptions.get(guide).map(String::as_str)
    }

    /// Find every indexed keyword contained in `text`, ignoring case.
    ///
    /// Each matching keyword is reported on its own, so two keywords pointing
    /// at the same guide produce two entries.
    pub fn match_text(&self, text: &str) -> BTreeMap<String, KeywordMatch> {
        let text = text.to_lowercase();
        let mut found = BTreeMap::new();

        if text.is_empty() {
            return found;
        }

        for (keyword, guide) in &self.keywords {
            if text.contains(keyword.as_str()) {
                let description = self
                    .description(guide)
                    .unwrap_or(MISSING_DESCRIPTION)
                    .to_string();
                found.insert(
                    keyword.clone(),
                    KeywordMatch {
                        guide: guide.clone(),
                        description,
                    },
                );
            }
        }

        found
    }
}
