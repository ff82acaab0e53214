use std::fmt;

use serde::Serialize;

/// Berlin districts an event can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum District {
    Mitte,
    Kreuzberg,
    #[serde(rename = "Neukölln")]
    Neukoelln,
    Friedrichshain,
    Charlottenburg,
    Other,
}

impl District {
    pub const ALL: [District; 6] = [
        District::Mitte,
        District::Kreuzberg,
        District::Neukoelln,
        District::Friedrichshain,
        District::Charlottenburg,
        District::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            District::Mitte => "Mitte",
            District::Kreuzberg => "Kreuzberg",
            District::Neukoelln => "Neukölln",
            District::Friedrichshain => "Friedrichshain",
            District::Charlottenburg => "Charlottenburg",
            District::Other => "Other",
        }
    }

    /// Case-insensitive lookup that also accepts the ASCII spellings of Neukölln.
    pub fn parse_loose(value: &str) -> Option<District> {
        let needle = value.trim().to_lowercase();
        if needle == "neukolln" || needle == "neukoelln" {
            return Some(District::Neukoelln);
        }
        District::ALL
            .into_iter()
            .find(|d| d.as_str().to_lowercase() == needle)
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated cultural event dossier.
///
/// Only the recovery validator can build one, so holding an `EventRecord`
/// means every field passed coercion and range checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    event_name: String,
    venue_name: String,
    district: District,
    vibe_profile: Vec<String>,
    influence_score: f64,
    confidence_score: f64,
    summary: String,
}

impl EventRecord {
    pub(crate) fn new(
        event_name: String,
        venue_name: String,
        district: District,
        vibe_profile: Vec<String>,
        influence_score: f64,
        confidence_score: f64,
        summary: String,
    ) -> Self {
        Self {
            event_name,
            venue_name,
            district,
            vibe_profile,
            influence_score,
            confidence_score,
            summary,
        }
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn venue_name(&self) -> &str {
        &self.venue_name
    }

    pub fn district(&self) -> District {
        self.district
    }

    pub fn vibe_profile(&self) -> &[String] {
        &self.vibe_profile
    }

    pub fn influence_score(&self) -> f64 {
        self.influence_score
    }

    pub fn confidence_score(&self) -> f64 {
        self.confidence_score
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }
}
