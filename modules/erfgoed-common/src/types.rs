use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// --- Relation kinds ---

/// `verwant.id` of relations pointing at an aanduidingsobject (designation).
pub const DESIGNATION_KIND: u32 = 5;
/// `verwant.id` of relations pointing at another erfgoedobject.
pub const HERITAGE_OBJECT_KIND: u32 = 4;

/// `relatietype.id` values within the heritage-object family.
pub const RELATION_CONTAINS: u32 = 7;
pub const RELATION_PART_OF: u32 = 6;

// --- Kenmerk dimensions ---

pub const KENMERK_TYPOLOGY: u32 = 3;
pub const KENMERK_STYLE: u32 = 5;
pub const KENMERK_DATING: u32 = 8;

// --- Heritage object ---

/// A heritage object built from a summary record merged with its detail record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeritageObject {
    pub id: u64,
    pub uri: String,
    pub self_link: String,
    pub name: String,
    pub extent: String,
    pub disciplines: Vec<String>,
    pub location_summary: String,
    pub province: String,
    pub municipality: String,
    pub sub_municipality: String,
    pub street: String,
    pub heritage_value: bool,
    pub physical_condition: String,
    pub relations: Vec<Relation>,
    pub attribute_groups: Vec<AttributeGroup>,
}

impl HeritageObject {
    /// First letter of every discipline name, concatenated ("Bouwkundig", "Landschappelijk" -> "BL").
    pub fn discipline_initials(&self) -> String {
        self.disciplines
            .iter()
            .filter_map(|d| d.chars().next())
            .collect()
    }
}

// --- Relations ---

/// Validity window of a relation. The end date is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validity {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl Validity {
    pub fn contains(&self, at: NaiveDate) -> bool {
        self.start <= at && self.end.map_or(true, |end| end > at)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub related_kind: u32,
    pub relation_type: Option<u32>,
    pub uri: String,
    /// Always present on designation relations; optional elsewhere.
    pub validity: Option<Validity>,
    pub legal_protection: bool,
    pub formal_listing: bool,
    pub designation_type: Option<DesignationType>,
}

impl Relation {
    pub fn is_designation(&self) -> bool {
        self.related_kind == DESIGNATION_KIND
    }
}

/// The fixed vocabulary of `aanduidingsobjecttype` labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DesignationType {
    LandscapeHeritage,
    UnescoCoreZone,
    UnescoBufferZone,
    Monument,
    Cityscape,
    CityscapeIntrinsic,
    CityscapeSupporting,
    CulturalLandscape,
    ArchaeologicalSite,
    TransitionZone,
    Other(String),
}

impl DesignationType {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Erfgoedlandschap" => Self::LandscapeHeritage,
            "Unesco werelderfgoed kernzone" => Self::UnescoCoreZone,
            "Unesco werelderfgoed bufferzone" => Self::UnescoBufferZone,
            "Beschermd monument" => Self::Monument,
            "Beschermd stads- of dorpsgezicht" => Self::Cityscape,
            "Beschermd stads- of dorpsgezicht, intrinsiek" => Self::CityscapeIntrinsic,
            "Beschermd stads- of dorpsgezicht, ondersteunend" => Self::CityscapeSupporting,
            "Beschermd cultuurhistorisch landschap" => Self::CulturalLandscape,
            "Beschermde archeologische site" => Self::ArchaeologicalSite,
            "Overgangszone" => Self::TransitionZone,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::LandscapeHeritage => "Erfgoedlandschap",
            Self::UnescoCoreZone => "Unesco werelderfgoed kernzone",
            Self::UnescoBufferZone => "Unesco werelderfgoed bufferzone",
            Self::Monument => "Beschermd monument",
            Self::Cityscape => "Beschermd stads- of dorpsgezicht",
            Self::CityscapeIntrinsic => "Beschermd stads- of dorpsgezicht, intrinsiek",
            Self::CityscapeSupporting => "Beschermd stads- of dorpsgezicht, ondersteunend",
            Self::CulturalLandscape => "Beschermd cultuurhistorisch landschap",
            Self::ArchaeologicalSite => "Beschermde archeologische site",
            Self::TransitionZone => "Overgangszone",
            Self::Other(label) => label,
        }
    }

    pub fn is_unesco(&self) -> bool {
        matches!(self, Self::UnescoCoreZone | Self::UnescoBufferZone)
    }

    pub fn is_cityscape(&self) -> bool {
        matches!(
            self,
            Self::Cityscape | Self::CityscapeIntrinsic | Self::CityscapeSupporting
        )
    }
}

impl std::fmt::Display for DesignationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// --- Attribute groups ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThesaurusTerm {
    pub kenmerk_id: u32,
    pub label: String,
    pub uri: String,
}

/// A kenmerkgroep: a bundle of thesaurus terms describing (part of) an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeGroup {
    pub id: Option<u64>,
    pub applies_to_all: bool,
    pub terms: Vec<ThesaurusTerm>,
}

// --- Thesaurus ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: u64,
    pub uri: String,
    pub label: String,
}

impl std::fmt::Display for Concept {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.uri)
    }
}

/// Last path segment of a URI: `https://id.erfgoed.net/erfgoedobjecten/200` -> `200`.
pub fn short_id(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn validity_end_is_exclusive() {
        let v = Validity {
            start: date(2000, 1, 1),
            end: Some(date(2010, 1, 1)),
        };
        assert!(v.contains(date(2000, 1, 1)));
        assert!(v.contains(date(2009, 12, 31)));
        assert!(!v.contains(date(2010, 1, 1)));
        assert!(!v.contains(date(1999, 12, 31)));
    }

    #[test]
    fn designation_labels_round_trip() {
        for label in [
            "Erfgoedlandschap",
            "Beschermd monument",
            "Beschermd stads- of dorpsgezicht, intrinsiek",
            "Overgangszone",
            "Vastgesteld bouwkundig erfgoed",
        ] {
            assert_eq!(DesignationType::from_label(label).label(), label);
        }
    }

    #[test]
    fn cityscape_covers_three_sub_labels() {
        assert!(DesignationType::from_label("Beschermd stads- of dorpsgezicht").is_cityscape());
        assert!(DesignationType::from_label("Beschermd stads- of dorpsgezicht, ondersteunend")
            .is_cityscape());
        assert!(!DesignationType::Monument.is_cityscape());
    }

    #[test]
    fn short_id_takes_last_segment() {
        assert_eq!(short_id("https://id.erfgoed.net/erfgoedobjecten/200"), "200");
        assert_eq!(short_id("200"), "200");
    }

    #[test]
    fn discipline_initials_concatenate() {
        let object = HeritageObject {
            id: 1,
            uri: String::new(),
            self_link: String::new(),
            name: String::new(),
            extent: String::new(),
            disciplines: vec!["bouwkundig".into(), "landschappelijk".into()],
            location_summary: String::new(),
            province: String::new(),
            municipality: String::new(),
            sub_municipality: String::new(),
            street: String::new(),
            heritage_value: true,
            physical_condition: String::new(),
            relations: vec![],
            attribute_groups: vec![],
        };
        assert_eq!(object.discipline_initials(), "bl");
    }
}
