//! Raw JSON shapes of the inventory API and their conversion into domain types.
//!
//! The listing endpoint returns summary records; the detail endpoint (the
//! record's `self` link) returns the full record with relations and
//! kenmerkgroepen. Fields present in both are taken from the detail record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ErfgoedError, Result};
use crate::types::{
    AttributeGroup, DesignationType, HeritageObject, Relation, ThesaurusTerm, Validity,
    DESIGNATION_KIND,
};

const DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%Y-%m-%d"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Named {
    #[serde(default)]
    pub id: Option<u64>,
    pub naam: String,
}

/// Location fields come as plain strings in listings and as `{id, naam}` in details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NameOrText {
    Text(String),
    Named(Named),
}

impl NameOrText {
    pub fn as_str(&self) -> &str {
        match self {
            NameOrText::Text(text) => text,
            NameOrText::Named(named) => &named.naam,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub provincie: Option<NameOrText>,
    #[serde(default)]
    pub gemeente: Option<NameOrText>,
    #[serde(default)]
    pub deelgemeente: Option<NameOrText>,
    #[serde(default)]
    pub straat: Option<NameOrText>,
    #[serde(default)]
    pub status: Option<Named>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub id: u64,
    pub uri: String,
    #[serde(rename = "self", default)]
    pub self_link: String,
    pub naam: String,
    #[serde(default)]
    pub omvang: Option<Named>,
    #[serde(default)]
    pub disciplines: Vec<Named>,
    #[serde(default)]
    pub locatie_samenvatting: Option<String>,
    #[serde(default)]
    pub locatie: Option<RawLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    #[serde(default)]
    pub naam: Option<String>,
    #[serde(default)]
    pub erfgoedwaarde: Option<bool>,
    #[serde(default)]
    pub locatie_samenvatting: Option<String>,
    #[serde(default)]
    pub locatie: Option<RawLocation>,
    #[serde(default)]
    pub fysieke_status: Option<Named>,
    #[serde(default)]
    pub relaties: Vec<RawRelation>,
    #[serde(default)]
    pub kenmerkgroepen: Vec<RawAttributeGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRelation {
    pub verwant: IdRef,
    #[serde(default)]
    pub relatietype: Option<IdRef>,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub geldigheid_start: Option<String>,
    #[serde(default)]
    pub geldigheid_einde: Option<String>,
    #[serde(default)]
    pub bescherming: bool,
    #[serde(default)]
    pub vaststelling: bool,
    #[serde(default)]
    pub aanduidingsobjecttype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAttributeGroup {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub alle_kenmerkgroepen: bool,
    #[serde(default)]
    pub thesaurus: Vec<RawTerm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTerm {
    #[serde(default)]
    pub kenmerk: Option<IdRef>,
    pub label: String,
    #[serde(default)]
    pub uri: String,
}

/// Parse an inventory date (`dd-mm-YYYY`, ISO accepted as well).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn location_field(
    detail: Option<&RawLocation>,
    summary: Option<&RawLocation>,
    pick: impl Fn(&RawLocation) -> Option<&NameOrText>,
) -> String {
    detail
        .and_then(&pick)
        .or_else(|| summary.and_then(&pick))
        .map(|v| v.as_str().to_string())
        .unwrap_or_default()
}

impl RawRelation {
    fn into_relation(self, object: &str) -> Result<Relation> {
        let validity = if self.verwant.id == DESIGNATION_KIND {
            Some(self.designation_validity(object)?)
        } else {
            // Dates on other relations are informational only.
            let start = self.geldigheid_start.as_deref().and_then(parse_date);
            let end = self.geldigheid_einde.as_deref().and_then(parse_date);
            start.map(|start| Validity { start, end })
        };

        Ok(Relation {
            related_kind: self.verwant.id,
            relation_type: self.relatietype.map(|r| r.id),
            uri: self.uri,
            validity,
            legal_protection: self.bescherming,
            formal_listing: self.vaststelling,
            designation_type: self
                .aanduidingsobjecttype
                .as_deref()
                .map(DesignationType::from_label),
        })
    }

    /// Designations need a parseable start date; the end date is optional.
    fn designation_validity(&self, object: &str) -> Result<Validity> {
        let raw_start = self.geldigheid_start.as_deref().ok_or_else(|| {
            ErfgoedError::malformed(
                object,
                format!("designation relation {} has no start date", self.uri),
            )
        })?;
        let start = parse_date(raw_start).ok_or_else(|| {
            ErfgoedError::malformed(
                object,
                format!("relation {} has unparseable start date {raw_start:?}", self.uri),
            )
        })?;
        let end = match self.geldigheid_einde.as_deref() {
            Some(raw) => Some(parse_date(raw).ok_or_else(|| {
                ErfgoedError::malformed(
                    object,
                    format!("relation {} has unparseable end date {raw:?}", self.uri),
                )
            })?),
            None => None,
        };
        Ok(Validity { start, end })
    }
}

impl RawAttributeGroup {
    fn into_group(self, object: &str) -> Result<AttributeGroup> {
        let terms = self
            .thesaurus
            .into_iter()
            .map(|term| match term.kenmerk {
                Some(kenmerk) => Ok(ThesaurusTerm {
                    kenmerk_id: kenmerk.id,
                    label: term.label,
                    uri: term.uri,
                }),
                None => Err(ErfgoedError::malformed(
                    object,
                    format!("term {:?} has no kenmerk id", term.label),
                )),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(AttributeGroup {
            id: self.id,
            applies_to_all: self.alle_kenmerkgroepen,
            terms,
        })
    }
}

impl HeritageObject {
    /// Merge a listing record with its detail record.
    pub fn from_records(summary: SummaryRecord, detail: DetailRecord) -> Result<Self> {
        let object = summary.uri.as_str();

        let relations = detail
            .relaties
            .into_iter()
            .map(|r| r.into_relation(object))
            .collect::<Result<Vec<_>>>()?;
        let attribute_groups = detail
            .kenmerkgroepen
            .into_iter()
            .map(|g| g.into_group(object))
            .collect::<Result<Vec<_>>>()?;

        let detail_location = detail.locatie.as_ref();
        let summary_location = summary.locatie.as_ref();

        let physical_condition = detail_location
            .and_then(|l| l.status.as_ref())
            .or(detail.fysieke_status.as_ref())
            .map(|s| s.naam.clone())
            .unwrap_or_default();

        Ok(HeritageObject {
            id: summary.id,
            uri: summary.uri.clone(),
            self_link: summary.self_link,
            name: detail.naam.unwrap_or(summary.naam),
            extent: summary.omvang.map(|o| o.naam).unwrap_or_default(),
            disciplines: summary.disciplines.into_iter().map(|d| d.naam).collect(),
            location_summary: detail
                .locatie_samenvatting
                .or(summary.locatie_samenvatting)
                .unwrap_or_default(),
            province: location_field(detail_location, summary_location, |l| l.provincie.as_ref()),
            municipality: location_field(detail_location, summary_location, |l| {
                l.gemeente.as_ref()
            }),
            sub_municipality: location_field(detail_location, summary_location, |l| {
                l.deelgemeente.as_ref()
            }),
            street: location_field(detail_location, summary_location, |l| l.straat.as_ref()),
            heritage_value: detail.erfgoedwaarde.unwrap_or(false),
            physical_condition,
            relations,
            attribute_groups,
        })
    }
}
