// Test doubles for the report pipeline.
//
// Two mocks matching the two trait boundaries:
// - MockInventory (InventorySource): summary list plus self link -> detail outcome
// - FixedThesaurus (ConceptResolver): fixed concept hierarchy
//
// Plus builders for domain objects and raw API records.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use erfgoed_common::records::{IdRef, RawAttributeGroup, RawRelation, RawTerm};
use erfgoed_common::{
    AttributeGroup, Concept, ConceptResolver, DesignationType, DetailRecord, ErfgoedError,
    HeritageObject, InventorySource, QueryFilter, Relation, Result, SummaryRecord, ThesaurusTerm,
    Validity, DESIGNATION_KIND, HERITAGE_OBJECT_KIND, RELATION_CONTAINS, RELATION_PART_OF,
};

use crate::export::ReportEntry;

// ---------------------------------------------------------------------------
// Fixed values
// ---------------------------------------------------------------------------

/// Evaluation date used throughout the tests.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

pub fn uri(id: u64) -> String {
    format!("https://id.erfgoed.net/erfgoedobjecten/{id}")
}

pub fn self_link(id: u64) -> String {
    format!("https://inventaris.onroerenderfgoed.be/erfgoedobjecten/{id}")
}

pub fn type_uri(id: u64) -> String {
    format!("https://id.erfgoed.net/thesauri/erfgoedtypes/{id}")
}

// ---------------------------------------------------------------------------
// Domain builders
// ---------------------------------------------------------------------------

/// A designation valid since 1990, open-ended.
pub fn designation(label: &str, legal_protection: bool, formal_listing: bool) -> Relation {
    Relation {
        related_kind: DESIGNATION_KIND,
        relation_type: None,
        uri: "https://id.erfgoed.net/aanduidingsobjecten/1".to_string(),
        validity: Some(Validity {
            start: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            end: None,
        }),
        legal_protection,
        formal_listing,
        designation_type: Some(DesignationType::from_label(label)),
    }
}

fn link(uri: &str, relation_type: u32) -> Relation {
    Relation {
        related_kind: HERITAGE_OBJECT_KIND,
        relation_type: Some(relation_type),
        uri: uri.to_string(),
        validity: None,
        legal_protection: false,
        formal_listing: false,
        designation_type: None,
    }
}

pub fn contains(uri: &str) -> Relation {
    link(uri, RELATION_CONTAINS)
}

pub fn part_of(uri: &str) -> Relation {
    link(uri, RELATION_PART_OF)
}

pub fn term(kenmerk_id: u32, label: &str, uri: &str) -> ThesaurusTerm {
    ThesaurusTerm {
        kenmerk_id,
        label: label.to_string(),
        uri: uri.to_string(),
    }
}

pub fn group(id: u64, applies_to_all: bool, terms: Vec<ThesaurusTerm>) -> AttributeGroup {
    AttributeGroup {
        id: Some(id),
        applies_to_all,
        terms,
    }
}

pub fn object_with(
    id: u64,
    relations: Vec<Relation>,
    attribute_groups: Vec<AttributeGroup>,
) -> HeritageObject {
    HeritageObject {
        id,
        uri: uri(id),
        self_link: self_link(id),
        name: format!("Object {id}"),
        extent: "erfgoedobject".to_string(),
        disciplines: vec!["Bouwkundig".to_string()],
        location_summary: "Lier (Antwerpen)".to_string(),
        province: "Antwerpen".to_string(),
        municipality: "Lier".to_string(),
        sub_municipality: "Lier".to_string(),
        street: "Begijnhof".to_string(),
        heritage_value: false,
        physical_condition: "bestaande".to_string(),
        relations,
        attribute_groups,
    }
}

/// Unfiltered entry evaluated on [`today`].
pub fn entry_for(object: HeritageObject) -> ReportEntry {
    ReportEntry::analyse(object, today(), None)
}

// ---------------------------------------------------------------------------
// Raw record builders
// ---------------------------------------------------------------------------

pub fn summary_record(id: u64) -> SummaryRecord {
    SummaryRecord {
        id,
        uri: uri(id),
        self_link: self_link(id),
        naam: format!("Object {id}"),
        omvang: None,
        disciplines: Vec::new(),
        locatie_samenvatting: Some("Lier (Antwerpen)".to_string()),
        locatie: None,
    }
}

pub fn detail_record(relaties: Vec<RawRelation>, kenmerkgroepen: Vec<RawAttributeGroup>) -> DetailRecord {
    DetailRecord {
        erfgoedwaarde: Some(true),
        relaties,
        kenmerkgroepen,
        ..DetailRecord::default()
    }
}

/// Raw designation valid from 1 January 1990.
pub fn raw_designation(label: &str, bescherming: bool) -> RawRelation {
    RawRelation {
        verwant: IdRef { id: DESIGNATION_KIND },
        relatietype: None,
        uri: "https://id.erfgoed.net/aanduidingsobjecten/1".to_string(),
        geldigheid_start: Some("01-01-1990".to_string()),
        geldigheid_einde: None,
        bescherming,
        vaststelling: false,
        aanduidingsobjecttype: Some(label.to_string()),
    }
}

fn raw_link(uri: &str, relation_type: u32) -> RawRelation {
    RawRelation {
        verwant: IdRef {
            id: HERITAGE_OBJECT_KIND,
        },
        relatietype: Some(IdRef { id: relation_type }),
        uri: uri.to_string(),
        geldigheid_start: None,
        geldigheid_einde: None,
        bescherming: false,
        vaststelling: false,
        aanduidingsobjecttype: None,
    }
}

pub fn raw_contains(uri: &str) -> RawRelation {
    raw_link(uri, RELATION_CONTAINS)
}

pub fn raw_part_of(uri: &str) -> RawRelation {
    raw_link(uri, RELATION_PART_OF)
}

pub fn raw_group(id: u64, alle_kenmerkgroepen: bool, terms: &[(u32, &str, &str)]) -> RawAttributeGroup {
    RawAttributeGroup {
        id: Some(id),
        alle_kenmerkgroepen,
        thesaurus: terms
            .iter()
            .map(|(kenmerk, label, uri)| RawTerm {
                kenmerk: Some(IdRef { id: *kenmerk }),
                label: label.to_string(),
                uri: uri.to_string(),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// MockInventory
// ---------------------------------------------------------------------------

enum DetailOutcome {
    Found(DetailRecord),
    Missing,
    Failure { fatal: bool },
}

/// In-memory inventory. Builder pattern: `.with_object()`, `.with_missing()`,
/// `.with_failure()`. Records every filter passed to `fetch_list`.
pub struct MockInventory {
    summaries: Vec<SummaryRecord>,
    details: HashMap<String, DetailOutcome>,
    queries: Mutex<Vec<QueryFilter>>,
    detail_calls: Mutex<Vec<String>>,
}

impl MockInventory {
    pub fn new() -> Self {
        Self {
            summaries: Vec::new(),
            details: HashMap::new(),
            queries: Mutex::new(Vec::new()),
            detail_calls: Mutex::new(Vec::new()),
        }
    }

    fn with(mut self, summary: SummaryRecord, outcome: DetailOutcome) -> Self {
        self.details.insert(summary.self_link.clone(), outcome);
        self.summaries.push(summary);
        self
    }

    pub fn with_object(self, summary: SummaryRecord, detail: DetailRecord) -> Self {
        self.with(summary, DetailOutcome::Found(detail))
    }

    /// Listed, but the detail record is gone.
    pub fn with_missing(self, summary: SummaryRecord) -> Self {
        self.with(summary, DetailOutcome::Missing)
    }

    pub fn with_failure(self, summary: SummaryRecord, fatal: bool) -> Self {
        self.with(summary, DetailOutcome::Failure { fatal })
    }

    pub fn queries(&self) -> Vec<QueryFilter> {
        self.queries.lock().unwrap().clone()
    }

    /// Self links fetched so far, in call order.
    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }
}

impl Default for MockInventory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventorySource for MockInventory {
    async fn fetch_list(&self, filter: &QueryFilter) -> Result<Vec<SummaryRecord>> {
        self.queries.lock().unwrap().push(filter.clone());
        Ok(self.summaries.clone())
    }

    async fn fetch_detail(&self, url: &str) -> Result<Option<DetailRecord>> {
        self.detail_calls.lock().unwrap().push(url.to_string());
        match self.details.get(url) {
            Some(DetailOutcome::Found(detail)) => Ok(Some(detail.clone())),
            Some(DetailOutcome::Missing) => Ok(None),
            Some(DetailOutcome::Failure { fatal }) => Err(ErfgoedError::Fetch {
                url: url.to_string(),
                message: "MockInventory: scripted failure".to_string(),
                fatal: *fatal,
            }),
            None => Err(ErfgoedError::Fetch {
                url: url.to_string(),
                message: "MockInventory: no detail registered".to_string(),
                fatal: false,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// FixedThesaurus
// ---------------------------------------------------------------------------

/// Fixed concept hierarchy. Builder pattern: `.concept(id, label)`,
/// `.child(parent, child)`. Concept URIs follow [`type_uri`].
pub struct FixedThesaurus {
    concepts: HashMap<u64, Concept>,
    children: HashMap<u64, Vec<u64>>,
}

impl FixedThesaurus {
    pub fn new() -> Self {
        Self {
            concepts: HashMap::new(),
            children: HashMap::new(),
        }
    }

    pub fn concept(mut self, id: u64, label: &str) -> Self {
        self.concepts.insert(
            id,
            Concept {
                id,
                uri: type_uri(id),
                label: label.to_string(),
            },
        );
        self
    }

    pub fn child(mut self, parent: u64, child: u64) -> Self {
        self.children.entry(parent).or_default().push(child);
        self
    }
}

impl Default for FixedThesaurus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConceptResolver for FixedThesaurus {
    async fn resolve_by_id(&self, id: u64) -> Result<Concept> {
        self.concepts
            .get(&id)
            .cloned()
            .ok_or(ErfgoedError::UnresolvableConcept(id))
    }

    async fn expand_descendants(&self, id: u64) -> Result<Vec<u64>> {
        if !self.concepts.contains_key(&id) {
            return Err(ErfgoedError::UnresolvableConcept(id));
        }
        let mut descendants = Vec::new();
        let mut queue: VecDeque<u64> = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            for child in self.children.get(&current).into_iter().flatten() {
                if !descendants.contains(child) {
                    descendants.push(*child);
                    queue.push_back(*child);
                }
            }
        }
        Ok(descendants)
    }
}
