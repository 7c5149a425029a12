use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use erfgoed_common::{
    AttributeGroup, HeritageObject, KENMERK_DATING, KENMERK_STYLE, KENMERK_TYPOLOGY,
};

use crate::containment::{extract_links, ContainmentLinks};
use crate::designations::{classify, ProtectionSummary};
use crate::typology::{distinct_labels, match_primary_groups, render_primary_groups, TypologyFilter};

/// CSV header, in column order.
pub const COLUMNS: [&str; 33] = [
    "id",
    "uri",
    "self",
    "naam",
    "omvang",
    "disciplines",
    "erfgoedwaarde",
    "fysieke staat",
    "locatie_samenvatting",
    "provincie",
    "gemeente",
    "deelgemeente",
    "straat",
    "omvat",
    "deel van",
    "aangeduid",
    "vastgesteld",
    "beschermd",
    "erfgoedlandschap",
    "unesco",
    "monument",
    "enkel monument",
    "sdgezicht",
    "enkel sdgezicht",
    "landschap",
    "enkel landschap",
    "site",
    "overgangszone",
    "ongeldige beschermingen",
    "typologie",
    "datering",
    "stijl",
    "primaire kenmerkgroepen",
];

fn ja_nee(flag: bool) -> String {
    let text = if flag { "ja" } else { "nee" };
    text.to_string()
}

/// Distinct typology, dating and style labels over all kenmerkgroepen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSummary {
    pub typology: Vec<String>,
    pub dating: Vec<String>,
    pub style: Vec<String>,
}

impl TermSummary {
    pub fn from_groups(groups: &[AttributeGroup]) -> Self {
        Self {
            typology: distinct_labels(groups, KENMERK_TYPOLOGY),
            dating: distinct_labels(groups, KENMERK_DATING),
            style: distinct_labels(groups, KENMERK_STYLE),
        }
    }
}

/// Everything derived from one object, before the batch-wide link cleanup.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub object: HeritageObject,
    pub protection: ProtectionSummary,
    pub links: ContainmentLinks,
    pub terms: TermSummary,
    pub primary_groups: Vec<AttributeGroup>,
}

impl ReportEntry {
    pub fn analyse(object: HeritageObject, at: NaiveDate, typology: Option<&TypologyFilter>) -> Self {
        Self {
            protection: classify(&object, at),
            links: extract_links(&object),
            terms: TermSummary::from_groups(&object.attribute_groups),
            primary_groups: match_primary_groups(&object, typology),
            object,
        }
    }

    /// Final row, given the already cleaned "omvat" / "deel van" cells.
    pub fn into_row(self, contains: String, part_of: String) -> ExportRow {
        let Self {
            object,
            protection: p,
            terms,
            primary_groups,
            ..
        } = self;

        ExportRow {
            id: object.id,
            disciplines: object.discipline_initials(),
            uri: object.uri,
            self_link: object.self_link,
            naam: object.name,
            omvang: object.extent,
            erfgoedwaarde: ja_nee(object.heritage_value),
            fysieke_staat: object.physical_condition,
            locatie_samenvatting: object.location_summary,
            provincie: object.province,
            gemeente: object.municipality,
            deelgemeente: object.sub_municipality,
            straat: object.street,
            omvat: contains,
            deel_van: part_of,
            aangeduid: p.designated,
            vastgesteld: p.formally_listed,
            beschermd: p.legally_protected,
            erfgoedlandschap: p.landscape_heritage,
            unesco: p.unesco,
            monument: p.monument,
            enkel_monument: ja_nee(p.only_monument),
            sdgezicht: p.cityscape,
            enkel_sdgezicht: ja_nee(p.only_cityscape),
            landschap: p.landscape,
            enkel_landschap: ja_nee(p.only_landscape),
            site: p.site,
            overgangszone: p.transition_zone,
            ongeldige_beschermingen: p.invalid_protections,
            typologie: terms.typology.join(", "),
            datering: terms.dating.join(", "),
            stijl: terms.style.join(", "),
            primaire_kenmerkgroepen: render_primary_groups(&primary_groups),
        }
    }
}

/// One CSV line. Field order and serde names define the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub id: u64,
    pub uri: String,
    #[serde(rename = "self")]
    pub self_link: String,
    pub naam: String,
    pub omvang: String,
    pub disciplines: String,
    pub erfgoedwaarde: String,
    #[serde(rename = "fysieke staat")]
    pub fysieke_staat: String,
    pub locatie_samenvatting: String,
    pub provincie: String,
    pub gemeente: String,
    pub deelgemeente: String,
    pub straat: String,
    pub omvat: String,
    #[serde(rename = "deel van")]
    pub deel_van: String,
    pub aangeduid: u32,
    pub vastgesteld: u32,
    pub beschermd: u32,
    pub erfgoedlandschap: u32,
    pub unesco: u32,
    pub monument: u32,
    #[serde(rename = "enkel monument")]
    pub enkel_monument: String,
    pub sdgezicht: u32,
    #[serde(rename = "enkel sdgezicht")]
    pub enkel_sdgezicht: String,
    pub landschap: u32,
    #[serde(rename = "enkel landschap")]
    pub enkel_landschap: String,
    pub site: u32,
    pub overgangszone: u32,
    #[serde(rename = "ongeldige beschermingen")]
    pub ongeldige_beschermingen: u32,
    pub typologie: String,
    pub datering: String,
    pub stijl: String,
    #[serde(rename = "primaire kenmerkgroepen")]
    pub primaire_kenmerkgroepen: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{designation, entry_for, group, object_with, term, type_uri};
    use erfgoed_common::Concept;

    #[test]
    fn header_matches_column_order() {
        let row = entry_for(object_with(1, vec![], vec![])).into_row(String::new(), String::new());
        let value = serde_json::to_value(&row).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), COLUMNS.len());
        for column in COLUMNS {
            assert!(object.contains_key(column), "missing column {column}");
        }
    }

    #[test]
    fn flags_render_as_ja_nee() {
        let mut object = object_with(1, vec![designation("Beschermd monument", true, false)], vec![]);
        object.heritage_value = true;
        let row = entry_for(object).into_row(String::new(), String::new());

        assert_eq!(row.erfgoedwaarde, "ja");
        assert_eq!(row.enkel_monument, "ja");
        assert_eq!(row.enkel_sdgezicht, "nee");
        assert_eq!(row.enkel_landschap, "nee");
        assert_eq!(row.monument, 1);
        assert_eq!(row.beschermd, 1);
    }

    #[test]
    fn term_columns_and_primary_groups() {
        let object = object_with(
            1,
            vec![],
            vec![
                group(1, false, vec![
                    term(KENMERK_TYPOLOGY, "begijnhoven", &type_uri(53)),
                    term(KENMERK_DATING, "17de eeuw", "https://x/d/17"),
                ]),
                group(2, false, vec![
                    term(KENMERK_TYPOLOGY, "kerken", &type_uri(1005)),
                    term(KENMERK_STYLE, "barok", "https://x/s/1"),
                    term(KENMERK_DATING, "17de eeuw", "https://x/d/17"),
                ]),
            ],
        );
        let filter = TypologyFilter::new(
            Concept {
                id: 53,
                uri: type_uri(53),
                label: "begijnhoven".into(),
            },
            Vec::new(),
        );

        let row = ReportEntry::analyse(object, crate::testing::today(), Some(&filter))
            .into_row(String::new(), String::new());
        assert_eq!(row.typologie, "begijnhoven, kerken");
        assert_eq!(row.datering, "17de eeuw");
        assert_eq!(row.stijl, "barok");
        assert_eq!(row.primaire_kenmerkgroepen, "begijnhoven | 17de eeuw");
    }

    #[test]
    fn disciplines_are_initials() {
        let mut object = object_with(1, vec![], vec![]);
        object.disciplines = vec!["Bouwkundig".into(), "Landschappelijk".into()];
        let row = entry_for(object).into_row(String::new(), String::new());
        assert_eq!(row.disciplines, "BL");
    }
}
