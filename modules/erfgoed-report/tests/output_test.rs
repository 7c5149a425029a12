use erfgoed_analysis::testing::{contains, designation, entry_for, object_with, uri};
use erfgoed_analysis::{clean_relations, COLUMNS};
use erfgoed_report::output::write_csv;

fn read(path: &std::path::Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let records = reader.records().map(|r| r.unwrap()).collect();
    (headers, records)
}

#[test]
fn empty_report_still_has_a_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("query.csv");

    write_csv(&path, &[]).unwrap();

    let (headers, records) = read(&path);
    assert_eq!(headers, COLUMNS);
    assert!(records.is_empty());
}

#[test]
fn values_line_up_with_their_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("query.csv");

    let rows = clean_relations(vec![
        entry_for(object_with(
            1,
            vec![
                designation("Beschermd monument", true, false),
                contains(&uri(2)),
            ],
            vec![],
        )),
        entry_for(object_with(2, vec![], vec![])),
    ]);
    write_csv(&path, &rows).unwrap();

    let (headers, records) = read(&path);
    assert_eq!(records.len(), 2);
    let column = |name: &str| headers.iter().position(|h| h == name).unwrap();

    let first = &records[0];
    assert_eq!(first.len(), COLUMNS.len());
    assert_eq!(&first[column("id")], "1");
    assert_eq!(&first[column("self")], "https://inventaris.onroerenderfgoed.be/erfgoedobjecten/1");
    assert_eq!(&first[column("omvat")], "2");
    assert_eq!(&first[column("monument")], "1");
    assert_eq!(&first[column("enkel monument")], "ja");
    assert_eq!(&first[column("enkel landschap")], "nee");
    assert_eq!(&first[column("disciplines")], "B");
    assert_eq!(&records[1][column("deel van")], "");
}
