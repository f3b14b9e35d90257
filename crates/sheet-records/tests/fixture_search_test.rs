use sheet_records::{decode_records, filter_records};

fn load_fixture() -> Vec<sheet_records::Record> {
    let body = std::fs::read("tests/fixtures/functions.json").unwrap();
    decode_records(&body).unwrap()
}

fn names(records: &[sheet_records::Record]) -> Vec<String> {
    records.iter().map(|r| r.text("name")).collect()
}

#[test]
fn test_fixture_decodes_in_order() {
    let records = load_fixture();
    assert_eq!(
        names(&records),
        vec!["VLOOKUP", "SUM", "IF", "CONCAT", "XLOOKUP", "AVERAGE"]
    );
    assert_eq!(records[4].id().to_string(), "x-5");
}

#[test]
fn test_lookup_matches_name_usecase_and_syntax() {
    let records = load_fixture();
    let results = filter_records(&records, "LOOKUP");
    assert_eq!(names(&results), vec!["VLOOKUP", "XLOOKUP"]);
}

#[test]
fn test_unrendered_fields_are_searched() {
    let records = load_fixture();

    assert_eq!(names(&filter_records(&records, "logical")), vec!["IF"]);
    assert_eq!(names(&filter_records(&records, "2019")), vec!["XLOOKUP"]);
    assert_eq!(names(&filter_records(&records, "x-5")), vec!["XLOOKUP"]);
}

#[test]
fn test_null_category_never_matches() {
    let records = load_fixture();
    let results = filter_records(&records, "null");
    assert!(results.is_empty());
}

#[test]
fn test_boolean_field_matches_its_text() {
    let records = load_fixture();
    // "false" also appears in the IF syntax
    assert_eq!(names(&filter_records(&records, "false")), vec!["IF", "AVERAGE"]);
}

#[test]
fn test_narrowing_query_never_grows_results() {
    let records = load_fixture();
    let mut previous = records.len();
    for query in ["n", "nu", "num", "numb", "number1"] {
        let count = filter_records(&records, query).len();
        assert!(count <= previous, "{query}");
        previous = count;
    }
    assert_eq!(previous, 2);
}
