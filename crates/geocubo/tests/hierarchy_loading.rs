use std::io::Write;
use std::sync::Arc;

use geocubo::mcda::{
    compute_score, EvaluationSet, HierarchyError, HierarchyStore, McdaHierarchy, ScoringEngine,
};

fn write_document(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file created");
    file.write_all(contents.as_bytes())
        .expect("hierarchy written");
    file
}

#[test]
fn standard_table_round_trips_through_a_file() {
    let standard = McdaHierarchy::standard();
    let serialized = serde_json::to_string_pretty(&standard).expect("hierarchy serializes");
    let file = write_document(&serialized);

    let loaded = McdaHierarchy::from_path(file.path()).expect("hierarchy loads");

    assert_eq!(loaded, standard);
    assert!(loaded.weight_report().is_consistent());
}

#[test]
fn custom_table_drives_scoring() {
    let file = write_document(
        r#"{
            "categories": [
                {
                    "id": "location",
                    "name": "Location",
                    "weight": 40,
                    "parameters": [
                        { "id": "transit", "name": "Transit Access", "weight": 100, "evaluation_criteria": "Closer stations score higher" }
                    ]
                },
                {
                    "id": "finance",
                    "name": "Finance",
                    "weight": 60,
                    "parameters": [
                        { "id": "yield", "name": "Expected Yield", "weight": 50 },
                        { "id": "capex", "name": "Capital Requirement", "weight": 50 }
                    ]
                }
            ]
        }"#,
    );
    let hierarchy = McdaHierarchy::from_path(file.path()).expect("hierarchy loads");
    let engine = ScoringEngine::new(Arc::new(hierarchy));

    let mut evaluations = EvaluationSet::new();
    evaluations.insert("transit".to_string(), 5.0);
    evaluations.insert("yield".to_string(), 10.0);
    evaluations.insert("capex".to_string(), 6.0);

    // location: 5 * 40% = 2.0, finance: 8 * 60% = 4.8
    assert_eq!(engine.compute_score(&evaluations), 6.8);
    let lookup = engine
        .hierarchy()
        .parameter_by_id("transit")
        .expect("parameter present");
    assert_eq!(lookup.parameter.evaluation_criteria, "Closer stations score higher");
}

#[test]
fn rejected_document_leaves_store_untouched() {
    let store = HierarchyStore::standard();
    let file = write_document(r#"{ "categories": [] }"#);

    let result = McdaHierarchy::from_path(file.path());
    assert!(matches!(result, Err(HierarchyError::Empty)));

    let hierarchy = store.snapshot();
    assert_eq!(hierarchy.parameter_count(), 13);
    assert_eq!(compute_score(&hierarchy, &EvaluationSet::new()), 0.0);
}
