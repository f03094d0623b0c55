// ==========================================
// Tabular importer integration tests
// ==========================================
// Exercises the per-unit import state machine against generated survey
// datasets and a real store.
// ==========================================

mod test_helpers;

use gssurgo_merge::error::ConvertError;
use gssurgo_merge::importer::source::TabularMode;
use gssurgo_merge::importer::tabular::{import_metadata_tables, TabularImporter};
use gssurgo_merge::logging;
use gssurgo_merge::repository::GeoStore;
use gssurgo_merge::schema::catalog::LiveCatalog;
use test_helpers::{build_store, write_survey_unit, write_template_database, UnitSpec};

fn import_units(
    store: &GeoStore,
    units: &[gssurgo_merge::domain::survey::SurveyUnit],
    mode: TabularMode,
) -> Result<(), ConvertError> {
    import_metadata_tables(store, &units[0], mode)?;
    let catalog = LiveCatalog::load(store)?;
    let mut importer = TabularImporter::new(store, &catalog);
    for unit in units {
        importer.import_unit(unit, mode)?;
    }
    importer.finalize()
}

#[test]
fn test_single_unit_text_import() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let unit = write_survey_unit(dir.path(), "NE109", &UnitSpec::default());
    let store = build_store(dir.path());

    import_units(&store, &[unit], TabularMode::TextFiles).unwrap();

    assert_eq!(store.count_rows("legend").unwrap(), 1);
    assert_eq!(store.count_rows("mapunit").unwrap(), 2);
    assert_eq!(store.count_rows("component").unwrap(), 2);
    assert_eq!(store.count_rows("chorizon").unwrap(), 2);
    assert_eq!(store.count_rows("sacatalog").unwrap(), 1);
    // Metadata floor satisfied.
    assert!(store.count_rows("mdstattabs").unwrap() >= 63);
    // Month table seeded exactly once.
    assert_eq!(store.count_rows("month").unwrap(), 12);
    // Optional feature descriptions present.
    assert_eq!(store.count_rows("featdesc").unwrap(), 1);
}

#[test]
fn test_interpretation_filter_bounds_table() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let unit = write_survey_unit(dir.path(), "NE109", &UnitSpec::default());
    let store = build_store(dir.path());

    import_units(&store, &[unit], TabularMode::TextFiles).unwrap();

    // Four source rows: depth zero and the NCCPI row survive.
    assert_eq!(store.count_rows("cointerp").unwrap(), 2);
    let depths: Vec<i64> = {
        let conn = store.conn();
        let mut stmt = conn
            .prepare("SELECT ruledepth FROM cointerp ORDER BY ruledepth")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    };
    assert_eq!(depths, vec![0, 1]);
    assert!(store.has_index("Indx_CointerpRulekey").unwrap());
}

#[test]
fn test_lookup_rows_deduplicated_across_units() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let spec_a = UnitSpec {
        origin: (0.0, 0.0),
        ..UnitSpec::default()
    };
    let spec_b = UnitSpec {
        origin: (10.0, 0.0),
        ..UnitSpec::default()
    };
    let unit_a = write_survey_unit(dir.path(), "NE109", &spec_a);
    let unit_b = write_survey_unit(dir.path(), "NE110", &spec_b);
    let store = build_store(dir.path());

    import_units(&store, &[unit_a, unit_b], TabularMode::TextFiles).unwrap();

    // Both units ship identical SDV lookup data; each row lands once.
    assert_eq!(store.count_rows("sdvalgorithm").unwrap(), 2);
    assert_eq!(store.count_rows("sdvfolder").unwrap(), 1);
    assert_eq!(store.count_rows("sdvfolderattribute").unwrap(), 4);
    // Non-lookup tables accumulate per unit.
    assert_eq!(store.count_rows("mapunit").unwrap(), 4);
    assert_eq!(store.count_rows("sacatalog").unwrap(), 2);
    // Month seeding is idempotent across units.
    assert_eq!(store.count_rows("month").unwrap(), 12);
}

#[test]
fn test_version_mismatch_fails_before_any_row() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let spec = UnitSpec {
        version_line: "1.0",
        ..UnitSpec::default()
    };
    let unit = write_survey_unit(dir.path(), "NE109", &spec);
    let store = build_store(dir.path());

    import_metadata_tables(&store, &unit, TabularMode::TextFiles).unwrap();
    let catalog = LiveCatalog::load(&store).unwrap();
    let mut importer = TabularImporter::new(&store, &catalog);
    let err = importer
        .import_unit(&unit, TabularMode::TextFiles)
        .unwrap_err();

    match err {
        ConvertError::UnsupportedVersion {
            found, expected, ..
        } => {
            assert_eq!(found, 1);
            assert_eq!(expected, 2);
        }
        other => panic!("expected UnsupportedVersion, got {other}"),
    }
    assert_eq!(store.count_rows("mapunit").unwrap(), 0);
    assert_eq!(store.count_rows("legend").unwrap(), 0);
}

#[test]
fn test_missing_required_source_file_aborts() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let unit = write_survey_unit(dir.path(), "NE109", &UnitSpec::default());
    std::fs::remove_file(unit.tabular_folder().join("chorizon.txt")).unwrap();
    let store = build_store(dir.path());

    let err = import_units(&store, &[unit], TabularMode::TextFiles).unwrap_err();
    match err {
        ConvertError::MissingSource { table, .. } => assert_eq!(table, "chorizon"),
        other => panic!("expected MissingSource, got {other}"),
    }
}

#[test]
fn test_undersized_metadata_table_is_fatal() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let unit = write_survey_unit(dir.path(), "NE109", &UnitSpec::default());
    std::fs::write(
        unit.tabular_folder().join("msdommas.txt"),
        "domain0|254\ndomain1|254\n",
    )
    .unwrap();
    let store = build_store(dir.path());

    let err = import_metadata_tables(&store, &unit, TabularMode::TextFiles).unwrap_err();
    match err {
        ConvertError::UndersizedTable { table, rows, floor } => {
            assert_eq!(table, "mdstatdommas");
            assert_eq!(rows, 2);
            assert_eq!(floor, 63);
        }
        other => panic!("expected UndersizedTable, got {other}"),
    }
}

#[test]
fn test_overlong_values_truncated_to_field_length() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let unit = write_survey_unit(dir.path(), "NE109", &UnitSpec::default());

    // musym is declared VARCHAR(6); hand the importer a 10-char symbol.
    let mapunit_txt = unit.tabular_folder().join("mapunit.txt");
    let content = std::fs::read_to_string(&mapunit_txt).unwrap();
    let patched = content.replace("1A|", "ABCDEFGHIJ|");
    std::fs::write(&mapunit_txt, patched).unwrap();

    let store = build_store(dir.path());
    import_units(&store, &[unit], TabularMode::TextFiles).unwrap();

    let musym: String = store
        .conn()
        .query_row(
            "SELECT musym FROM mapunit WHERE mukey = 'MU-NE109-1'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(musym, "ABCDEF");
}

#[test]
fn test_unused_rating_attributes_pruned() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let spec = UnitSpec {
        with_iacornsr: true,
        ..UnitSpec::default()
    };
    let unit = write_survey_unit(dir.path(), "IA001", &spec);
    let store = build_store(dir.path());

    import_units(&store, &[unit], TabularMode::TextFiles).unwrap();

    // iacornsr has data and survives; the other two ratings have none and
    // their attribute-directory rows are pruned.
    let remaining: Vec<String> = {
        let conn = store.conn();
        let mut stmt = conn
            .prepare(
                "SELECT attributecolumnname FROM sdvattribute \
                 WHERE attributecolumnname IN ('iacornsr', 'vtsepticsyscl', 'nhiforsoigrp')",
            )
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    };
    assert_eq!(remaining, vec!["iacornsr".to_string()]);
    // Unrelated attribute definitions stay.
    assert_eq!(
        store
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM sdvattribute WHERE attributecolumnname = 'drainagecl'",
                [],
                |row| row.get::<_, i64>(0),
            )
            .unwrap(),
        1
    );
}

#[test]
fn test_template_database_import() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let spec = UnitSpec::default();
    let unit = write_survey_unit(dir.path(), "NE109", &spec);
    write_template_database(&unit, "NE109", &spec);

    let store = build_store(dir.path());
    import_units(
        &store,
        std::slice::from_ref(&unit),
        TabularMode::TemplateDatabase,
    )
    .unwrap();

    assert_eq!(store.count_rows("mapunit").unwrap(), 2);
    assert_eq!(store.count_rows("cointerp").unwrap(), 2);
    assert_eq!(store.count_rows("sacatalog").unwrap(), 1);
    assert_eq!(store.count_rows("month").unwrap(), 12);
}

#[test]
fn test_template_database_area_symbol_mismatch() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let spec = UnitSpec::default();
    let unit = write_survey_unit(dir.path(), "NE109", &spec);
    // The database's catalog claims a different survey than the filename.
    write_template_database(&unit, "KS001", &spec);

    let store = build_store(dir.path());
    let err = import_units(
        &store,
        std::slice::from_ref(&unit),
        TabularMode::TemplateDatabase,
    )
    .unwrap_err();

    match err {
        ConvertError::AreaSymbolMismatch {
            found, expected, ..
        } => {
            assert_eq!(found, "KS001");
            assert_eq!(expected, "NE109");
        }
        other => panic!("expected AreaSymbolMismatch, got {other}"),
    }
}

#[test]
fn test_import_without_catalog_record_is_unverified() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let unit = write_survey_unit(dir.path(), "NE109", &UnitSpec::default());
    // Empty the catalog source so the unit imports nothing into sacatalog
    // (and its dependent survey-interpretation rows).
    std::fs::write(unit.tabular_folder().join("sacatlog.txt"), "").unwrap();
    std::fs::write(unit.tabular_folder().join("sainterp.txt"), "").unwrap();
    let store = build_store(dir.path());

    let err = import_units(&store, &[unit], TabularMode::TextFiles).unwrap_err();
    assert!(matches!(err, ConvertError::ImportUnverified { .. }), "{err}");
}
