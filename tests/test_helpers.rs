// ==========================================
// Shared test fixtures
// ==========================================
// Generates complete survey unit datasets on disk: spatial shapefiles,
// pipe-delimited tabular text files, and populated template databases,
// all consistent with the embedded store schema.
// ==========================================
#![allow(dead_code)]

use std::io::Write;
use std::path::Path;

use gssurgo_merge::domain::survey::SurveyUnit;
use gssurgo_merge::domain::types::Region;
use gssurgo_merge::domain::value::CellValue;
use gssurgo_merge::repository::GeoStore;
use gssurgo_merge::schema::builder::StoreBuilder;
use gssurgo_merge::schema::tables::{self, TableDef};
use gssurgo_merge::schema::template::SchemaTemplate;

use shapefile::dbase::{FieldValue, Record, TableWriterBuilder};
use shapefile::{Point, Polygon, PolygonRing};

/// Knobs for one generated survey unit.
#[derive(Debug, Clone)]
pub struct UnitSpec {
    pub polygon_count: usize,
    pub boundary_count: usize,
    /// Lower-left corner of the unit's polygon grid.
    pub origin: (f64, f64),
    pub version_line: &'static str,
    pub mapunit_count: usize,
    /// Give the first map unit an Iowa corn suitability rating value.
    pub with_iacornsr: bool,
    pub with_featdesc: bool,
}

impl Default for UnitSpec {
    fn default() -> UnitSpec {
        UnitSpec {
            polygon_count: 2,
            boundary_count: 1,
            origin: (0.0, 0.0),
            version_line: "2.3.3",
            mapunit_count: 2,
            with_iacornsr: false,
            with_featdesc: true,
        }
    }
}

/// Create a complete text-mode survey unit under `root`.
pub fn write_survey_unit(root: &Path, symbol: &str, spec: &UnitSpec) -> SurveyUnit {
    let folder = root.join(format!("soil_{}", symbol.to_lowercase()));
    let spatial = folder.join("spatial");
    let tabular = folder.join("tabular");
    std::fs::create_dir_all(&spatial).unwrap();
    std::fs::create_dir_all(&tabular).unwrap();

    write_polygon_shapefile(
        &spatial.join(format!("soilmu_a_{}.shp", symbol.to_lowercase())),
        symbol,
        spec.polygon_count,
        spec.origin,
        false,
    );
    if spec.boundary_count > 0 {
        write_polygon_shapefile(
            &spatial.join(format!("soilsa_a_{}.shp", symbol.to_lowercase())),
            symbol,
            spec.boundary_count,
            spec.origin,
            true,
        );
    }

    std::fs::write(
        tabular.join("version.txt"),
        format!("{}\n", spec.version_line),
    )
    .unwrap();

    for (source_file, _) in tables::METADATA_FILES {
        write_pipe_file(
            &tabular.join(format!("{source_file}.txt")),
            &metadata_rows(source_file),
        );
    }
    for source_file in tables::IMPORT_ORDER {
        write_pipe_file(
            &tabular.join(format!("{source_file}.txt")),
            &table_rows(source_file, symbol, spec),
        );
    }

    if spec.with_featdesc {
        write_pipe_file(
            &spatial.join(format!("soilsf_t_{}.txt", symbol.to_lowercase())),
            &featdesc_rows(symbol),
        );
    }

    SurveyUnit::from_folder(&folder).unwrap()
}

/// Create a populated template database for database-mode imports.
pub fn write_template_database(unit: &SurveyUnit, symbol: &str, spec: &UnitSpec) {
    let db_path = unit.template_db_path();
    let builder = StoreBuilder::new(SchemaTemplate::for_region(Region::Unspecified));
    let db = builder.create(&db_path, "").unwrap();

    for (source_file, table) in tables::METADATA_FILES {
        let def = tables::attribute_table(table).unwrap();
        insert_raw_rows(&db, def, &metadata_rows(source_file));
    }
    for source_file in tables::IMPORT_ORDER {
        let def = tables::table_by_source(source_file).unwrap();
        if source_file == "cinterp" {
            // The template database carries interpretation rows in the
            // target shape already.
            insert_raw_rows(&db, def, &cointerp_target_rows(symbol));
        } else {
            insert_raw_rows(&db, def, &table_rows(source_file, symbol, spec));
        }
    }
}

/// Create an empty output store for importer-level tests.
pub fn build_store(dir: &Path) -> GeoStore {
    let builder = StoreBuilder::new(SchemaTemplate::for_region(Region::PacificIslands));
    builder.create(&dir.join("output.sqlite"), "").unwrap()
}

// ==========================================
// Spatial fixtures
// ==========================================

/// Write a polygon shapefile of `count` unit squares in a row starting at
/// `origin`.
pub fn write_polygon_shapefile(
    path: &Path,
    symbol: &str,
    count: usize,
    origin: (f64, f64),
    boundary_fields: bool,
) {
    if count == 0 {
        // A featureless layer; written as a stub the reader rejects.
        std::fs::write(path, b"").unwrap();
        return;
    }
    let table = if boundary_fields {
        TableWriterBuilder::new()
            .add_character_field("AREASYMBOL".try_into().unwrap(), 20)
            .add_numeric_field("SPATIALVER".try_into().unwrap(), 10, 0)
            .add_character_field("LKEY".try_into().unwrap(), 30)
    } else {
        TableWriterBuilder::new()
            .add_character_field("AREASYMBOL".try_into().unwrap(), 20)
            .add_numeric_field("SPATIALVER".try_into().unwrap(), 10, 0)
            .add_character_field("MUSYM".try_into().unwrap(), 6)
            .add_character_field("MUKEY".try_into().unwrap(), 30)
    };
    let mut writer = shapefile::Writer::from_path(path, table).unwrap();

    let (x0, y0) = origin;
    for i in 0..count {
        let x = x0 + i as f64;
        let ring = PolygonRing::Outer(vec![
            Point::new(x, y0),
            Point::new(x, y0 + 1.0),
            Point::new(x + 1.0, y0 + 1.0),
            Point::new(x + 1.0, y0),
            Point::new(x, y0),
        ]);
        let polygon = Polygon::new(ring);

        let mut record = Record::default();
        record.insert(
            "AREASYMBOL".to_string(),
            FieldValue::Character(Some(symbol.to_string())),
        );
        record.insert("SPATIALVER".to_string(), FieldValue::Numeric(Some(5.0)));
        if boundary_fields {
            record.insert(
                "LKEY".to_string(),
                FieldValue::Character(Some(format!("L-{symbol}"))),
            );
        } else {
            record.insert(
                "MUSYM".to_string(),
                FieldValue::Character(Some(format!("{}A", i + 1))),
            );
            record.insert(
                "MUKEY".to_string(),
                FieldValue::Character(Some(format!("MU-{symbol}-{}", i % 2 + 1))),
            );
        }
        writer.write_shape_and_record(&polygon, &record).unwrap();
    }
}

// ==========================================
// Tabular fixtures
// ==========================================

fn write_pipe_file(path: &Path, rows: &[Vec<String>]) {
    let mut file = std::fs::File::create(path).unwrap();
    for row in rows {
        writeln!(file, "{}", row.join("|")).unwrap();
    }
}

fn insert_raw_rows(db: &GeoStore, def: &TableDef, rows: &[Vec<String>]) {
    let fields: Vec<String> = def.columns.iter().map(|c| c.name.to_string()).collect();
    for row in rows {
        let values: Vec<CellValue> = row
            .iter()
            .map(|raw| CellValue::from_text_field(raw))
            .collect();
        db.insert_row(def.name, &fields, &values).unwrap();
    }
}

fn s(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

/// Synthetic metadata rows; every file clears the 63-record sanity floor.
pub fn metadata_rows(source_file: &str) -> Vec<Vec<String>> {
    match source_file {
        "mstab" => tables::ATTRIBUTE_TABLES
            .iter()
            .map(|def| {
                s(&[
                    def.name,
                    def.name,
                    def.label,
                    "",
                    def.source_file,
                ])
            })
            .collect(),
        "mstabcol" => tables::ATTRIBUTE_TABLES
            .iter()
            .flat_map(|def| {
                def.columns.iter().enumerate().map(|(i, col)| {
                    vec![
                        def.name.to_string(),
                        (i + 1).to_string(),
                        col.name.to_string(),
                        col.name.to_string(),
                        col.name.to_string(),
                        "String".to_string(),
                        col.length.to_string(),
                        String::new(),
                    ]
                })
            })
            .collect(),
        "msrsmas" => (0..70)
            .map(|i| {
                vec![
                    format!("ltab{i}"),
                    format!("rtab{i}"),
                    format!("rel{i}"),
                    "One to many".to_string(),
                    "Yes".to_string(),
                ]
            })
            .collect(),
        "msrsdet" => (0..70)
            .map(|i| {
                vec![
                    format!("ltab{i}"),
                    format!("rtab{i}"),
                    format!("rel{i}"),
                    "lcol".to_string(),
                    "rcol".to_string(),
                ]
            })
            .collect(),
        "msdommas" => (0..70)
            .map(|i| vec![format!("domain{i}"), "254".to_string()])
            .collect(),
        "msdomdet" => (0..70)
            .map(|i| {
                vec![
                    format!("domain{i}"),
                    "1".to_string(),
                    "choice".to_string(),
                    String::new(),
                    "No".to_string(),
                ]
            })
            .collect(),
        "msidxmas" => (0..70)
            .map(|i| {
                vec![
                    format!("table{i}"),
                    format!("UC_{i}"),
                    "Yes".to_string(),
                ]
            })
            .collect(),
        "msidxdet" => (0..70)
            .map(|i| {
                vec![
                    format!("table{i}"),
                    format!("UC_{i}"),
                    "1".to_string(),
                    "col".to_string(),
                ]
            })
            .collect(),
        other => panic!("unknown metadata file {other}"),
    }
}

/// Rows for one import-order source file. Keys are namespaced by area
/// symbol so multi-unit merges stay referentially consistent; the SDV
/// lookup rows are intentionally identical across units.
pub fn table_rows(source_file: &str, symbol: &str, spec: &UnitSpec) -> Vec<Vec<String>> {
    let lkey = format!("L-{symbol}");
    match source_file {
        "legend" => vec![vec![
            "Non-MLRA Soil Survey Area".to_string(),
            symbol.to_string(),
            format!("Fixture County, {symbol}"),
            "95000".to_string(),
            String::new(),
            lkey,
        ]],
        "mapunit" => (1..=spec.mapunit_count)
            .map(|i| {
                vec![
                    format!("{i}A"),
                    format!("Fixture loam, {i} percent slopes"),
                    "Consociation".to_string(),
                    "120.5".to_string(),
                    String::new(),
                    if spec.with_iacornsr && i == 1 {
                        "55".to_string()
                    } else {
                        String::new()
                    },
                    String::new(),
                    String::new(),
                    lkey.clone(),
                    format!("MU-{symbol}-{i}"),
                ]
            })
            .collect(),
        "comp" => (1..=spec.mapunit_count)
            .map(|i| {
                vec![
                    "85".to_string(),
                    "Fixture".to_string(),
                    "Series".to_string(),
                    "Yes".to_string(),
                    "2.0".to_string(),
                    "Well drained".to_string(),
                    "B".to_string(),
                    String::new(),
                    format!("MU-{symbol}-{i}"),
                    format!("C-{symbol}-{i}"),
                ]
            })
            .collect(),
        "muaggatt" => (1..=spec.mapunit_count)
            .map(|i| {
                vec![
                    format!("{i}A"),
                    format!("Fixture loam, {i} percent slopes"),
                    "Well drained".to_string(),
                    "B".to_string(),
                    "2.0".to_string(),
                    String::new(),
                    format!("MU-{symbol}-{i}"),
                ]
            })
            .collect(),
        "chorizon" => (1..=spec.mapunit_count)
            .map(|i| {
                vec![
                    "Ap".to_string(),
                    "0".to_string(),
                    "23".to_string(),
                    "22.5".to_string(),
                    "37.4".to_string(),
                    "2.5".to_string(),
                    "9.0".to_string(),
                    "0.18".to_string(),
                    "6.5".to_string(),
                    format!("C-{symbol}-{i}"),
                    format!("H-{symbol}-{i}"),
                ]
            })
            .collect(),
        "cinterp" => cointerp_source_rows(symbol),
        "sacatlog" => vec![vec![
            symbol.to_string(),
            format!("Fixture Area {symbol}"),
            "5".to_string(),
            "9/15/2025 12:00:00 AM".to_string(),
            "5".to_string(),
            "9/15/2025 12:00:00 AM".to_string(),
            format!("SC-{symbol}"),
        ]],
        "sainterp" => vec![vec![
            symbol.to_string(),
            "Dwellings With Basements".to_string(),
            "interpretation".to_string(),
            "2025-08-01".to_string(),
            format!("SI-{symbol}"),
            format!("SC-{symbol}"),
        ]],
        // Shared lookup data, replicated identically in every export.
        "sdvalgorithm" => vec![
            s(&["1", "None", "N", ""]),
            s(&["2", "Dominant Component", "DC", ""]),
        ],
        "sdvattribute" => vec![
            s(&[
                "84",
                "Iowa Corn Suitability Rating",
                "mapunit",
                "iacornsr",
                "Integer",
                "",
                "",
            ]),
            s(&[
                "85",
                "Soil-Based Residential Wastewater Disposal Ratings (VT)",
                "mapunit",
                "vtsepticsyscl",
                "String",
                "",
                "",
            ]),
            s(&[
                "86",
                "NH Forest Soil Group",
                "mapunit",
                "nhiforsoigrp",
                "String",
                "",
                "",
            ]),
            s(&[
                "1",
                "Drainage Class",
                "component",
                "drainagecl",
                "String",
                "",
                "",
            ]),
        ],
        "sdvfolder" => vec![s(&["1", "Soil Qualities and Features", "", "10"])],
        "sdvfolderattribute" => vec![
            s(&["10", "84"]),
            s(&["10", "85"]),
            s(&["10", "86"]),
            s(&["10", "1"]),
        ],
        // The remaining tables take no fixture rows; their files exist and
        // are empty, which is a legitimate export shape.
        _ => Vec::new(),
    }
}

/// Interpretation source rows in the 19-column export shape: two rows the
/// keep-filter retains (one depth zero, one NCCPI) and two it drops.
pub fn cointerp_source_rows(symbol: &str) -> Vec<Vec<String>> {
    let row = |main_rule: &str, rule: &str, rule_name: &str, depth: &str, key: &str| {
        let mut fields = vec![String::new(); 19];
        fields[0] = format!("C-{symbol}-1");
        fields[1] = main_rule.to_string();
        fields[2] = "Dwellings With Basements".to_string();
        fields[3] = "1".to_string();
        fields[4] = rule.to_string();
        fields[5] = rule_name.to_string();
        fields[6] = depth.to_string();
        fields[11] = "0.9".to_string();
        fields[12] = "1.0".to_string();
        fields[15] = String::new();
        fields[16] = "1".to_string();
        fields[17] = "0".to_string();
        fields[18] = format!("CI-{symbol}-{key}");
        fields
    };
    vec![
        row("12345", "12345", "Dwellings With Basements", "0", "1"),
        row("54955", "54956", "NCCPI Corn Subrule", "1", "2"),
        row("12345", "12346", "Depth To Bedrock", "1", "3"),
        row("12345", "12347", "Flooding Frequency", "2", "4"),
    ]
}

/// The same interpretation rows in the 13-column target shape, for
/// template-database fixtures.
pub fn cointerp_target_rows(symbol: &str) -> Vec<Vec<String>> {
    cointerp_source_rows(symbol)
        .into_iter()
        .filter(|row| row[6] == "0" || row[1] == "54955")
        .map(|row| {
            let mut target = Vec::with_capacity(13);
            target.extend(row[0..7].iter().cloned());
            target.extend(row[11..13].iter().cloned());
            target.extend(row[15..19].iter().cloned());
            target
        })
        .collect()
}

pub fn featdesc_rows(symbol: &str) -> Vec<Vec<String>> {
    vec![vec![
        symbol.to_string(),
        "BLO".to_string(),
        "Blowout".to_string(),
        "A saucer- or trough-shaped depression formed by wind erosion.".to_string(),
        format!("F-{symbol}"),
    ]]
}
