// ==========================================
// gSSURGO Merge - Tabular Importer
// ==========================================
// Per-unit state machine: VersionCheck -> SourceResolve ->
// OrderedTableImport -> MonthSeed -> FeatureDescImport -> DateVerify.
// A single failure at any state aborts the whole run; the source favors
// fail-fast over a partially consistent store.
// ==========================================

use std::path::Path;

use tracing::{debug, info, warn};

use crate::domain::survey::SurveyUnit;
use crate::domain::types::SSURGO_VERSION;
use crate::domain::value::CellValue;
use crate::error::{ConvertError, ConvertResult};
use crate::importer::codec;
use crate::importer::session::ImportSession;
use crate::importer::source::{self, TabularMode};
use crate::repository::GeoStore;
use crate::schema::catalog::{physical_fields, FieldDef, SchemaCatalog};
use crate::schema::tables::{
    IMPORT_ORDER, METADATA_FILES, MIN_METADATA_ROWS, MONTH_NAMES, SDV_KEY_FIELDS,
};

/// Map-unit rating columns that only exist for some states. When the merged
/// region carries no data for one, its attribute-directory entry is pruned
/// so the picker does not offer an empty attribute.
const REGIONAL_RATING_COLUMNS: [&str; 3] = ["iacornsr", "vtsepticsyscl", "nhiforsoigrp"];

/// Attribute index on the interpretation table's rule key.
const COINTERP_RULEKEY_INDEX: &str = "Indx_CointerpRulekey";

/// Import the eight static metadata tables from one survey unit.
///
/// These are replicated identically in every export; they are loaded once,
/// from the first unit in merge order, before the schema catalog is built
/// from them. The 63-record sanity floor applies here: the smallest
/// reference file has that many rows, so anything shorter is a corrupt
/// export, not a small survey.
pub fn import_metadata_tables(
    store: &GeoStore,
    unit: &SurveyUnit,
    mode: TabularMode,
) -> ConvertResult<()> {
    info!(
        "importing metadata tables from {} ({:?})",
        unit.area_symbol, mode
    );

    match mode {
        TabularMode::TextFiles => {
            for (source_file, table) in METADATA_FILES {
                let fields = physical_fields(store, table)?;
                let field_names: Vec<String> = fields.iter().map(|f| f.name.clone()).collect();
                let path = unit.tabular_folder().join(format!("{source_file}.txt"));
                if !path.is_file() {
                    return Err(ConvertError::MissingSource {
                        table: table.to_string(),
                        path,
                    });
                }

                let mut reader = source::open_pipe_reader(&path)?;
                let mut inserted = 0usize;
                let mut line = 1usize;
                for record in reader.records() {
                    let record = record.map_err(|e| {
                        ConvertError::row_insert(table, line, path.display().to_string(), e.to_string())
                    })?;
                    let row = codec::decode_record(&record, &fields, true).map_err(|msg| {
                        ConvertError::row_insert(table, line, path.display().to_string(), msg)
                    })?;
                    store.insert_row(table, &field_names, &row).map_err(|e| {
                        ConvertError::row_insert(table, line, path.display().to_string(), e.to_string())
                    })?;
                    inserted += 1;
                    line += 1;
                }

                if inserted < MIN_METADATA_ROWS {
                    return Err(ConvertError::UndersizedTable {
                        table: table.to_string(),
                        rows: inserted,
                        floor: MIN_METADATA_ROWS,
                    });
                }
                debug!("{}: {} metadata records", table, inserted);
            }
        }
        TabularMode::TemplateDatabase => {
            let db_path = unit.template_db_path();
            let conn = source::open_template_db(&db_path)?;
            for (_, table) in METADATA_FILES {
                if !source::db_has_table(&conn, table)? {
                    return Err(ConvertError::MissingSource {
                        table: table.to_string(),
                        path: db_path.clone(),
                    });
                }
                let fields = physical_fields(store, table)?;
                let field_names: Vec<String> = fields.iter().map(|f| f.name.clone()).collect();
                let rows = source::db_read_rows(&conn, table, &field_names)?;
                let mut inserted = 0usize;
                for (i, row) in rows.into_iter().enumerate() {
                    store.insert_row(table, &field_names, &row).map_err(|e| {
                        ConvertError::row_insert(
                            table,
                            i + 1,
                            db_path.display().to_string(),
                            e.to_string(),
                        )
                    })?;
                    inserted += 1;
                }
                if inserted < MIN_METADATA_ROWS {
                    return Err(ConvertError::UndersizedTable {
                        table: table.to_string(),
                        rows: inserted,
                        floor: MIN_METADATA_ROWS,
                    });
                }
            }
        }
    }

    Ok(())
}

/// Streams one survey unit's attribute tables into the store, in the fixed
/// dependency-respecting order.
pub struct TabularImporter<'a, C: SchemaCatalog> {
    store: &'a GeoStore,
    catalog: &'a C,
    session: ImportSession,
}

impl<'a, C: SchemaCatalog> TabularImporter<'a, C> {
    pub fn new(store: &'a GeoStore, catalog: &'a C) -> TabularImporter<'a, C> {
        TabularImporter {
            store,
            catalog,
            session: ImportSession::new(),
        }
    }

    pub fn session(&self) -> &ImportSession {
        &self.session
    }

    /// Run the full per-unit import state machine.
    pub fn import_unit(&mut self, unit: &SurveyUnit, mode: TabularMode) -> ConvertResult<()> {
        info!("importing {} tabular data", unit.area_symbol);

        match mode {
            TabularMode::TextFiles => self.import_unit_text(unit)?,
            TabularMode::TemplateDatabase => self.import_unit_db(unit)?,
        }

        self.seed_months()?;
        self.import_featdesc(unit)?;
        self.verify_import_date(unit)?;

        self.session.units_imported += 1;
        Ok(())
    }

    // ===== Text-file path =====

    fn import_unit_text(&mut self, unit: &SurveyUnit) -> ConvertResult<()> {
        let tabular = unit.tabular_folder();

        if std::fs::read_dir(&tabular)?.next().is_none() {
            return Err(ConvertError::Internal(format!(
                "no text files found in the tabular folder {}",
                tabular.display()
            )));
        }

        // VersionCheck: nothing is written for a unit on the wrong schema.
        let version = source::version_from_text(&tabular)?;
        if version != SSURGO_VERSION {
            return Err(ConvertError::UnsupportedVersion {
                dataset: tabular.display().to_string(),
                found: version,
                expected: SSURGO_VERSION,
            });
        }

        for source_file in IMPORT_ORDER {
            let entry = self.catalog.entry_for_source(source_file)?.ok_or_else(|| {
                ConvertError::Internal(format!(
                    "textfile reference '{source_file}' not found in mdstattabs"
                ))
            })?;
            let table = entry.table.clone();
            let fields = self.catalog.fields(&table)?;
            let path = tabular.join(format!("{source_file}.txt"));
            if !path.is_file() {
                return Err(ConvertError::MissingSource { table, path });
            }
            self.import_text_table(&table, &fields, &path)?;
        }

        Ok(())
    }

    fn import_text_table(
        &mut self,
        table: &str,
        fields: &[FieldDef],
        path: &Path,
    ) -> ConvertResult<()> {
        debug!("importing {} from {}", table, path.display());

        let field_names: Vec<String> = fields.iter().map(|f| f.name.clone()).collect();
        let sdv_key = sdv_key_field(table);
        let is_interp = table == "cointerp";
        // Free-text tables carry long narrative fields; length enforcement
        // stays off for them.
        let enforce_lengths = !table.ends_with("text");

        let mut reader = source::open_pipe_reader(path)?;
        let mut line = 1usize;

        for record in reader.records() {
            let fail = |msg: String| {
                ConvertError::row_insert(table, line, path.display().to_string(), msg)
            };
            let record = record.map_err(|e| fail(e.to_string()))?;

            if is_interp {
                match codec::transform_cointerp(&record).map_err(fail)? {
                    Some(row) => self.insert(table, &field_names, &row, line, path)?,
                    None => {}
                }
            } else if let Some(key_field) = sdv_key {
                let row = codec::decode_record(&record, fields, true).map_err(fail)?;
                let key_index = fields
                    .iter()
                    .position(|f| f.name == key_field)
                    .ok_or_else(|| {
                        ConvertError::Internal(format!("{table} has no key column {key_field}"))
                    })?;
                let key = row[key_index]
                    .as_key()
                    .ok_or_else(|| fail(format!("null primary key in column {key_field}")))?;
                if self.session.key_filter.check_and_record(table, key) {
                    self.insert(table, &field_names, &row, line, path)?;
                } else {
                    self.session.duplicates_skipped += 1;
                }
            } else {
                let row = codec::decode_record(&record, fields, enforce_lengths).map_err(fail)?;
                self.insert(table, &field_names, &row, line, path)?;
            }

            line += 1;
        }

        Ok(())
    }

    // ===== Template-database path =====

    fn import_unit_db(&mut self, unit: &SurveyUnit) -> ConvertResult<()> {
        let db_path = unit.template_db_path();
        let db_name = db_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| db_path.display().to_string());
        let conn = source::open_template_db(&db_path)?;

        // VersionCheck against the template information table.
        let version = source::version_from_db(&conn, &db_name)?;
        if version != SSURGO_VERSION {
            return Err(ConvertError::UnsupportedVersion {
                dataset: db_name,
                found: version,
                expected: SSURGO_VERSION,
            });
        }

        // SourceResolve: the catalog row must agree with the symbol derived
        // from the database file name.
        match source::db_catalog_symbol(&conn)? {
            None => {
                return Err(ConvertError::MissingCatalog { dataset: db_name });
            }
            Some(symbol) => {
                if symbol.to_uppercase() != unit.area_symbol {
                    return Err(ConvertError::AreaSymbolMismatch {
                        dataset: db_name,
                        found: symbol,
                        expected: unit.area_symbol.clone(),
                    });
                }
            }
        }

        for source_file in IMPORT_ORDER {
            let entry = self.catalog.entry_for_source(source_file)?.ok_or_else(|| {
                ConvertError::Internal(format!(
                    "textfile reference '{source_file}' not found in mdstattabs"
                ))
            })?;
            let table = entry.table.clone();
            if !source::db_has_table(&conn, &table)? {
                return Err(ConvertError::MissingSource {
                    table,
                    path: db_path.clone(),
                });
            }

            // Field-name based copy using the source table's own columns;
            // the template database may trail the store schema slightly.
            let columns = source::db_table_columns(&conn, &table)?;
            let rows = source::db_read_rows(&conn, &table, &columns)?;
            let sdv_key = sdv_key_field(&table);

            for (i, row) in rows.into_iter().enumerate() {
                let line = i + 1;
                if let Some(key_field) = sdv_key {
                    let key_index = columns
                        .iter()
                        .position(|c| c.eq_ignore_ascii_case(key_field))
                        .ok_or_else(|| {
                            ConvertError::Internal(format!(
                                "{table} has no key column {key_field}"
                            ))
                        })?;
                    let Some(key) = row[key_index].as_key() else {
                        return Err(ConvertError::row_insert(
                            &table,
                            line,
                            db_path.display().to_string(),
                            format!("null primary key in column {key_field}"),
                        ));
                    };
                    if !self.session.key_filter.check_and_record(&table, key) {
                        self.session.duplicates_skipped += 1;
                        continue;
                    }
                }
                self.insert(&table, &columns, &row, line, &db_path)?;
            }
        }

        Ok(())
    }

    // ===== Shared tail states =====

    /// Seed the month lookup table with the twelve canonical names, only
    /// when it is under-populated. Safe to run once per unit.
    fn seed_months(&mut self) -> ConvertResult<()> {
        if self.store.count_rows("month")? >= 12 {
            return Ok(());
        }
        debug!("seeding month lookup table");
        let fields = vec!["monthseq".to_string(), "monthname".to_string()];
        for (seq, name) in MONTH_NAMES.iter().enumerate() {
            let row = vec![
                CellValue::Int(seq as i64 + 1),
                CellValue::Text((*name).to_string()),
            ];
            self.store.insert_row("month", &fields, &row)?;
        }
        Ok(())
    }

    /// Import the optional feature description file; absence is normal.
    fn import_featdesc(&mut self, unit: &SurveyUnit) -> ConvertResult<()> {
        let path = unit.featdesc_path();
        if !path.is_file() {
            warn!(
                "no feature description file for {} ({})",
                unit.area_symbol,
                path.display()
            );
            return Ok(());
        }

        let fields = self.catalog.fields("featdesc")?;
        let field_names: Vec<String> = fields.iter().map(|f| f.name.clone()).collect();
        let mut reader = source::open_pipe_reader(&path)?;
        let mut line = 1usize;
        for record in reader.records() {
            let fail = |msg: String| {
                ConvertError::row_insert("featdesc", line, path.display().to_string(), msg)
            };
            let record = record.map_err(|e| fail(e.to_string()))?;
            let row = codec::decode_record(&record, &fields, false).map_err(fail)?;
            self.insert("featdesc", &field_names, &row, line, &path)?;
            line += 1;
        }
        Ok(())
    }

    /// A unit whose import produced no survey catalog record failed
    /// silently somewhere; treat that as fatal rather than shipping a
    /// store with a hole in it.
    fn verify_import_date(&self, unit: &SurveyUnit) -> ConvertResult<()> {
        let entries = self.store.catalog_entries(Some(&unit.area_symbol))?;
        if entries.is_empty() {
            return Err(ConvertError::ImportUnverified {
                area_symbol: unit.area_symbol.clone(),
            });
        }
        Ok(())
    }

    /// Cross-unit post-pass: prune attribute-directory rows for regional
    /// ratings with no data in the merged map-unit table, then make sure
    /// the interpretation table has its rule-key index.
    pub fn finalize(&self) -> ConvertResult<()> {
        for column in REGIONAL_RATING_COLUMNS {
            if self.store.has_non_null("mapunit", column)? {
                continue;
            }
            let removed =
                self.store
                    .delete_where_equals("sdvattribute", "attributecolumnname", column)?;
            if removed > 0 {
                info!(
                    "removed {} sdvattribute records for unpopulated column {}",
                    removed, column
                );
            }
        }

        if self.store.has_index(COINTERP_RULEKEY_INDEX)? {
            warn!("{} already exists, skipping", COINTERP_RULEKEY_INDEX);
        } else {
            self.store
                .create_index("cointerp", "rulekey", COINTERP_RULEKEY_INDEX)?;
        }

        Ok(())
    }

    fn insert(
        &mut self,
        table: &str,
        field_names: &[String],
        row: &[CellValue],
        line: usize,
        path: &Path,
    ) -> ConvertResult<()> {
        self.store.insert_row(table, field_names, row).map_err(|e| {
            ConvertError::row_insert(table, line, path.display().to_string(), e.to_string())
        })?;
        self.session.rows_inserted += 1;
        Ok(())
    }
}

fn sdv_key_field(table: &str) -> Option<&'static str> {
    SDV_KEY_FIELDS
        .iter()
        .find(|(t, _)| *t == table)
        .map(|(_, key)| *key)
}
