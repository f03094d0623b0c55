// ==========================================
// gSSURGO Merge - Record Codec
// ==========================================
// Parses one pipe-delimited record into typed column values: blank fields
// normalize to null, string values are truncated to the target field's
// declared length where enforcement is on, and the interpretation table
// gets its column-slice remapping here as one named transform.
// ==========================================

use csv::StringRecord;

use crate::domain::value::CellValue;
use crate::schema::catalog::FieldDef;

/// Column count the interpretation source rows carry; the export format
/// has grown past the target schema.
pub const COINTERP_SOURCE_COLUMNS: usize = 19;

/// Half-open column ranges of the source row that survive into the target
/// interpretation row, concatenated in order.
pub const COINTERP_SLICES: [(usize, usize); 3] = [(0, 7), (11, 13), (15, 19)];

/// Rule key of the NCCPI algorithm, whose rows are kept at every depth.
pub const NCCPI_RULE_KEY: &str = "54955";

/// Source column carrying the interpretation rule depth.
const RULE_DEPTH_COLUMN: usize = 6;

/// Source column carrying the main rule key.
const MAIN_RULE_KEY_COLUMN: usize = 1;

/// Truncate a string to a declared field length, counting characters.
pub fn truncate_to_length(value: &str, length: u16) -> String {
    value.chars().take(length as usize).collect()
}

/// Decode one delimited record against a table's field list.
///
/// Blank fields become null. When `enforce_lengths` is set, string values
/// longer than the declared field length are cut to exactly that length;
/// tables whose names end in `text` carry long free-text fields and are
/// imported with enforcement off.
pub fn decode_record(
    record: &StringRecord,
    fields: &[FieldDef],
    enforce_lengths: bool,
) -> Result<Vec<CellValue>, String> {
    if record.len() != fields.len() {
        return Err(format!(
            "record has {} fields, table expects {}",
            record.len(),
            fields.len()
        ));
    }

    let mut row = Vec::with_capacity(fields.len());
    for (i, field) in fields.iter().enumerate() {
        let raw = record.get(i).unwrap_or("");
        let cell = match CellValue::from_text_field(raw) {
            CellValue::Text(s) => match (enforce_lengths, field.length) {
                (true, Some(length)) if s.chars().count() > length as usize => {
                    CellValue::Text(truncate_to_length(&s, length))
                }
                _ => CellValue::Text(s),
            },
            other => other,
        };
        row.push(cell);
    }
    Ok(row)
}

/// Remap one interpretation source row into the target shape.
///
/// The source row carries columns beyond the target schema; three fixed
/// slices are concatenated into the target row. Rows are kept only when
/// the depth column is zero (top-level interpretations) or the main rule
/// key is the NCCPI rule, bounding the table to the rows the attribute
/// picker actually uses. Returns `Ok(None)` for a filtered-out row.
pub fn transform_cointerp(record: &StringRecord) -> Result<Option<Vec<CellValue>>, String> {
    if record.len() < COINTERP_SOURCE_COLUMNS {
        return Err(format!(
            "interpretation record has {} fields, expected at least {}",
            record.len(),
            COINTERP_SOURCE_COLUMNS
        ));
    }

    let depth = record.get(RULE_DEPTH_COLUMN).unwrap_or("");
    let main_rule = record.get(MAIN_RULE_KEY_COLUMN).unwrap_or("");
    if depth != "0" && main_rule != NCCPI_RULE_KEY {
        return Ok(None);
    }

    let mut row = Vec::new();
    for (start, end) in COINTERP_SLICES {
        for i in start..end {
            row.push(CellValue::from_text_field(record.get(i).unwrap_or("")));
        }
    }
    Ok(Some(row))
}
