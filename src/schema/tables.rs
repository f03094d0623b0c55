// ==========================================
// gSSURGO Merge - Schema Template Data
// ==========================================
// Static definition of the consolidated store's tables: physical names,
// display labels, delimited-source file names, primary keys, column lists
// with declared lengths, and the referential constraints that force the
// fixed tabular import order.
//
// This is schema data, not logic. The column lists carry the key columns
// plus representative attribute columns; lengths follow the SSURGO data
// dictionary conventions (keys are 30-char varchars, memo columns are
// unbounded).
// ==========================================

use crate::domain::types::{FeatureRole, GeometryKind};

/// Column data type in the store DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// VARCHAR(length); length 0 means an unbounded memo column.
    Text,
    Integer,
    Real,
    Date,
}

/// One column of an attribute or feature table.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub length: u16,
    pub unique: bool,
}

/// Referential constraint emitted into the store DDL. Parent tables must be
/// populated first; this is what makes the import order an invariant.
#[derive(Debug, Clone, Copy)]
pub struct ForeignKeyDef {
    pub column: &'static str,
    pub parent_table: &'static str,
    pub parent_column: &'static str,
}

/// One attribute table of the store.
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    /// Physical table name.
    pub name: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Delimited source file stem (`<source_file>.txt`); empty when the
    /// table has no delimited source (month, featdesc).
    pub source_file: &'static str,
    /// Logical primary-key column.
    pub primary_key: &'static str,
    pub columns: &'static [ColumnDef],
    pub foreign_keys: &'static [ForeignKeyDef],
}

const fn text(name: &'static str, length: u16) -> ColumnDef {
    ColumnDef {
        name,
        kind: ColumnKind::Text,
        length,
        unique: false,
    }
}

/// A 30-char key column with a uniqueness constraint (FK target).
const fn ukey(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        kind: ColumnKind::Text,
        length: 30,
        unique: true,
    }
}

/// A 30-char key column without a uniqueness constraint.
const fn rkey(name: &'static str) -> ColumnDef {
    text(name, 30)
}

const fn memo(name: &'static str) -> ColumnDef {
    text(name, 0)
}

const fn int(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        kind: ColumnKind::Integer,
        length: 0,
        unique: false,
    }
}

const fn uint(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        kind: ColumnKind::Integer,
        length: 0,
        unique: true,
    }
}

const fn real(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        kind: ColumnKind::Real,
        length: 0,
        unique: false,
    }
}

const fn date(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        kind: ColumnKind::Date,
        length: 0,
        unique: false,
    }
}

const fn fk(
    column: &'static str,
    parent_table: &'static str,
    parent_column: &'static str,
) -> ForeignKeyDef {
    ForeignKeyDef {
        column,
        parent_table,
        parent_column,
    }
}

/// Identity column present on every table, excluded from catalog field lists.
pub const IDENTITY_COLUMN: &str = "objectid";

/// Smallest record count accepted for a replicated metadata table. The
/// smallest reference file (msrsmas.txt) has 63 records; fewer means the
/// export is corrupt.
pub const MIN_METADATA_ROWS: usize = 63;

/// Canonical month names for seeding the month lookup table.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Metadata text files and their target tables, in import order. These are
/// imported once, from the first survey area, before everything else.
pub const METADATA_FILES: [(&str, &str); 8] = [
    ("mstabcol", "mdstattabcols"),
    ("msrsdet", "mdstatrshipdet"),
    ("mstab", "mdstattabs"),
    ("msrsmas", "mdstatrshipmas"),
    ("msdommas", "mdstatdommas"),
    ("msidxmas", "mdstatidxmas"),
    ("msidxdet", "mdstatidxdet"),
    ("msdomdet", "mdstatdomdet"),
];

/// The four shared lookup tables deduplicated across survey areas, with the
/// primary-key column each one is deduplicated on.
pub const SDV_KEY_FIELDS: [(&str, &str); 4] = [
    ("sdvfolderattribute", "attributekey"),
    ("sdvattribute", "attributekey"),
    ("sdvfolder", "folderkey"),
    ("sdvalgorithm", "algorithmsequence"),
];

/// Fixed tabular import order, by source file stem. The import process MUST
/// follow this order to maintain referential integrity: administrative and
/// legend tables, then map units, components, horizons, survey catalog and
/// interpretations, and the SDV lookup tables last.
pub const IMPORT_ORDER: [&str; 59] = [
    "distmd",
    "legend",
    "distimd",
    "distlmd",
    "lareao",
    "ltext",
    "mapunit",
    "comp",
    "muaggatt",
    "muareao",
    "mucrpyd",
    "mutext",
    "chorizon",
    "ccancov",
    "ccrpyd",
    "cdfeat",
    "cecoclas",
    "ceplants",
    "cerosnac",
    "cfprod",
    "cgeomord",
    "chydcrit",
    "cinterp",
    "cmonth",
    "cpmatgrp",
    "cpwndbrk",
    "crstrcts",
    "csfrags",
    "ctxfmmin",
    "ctxmoicl",
    "ctext",
    "ctreestm",
    "ctxfmoth",
    "chaashto",
    "chconsis",
    "chdsuffx",
    "chfrags",
    "chpores",
    "chstrgrp",
    "chtext",
    "chtexgrp",
    "chunifie",
    "cfprodo",
    "cpmat",
    "csmoist",
    "cstemp",
    "csmorgc",
    "csmorhpp",
    "csmormr",
    "csmorss",
    "chstr",
    "chtextur",
    "chtexmod",
    "sacatlog",
    "sainterp",
    "sdvalgorithm",
    "sdvattribute",
    "sdvfolder",
    "sdvfolderattribute",
];

/// Every attribute table of the store, parents before children so the DDL
/// can be executed in array order.
pub static ATTRIBUTE_TABLES: &[TableDef] = &[
    // ===== Static metadata tables (mdstat*) =====
    TableDef {
        name: "mdstattabs",
        label: "Table Metadata",
        source_file: "mstab",
        primary_key: "tabphyname",
        columns: &[
            text("tabphyname", 30),
            text("tablogname", 30),
            text("tablabel", 80),
            memo("tabdesc"),
            text("iefilename", 30),
        ],
        foreign_keys: &[],
    },
    TableDef {
        name: "mdstattabcols",
        label: "Column Metadata",
        source_file: "mstabcol",
        primary_key: "colphyname",
        columns: &[
            text("tabphyname", 30),
            int("colsequence"),
            text("colphyname", 30),
            text("collogname", 30),
            text("collabel", 80),
            text("logicaldatatype", 20),
            int("fieldsize"),
            memo("coldesc"),
        ],
        foreign_keys: &[],
    },
    TableDef {
        name: "mdstatrshipmas",
        label: "Relationship Master Metadata",
        source_file: "msrsmas",
        primary_key: "relationshipname",
        columns: &[
            text("ltabphyname", 30),
            text("rtabphyname", 30),
            text("relationshipname", 30),
            text("cardinality", 30),
            text("mandatory", 3),
        ],
        foreign_keys: &[],
    },
    TableDef {
        name: "mdstatrshipdet",
        label: "Relationship Detail Metadata",
        source_file: "msrsdet",
        primary_key: "relationshipname",
        columns: &[
            text("ltabphyname", 30),
            text("rtabphyname", 30),
            text("relationshipname", 30),
            text("ltabcolphyname", 30),
            text("rtabcolphyname", 30),
        ],
        foreign_keys: &[],
    },
    TableDef {
        name: "mdstatdommas",
        label: "Domain Master Metadata",
        source_file: "msdommas",
        primary_key: "domainname",
        columns: &[text("domainname", 40), int("domainmaxlen")],
        foreign_keys: &[],
    },
    TableDef {
        name: "mdstatdomdet",
        label: "Domain Detail Metadata",
        source_file: "msdomdet",
        primary_key: "domainname",
        columns: &[
            text("domainname", 40),
            int("choicesequence"),
            text("choice", 150),
            text("choicedesc", 250),
            text("choiceobsolete", 3),
        ],
        foreign_keys: &[],
    },
    TableDef {
        name: "mdstatidxmas",
        label: "Index Master Metadata",
        source_file: "msidxmas",
        primary_key: "idxphyname",
        columns: &[
            text("tabphyname", 30),
            text("idxphyname", 30),
            text("uniqueindex", 3),
        ],
        foreign_keys: &[],
    },
    TableDef {
        name: "mdstatidxdet",
        label: "Index Detail Metadata",
        source_file: "msidxdet",
        primary_key: "idxphyname",
        columns: &[
            text("tabphyname", 30),
            text("idxphyname", 30),
            int("idxcolsequence"),
            text("colphyname", 30),
        ],
        foreign_keys: &[],
    },
    // ===== Distribution / legend tables =====
    TableDef {
        name: "distmd",
        label: "Distribution Metadata",
        source_file: "distmd",
        primary_key: "distmdkey",
        columns: &[
            text("areatypename", 45),
            text("areasymbol", 20),
            date("distgendate"),
            text("diststatus", 30),
            ukey("distmdkey"),
        ],
        foreign_keys: &[],
    },
    TableDef {
        name: "legend",
        label: "Legend",
        source_file: "legend",
        primary_key: "lkey",
        columns: &[
            text("areatypename", 45),
            text("areasymbol", 20),
            text("areaname", 135),
            real("areaacres"),
            text("legenddesc", 60),
            ukey("lkey"),
        ],
        foreign_keys: &[],
    },
    TableDef {
        name: "distinterpmd",
        label: "Distribution Interp Metadata",
        source_file: "distimd",
        primary_key: "distinterpmdkey",
        columns: &[
            text("rulename", 60),
            date("interpgendate"),
            ukey("distinterpmdkey"),
            rkey("distmdkey"),
        ],
        foreign_keys: &[fk("distmdkey", "distmd", "distmdkey")],
    },
    TableDef {
        name: "distlegendmd",
        label: "Distribution Legend Metadata",
        source_file: "distlmd",
        primary_key: "distlegendmdkey",
        columns: &[
            text("areatypename", 45),
            text("areasymbol", 20),
            text("areaname", 135),
            ukey("distlegendmdkey"),
            rkey("distmdkey"),
        ],
        foreign_keys: &[fk("distmdkey", "distmd", "distmdkey")],
    },
    TableDef {
        name: "laoverlap",
        label: "Legend Area Overlap",
        source_file: "lareao",
        primary_key: "lareaovkey",
        columns: &[
            text("areatypename", 45),
            text("areasymbol", 20),
            text("areaname", 135),
            real("areaovacres"),
            ukey("lareaovkey"),
            rkey("lkey"),
        ],
        foreign_keys: &[fk("lkey", "legend", "lkey")],
    },
    TableDef {
        name: "legendtext",
        label: "Legend Text",
        source_file: "ltext",
        primary_key: "legtextkey",
        columns: &[
            date("recdate"),
            text("legendtextkind", 30),
            text("textcat", 20),
            text("textsubcat", 20),
            memo("text"),
            ukey("legtextkey"),
            rkey("lkey"),
        ],
        foreign_keys: &[fk("lkey", "legend", "lkey")],
    },
    // ===== Map unit tables =====
    TableDef {
        name: "mapunit",
        label: "Mapunit",
        source_file: "mapunit",
        primary_key: "mukey",
        columns: &[
            text("musym", 6),
            text("muname", 240),
            text("mukind", 30),
            real("muacres"),
            text("farmlndcl", 120),
            int("iacornsr"),
            text("vtsepticsyscl", 30),
            text("nhiforsoigrp", 20),
            rkey("lkey"),
            ukey("mukey"),
        ],
        foreign_keys: &[fk("lkey", "legend", "lkey")],
    },
    TableDef {
        name: "component",
        label: "Component",
        source_file: "comp",
        primary_key: "cokey",
        columns: &[
            int("comppct_r"),
            text("compname", 60),
            text("compkind", 30),
            text("majcompflag", 3),
            real("slope_r"),
            text("drainagecl", 30),
            text("hydgrp", 12),
            text("taxclname", 240),
            rkey("mukey"),
            ukey("cokey"),
        ],
        foreign_keys: &[fk("mukey", "mapunit", "mukey")],
    },
    TableDef {
        name: "muaggatt",
        label: "Mapunit Aggregated Attribute",
        source_file: "muaggatt",
        primary_key: "mukey",
        columns: &[
            text("musym", 6),
            text("muname", 240),
            text("drclassdcd", 30),
            text("hydgrpdcd", 12),
            real("slopegraddcp"),
            real("brockdepmin"),
            rkey("mukey"),
        ],
        foreign_keys: &[fk("mukey", "mapunit", "mukey")],
    },
    TableDef {
        name: "muaoverlap",
        label: "Mapunit Area Overlap",
        source_file: "muareao",
        primary_key: "muareaovkey",
        columns: &[
            real("areaovacres"),
            rkey("lareaovkey"),
            ukey("muareaovkey"),
            rkey("mukey"),
        ],
        foreign_keys: &[
            fk("lareaovkey", "laoverlap", "lareaovkey"),
            fk("mukey", "mapunit", "mukey"),
        ],
    },
    TableDef {
        name: "mucropyld",
        label: "Mapunit Crop Yield",
        source_file: "mucrpyd",
        primary_key: "mucrpyldkey",
        columns: &[
            text("cropname", 60),
            real("nonirryield_r"),
            real("irryield_r"),
            ukey("mucrpyldkey"),
            rkey("mukey"),
        ],
        foreign_keys: &[fk("mukey", "mapunit", "mukey")],
    },
    TableDef {
        name: "mutext",
        label: "Mapunit Text",
        source_file: "mutext",
        primary_key: "mutextkey",
        columns: &[
            date("recdate"),
            text("mapunittextkind", 30),
            text("textcat", 20),
            text("textsubcat", 20),
            memo("text"),
            ukey("mutextkey"),
            rkey("mukey"),
        ],
        foreign_keys: &[fk("mukey", "mapunit", "mukey")],
    },
    // ===== Horizon tables =====
    TableDef {
        name: "chorizon",
        label: "Horizon",
        source_file: "chorizon",
        primary_key: "chkey",
        columns: &[
            text("hzname", 12),
            int("hzdept_r"),
            int("hzdepb_r"),
            real("claytotal_r"),
            real("sandtotal_r"),
            real("om_r"),
            real("ksat_r"),
            real("awc_r"),
            real("ph1to1h2o_r"),
            rkey("cokey"),
            ukey("chkey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    // ===== Component child tables =====
    TableDef {
        name: "cocanopycover",
        label: "Component Canopy Cover",
        source_file: "ccancov",
        primary_key: "cocanopycovkey",
        columns: &[
            real("canopycovpct"),
            text("plantsym", 8),
            text("plantsciname", 127),
            ukey("cocanopycovkey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "cocropyld",
        label: "Component Crop Yield",
        source_file: "ccrpyd",
        primary_key: "cocropyldkey",
        columns: &[
            text("cropname", 60),
            real("nonirryield_r"),
            real("irryield_r"),
            ukey("cocropyldkey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "codiagfeatures",
        label: "Component Diagnostic Features",
        source_file: "cdfeat",
        primary_key: "codiagfeatkey",
        columns: &[
            text("featkind", 60),
            int("featdept_r"),
            int("featdepb_r"),
            ukey("codiagfeatkey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "coecoclass",
        label: "Component Ecological Classification",
        source_file: "cecoclas",
        primary_key: "coecoclasskey",
        columns: &[
            text("ecoclasstypename", 60),
            text("ecoclassref", 255),
            text("ecoclassid", 30),
            text("ecoclassname", 240),
            ukey("coecoclasskey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "coeplants",
        label: "Component Existing Plants",
        source_file: "ceplants",
        primary_key: "coeplantskey",
        columns: &[
            text("plantsym", 8),
            text("plantsciname", 127),
            text("plantcomname", 60),
            ukey("coeplantskey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "coerosionacc",
        label: "Component Erosion Accelerated",
        source_file: "cerosnac",
        primary_key: "coeroacckey",
        columns: &[
            text("erokind", 30),
            text("rvindicator", 3),
            ukey("coeroacckey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "coforprod",
        label: "Component Forest Productivity",
        source_file: "cfprod",
        primary_key: "cofprodkey",
        columns: &[
            text("plantsym", 8),
            text("plantsciname", 127),
            real("siteindexbase"),
            real("siteindex_r"),
            ukey("cofprodkey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "cogeomordesc",
        label: "Component Geomorphic Description",
        source_file: "cgeomord",
        primary_key: "cogeomdkey",
        columns: &[
            text("geomftname", 30),
            text("geomfname", 60),
            text("geomfmod", 120),
            ukey("cogeomdkey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "cohydriccriteria",
        label: "Component Hydric Criteria",
        source_file: "chydcrit",
        primary_key: "cohydcritkey",
        columns: &[
            text("hydriccriterion", 60),
            ukey("cohydcritkey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "cointerp",
        label: "Component Interpretation",
        source_file: "cinterp",
        primary_key: "cointerpkey",
        columns: &[
            rkey("cokey"),
            rkey("mrulekey"),
            text("mrulename", 60),
            int("seqnum"),
            rkey("rulekey"),
            text("rulename", 60),
            int("ruledepth"),
            real("interplr"),
            real("interphr"),
            text("nullpropdatabool", 3),
            text("defpropdatabool", 3),
            text("incpropdatabool", 3),
            ukey("cointerpkey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "comonth",
        label: "Component Month",
        source_file: "cmonth",
        primary_key: "comonthkey",
        columns: &[
            text("month", 9),
            text("flodfreqcl", 30),
            text("pondfreqcl", 30),
            real("ponddep_r"),
            ukey("comonthkey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "copmgrp",
        label: "Component Parent Material Group",
        source_file: "cpmatgrp",
        primary_key: "copmgrpkey",
        columns: &[
            text("pmgroupname", 252),
            text("rvindicator", 3),
            ukey("copmgrpkey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "cowindbreak",
        label: "Component Windbreak",
        source_file: "cpwndbrk",
        primary_key: "cowindbrkkey",
        columns: &[
            text("plantsym", 8),
            text("plantcomname", 60),
            real("height_r"),
            ukey("cowindbrkkey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "corestrictions",
        label: "Component Restrictions",
        source_file: "crstrcts",
        primary_key: "corestrictkey",
        columns: &[
            text("reskind", 60),
            text("reshard", 60),
            int("resdept_r"),
            int("resdepb_r"),
            ukey("corestrictkey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "cosurffrags",
        label: "Component Surface Fragments",
        source_file: "csfrags",
        primary_key: "cosurffragskey",
        columns: &[
            real("sfragcov_r"),
            text("sfragkind", 60),
            ukey("cosurffragskey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "cotaxfmmin",
        label: "Component Taxonomic Family Mineralogy",
        source_file: "ctxfmmin",
        primary_key: "cotaxfmminkey",
        columns: &[
            text("taxminalogy", 30),
            ukey("cotaxfmminkey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "cotaxmoistcl",
        label: "Component Taxonomic Moisture Class",
        source_file: "ctxmoicl",
        primary_key: "cotaxmckey",
        columns: &[text("taxmoistcl", 30), ukey("cotaxmckey"), rkey("cokey")],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "cotext",
        label: "Component Text",
        source_file: "ctext",
        primary_key: "cotextkey",
        columns: &[
            date("recdate"),
            text("comptextkind", 30),
            text("textcat", 20),
            text("textsubcat", 20),
            memo("text"),
            ukey("cotextkey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "cotreestomng",
        label: "Component Trees To Manage",
        source_file: "ctreestm",
        primary_key: "cotreestomngkey",
        columns: &[
            text("plantsym", 8),
            text("plantcomname", 60),
            ukey("cotreestomngkey"),
            rkey("cokey"),
        ],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    TableDef {
        name: "cotxfmother",
        label: "Component Taxonomic Family Other Criteria",
        source_file: "ctxfmoth",
        primary_key: "cotaxfokey",
        columns: &[text("taxfamother", 30), ukey("cotaxfokey"), rkey("cokey")],
        foreign_keys: &[fk("cokey", "component", "cokey")],
    },
    // ===== Horizon child tables =====
    TableDef {
        name: "chaashto",
        label: "Horizon AASHTO",
        source_file: "chaashto",
        primary_key: "chaashtokey",
        columns: &[
            text("aashtocl", 12),
            text("rvindicator", 3),
            ukey("chaashtokey"),
            rkey("chkey"),
        ],
        foreign_keys: &[fk("chkey", "chorizon", "chkey")],
    },
    TableDef {
        name: "chconsistence",
        label: "Horizon Consistence",
        source_file: "chconsis",
        primary_key: "chconsistkey",
        columns: &[
            text("rupresblkmst", 60),
            text("stickiness", 30),
            text("plasticity", 30),
            ukey("chconsistkey"),
            rkey("chkey"),
        ],
        foreign_keys: &[fk("chkey", "chorizon", "chkey")],
    },
    TableDef {
        name: "chdesgnsuffix",
        label: "Horizon Designation Suffix",
        source_file: "chdsuffx",
        primary_key: "chdsuffixkey",
        columns: &[text("desgnsuffix", 6), ukey("chdsuffixkey"), rkey("chkey")],
        foreign_keys: &[fk("chkey", "chorizon", "chkey")],
    },
    TableDef {
        name: "chfrags",
        label: "Horizon Fragments",
        source_file: "chfrags",
        primary_key: "chfragskey",
        columns: &[
            real("fragvol_r"),
            text("fragkind", 60),
            int("fragsize_r"),
            ukey("chfragskey"),
            rkey("chkey"),
        ],
        foreign_keys: &[fk("chkey", "chorizon", "chkey")],
    },
    TableDef {
        name: "chpores",
        label: "Horizon Pores",
        source_file: "chpores",
        primary_key: "chporeskey",
        columns: &[
            real("poreqty_r"),
            text("poresize", 30),
            ukey("chporeskey"),
            rkey("chkey"),
        ],
        foreign_keys: &[fk("chkey", "chorizon", "chkey")],
    },
    TableDef {
        name: "chstructgrp",
        label: "Horizon Structure Group",
        source_file: "chstrgrp",
        primary_key: "chstructgrpkey",
        columns: &[
            text("structgrpname", 120),
            text("rvindicator", 3),
            ukey("chstructgrpkey"),
            rkey("chkey"),
        ],
        foreign_keys: &[fk("chkey", "chorizon", "chkey")],
    },
    TableDef {
        name: "chtext",
        label: "Horizon Text",
        source_file: "chtext",
        primary_key: "chtextkey",
        columns: &[
            date("recdate"),
            text("chorizontextkind", 30),
            text("textcat", 20),
            text("textsubcat", 20),
            memo("text"),
            ukey("chtextkey"),
            rkey("chkey"),
        ],
        foreign_keys: &[fk("chkey", "chorizon", "chkey")],
    },
    TableDef {
        name: "chtexturegrp",
        label: "Horizon Texture Group",
        source_file: "chtexgrp",
        primary_key: "chtgkey",
        columns: &[
            text("texture", 30),
            text("stratextsflag", 3),
            text("rvindicator", 3),
            text("texdesc", 120),
            ukey("chtgkey"),
            rkey("chkey"),
        ],
        foreign_keys: &[fk("chkey", "chorizon", "chkey")],
    },
    TableDef {
        name: "chunified",
        label: "Horizon Unified",
        source_file: "chunifie",
        primary_key: "chunifiedkey",
        columns: &[
            text("unifiedcl", 12),
            text("rvindicator", 3),
            ukey("chunifiedkey"),
            rkey("chkey"),
        ],
        foreign_keys: &[fk("chkey", "chorizon", "chkey")],
    },
    // ===== Late component children (after their parents) =====
    TableDef {
        name: "coforprodo",
        label: "Component Forest Productivity - Other",
        source_file: "cfprodo",
        primary_key: "cofprodokey",
        columns: &[
            text("plantsym", 8),
            real("fprod_r"),
            ukey("cofprodokey"),
            rkey("cofprodkey"),
        ],
        foreign_keys: &[fk("cofprodkey", "coforprod", "cofprodkey")],
    },
    TableDef {
        name: "copm",
        label: "Component Parent Material",
        source_file: "cpmat",
        primary_key: "copmkey",
        columns: &[
            int("pmorder"),
            text("pmmodifier", 60),
            text("pmkind", 60),
            text("pmorigin", 60),
            ukey("copmkey"),
            rkey("copmgrpkey"),
        ],
        foreign_keys: &[fk("copmgrpkey", "copmgrp", "copmgrpkey")],
    },
    TableDef {
        name: "cosoilmoist",
        label: "Component Soil Moisture",
        source_file: "csmoist",
        primary_key: "cosoilmoistkey",
        columns: &[
            int("soimoistdept_r"),
            int("soimoistdepb_r"),
            text("soimoiststat", 30),
            ukey("cosoilmoistkey"),
            rkey("comonthkey"),
        ],
        foreign_keys: &[fk("comonthkey", "comonth", "comonthkey")],
    },
    TableDef {
        name: "cosoiltemp",
        label: "Component Soil Temperature",
        source_file: "cstemp",
        primary_key: "cosoiltempkey",
        columns: &[
            real("soitempmm"),
            ukey("cosoiltempkey"),
            rkey("comonthkey"),
        ],
        foreign_keys: &[fk("comonthkey", "comonth", "comonthkey")],
    },
    TableDef {
        name: "cosurfmorphgc",
        label: "Component Surface Morphometry - Geomorphic Component",
        source_file: "csmorgc",
        primary_key: "cosurfmorgckey",
        columns: &[
            text("geomposmntn", 30),
            text("geomposhill", 30),
            text("geomposflats", 30),
            ukey("cosurfmorgckey"),
            rkey("cogeomdkey"),
        ],
        foreign_keys: &[fk("cogeomdkey", "cogeomordesc", "cogeomdkey")],
    },
    TableDef {
        name: "cosurfmorphhpp",
        label: "Component Surface Morphometry - Hillslope Profile",
        source_file: "csmorhpp",
        primary_key: "cosurfmorhppkey",
        columns: &[
            text("hillslopeprof", 30),
            ukey("cosurfmorhppkey"),
            rkey("cogeomdkey"),
        ],
        foreign_keys: &[fk("cogeomdkey", "cogeomordesc", "cogeomdkey")],
    },
    TableDef {
        name: "cosurfmorphmr",
        label: "Component Surface Morphometry - Microrelief",
        source_file: "csmormr",
        primary_key: "cosurfmormrkey",
        columns: &[
            text("geomicrorelief", 30),
            ukey("cosurfmormrkey"),
            rkey("cogeomdkey"),
        ],
        foreign_keys: &[fk("cogeomdkey", "cogeomordesc", "cogeomdkey")],
    },
    TableDef {
        name: "cosurfmorphss",
        label: "Component Surface Morphometry - Slope Shape",
        source_file: "csmorss",
        primary_key: "cosurfmorsskey",
        columns: &[
            text("shapeacross", 30),
            text("shapedown", 30),
            ukey("cosurfmorsskey"),
            rkey("cogeomdkey"),
        ],
        foreign_keys: &[fk("cogeomdkey", "cogeomordesc", "cogeomdkey")],
    },
    TableDef {
        name: "chstruct",
        label: "Horizon Structure",
        source_file: "chstr",
        primary_key: "chstructkey",
        columns: &[
            text("structgrade", 30),
            text("structsize", 30),
            text("structtype", 60),
            ukey("chstructkey"),
            rkey("chstructgrpkey"),
        ],
        foreign_keys: &[fk("chstructgrpkey", "chstructgrp", "chstructgrpkey")],
    },
    TableDef {
        name: "chtexture",
        label: "Horizon Texture",
        source_file: "chtextur",
        primary_key: "chtkey",
        columns: &[
            text("texcl", 30),
            text("lieutex", 30),
            ukey("chtkey"),
            rkey("chtgkey"),
        ],
        foreign_keys: &[fk("chtgkey", "chtexturegrp", "chtgkey")],
    },
    TableDef {
        name: "chtexturemod",
        label: "Horizon Texture Modifier",
        source_file: "chtexmod",
        primary_key: "chtexmodkey",
        columns: &[text("texmod", 30), ukey("chtexmodkey"), rkey("chtkey")],
        foreign_keys: &[fk("chtkey", "chtexture", "chtkey")],
    },
    // ===== Survey catalog and interpretation registry =====
    TableDef {
        name: "sacatalog",
        label: "Survey Area Catalog",
        source_file: "sacatlog",
        primary_key: "sacatalogkey",
        columns: &[
            text("areasymbol", 20),
            text("areaname", 135),
            int("saversion"),
            date("saverest"),
            int("tabularversion"),
            date("tabularverest"),
            ukey("sacatalogkey"),
        ],
        foreign_keys: &[],
    },
    TableDef {
        name: "sainterp",
        label: "Survey Area Interpretation",
        source_file: "sainterp",
        primary_key: "sainterpkey",
        columns: &[
            text("areasymbol", 20),
            text("interpname", 60),
            text("interptype", 60),
            date("interpgendate"),
            ukey("sainterpkey"),
            rkey("sacatalogkey"),
        ],
        foreign_keys: &[fk("sacatalogkey", "sacatalog", "sacatalogkey")],
    },
    // ===== SDV lookup tables (deduplicated across survey areas) =====
    TableDef {
        name: "sdvalgorithm",
        label: "SDV Algorithm",
        source_file: "sdvalgorithm",
        primary_key: "algorithmsequence",
        columns: &[
            uint("algorithmsequence"),
            text("algorithmname", 50),
            text("algorithminitials", 3),
            memo("algorithmdescription"),
        ],
        foreign_keys: &[],
    },
    TableDef {
        name: "sdvattribute",
        label: "SDV Attribute",
        source_file: "sdvattribute",
        primary_key: "attributekey",
        columns: &[
            uint("attributekey"),
            text("attributename", 60),
            text("attributetablename", 30),
            text("attributecolumnname", 30),
            text("attributelogicaldatatype", 20),
            text("nasisrulename", 60),
            memo("attributedescription"),
        ],
        foreign_keys: &[],
    },
    TableDef {
        name: "sdvfolder",
        label: "SDV Folder",
        source_file: "sdvfolder",
        primary_key: "folderkey",
        columns: &[
            int("foldersequence"),
            text("foldername", 80),
            memo("folderdescription"),
            uint("folderkey"),
        ],
        foreign_keys: &[],
    },
    // No referential constraints here: the attribute-directory post-pass may
    // prune sdvattribute rows that this table still mentions.
    TableDef {
        name: "sdvfolderattribute",
        label: "SDV Folder Attribute",
        source_file: "sdvfolderattribute",
        primary_key: "attributekey",
        columns: &[int("folderkey"), int("attributekey")],
        foreign_keys: &[],
    },
    // ===== Tables without a delimited source =====
    TableDef {
        name: "month",
        label: "Month",
        source_file: "",
        primary_key: "monthseq",
        columns: &[uint("monthseq"), text("monthname", 9)],
        foreign_keys: &[],
    },
    TableDef {
        name: "featdesc",
        label: "Feature Description",
        source_file: "",
        primary_key: "featkey",
        columns: &[
            text("areasymbol", 20),
            text("featsym", 3),
            text("featname", 80),
            memo("featdesc"),
            ukey("featkey"),
        ],
        foreign_keys: &[],
    },
];

/// Attribute columns of a feature table (geometry and bbox columns are
/// added uniformly by the store builder).
pub fn feature_attribute_columns(role: FeatureRole) -> &'static [ColumnDef] {
    const MU_ATTRS: &[ColumnDef] = &[
        text("areasymbol", 20),
        int("spatialver"),
        text("musym", 6),
        rkey("mukey"),
    ];
    const SF_ATTRS: &[ColumnDef] = &[
        text("areasymbol", 20),
        int("spatialver"),
        text("featsym", 3),
        rkey("featkey"),
    ];
    const SA_ATTRS: &[ColumnDef] = &[text("areasymbol", 20), int("spatialver"), rkey("lkey")];

    match role.geometry_kind() {
        GeometryKind::Polygon => {
            if role == FeatureRole::SurveyBoundary {
                SA_ATTRS
            } else {
                MU_ATTRS
            }
        }
        GeometryKind::Line | GeometryKind::Point => {
            if matches!(
                role,
                FeatureRole::SpecialFeatureLine | FeatureRole::SpecialFeaturePoint
            ) {
                SF_ATTRS
            } else {
                MU_ATTRS
            }
        }
    }
}

/// Look up an attribute table definition by physical name.
pub fn attribute_table(name: &str) -> Option<&'static TableDef> {
    ATTRIBUTE_TABLES.iter().find(|t| t.name == name)
}

/// Look up an attribute table definition by its delimited source file stem.
pub fn table_by_source(source_file: &str) -> Option<&'static TableDef> {
    if source_file.is_empty() {
        return None;
    }
    ATTRIBUTE_TABLES
        .iter()
        .find(|t| t.source_file == source_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_import_order_entry_resolves() {
        for source in IMPORT_ORDER {
            assert!(
                table_by_source(source).is_some(),
                "no table definition for source file '{source}'"
            );
        }
    }

    #[test]
    fn test_sdv_key_fields_are_real_columns() {
        for (table, key) in SDV_KEY_FIELDS {
            let def = attribute_table(table).expect(table);
            assert!(
                def.columns.iter().any(|c| c.name == key),
                "{table} has no column {key}"
            );
            assert_eq!(def.primary_key, key);
        }
    }

    #[test]
    fn test_parents_precede_children() {
        let position = |name: &str| {
            ATTRIBUTE_TABLES
                .iter()
                .position(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing table {name}"))
        };
        for table in ATTRIBUTE_TABLES {
            for fk in table.foreign_keys {
                assert!(
                    position(fk.parent_table) < position(table.name),
                    "{} references {} defined later",
                    table.name,
                    fk.parent_table
                );
            }
        }
    }

    #[test]
    fn test_foreign_keys_point_at_unique_columns() {
        for table in ATTRIBUTE_TABLES {
            for fkdef in table.foreign_keys {
                let parent = attribute_table(fkdef.parent_table).expect(fkdef.parent_table);
                let col = parent
                    .columns
                    .iter()
                    .find(|c| c.name == fkdef.parent_column)
                    .expect(fkdef.parent_column);
                assert!(
                    col.unique,
                    "{}.{} is a foreign-key target but not unique",
                    parent.name, col.name
                );
            }
        }
    }

    #[test]
    fn test_sdv_tables_come_last_in_import_order() {
        let tail: Vec<&str> = IMPORT_ORDER[IMPORT_ORDER.len() - 4..].to_vec();
        assert_eq!(
            tail,
            vec!["sdvalgorithm", "sdvattribute", "sdvfolder", "sdvfolderattribute"]
        );
    }
}
