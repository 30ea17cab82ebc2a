//! Relational layout
//!
//! Name, title, description and tooltip columns hold locale ids that point
//! into `locale_en`. They carry no foreign key: the locale table is optional
//! and most keys have no translation.

/// Every table, in creation order
pub const TABLES: &[&str] = &[
    "locale_en",
    "curves",
    "curve_points",
    "items",
    "item_stats",
    "powers",
    "power_adjustments",
    "power_info",
    "talents",
    "talent_ranks",
    "talent_stats",
    "units",
    "unit_talents",
    "unit_stats",
    "unit_tags",
    "pets",
    "pet_talents",
    "pet_powers",
    "indiv_pet_talents",
    "indiv_pet_powers",
    "pet_snacks",
];

pub const INIT_QUERIES: &str = r#"
CREATE TABLE IF NOT EXISTS locale_en (
    id          INTEGER NOT NULL PRIMARY KEY,
    data        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS en_name_lookup ON locale_en(data);

CREATE TABLE IF NOT EXISTS curves (
    id          INTEGER NOT NULL PRIMARY KEY,
    real_name   TEXT
);

CREATE TABLE IF NOT EXISTS curve_points (
    id          INTEGER NOT NULL PRIMARY KEY,
    curve       INTEGER NOT NULL REFERENCES curves(id),
    stat        TEXT,
    type        TEXT,
    level       INTEGER,
    value       INTEGER
);

CREATE TABLE IF NOT EXISTS items (
    id                  INTEGER NOT NULL PRIMARY KEY,
    name                INTEGER,
    real_name           TEXT,
    image               TEXT,
    item_type           TEXT,
    item_flags          INTEGER,
    equip_school        TEXT,
    equip_level         INTEGER,
    equip_talent        INTEGER,
    equip_talent_rank   INTEGER
);

CREATE TABLE IF NOT EXISTS item_stats (
    id          INTEGER NOT NULL PRIMARY KEY,
    item        INTEGER NOT NULL REFERENCES items(id),
    type        TEXT,
    stat,
    amount      REAL
);

CREATE INDEX IF NOT EXISTS item_stat_lookup ON item_stats(item);

CREATE TABLE IF NOT EXISTS powers (
    id          INTEGER NOT NULL PRIMARY KEY,
    name        INTEGER,
    real_name   TEXT,
    image       TEXT,
    description INTEGER,
    pvp_tag     INTEGER,
    target_type INTEGER
);

CREATE TABLE IF NOT EXISTS power_adjustments (
    id              INTEGER NOT NULL PRIMARY KEY,
    power           INTEGER REFERENCES powers(id),
    adjustment_num  INTEGER,
    type            TEXT,
    operator        TEXT,
    stat            TEXT,
    amount          REAL
);

CREATE INDEX IF NOT EXISTS power_adjustment_lookup ON power_adjustments(power);

CREATE TABLE IF NOT EXISTS power_info (
    id          INTEGER NOT NULL PRIMARY KEY,
    power       INTEGER REFERENCES powers(id),
    type        TEXT,
    subtype     TEXT,
    duration    INTEGER,
    stat        TEXT,
    summoned    INTEGER,
    percent     REAL,
    amount      REAL
);

CREATE INDEX IF NOT EXISTS power_info_lookup ON power_info(power);

CREATE TABLE IF NOT EXISTS talents (
    id          INTEGER NOT NULL PRIMARY KEY,
    name        INTEGER,
    real_name   TEXT,
    image       TEXT,
    ranks       INTEGER
);

CREATE TABLE IF NOT EXISTS talent_ranks (
    id                  INTEGER NOT NULL PRIMARY KEY,
    talent              INTEGER NOT NULL REFERENCES talents(id),
    rank                INTEGER,
    description         INTEGER,
    level_req_unit      INTEGER,
    bottom_left_icon    TEXT,
    bottom_right_icon   TEXT,
    upper_left_icon     TEXT,
    bottom_left_text    INTEGER,
    bottom_right_text   INTEGER,
    upper_left_text     INTEGER
);

CREATE INDEX IF NOT EXISTS talent_rank_lookup ON talent_ranks(talent);

CREATE TABLE IF NOT EXISTS talent_stats (
    id          INTEGER NOT NULL PRIMARY KEY,
    talent      INTEGER NOT NULL REFERENCES talents(id),
    rank        INTEGER,
    operator    TEXT,
    stat        TEXT,
    amount      REAL
);

CREATE TABLE IF NOT EXISTS units (
    id              INTEGER NOT NULL PRIMARY KEY,
    name            INTEGER,
    real_name       TEXT,
    image           TEXT,
    title           INTEGER,
    school          TEXT,
    dmg_type        TEXT,
    primary_stat    INTEGER,
    curve           INTEGER,
    kind            TEXT,
    attack_type     TEXT
);

CREATE TABLE IF NOT EXISTS unit_talents (
    id          INTEGER NOT NULL PRIMARY KEY,
    unit        INTEGER NOT NULL REFERENCES units(id),
    type        TEXT,
    talent      INTEGER,
    rank        INTEGER,
    source      TEXT
);

CREATE INDEX IF NOT EXISTS unit_talent_lookup ON unit_talents(unit);

CREATE TABLE IF NOT EXISTS unit_stats (
    id          INTEGER NOT NULL PRIMARY KEY,
    unit        INTEGER NOT NULL REFERENCES units(id),
    stat        TEXT,
    operator    TEXT,
    modifier    REAL
);

CREATE INDEX IF NOT EXISTS unit_stats_lookup ON unit_stats(unit);

CREATE TABLE IF NOT EXISTS unit_tags (
    id          INTEGER NOT NULL PRIMARY KEY,
    unit        INTEGER NOT NULL REFERENCES units(id),
    tag         TEXT
);

CREATE TABLE IF NOT EXISTS pets (
    id          INTEGER NOT NULL PRIMARY KEY,
    name        INTEGER,
    real_name   TEXT,
    image       TEXT,
    strength    INTEGER,
    agility     INTEGER,
    will        INTEGER,
    power       INTEGER,
    guts        INTEGER,
    guile       INTEGER,
    grit        INTEGER,
    hp          INTEGER,
    item_flags  INTEGER
);

CREATE TABLE IF NOT EXISTS pet_talents (
    id          INTEGER NOT NULL PRIMARY KEY,
    name        INTEGER,
    real_name   TEXT,
    image       TEXT,
    is_grant    INTEGER,
    rarity      INTEGER
);

CREATE TABLE IF NOT EXISTS pet_powers (
    id          INTEGER NOT NULL PRIMARY KEY,
    name        INTEGER,
    real_name   TEXT,
    image       TEXT,
    is_grant    INTEGER,
    rarity      INTEGER,
    power       INTEGER
);

CREATE TABLE IF NOT EXISTS indiv_pet_talents (
    id          INTEGER NOT NULL PRIMARY KEY,
    pet         INTEGER NOT NULL REFERENCES pets(id),
    talent      INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS indiv_pet_talent_lookup ON indiv_pet_talents(pet);

CREATE TABLE IF NOT EXISTS indiv_pet_powers (
    id          INTEGER NOT NULL PRIMARY KEY,
    pet         INTEGER NOT NULL REFERENCES pets(id),
    power       INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS indiv_pet_power_lookup ON indiv_pet_powers(pet);

CREATE TABLE IF NOT EXISTS pet_snacks (
    id          INTEGER NOT NULL PRIMARY KEY,
    pet         INTEGER NOT NULL REFERENCES pets(id),
    snack       TEXT NOT NULL
);
"#;
