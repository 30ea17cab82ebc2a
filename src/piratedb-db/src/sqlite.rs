//! SQLite writer using rusqlite (synchronous)

use crate::locale::LocaleTable;
use crate::schema::{INIT_QUERIES, TABLES};
use crate::DbResult;
use piratedb::records::power::ResultVariant;
use piratedb::records::{AdjustmentTriple, Companion, CompanionPower, CompanionTalent};
use piratedb::{Curve, Item, Power, Records, Talent, Unit};
use rusqlite::types::Value;
use rusqlite::{params, Connection};
use std::path::Path;

/// Default database location
pub const DEFAULT_DB_PATH: &str = "items.db";

/// `talent_stats` row written for a rank that grants no stat
const NO_RANK_STAT: (&str, &str, f64) = ("-1", "", -1.0);

/// Row count of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: i64,
}

/// SQLite-backed record database
pub struct SqliteDb {
    conn: Connection,
}

impl SqliteDb {
    /// Open or create the database
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create every table and index that does not exist yet
    pub fn init(&self) -> DbResult<()> {
        self.conn.execute_batch(INIT_QUERIES)?;
        Ok(())
    }

    /// Write locale rows, returning how many were written
    pub fn write_locale(&mut self, locale: &LocaleTable) -> DbResult<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare("INSERT OR REPLACE INTO locale_en (id, data) VALUES (?1, ?2)")?;
            for (id, text) in locale.rows() {
                stmt.execute(params![id, text])?;
            }
        }
        tx.commit()?;
        tracing::info!("Wrote {} locale strings", locale.len());
        Ok(locale.len())
    }

    /// Write every record in one transaction
    pub fn write_records(&mut self, records: &Records) -> DbResult<()> {
        let tx = self.conn.transaction()?;
        insert_curves(&tx, &records.curves)?;
        insert_items(&tx, &records.items)?;
        insert_units(&tx, &records.units)?;
        insert_pets(&tx, &records.companions)?;
        insert_talents(&tx, &records.talents)?;
        insert_powers(&tx, &records.powers)?;
        insert_pet_talents(&tx, &records.companion_talents)?;
        insert_pet_powers(&tx, &records.companion_powers)?;
        tx.commit()?;

        for (kind, count) in records.counts() {
            tracing::debug!("Wrote {} {} records", count, kind);
        }
        tracing::info!("Wrote {} records", records.len());
        Ok(())
    }

    /// Row count of a single table
    pub fn count(&self, table: &str) -> DbResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }

    /// Row counts of every table, in creation order
    pub fn counts(&self) -> DbResult<Vec<TableCount>> {
        TABLES
            .iter()
            .copied()
            .map(|table| {
                Ok(TableCount {
                    table,
                    rows: self.count(table)?,
                })
            })
            .collect()
    }
}

fn insert_curves(conn: &Connection, curves: &[Curve]) -> DbResult<()> {
    let mut curve_stmt = conn.prepare("INSERT INTO curves (id, real_name) VALUES (?1, ?2)")?;
    let mut point_stmt = conn.prepare(
        "INSERT INTO curve_points (curve, stat, type, level, value) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    for curve in curves {
        let id = curve.info.template_id;
        curve_stmt.execute(params![id, curve.info.real_name])?;

        for attribute in &curve.attributes {
            for point in &attribute.points {
                point_stmt.execute(params![id, attribute.stat, "Regular", point.level, point.value])?;
            }
            for point in &attribute.bonus {
                point_stmt.execute(params![id, attribute.stat, "Bonus", point.level, point.value])?;
            }
        }
    }
    Ok(())
}

/// `item_stats` rows for one item: `(type, stat, amount)`
///
/// The stat column holds a stat name for stat and weapon rows and a
/// template id for talent and power grants.
fn item_stat_rows(item: &Item) -> Vec<(&'static str, Value, f64)> {
    let mut rows = Vec::new();
    for stat in &item.stats {
        rows.push(("Stat", Value::Text(stat.stat.clone()), stat.amount));
    }
    for talent in &item.talents {
        rows.push(("Talent", Value::Integer(*talent as i64), 1.0));
    }
    for power in &item.powers {
        rows.push(("Power", Value::Integer(*power as i64), 1.0));
    }
    if let Some(weapon_type) = &item.weapon_type {
        rows.push(("Weapon Type", Value::Text(weapon_type.clone()), 1.0));
    }
    if let Some(weapon) = &item.weapon {
        rows.push(("Weapon Type", Value::Text(weapon.damage_type.clone()), 1.0));
        rows.push(("Weapon Type", Value::Integer(weapon.primary_stat), 1.0));
    }
    rows
}

fn insert_items(conn: &Connection, items: &[Item]) -> DbResult<()> {
    let mut item_stmt = conn.prepare(
        "INSERT INTO items (id, name, real_name, image, item_type, item_flags,
            equip_school, equip_level, equip_talent, equip_talent_rank)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )?;
    let mut stat_stmt =
        conn.prepare("INSERT INTO item_stats (item, type, stat, amount) VALUES (?1, ?2, ?3, ?4)")?;

    for item in items {
        let id = item.info.template_id;
        let req = &item.requirements;
        item_stmt.execute(params![
            id,
            item.info.display_name.id,
            item.info.real_name,
            item.info.image,
            item.slot,
            item.item_flags,
            req.school,
            req.level,
            req.talent.as_ref().map(|t| t.talent_id),
            req.talent.as_ref().map(|t| t.min_rank),
        ])?;

        for (kind, stat, amount) in item_stat_rows(item) {
            stat_stmt.execute(params![id, kind, stat, amount])?;
        }
    }
    Ok(())
}

fn insert_units(conn: &Connection, units: &[Unit]) -> DbResult<()> {
    let mut unit_stmt = conn.prepare(
        "INSERT INTO units (id, name, real_name, image, title, school, dmg_type,
            primary_stat, curve, kind, attack_type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )?;
    let mut stat_stmt = conn.prepare(
        "INSERT INTO unit_stats (unit, stat, operator, modifier) VALUES (?1, ?2, ?3, ?4)",
    )?;
    let mut talent_stmt = conn.prepare(
        "INSERT INTO unit_talents (unit, type, talent, rank, source) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    let mut tag_stmt = conn.prepare("INSERT INTO unit_tags (unit, tag) VALUES (?1, ?2)")?;

    for unit in units {
        let id = unit.info.template_id;
        unit_stmt.execute(params![
            id,
            unit.info.display_name.id,
            unit.info.real_name,
            unit.info.image,
            unit.title.id,
            unit.school,
            unit.damage_type,
            unit.primary_stat,
            unit.curve,
            unit.unit_type,
            unit.attack_type,
        ])?;

        for modifier in &unit.stat_modifiers {
            stat_stmt.execute(params![id, modifier.stat, modifier.operator, modifier.amount])?;
        }
        for talent in &unit.talents {
            talent_stmt.execute(params![id, "Talent", talent.talent_id, talent.rank, talent.source])?;
        }
        for power in &unit.powers {
            talent_stmt.execute(params![id, "Power", power.power_id, 1, power.source])?;
        }
        for tag in &unit.tags {
            tag_stmt.execute(params![id, tag])?;
        }
    }
    Ok(())
}

fn insert_pets(conn: &Connection, pets: &[Companion]) -> DbResult<()> {
    let mut pet_stmt = conn.prepare(
        "INSERT INTO pets (id, name, real_name, image, strength, agility, will, power,
            guts, guile, grit, hp, item_flags)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
    )?;
    let mut talent_stmt =
        conn.prepare("INSERT INTO indiv_pet_talents (pet, talent) VALUES (?1, ?2)")?;
    let mut power_stmt = conn.prepare("INSERT INTO indiv_pet_powers (pet, power) VALUES (?1, ?2)")?;
    let mut snack_stmt = conn.prepare("INSERT INTO pet_snacks (pet, snack) VALUES (?1, ?2)")?;

    for pet in pets {
        let id = pet.info.template_id;
        let max = &pet.maxima;
        pet_stmt.execute(params![
            id,
            pet.info.display_name.id,
            pet.info.real_name,
            pet.info.image,
            max.strength,
            max.agility,
            max.will,
            max.power,
            max.guts,
            max.guile,
            max.grit,
            max.hp,
            pet.item_flags,
        ])?;

        for talent in &pet.base_talents {
            talent_stmt.execute(params![id, talent])?;
        }
        for power in &pet.base_powers {
            power_stmt.execute(params![id, power])?;
        }
        for snack in &pet.preferred_snacks {
            snack_stmt.execute(params![id, snack])?;
        }
    }
    Ok(())
}

fn insert_talents(conn: &Connection, talents: &[Talent]) -> DbResult<()> {
    let mut talent_stmt = conn.prepare(
        "INSERT INTO talents (id, name, real_name, image, ranks) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    let mut rank_stmt = conn.prepare(
        "INSERT INTO talent_ranks (talent, rank, description, level_req_unit,
            bottom_left_icon, bottom_right_icon, upper_left_icon,
            bottom_left_text, bottom_right_text, upper_left_text)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )?;
    let mut stat_stmt = conn.prepare(
        "INSERT INTO talent_stats (talent, rank, operator, stat, amount) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    for talent in talents {
        let id = talent.info.template_id;
        talent_stmt.execute(params![
            id,
            talent.info.display_name.id,
            talent.info.real_name,
            talent.info.image,
            talent.ranks.len(),
        ])?;

        for rank in &talent.ranks {
            let [left, right, upper] = &rank.slots;
            rank_stmt.execute(params![
                id,
                rank.rank,
                rank.description.id,
                rank.unit_level,
                left.icon,
                right.icon,
                upper.icon,
                left.tooltip.id,
                right.tooltip.id,
                upper.tooltip.id,
            ])?;

            let (operator, stat, amount) = match &rank.stat {
                Some(t) => (t.operator.as_str(), t.stat.as_str(), t.amount),
                None => NO_RANK_STAT,
            };
            stat_stmt.execute(params![id, rank.rank, operator, stat, amount])?;
        }
    }
    Ok(())
}

/// One `power_info` row
#[derive(Debug, Clone, PartialEq)]
struct InfoRow {
    kind: &'static str,
    subtype: String,
    duration: i64,
    stat: String,
    summoned: Option<u64>,
    percent: Option<f64>,
    amount: Option<f64>,
}

impl InfoRow {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            subtype: String::new(),
            duration: -1,
            stat: String::new(),
            summoned: None,
            percent: None,
            amount: None,
        }
    }
}

/// One `power_adjustments` row
#[derive(Debug, Clone, PartialEq)]
struct AdjustmentRow<'a> {
    adjustment_num: i64,
    kind: &'static str,
    triple: &'a AdjustmentTriple,
}

/// Flattened rows for one power
///
/// `adjustment_num` groups the triples of one result, or of one trap stat
/// block; it advances only past groups that contributed at least one triple.
#[derive(Debug, Default)]
struct PowerRows<'a> {
    info: Vec<InfoRow>,
    adjustments: Vec<AdjustmentRow<'a>>,
    next_num: i64,
}

impl<'a> PowerRows<'a> {
    fn from_power(power: &'a Power) -> Self {
        let mut rows = Self::default();
        for result in &power.results {
            rows.push(result);
        }
        rows
    }

    fn push(&mut self, result: &'a ResultVariant) {
        let kind = result.label();
        match result {
            ResultVariant::Damage(d) => {
                self.info.push(InfoRow {
                    subtype: d.damage_type.clone(),
                    ..InfoRow::new(kind)
                });
            }
            ResultVariant::DamageOverTime(d) => {
                self.info.push(InfoRow {
                    subtype: d.dot_type.clone(),
                    duration: d.duration,
                    ..InfoRow::new(kind)
                });
            }
            ResultVariant::TrapSummon(t) => {
                if t.stat_modifiers.is_empty() {
                    self.info.push(InfoRow {
                        duration: t.duration,
                        summoned: Some(t.summoned.template_id),
                        ..InfoRow::new(kind)
                    });
                }
                // One info row and one adjustment group per stat block
                for modifier in &t.stat_modifiers {
                    self.info.push(InfoRow {
                        duration: t.duration,
                        stat: modifier.stat.clone(),
                        summoned: Some(t.summoned.template_id),
                        ..InfoRow::new(kind)
                    });
                    self.push_group(kind, &modifier.adjustments);
                }
                return;
            }
            ResultVariant::UnitSummon { template_id } => {
                self.info.push(InfoRow {
                    summoned: Some(*template_id),
                    ..InfoRow::new(kind)
                });
            }
            ResultVariant::DamageProtect(p) => {
                if p.percents.is_empty() {
                    self.info.push(InfoRow {
                        duration: p.duration,
                        ..InfoRow::new(kind)
                    });
                }
                for percent in &p.percents {
                    self.info.push(InfoRow {
                        duration: p.duration,
                        percent: Some(*percent),
                        ..InfoRow::new(kind)
                    });
                }
            }
            ResultVariant::StatusEffect(s) => {
                for line in &s.lines {
                    self.info.push(InfoRow {
                        subtype: s.operator.clone().unwrap_or_default(),
                        duration: s.duration,
                        stat: s.stat.clone(),
                        percent: Some(line.percent),
                        ..InfoRow::new(kind)
                    });
                }
            }
            ResultVariant::Absorb(a) => {
                self.info.push(InfoRow {
                    duration: a.duration,
                    amount: Some(a.magnitude),
                    ..InfoRow::new(kind)
                });
            }
            ResultVariant::AbilityTrigger { ability_id } => {
                self.info.push(InfoRow {
                    summoned: Some(*ability_id),
                    ..InfoRow::new(kind)
                });
            }
            ResultVariant::Heal(_) => self.info.push(InfoRow::new(kind)),
        }

        let before = self.adjustments.len();
        match result {
            ResultVariant::StatusEffect(s) => {
                let num = self.next_num;
                self.adjustments.extend(
                    s.lines
                        .iter()
                        .filter_map(|line| line.adjustment.as_ref())
                        .map(|triple| AdjustmentRow {
                            adjustment_num: num,
                            kind,
                            triple,
                        }),
                );
            }
            other => {
                self.push_group(kind, other.adjustments());
                return;
            }
        }
        if self.adjustments.len() > before {
            self.next_num += 1;
        }
    }

    /// Write one adjustment group, advancing the number if it was non-empty
    fn push_group(&mut self, kind: &'static str, triples: &'a [AdjustmentTriple]) {
        let num = self.next_num;
        self.adjustments
            .extend(triples.iter().map(|triple| AdjustmentRow {
                adjustment_num: num,
                kind,
                triple,
            }));
        if !triples.is_empty() {
            self.next_num += 1;
        }
    }
}

fn insert_powers(conn: &Connection, powers: &[Power]) -> DbResult<()> {
    let mut power_stmt = conn.prepare(
        "INSERT INTO powers (id, name, real_name, image, description, pvp_tag, target_type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    let mut adjustment_stmt = conn.prepare(
        "INSERT INTO power_adjustments (power, adjustment_num, type, operator, stat, amount)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    let mut info_stmt = conn.prepare(
        "INSERT INTO power_info (power, type, subtype, duration, stat, summoned, percent, amount)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;

    for power in powers {
        let id = power.info.template_id;
        power_stmt.execute(params![
            id,
            power.info.display_name.id,
            power.info.real_name,
            power.info.image,
            power.description.id,
            power.pvp_tag,
            power.target_type,
        ])?;

        let rows = PowerRows::from_power(power);
        for row in &rows.adjustments {
            adjustment_stmt.execute(params![
                id,
                row.adjustment_num,
                row.kind,
                row.triple.operator,
                row.triple.stat,
                row.triple.amount,
            ])?;
        }
        for row in &rows.info {
            info_stmt.execute(params![
                id,
                row.kind,
                row.subtype,
                row.duration,
                row.stat,
                row.summoned,
                row.percent,
                row.amount,
            ])?;
        }
    }
    Ok(())
}

fn insert_pet_talents(conn: &Connection, talents: &[CompanionTalent]) -> DbResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO pet_talents (id, name, real_name, image, is_grant, rarity)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for talent in talents {
        stmt.execute(params![
            talent.info.template_id,
            talent.info.display_name.id,
            talent.info.real_name,
            talent.info.image,
            talent.is_grant,
            talent.rarity,
        ])?;
    }
    Ok(())
}

fn insert_pet_powers(conn: &Connection, powers: &[CompanionPower]) -> DbResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO pet_powers (id, name, real_name, image, is_grant, rarity, power)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for power in powers {
        stmt.execute(params![
            power.info.template_id,
            power.info.display_name.id,
            power.info.real_name,
            power.info.image,
            power.is_grant,
            power.rarity,
            power.ability_id,
        ])?;
    }
    Ok(())
}
