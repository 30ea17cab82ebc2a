//! Creature units: enemies, crew and bosses

use super::adjust::{resolve_stat_or_skip, round2};
use super::{TemplateInfo, ICON_FIELD};
use crate::behavior::{Behaviors, PowerBehavior, TalentBehavior, UnitBehavior, UNIT_BEHAVIOR};
use crate::context::Context;
use crate::lang::LangRef;
use crate::reference::{
    attack_type_name, creature_tag, source_name, stat_name, unit_operator_name, ALLY_UNIT,
    ENEMY_UNIT, UNKNOWN,
};
use crate::schema::Fields;
use crate::{Error, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitStatModifier {
    pub stat: String,
    pub operator: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitTalent {
    pub talent_id: u64,
    pub rank: i64,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitPower {
    pub power_id: u64,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    /// `display_name` holds the unit name key, falling back to the title
    pub info: TemplateInfo,
    pub title: LangRef,
    pub school: Option<String>,
    /// Class template id, which doubles as the unit's stat curve
    pub curve: u64,
    pub damage_type: String,
    pub primary_stat: i64,
    pub attack_type: Option<String>,
    pub stat_modifiers: Vec<UnitStatModifier>,
    pub unit_type: String,
    pub talents: Vec<UnitTalent>,
    pub powers: Vec<UnitPower>,
    pub tags: Vec<String>,
}

impl Unit {
    pub fn project(fields: Fields<'_>, ctx: &Context<'_>) -> Result<Self> {
        let node = fields.node();
        let mut info = TemplateInfo::read(fields, ICON_FIELD)?;
        let title = info.display_name.clone();
        info.display_name = LangRef::unit_name(node).or(title.clone());

        let behaviors = Behaviors::scan(node);
        let unit_node = behaviors.unit.ok_or_else(|| Error::MissingField {
            template: info.real_name.clone(),
            field: UNIT_BEHAVIOR,
        })?;
        let unit = UnitBehavior::parse(fields.nested(unit_node))?;

        let mut stat_modifiers = Vec::with_capacity(unit.stat_modifiers.len());
        for modifier in &unit.stat_modifiers {
            // skip-one: unknown stat or operator codes drop only this modifier
            let Some(stat) = resolve_stat_or_skip(modifier.stat, &info.real_name) else {
                continue;
            };
            let Some(operator) = unit_operator_name(modifier.operator) else {
                tracing::debug!(
                    "Skipping unknown operator {} in {}",
                    modifier.operator,
                    info.real_name
                );
                continue;
            };
            stat_modifiers.push(UnitStatModifier {
                stat: stat.to_string(),
                operator: operator.to_string(),
                amount: round2(modifier.amount),
            });
        }

        let talents = match behaviors.talent {
            Some(b) => TalentBehavior::parse(fields.nested(b))?
                .talents
                .into_iter()
                .map(|t| UnitTalent {
                    talent_id: t.id,
                    rank: t.rank,
                    source: source_name(t.source).to_string(),
                })
                .collect(),
            None => Vec::new(),
        };
        let powers = match behaviors.power {
            Some(b) => PowerBehavior::parse(fields.nested(b))?
                .powers
                .into_iter()
                .map(|p| UnitPower {
                    power_id: p.id,
                    source: source_name(p.source).to_string(),
                })
                .collect(),
            None => Vec::new(),
        };

        let unit_type = if behaviors.mob_army.is_some() {
            ENEMY_UNIT
        } else {
            ALLY_UNIT
        };

        Ok(Self {
            info,
            title,
            school: ctx.school(unit.class_id),
            curve: unit.class_id,
            damage_type: stat_name(unit.damage_type).unwrap_or(UNKNOWN).to_string(),
            primary_stat: unit.primary_stat,
            attack_type: unit
                .primary_attack
                .and_then(attack_type_name)
                .map(str::to_string),
            stat_modifiers,
            unit_type: unit_type.to_string(),
            talents,
            powers,
            tags: node
                .strings("m_adjectiveList")
                .filter_map(creature_tag)
                .map(str::to_string)
                .collect(),
        })
    }
}
