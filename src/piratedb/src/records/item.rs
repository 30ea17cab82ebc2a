//! Equipment items
//!
//! Equip requirements and effects are untyped at the source; each entry is
//! recognized by its field count plus, where counts collide, one
//! distinguishing field.

use super::adjust::{resolve_stat_or_skip, round2};
use super::{TemplateInfo, ICON_FIELD};
use crate::behavior::{Behaviors, EquippableBehavior, ItemBehavior, ITEM_BEHAVIOR};
use crate::context::Context;
use crate::lang::LangRef;
use crate::node::Node;
use crate::reference::{
    item_slot, stat_name, weapon_style, PLACEHOLDER_NAME_ID, SPEED_STAT, UNKNOWN,
};
use crate::schema::Fields;
use crate::{Error, Result};
use serde::Serialize;

/// Weapon styles kept from the adjective list
const MAX_WEAPON_STYLES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TalentRequirement {
    pub talent_id: u64,
    pub min_rank: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRequirements {
    pub school: Option<String>,
    pub level: i64,
    pub talent: Option<TalentRequirement>,
}

impl Default for ItemRequirements {
    fn default() -> Self {
        Self {
            school: None,
            level: 1,
            talent: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemStat {
    pub stat: String,
    pub amount: f64,
}

/// Damage type and primary stat granted by a weapon
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeaponEffect {
    pub damage_type: String,
    pub primary_stat: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub info: TemplateInfo,
    pub slot: Option<String>,
    /// `/`-joined weapon styles, in adjective order
    pub weapon_type: Option<String>,
    pub item_flags: i64,
    pub requirements: ItemRequirements,
    pub stats: Vec<ItemStat>,
    pub talents: Vec<u64>,
    pub powers: Vec<u64>,
    pub weapon: Option<WeaponEffect>,
}

/// Equip requirement, recognized by field signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requirement {
    School,
    Level,
    Talent,
}

impl Requirement {
    fn recognize(req: &Node) -> Option<Self> {
        match req.field_count() {
            5 if req.has("m_classTemplateId") => Some(Self::School),
            6 => Some(Self::Level),
            5 if req.has("m_nTalentId") => Some(Self::Talent),
            _ => None,
        }
    }
}

/// Equip effect, recognized by field signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effect {
    Stat,
    Talent,
    Power,
    Weapon,
    Speed,
}

impl Effect {
    fn recognize(effect: &Node) -> Option<Self> {
        match effect.field_count() {
            7 => Some(Self::Stat),
            4 if effect.has("m_nTalentID") => Some(Self::Talent),
            4 if effect.has("m_nPowerID") => Some(Self::Power),
            6 => Some(Self::Weapon),
            4 if effect.has("m_speedMultiplier") => Some(Self::Speed),
            _ => None,
        }
    }
}

/// The shared "unnamed item" key counts as no name at all
fn without_placeholder(name: LangRef) -> LangRef {
    if name.id == Some(PLACEHOLDER_NAME_ID) {
        LangRef::absent()
    } else {
        name
    }
}

impl Item {
    pub fn project(fields: Fields<'_>, ctx: &Context<'_>) -> Result<Self> {
        let node = fields.node();
        let mut info = TemplateInfo::read(fields, ICON_FIELD)?;
        info.display_name = without_placeholder(info.display_name);

        let behaviors = Behaviors::scan(node);
        let item_node = behaviors.item.ok_or_else(|| Error::MissingField {
            template: info.real_name.clone(),
            field: ITEM_BEHAVIOR,
        })?;
        let item_flags = ItemBehavior::parse(fields.nested(item_node))?.item_flags;

        let styles: Vec<&str> = node
            .strings("m_adjectiveList")
            .filter_map(weapon_style)
            .take(MAX_WEAPON_STYLES)
            .collect();

        let mut item = Self {
            slot: node
                .strings("m_adjectiveList")
                .filter_map(item_slot)
                .last()
                .map(str::to_string),
            weapon_type: (!styles.is_empty()).then(|| styles.join("/")),
            item_flags,
            requirements: ItemRequirements::default(),
            stats: Vec::new(),
            talents: Vec::new(),
            powers: Vec::new(),
            weapon: None,
            info,
        };

        if let Some(equippable) = behaviors.equippable {
            let equippable = EquippableBehavior::parse(fields.nested(equippable))?;
            item.read_requirements(fields, ctx, equippable.requirements)?;
            item.read_effects(fields, equippable.effects)?;
        }

        Ok(item)
    }

    fn read_requirements(
        &mut self,
        fields: Fields<'_>,
        ctx: &Context<'_>,
        requirements: &[Node],
    ) -> Result<()> {
        for req in requirements.iter().filter(|r| !r.is_null()) {
            let req_fields = fields.nested(req);
            match Requirement::recognize(req) {
                Some(Requirement::School) => {
                    self.requirements.school = ctx.school(req_fields.req_u64("m_classTemplateId")?);
                }
                Some(Requirement::Level) => {
                    self.requirements.level = req_fields.req_i64("m_nMinLevel")?;
                }
                Some(Requirement::Talent) => {
                    self.requirements.talent = Some(TalentRequirement {
                        talent_id: req_fields.req_u64("m_nTalentId")?,
                        min_rank: req_fields.req_i64("m_nMinimumRank")?,
                    });
                }
                None => {}
            }
        }
        Ok(())
    }

    fn read_effects(&mut self, fields: Fields<'_>, effects: &[Node]) -> Result<()> {
        for effect in effects.iter().filter(|e| !e.is_null()) {
            let effect_fields = fields.nested(effect);
            match Effect::recognize(effect) {
                Some(Effect::Stat) => {
                    // skip-one: an unknown stat drops only this effect
                    let code = effect_fields.req_i64("m_sStatName")?;
                    if let Some(stat) = resolve_stat_or_skip(code, &self.info.real_name) {
                        self.stats.push(ItemStat {
                            stat: stat.to_string(),
                            amount: effect_fields.req_f64("m_fAmount")?,
                        });
                    }
                }
                Some(Effect::Talent) => self.talents.push(effect_fields.req_u64("m_nTalentID")?),
                Some(Effect::Power) => self.powers.push(effect_fields.req_u64("m_nPowerID")?),
                Some(Effect::Weapon) => {
                    let damage_type = effect_fields.req_i64("m_nDamageType")?;
                    self.weapon = Some(WeaponEffect {
                        damage_type: stat_name(damage_type).unwrap_or(UNKNOWN).to_string(),
                        primary_stat: effect_fields.req_i64("m_nPrimaryStat")?,
                    });
                }
                Some(Effect::Speed) => {
                    let multiplier = effect_fields.req_f64("m_speedMultiplier")?;
                    self.stats.push(ItemStat {
                        stat: SPEED_STAT.to_string(),
                        amount: round2(multiplier - 1.0),
                    });
                }
                None => {}
            }
        }
        Ok(())
    }
}
