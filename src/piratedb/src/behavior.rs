//! Template behaviors
//!
//! A template's `m_behaviors` list holds named sub-objects, each adding one
//! slice of functionality. Projectors scan the list once into
//! [`Behaviors`], then parse the bound nodes into the typed structs below
//! and work only with those.

use crate::node::Node;
use crate::schema::Fields;
use crate::Result;

pub const UNIT_BEHAVIOR: &str = "UnitBehavior";
pub const ITEM_BEHAVIOR: &str = "ItemBehavior";
pub const EQUIPPABLE_BEHAVIOR: &str = "EquippableBehavior";
pub const ADVANCED_PET_BEHAVIOR: &str = "AdvancedPetBehavior";
pub const COMBAT_ABILITY_BEHAVIOR: &str = "CombatAbilityBehavior";
pub const TALENT_BEHAVIOR: &str = "TalentBehavior";
pub const TALENT_BEHAVIOR_SERVER: &str = "TalentBehaviorServer";
pub const POWER_BEHAVIOR: &str = "PowerBehavior";
pub const POWER_BEHAVIOR_SERVER: &str = "PowerBehaviorServer";
pub const MOB_ARMY_BEHAVIOR: &str = "MobArmyBehavior";

/// Non-null entries of a template's behavior list
pub fn iter_behaviors(template: &Node) -> impl Iterator<Item = &Node> {
    template
        .get("m_behaviors")
        .and_then(Node::as_list)
        .unwrap_or(&[])
        .iter()
        .filter(|b| !b.is_null())
}

pub fn behavior_name(behavior: &Node) -> Option<&str> {
    behavior.get("m_behaviorName").and_then(Node::as_str)
}

/// First behavior with the given name
pub fn find_behavior<'a>(template: &'a Node, name: &str) -> Option<&'a Node> {
    iter_behaviors(template).find(|b| behavior_name(b) == Some(name))
}

pub fn has_behavior(template: &Node, name: &str) -> bool {
    find_behavior(template, name).is_some()
}

/// Behavior nodes bound by name from a single scan
#[derive(Debug, Default, Clone, Copy)]
pub struct Behaviors<'a> {
    pub unit: Option<&'a Node>,
    pub talent: Option<&'a Node>,
    pub power: Option<&'a Node>,
    pub mob_army: Option<&'a Node>,
    pub item: Option<&'a Node>,
    pub equippable: Option<&'a Node>,
    pub pet: Option<&'a Node>,
    pub combat_ability: Option<&'a Node>,
}

impl<'a> Behaviors<'a> {
    /// Bind every recognized behavior; later duplicates replace earlier ones
    pub fn scan(template: &'a Node) -> Self {
        let mut bound = Self::default();
        for behavior in iter_behaviors(template) {
            let slot = match behavior_name(behavior) {
                Some(UNIT_BEHAVIOR) => &mut bound.unit,
                Some(TALENT_BEHAVIOR | TALENT_BEHAVIOR_SERVER) => &mut bound.talent,
                Some(POWER_BEHAVIOR | POWER_BEHAVIOR_SERVER) => &mut bound.power,
                Some(MOB_ARMY_BEHAVIOR) => &mut bound.mob_army,
                Some(ITEM_BEHAVIOR) => &mut bound.item,
                Some(EQUIPPABLE_BEHAVIOR) => &mut bound.equippable,
                Some(ADVANCED_PET_BEHAVIOR) => &mut bound.pet,
                Some(COMBAT_ABILITY_BEHAVIOR) => &mut bound.combat_ability,
                _ => continue,
            };
            *slot = Some(behavior);
        }
        bound
    }
}

/// Raw stat modifier as stored on a unit
#[derive(Debug, Clone, PartialEq)]
pub struct RawStatModifier {
    pub stat: i64,
    pub operator: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitBehavior {
    pub class_id: u64,
    pub damage_type: i64,
    pub primary_stat: i64,
    pub primary_attack: Option<i64>,
    pub stat_modifiers: Vec<RawStatModifier>,
}

impl UnitBehavior {
    pub fn parse(fields: Fields<'_>) -> Result<Self> {
        let stat_modifiers = fields
            .req_list("m_statModifiers")?
            .iter()
            .filter(|m| !m.is_null())
            .map(|m| {
                let m = fields.nested(m);
                Ok(RawStatModifier {
                    stat: m.req_i64("m_sStatName")?,
                    operator: m.req_i64("m_eOperator")?,
                    amount: m.req_f64("m_fAmount")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            class_id: fields.req_u64("m_classId")?,
            damage_type: fields.req_i64("m_nDamageType")?,
            primary_stat: fields.req_i64("m_nPrimaryStat")?,
            primary_attack: fields.opt_i64("m_primaryAttack"),
            stat_modifiers,
        })
    }
}

/// Talent granted to a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantedTalent {
    pub id: u64,
    pub rank: i64,
    pub source: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalentBehavior {
    pub talents: Vec<GrantedTalent>,
}

impl TalentBehavior {
    pub fn parse(fields: Fields<'_>) -> Result<Self> {
        let talents = fields
            .req_list("m_talents")?
            .iter()
            .filter(|t| !t.is_null())
            .map(|t| {
                let t = fields.nested(t);
                Ok(GrantedTalent {
                    id: t.req_u64("m_talentID")?,
                    rank: t.req_i64("m_rank")?,
                    source: t.req_i64("m_source")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { talents })
    }
}

/// Power granted to a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantedPower {
    pub id: u64,
    pub source: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerBehavior {
    pub powers: Vec<GrantedPower>,
}

impl PowerBehavior {
    pub fn parse(fields: Fields<'_>) -> Result<Self> {
        let powers = fields
            .req_list("m_powerData")?
            .iter()
            .filter(|p| !p.is_null())
            .map(|p| {
                let p = fields.nested(p);
                Ok(GrantedPower {
                    id: p.req_u64("m_powerID")?,
                    source: p.req_i64("m_source")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { powers })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBehavior {
    pub item_flags: i64,
}

impl ItemBehavior {
    pub fn parse(fields: Fields<'_>) -> Result<Self> {
        Ok(Self {
            item_flags: fields.req_i64("m_itemFlags")?,
        })
    }
}

/// Equip requirements and effects, still untyped: each entry is
/// discriminated by its field signature in the item projector.
#[derive(Debug, Clone, Copy)]
pub struct EquippableBehavior<'a> {
    pub requirements: &'a [Node],
    pub effects: &'a [Node],
}

impl<'a> EquippableBehavior<'a> {
    pub fn parse(fields: Fields<'a>) -> Result<Self> {
        let requirements = fields
            .node()
            .get_some("m_equipRequirements")
            .and_then(|reqs| reqs.get("m_requirements"))
            .and_then(Node::as_list)
            .unwrap_or(&[]);
        Ok(Self {
            requirements,
            effects: fields.req_list("m_equipEffects")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PetBehavior {
    pub max_guts: i64,
    pub max_guile: i64,
    pub max_grit: i64,
    pub max_hp: i64,
    pub max_power: i64,
    pub max_agility: i64,
    pub max_strength: i64,
    pub max_will: i64,
    pub powers: Vec<u64>,
    pub talents: Vec<u64>,
    pub preferred_snacks: Vec<String>,
}

impl PetBehavior {
    pub fn parse(fields: Fields<'_>) -> Result<Self> {
        let ids = |field: &'static str| -> Result<Vec<u64>> {
            Ok(fields
                .req_list(field)?
                .iter()
                .filter_map(Node::as_u64)
                .collect())
        };

        Ok(Self {
            max_guts: fields.req_i64("m_nMaxGuts")?,
            max_guile: fields.req_i64("m_nMaxGuile")?,
            max_grit: fields.req_i64("m_nMaxGrit")?,
            max_hp: fields.req_i64("m_nMaxHP")?,
            max_power: fields.req_i64("m_nMaxPower")?,
            max_agility: fields.req_i64("m_nMaxAgility")?,
            max_strength: fields.req_i64("m_nMaxStrength")?,
            max_will: fields.req_i64("m_nMaxWill")?,
            powers: ids("m_powers")?,
            talents: ids("m_talents")?,
            preferred_snacks: fields
                .req_list("m_preferredSnacks")?
                .iter()
                .filter_map(Node::as_str)
                .map(str::to_string)
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CombatAbilityBehavior<'a> {
    pub category: Option<i64>,
    pub allowed_in: i64,
    pub target_type: i64,
    pub results: &'a [Node],
}

impl<'a> CombatAbilityBehavior<'a> {
    pub fn parse(fields: Fields<'a>) -> Result<Self> {
        Ok(Self {
            category: fields.opt_i64("m_category"),
            allowed_in: fields.req_i64("m_allowedIn")?,
            target_type: fields.req_i64("m_targetType")?,
            results: fields.opt_list("m_results"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template() -> Node {
        Node::from(json!({
            "m_behaviors": [
                null,
                { "m_behaviorName": "UnitBehavior", "m_classId": 5 },
                { "m_behaviorName": "TalentBehaviorServer", "m_talents": [] },
                { "m_behaviorName": "SomethingElse" },
                { "m_behaviorName": "MobArmyBehavior" },
            ]
        }))
    }

    #[test]
    fn test_scan_binds_by_name() {
        let node = template();
        let bound = Behaviors::scan(&node);
        assert!(bound.unit.is_some());
        assert!(bound.talent.is_some());
        assert!(bound.mob_army.is_some());
        assert!(bound.power.is_none());
        assert!(bound.item.is_none());
    }

    #[test]
    fn test_find_behavior_skips_nulls() {
        let node = template();
        assert!(has_behavior(&node, "UnitBehavior"));
        assert!(!has_behavior(&node, "ItemBehavior"));
        assert_eq!(iter_behaviors(&node).count(), 4);
    }

    #[test]
    fn test_unit_behavior_requires_fields() {
        let node = template();
        let unit = Behaviors::scan(&node).unit.unwrap();
        let err = UnitBehavior::parse(Fields::new(unit, "Bones")).unwrap_err();
        assert!(err.to_string().contains("m_statModifiers"));
    }

    #[test]
    fn test_pet_behavior_parse() {
        let node = Node::from(json!({
            "m_nMaxGuts": 1, "m_nMaxGuile": 2, "m_nMaxGrit": 3, "m_nMaxHP": 4,
            "m_nMaxPower": 5, "m_nMaxAgility": 6, "m_nMaxStrength": 7, "m_nMaxWill": 8,
            "m_powers": [100, 101], "m_talents": [200],
            "m_preferredSnacks": ["SNACK_Fish_Salty"],
        }));
        let pet = PetBehavior::parse(Fields::new(&node, "Parrot")).unwrap();
        assert_eq!(pet.max_will, 8);
        assert_eq!(pet.powers, vec![100, 101]);
        assert_eq!(pet.preferred_snacks, vec!["SNACK_Fish_Salty"]);
    }

    #[test]
    fn test_equippable_without_requirements() {
        let node = Node::from(json!({
            "m_equipRequirements": null,
            "m_equipEffects": [{ "m_nTalentID": 1 }],
        }));
        let eq = EquippableBehavior::parse(Fields::new(&node, "Hat")).unwrap();
        assert!(eq.requirements.is_empty());
        assert_eq!(eq.effects.len(), 1);
    }
}
