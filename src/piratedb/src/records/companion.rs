//! Companions and the talents/powers they can learn

use super::{TemplateInfo, COMPANION_ICON_FIELD, ICON_FIELD};
use crate::behavior::{Behaviors, ItemBehavior, PetBehavior, ADVANCED_PET_BEHAVIOR};
use crate::schema::Fields;
use crate::{Error, Result};
use serde::Serialize;

/// Maximum stats a companion can train to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompanionMaxima {
    pub guts: i64,
    pub guile: i64,
    pub grit: i64,
    pub hp: i64,
    pub power: i64,
    pub agility: i64,
    pub strength: i64,
    pub will: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Companion {
    pub info: TemplateInfo,
    pub maxima: CompanionMaxima,
    pub item_flags: Option<i64>,
    pub base_powers: Vec<u64>,
    pub base_talents: Vec<u64>,
    pub preferred_snacks: Vec<String>,
}

impl Companion {
    pub fn project(fields: Fields<'_>) -> Result<Self> {
        let info = TemplateInfo::read(fields, ICON_FIELD)?;
        let behaviors = Behaviors::scan(fields.node());

        let pet_node = behaviors.pet.ok_or_else(|| Error::MissingField {
            template: info.real_name.clone(),
            field: ADVANCED_PET_BEHAVIOR,
        })?;
        let pet = PetBehavior::parse(fields.nested(pet_node))?;

        let item_flags = match behaviors.item {
            Some(item) => Some(ItemBehavior::parse(fields.nested(item))?.item_flags),
            None => None,
        };

        Ok(Self {
            info,
            maxima: CompanionMaxima {
                guts: pet.max_guts,
                guile: pet.max_guile,
                grit: pet.max_grit,
                hp: pet.max_hp,
                power: pet.max_power,
                agility: pet.max_agility,
                strength: pet.max_strength,
                will: pet.max_will,
            },
            item_flags,
            base_powers: pet.powers,
            base_talents: pet.talents,
            preferred_snacks: pet
                .preferred_snacks
                .iter()
                .map(String::as_str)
                .filter_map(snack_name)
                .collect(),
        })
    }
}

/// `SNACK_Fish_Salty` → `FishSalty`; codes without a second segment are skipped
pub fn snack_name(code: &str) -> Option<String> {
    let mut segments = code.split('_').skip(1);
    let kind = segments.next()?;
    let flavor = segments.next().unwrap_or("");
    Some(format!("{kind}{flavor}"))
}

/// Talent a companion can roll
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanionTalent {
    pub info: TemplateInfo,
    pub rarity: i64,
    pub is_grant: bool,
}

impl CompanionTalent {
    pub fn project(fields: Fields<'_>) -> Result<Self> {
        Ok(Self {
            info: TemplateInfo::read(fields, COMPANION_ICON_FIELD)?,
            rarity: fields.req_i64("m_nRarity")?,
            is_grant: fields.req_bool("m_bEquipEffect")?,
        })
    }
}

/// Power a companion can roll, backed by a combat ability
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanionPower {
    pub info: TemplateInfo,
    pub rarity: i64,
    pub is_grant: bool,
    pub ability_id: u64,
}

impl CompanionPower {
    pub fn project(fields: Fields<'_>) -> Result<Self> {
        Ok(Self {
            info: TemplateInfo::read(fields, COMPANION_ICON_FIELD)?,
            rarity: fields.req_i64("m_nRarity")?,
            is_grant: fields.req_bool("m_bEquipEffect")?,
            ability_id: fields.req_u64("m_nAbilityID")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use serde_json::json;

    fn parrot() -> Node {
        Node::from(json!({
            "m_templateID": 300,
            "m_objectName": "Pet_Parrot",
            "m_displayName": "Pets_Parrot",
            "m_sIcon": ["GUI/Pets/Parrot.dds"],
            "m_adjectiveList": ["EQUIP_Pet"],
            "m_behaviors": [
                {
                    "m_behaviorName": "AdvancedPetBehavior",
                    "m_nMaxGuts": 10, "m_nMaxGuile": 11, "m_nMaxGrit": 12, "m_nMaxHP": 13,
                    "m_nMaxPower": 14, "m_nMaxAgility": 15, "m_nMaxStrength": 16, "m_nMaxWill": 17,
                    "m_powers": [1000], "m_talents": [2000, 2001],
                    "m_preferredSnacks": ["SNACK_Fish_Salty", "SNACK_Fruit", "SNACK"],
                },
                { "m_behaviorName": "ItemBehavior", "m_itemFlags": 64 },
            ],
        }))
    }

    #[test]
    fn test_companion_projection() {
        let node = parrot();
        let pet = Companion::project(Fields::new(&node, "Pet_Parrot")).unwrap();
        assert_eq!(pet.info.image, "Parrot.dds");
        assert_eq!(pet.maxima.guts, 10);
        assert_eq!(pet.maxima.will, 17);
        assert_eq!(pet.item_flags, Some(64));
        assert_eq!(pet.base_powers, vec![1000]);
        assert_eq!(pet.base_talents, vec![2000, 2001]);
        assert_eq!(pet.preferred_snacks, vec!["FishSalty", "Fruit"]);
    }

    #[test]
    fn test_companion_without_item_behavior() {
        let mut node = parrot();
        if let Node::Map(obj) = &mut node {
            if let Some(Node::List(behaviors)) = obj.fields.get_mut("m_behaviors") {
                behaviors.truncate(1);
            }
        }
        let pet = Companion::project(Fields::new(&node, "Pet_Parrot")).unwrap();
        assert_eq!(pet.item_flags, None);
    }

    #[test]
    fn test_snack_name() {
        assert_eq!(snack_name("SNACK_Meat_Spicy_Extra").as_deref(), Some("MeatSpicy"));
        assert_eq!(snack_name("SNACK_Meat").as_deref(), Some("Meat"));
        assert_eq!(snack_name("SNACK"), None);
    }

    #[test]
    fn test_companion_power_reads_m_icon() {
        let node = Node::from(json!({
            "m_templateID": 5,
            "m_objectName": "PetPower_Heal",
            "m_displayName": "PetPowers_Heal",
            "m_icon": ["GUI/PetPowers/Heal.dds"],
            "m_sIcon": ["GUI/Wrong.dds"],
            "m_nRarity": 3,
            "m_bEquipEffect": true,
            "m_nAbilityID": 4242,
        }));
        let power = CompanionPower::project(Fields::new(&node, "PetPower_Heal")).unwrap();
        assert_eq!(power.info.image, "Heal.dds");
        assert_eq!(power.ability_id, 4242);
        assert!(power.is_grant);
    }
}
