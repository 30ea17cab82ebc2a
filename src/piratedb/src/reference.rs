//! Reference tables for Pirate101 template codes
//!
//! Templates store stats, operators and a handful of enumerations as small
//! integer codes. These tables translate them to canonical names. A code
//! outside a table is a lookup miss (`None`), never a panic; what a miss
//! means is decided at the call site.

// ============================================================================
// Stats
// ============================================================================

/// Stat names indexed by stat code. Code 29 is unassigned.
pub const STATS: &[Option<&str>] = &[
    Some("Will"),
    Some("Strength"),
    Some("Agility"),
    Some("Accuracy"),
    Some("Armor"),
    Some("Max Health"),
    Some("Current Health"),
    Some("Dodge"),
    Some("Attack Range"),
    Some("Movement Range"),
    Some("Armor Penetration"),
    Some("Command Radius"),
    Some("Threat Generation"),
    Some("Crit Rating"),
    Some("Crit Damage"),
    Some("Weapon Power"),
    Some("Physical Damage"),
    Some("Magical Damage"),
    Some("Magic Resist"),
    Some("Current Mana"),
    Some("Max Mana"),
    Some("Max Energy"),
    Some("Current Energy"),
    Some("Spell Power"),
    Some("Practice Points"),
    Some("Training Points"),
    Some("XP Boost"),
    Some("Nautical XP Boost"),
    Some("Gold Boost"),
    None,
    Some("Power Slot Chance"),
    Some("Nautical XP"),
    Some("Experience"),
    Some("XP Value"),
    Some("Talent Slots"),
    Some("Epic Talent Slots"),
    Some("Knockout Duration"),
    Some("Task Duration"),
    Some("Ship Acceleration"),
    Some("Ship Minimum Speed"),
    Some("Ship Maximum Speed"),
    Some("Ship Turning Speed"),
    Some("Ship Fuel Rate"),
    Some("Ship Boost Speed"),
    Some("Ship Boost Turn Speed"),
    Some("Ship Max Health"),
    Some("Ship Current Health"),
    Some("Ship Repair Rate"),
    Some("Ship Firing Rate"),
    Some("Ship Damage"),
    Some("Ship Armor"),
    Some("Ship Accuracy"),
    Some("Ship Maneuver"),
    Some("Ship Max Fuel"),
    Some("Ship Current Fuel"),
    Some("Pet Guts"),
    Some("Pet Guile"),
    Some("Pet Grit"),
    Some("Pet Power"),
    Some("Pet PvE Spawn Chance"),
    Some("Strength"),
    Some("Agility"),
    Some("Will"),
    Some("Pet Guts"),
    Some("Pet Guile"),
    Some("Pet Grit"),
    Some("Pet Power"),
    Some("Max Health"),
    Some("Pet Max Action"),
    Some("Pet Current Action"),
    Some("Pet Current Power"),
    Some("Pet Cheer Cost"),
    Some("Pet Task Speed"),
    Some("Unit Task Aptitude Gold"),
    Some("Unit Task Aptitude Loot"),
    Some("Unit Task Aptitude Nautical XP"),
    Some("Unit Task Aptitude Tomes"),
    Some("Unit Task Aptitude Bed Rest"),
    Some("Unit Task Rate Gold"),
    Some("Unit Task Rate Loot"),
    Some("Unit Task Rate XP"),
    Some("Unit Task Rate Bed Rest"),
    Some("Unit Task Rate Pet Loot"),
];

/// Get stat name by code
pub fn stat_name(code: i64) -> Option<&'static str> {
    usize::try_from(code)
        .ok()
        .and_then(|i| STATS.get(i).copied().flatten())
}

/// Stats retained by curve templates
pub const CURVE_STATS: &[&str] = &[
    "Will",
    "Strength",
    "Agility",
    "Accuracy",
    "Armor",
    "Max Health",
    "Dodge",
    "Attack Range",
    "Movement Range",
    "Weapon Power",
    "Magic Resist",
    "Spell Power",
    "Talent Slots",
    "Epic Talent Slots",
];

/// Stat synthesized for damage-type adjustments
pub const WEAPON_POWER_STAT: &str = "Weapon Power";

/// Stat synthesized for primary-stat adjustments
pub const PRIMARY_STAT: &str = "Primary Stat";

/// Placeholder stat for lookups that cannot be resolved
pub const UNKNOWN: &str = "Unknown";

// ============================================================================
// Modifier Operators
// ============================================================================

/// Operators used by combat results and talent effects
pub const MODIFIER_OPERATORS: &[&str] = &[
    "Set",
    "Set Add",
    "Power",
    "Multiply Add",
    "Multiply",
    "Add",
];

/// Operators used by unit stat modifiers (no "Power" entry)
pub const UNIT_MODIFIER_OPERATORS: &[&str] = &["Set", "Set Add", "Multiply Add", "Multiply", "Add"];

/// Operator synthesized for ratio adjustments
pub const DIVIDE_OPERATOR: &str = "Divide";

/// Operator for sentinel-stat adjustments that carry no operator code
pub const ADD_OPERATOR: &str = "Add";

/// Operator that marks a status modifier as a debuff when nothing else does
pub const DEBUFF_OPERATOR: &str = "Multiply Add";

/// Get combat/talent operator name by code
pub fn operator_name(code: i64) -> Option<&'static str> {
    usize::try_from(code)
        .ok()
        .and_then(|i| MODIFIER_OPERATORS.get(i).copied())
}

/// Get unit operator name by code
pub fn unit_operator_name(code: i64) -> Option<&'static str> {
    usize::try_from(code)
        .ok()
        .and_then(|i| UNIT_MODIFIER_OPERATORS.get(i).copied())
}

// ============================================================================
// Combat Results
// ============================================================================

/// Damage-over-time type information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotType {
    pub id: i64,
    pub name: &'static str,
}

/// All damage-over-time types
pub const DOT_TYPES: &[DotType] = &[
    DotType { id: 0, name: "Poison" },
    DotType { id: 1, name: "Bleed" },
    DotType { id: 2, name: "Burn" },
    DotType { id: 3, name: "Frostbite" },
    DotType { id: 4, name: "Disease" },
];

/// Get damage-over-time type name by id
pub fn dot_type_name(id: i64) -> Option<&'static str> {
    DOT_TYPES.iter().find(|d| d.id == id).map(|d| d.name)
}

/// Damage type recorded when a result inherits the caster's type
pub const INHERIT_DAMAGE_TYPE: &str = "Inherit";

/// Effect definition that is always reported as a curse
pub const CURSE_EFFECT_ID: u64 = 2_067_357;

/// Adjective marking an effect definition as beneficial
pub const BUFF_ADJECTIVE: &str = "ADJ_Buff";

/// Adjective marking an effect definition as harmful
pub const DEBUFF_ADJECTIVE: &str = "ADJ_Debuff";

/// Adjective that admits a combat ability regardless of category
pub const EPIC_ABILITY_ADJECTIVE: &str = "ADJ_Epic_Ability";

// ============================================================================
// Units
// ============================================================================

/// Primary attack information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackType {
    pub code: i64,
    pub name: &'static str,
}

/// Recognized primary attacks
pub const ATTACK_TYPES: &[AttackType] = &[
    AttackType { code: 208075, name: "Melee" },
    AttackType { code: 208076, name: "Ranged" },
    AttackType { code: 732086, name: "Staff" },
];

/// Get attack type name by code
pub fn attack_type_name(code: i64) -> Option<&'static str> {
    ATTACK_TYPES.iter().find(|a| a.code == code).map(|a| a.name)
}

/// Provenance of a granted power or talent
pub const SOURCES: &[&str] = &["Unknown", "Template", "Trained"];

/// Get provenance name by code, defaulting to "Unknown"
pub fn source_name(code: i64) -> &'static str {
    usize::try_from(code)
        .ok()
        .and_then(|i| SOURCES.get(i).copied())
        .unwrap_or(UNKNOWN)
}

/// Creature tag derived from an adjective
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureTag {
    pub adjective: &'static str,
    pub tag: &'static str,
}

/// Adjectives kept as unit tags
pub const CREATURE_TAGS: &[CreatureTag] = &[
    CreatureTag { adjective: "WB_Beast", tag: "Beast" },
    CreatureTag { adjective: "WB_Undead", tag: "Undead" },
    CreatureTag { adjective: "WB_Fowl", tag: "Bird" },
];

/// Get creature tag by adjective
pub fn creature_tag(adjective: &str) -> Option<&'static str> {
    CREATURE_TAGS
        .iter()
        .find(|t| t.adjective == adjective)
        .map(|t| t.tag)
}

/// Adjective carried by equippable companions
pub const PET_ADJECTIVE: &str = "EQUIP_Pet";

/// Unit type for templates with a mob army behavior
pub const ENEMY_UNIT: &str = "Enemy";

/// Unit type for every other unit
pub const ALLY_UNIT: &str = "Ally";

// ============================================================================
// Items
// ============================================================================

/// Equipment slot information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSlot {
    pub adjective: &'static str,
    pub name: &'static str,
}

/// Slot adjectives that make a template equipment, with display names
pub const ITEM_SLOTS: &[ItemSlot] = &[
    ItemSlot { adjective: "EQUIP_Weapon", name: "Weapon" },
    ItemSlot { adjective: "EQUIP_Accessory", name: "Accessory" },
    ItemSlot { adjective: "EQUIP_Body", name: "Outfit" },
    ItemSlot { adjective: "EQUIP_Boots", name: "Boots" },
    ItemSlot { adjective: "EQUIP_Hat", name: "Hat" },
    ItemSlot { adjective: "EQUIP_Token", name: "Totem" },
    ItemSlot { adjective: "EQUIP_Neck", name: "Charm" },
    ItemSlot { adjective: "EQUIP_Ring", name: "Ring" },
    ItemSlot { adjective: "EQUIP_Mount", name: "Mount" },
];

/// Get slot name by adjective
pub fn item_slot(adjective: &str) -> Option<&'static str> {
    ITEM_SLOTS
        .iter()
        .find(|s| s.adjective == adjective)
        .map(|s| s.name)
}

/// Weapon style information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponStyle {
    pub adjective: &'static str,
    pub name: &'static str,
}

/// Weapon style adjectives
pub const WEAPON_STYLES: &[WeaponStyle] = &[
    WeaponStyle { adjective: "TALENT_SHOOTY", name: "Shooty" },
    WeaponStyle { adjective: "TALENT_STABBY", name: "Stabby" },
    WeaponStyle { adjective: "TALENT_SMASHY", name: "Smashy" },
    WeaponStyle { adjective: "TALENT_SLASHY", name: "Slashy" },
    WeaponStyle { adjective: "TALENT_STAFF", name: "Staffy" },
];

/// Get weapon style name by adjective
pub fn weapon_style(adjective: &str) -> Option<&'static str> {
    WEAPON_STYLES
        .iter()
        .find(|w| w.adjective == adjective)
        .map(|w| w.name)
}

/// Localization id of the shared "unnamed item" placeholder key
pub const PLACEHOLDER_NAME_ID: i64 = 5966405564772825542;

/// Synthetic stat produced by speed equip effects
pub const SPEED_STAT: &str = "Speed";

// ============================================================================
// Schools
// ============================================================================

/// Class file suffix and the school it identifies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolSuffix {
    pub suffix: &'static str,
    pub school: &'static str,
}

/// Default suffixes matched against the last 7 characters of a class file
pub const SCHOOL_SUFFIXES: &[SchoolSuffix] = &[
    SchoolSuffix { suffix: "WIZ.xml", school: "Witchdoctor" },
    SchoolSuffix { suffix: "age.xml", school: "Witchdoctor" },
    SchoolSuffix { suffix: "THF.xml", school: "Swashbuckler" },
    SchoolSuffix { suffix: "ief.xml", school: "Swashbuckler" },
    SchoolSuffix { suffix: "RNG.xml", school: "Musketeer" },
    SchoolSuffix { suffix: "ger.xml", school: "Musketeer" },
    SchoolSuffix { suffix: "FTR.xml", school: "Buccaneer" },
    SchoolSuffix { suffix: "ter.xml", school: "Buccaneer" },
    SchoolSuffix { suffix: "CLR.xml", school: "Privateer" },
    SchoolSuffix { suffix: "ric.xml", school: "Privateer" },
    SchoolSuffix { suffix: "PET.xml", school: "Pet" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_lookup() {
        assert_eq!(stat_name(0), Some("Will"));
        assert_eq!(stat_name(15), Some("Weapon Power"));
        assert_eq!(stat_name(29), None);
        assert_eq!(stat_name(-1), None);
        assert_eq!(stat_name(STATS.len() as i64), None);
    }

    #[test]
    fn test_operator_tables_differ() {
        assert_eq!(operator_name(3), Some("Multiply Add"));
        assert_eq!(unit_operator_name(3), Some("Multiply"));
        assert_eq!(operator_name(6), None);
        assert_eq!(unit_operator_name(5), None);
    }

    #[test]
    fn test_small_tables() {
        assert_eq!(dot_type_name(1), Some("Bleed"));
        assert_eq!(dot_type_name(99), None);
        assert_eq!(attack_type_name(208076), Some("Ranged"));
        assert_eq!(source_name(2), "Trained");
        assert_eq!(source_name(7), "Unknown");
        assert_eq!(creature_tag("WB_Fowl"), Some("Bird"));
    }

    #[test]
    fn test_item_slot_renames() {
        assert_eq!(item_slot("EQUIP_Body"), Some("Outfit"));
        assert_eq!(item_slot("EQUIP_Token"), Some("Totem"));
        assert_eq!(item_slot("EQUIP_Neck"), Some("Charm"));
        assert_eq!(item_slot("EQUIP_Pet"), None);
        assert_eq!(weapon_style("TALENT_STAFF"), Some("Staffy"));
    }

    #[test]
    fn test_curve_stats_are_known_stats() {
        assert_eq!(CURVE_STATS.len(), 14);
        for stat in CURVE_STATS {
            assert!(STATS.contains(&Some(*stat)), "{stat} missing from STATS");
        }
    }
}
