//! Template classification
//!
//! One predicate per kind, each judging a node purely by its shape, flags
//! and behavior list. [`classify`] evaluates them in a fixed order and
//! returns the first match; the order matters where shapes overlap
//! (a companion also looks like a unit).

use crate::behavior::{
    behavior_name, find_behavior, has_behavior, iter_behaviors, ADVANCED_PET_BEHAVIOR,
    COMBAT_ABILITY_BEHAVIOR, ITEM_BEHAVIOR, UNIT_BEHAVIOR,
};
use crate::config::ClassifyPolicy;
use crate::node::Node;
use crate::reference::{attack_type_name, item_slot, PET_ADJECTIVE};
use serde::{Deserialize, Serialize};
use std::fmt;

const ADJECTIVES: &str = "m_adjectiveList";

/// Template kinds produced by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Companion,
    Unit,
    Item,
    CompanionTalent,
    CompanionPower,
    Talent,
    Power,
    Curve,
}

impl Kind {
    /// Every kind, in classification order
    pub const ALL: [Kind; 8] = [
        Kind::Companion,
        Kind::Unit,
        Kind::Item,
        Kind::CompanionTalent,
        Kind::CompanionPower,
        Kind::Talent,
        Kind::Power,
        Kind::Curve,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Companion => "companion",
            Kind::Unit => "unit",
            Kind::Item => "item",
            Kind::CompanionTalent => "companion_talent",
            Kind::CompanionPower => "companion_power",
            Kind::Talent => "talent",
            Kind::Power => "power",
            Kind::Curve => "curve",
        }
    }

    /// Whether `node` is of this kind
    pub fn matches(&self, node: &Node, policy: &ClassifyPolicy) -> bool {
        match self {
            Kind::Companion => is_companion(node),
            Kind::Unit => is_unit(node, policy),
            Kind::Item => is_item(node),
            Kind::CompanionTalent => is_companion_talent(node),
            Kind::CompanionPower => is_companion_power(node),
            Kind::Talent => is_talent(node),
            Kind::Power => is_power(node, policy),
            Kind::Curve => is_curve(node),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First kind that accepts `node`, in classification order
pub fn classify(node: &Node, policy: &ClassifyPolicy) -> Option<Kind> {
    classify_among(node, policy, &Kind::ALL)
}

/// Like [`classify`], restricted to `allowed` kinds
pub fn classify_among(node: &Node, policy: &ClassifyPolicy, allowed: &[Kind]) -> Option<Kind> {
    Kind::ALL
        .into_iter()
        .filter(|kind| allowed.contains(kind))
        .find(|kind| kind.matches(node, policy))
}

/// Name, adjectives and behaviors are all present
fn has_template_shape(node: &Node) -> bool {
    node.has("m_displayName") && node.has(ADJECTIVES) && node.has("m_behaviors")
}

pub fn is_companion(node: &Node) -> bool {
    has_template_shape(node)
        && node.list_contains(ADJECTIVES, PET_ADJECTIVE)
        && has_behavior(node, ADVANCED_PET_BEHAVIOR)
}

pub fn is_unit(node: &Node, policy: &ClassifyPolicy) -> bool {
    let has_icon = node
        .get("m_sIcon")
        .and_then(Node::as_list)
        .is_some_and(|icons| !icons.is_empty());
    if !has_template_shape(node) || !has_icon {
        return false;
    }
    if node.list_contains(ADJECTIVES, PET_ADJECTIVE) {
        return false;
    }

    let mut unit_behavior = None;
    for behavior in iter_behaviors(node) {
        match behavior_name(behavior) {
            Some(ADVANCED_PET_BEHAVIOR) => return false,
            Some(UNIT_BEHAVIOR) => unit_behavior = unit_behavior.or(Some(behavior)),
            _ => {}
        }
    }

    match unit_behavior {
        None => false,
        Some(_) if !policy.require_attack_code => true,
        Some(behavior) => behavior
            .get("m_primaryAttack")
            .and_then(Node::as_i64)
            .and_then(attack_type_name)
            .is_some(),
    }
}

pub fn is_item(node: &Node) -> bool {
    has_template_shape(node)
        && has_behavior(node, ITEM_BEHAVIOR)
        && node.strings(ADJECTIVES).any(|adj| item_slot(adj).is_some())
}

pub fn is_companion_talent(node: &Node) -> bool {
    node.has("m_bEquipEffect") && node.has("m_nRank")
}

pub fn is_companion_power(node: &Node) -> bool {
    node.has("m_bEquipEffect") && !node.has("m_nRank")
}

pub fn is_talent(node: &Node) -> bool {
    node.get("m_ranks")
        .and_then(Node::as_list)
        .is_some_and(|ranks| !ranks.is_empty())
}

pub fn is_power(node: &Node, policy: &ClassifyPolicy) -> bool {
    if !has_template_shape(node) {
        return false;
    }
    find_behavior(node, COMBAT_ABILITY_BEHAVIOR).is_some_and(|ability| {
        let category = ability.get("m_category").and_then(Node::as_i64);
        policy
            .power_filter
            .accepts(category, |adj| node.list_contains(ADJECTIVES, adj))
    })
}

pub fn is_curve(node: &Node) -> bool {
    node.get("m_attributes")
        .and_then(Node::as_list)
        .is_some_and(|attrs| attrs.iter().any(|a| a.has("m_pointList")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PowerFilter;
    use serde_json::{json, Value};

    fn node(value: Value) -> Node {
        Node::from(value)
    }

    fn unit_template(adjectives: Value, behaviors: Value) -> Node {
        node(json!({
            "m_templateID": 1,
            "m_displayName": "Units_Skeleton",
            "m_sIcon": ["GUI/Units/Skeleton.dds"],
            "m_adjectiveList": adjectives,
            "m_behaviors": behaviors,
        }))
    }

    #[test]
    fn test_unit() {
        let n = unit_template(json!(["WB_Undead"]), json!([{ "m_behaviorName": "UnitBehavior" }]));
        let policy = ClassifyPolicy::default();
        assert!(is_unit(&n, &policy));
        assert_eq!(classify(&n, &policy), Some(Kind::Unit));
    }

    #[test]
    fn test_companion_beats_unit() {
        let n = unit_template(
            json!(["EQUIP_Pet"]),
            json!([
                { "m_behaviorName": "UnitBehavior" },
                { "m_behaviorName": "AdvancedPetBehavior" },
            ]),
        );
        let policy = ClassifyPolicy::default();
        assert!(is_companion(&n));
        assert!(!is_unit(&n, &policy));
        assert_eq!(classify(&n, &policy), Some(Kind::Companion));
    }

    #[test]
    fn test_advanced_pet_behavior_blocks_unit() {
        let n = unit_template(
            json!([]),
            json!([
                { "m_behaviorName": "UnitBehavior" },
                { "m_behaviorName": "AdvancedPetBehavior" },
            ]),
        );
        let policy = ClassifyPolicy::default();
        assert!(!is_unit(&n, &policy));
        // Without the pet adjective it is not a companion either
        assert!(!is_companion(&n));
        assert_eq!(classify(&n, &policy), None);
    }

    #[test]
    fn test_unit_and_companion_are_exclusive() {
        let policy = ClassifyPolicy::default();
        let adjective_sets = [json!([]), json!(["EQUIP_Pet"]), json!(["WB_Beast", "EQUIP_Pet"])];
        let behavior_sets = [
            json!([{ "m_behaviorName": "UnitBehavior" }]),
            json!([{ "m_behaviorName": "AdvancedPetBehavior" }]),
            json!([{ "m_behaviorName": "UnitBehavior" }, { "m_behaviorName": "AdvancedPetBehavior" }]),
            json!([null]),
        ];
        for adjectives in &adjective_sets {
            for behaviors in &behavior_sets {
                let n = unit_template(adjectives.clone(), behaviors.clone());
                assert!(
                    !(is_unit(&n, &policy) && is_companion(&n)),
                    "both accepted {adjectives} / {behaviors}"
                );
            }
        }
    }

    #[test]
    fn test_unit_attack_code_policy() {
        let policy = ClassifyPolicy {
            require_attack_code: true,
            ..ClassifyPolicy::default()
        };
        let known = unit_template(
            json!([]),
            json!([{ "m_behaviorName": "UnitBehavior", "m_primaryAttack": 208075 }]),
        );
        let unknown = unit_template(
            json!([]),
            json!([{ "m_behaviorName": "UnitBehavior", "m_primaryAttack": 1 }]),
        );
        let missing = unit_template(json!([]), json!([{ "m_behaviorName": "UnitBehavior" }]));
        assert!(is_unit(&known, &policy));
        assert!(!is_unit(&unknown, &policy));
        assert!(!is_unit(&missing, &policy));
    }

    #[test]
    fn test_unit_requires_icon() {
        let n = node(json!({
            "m_displayName": "Units_Skeleton",
            "m_sIcon": [],
            "m_adjectiveList": [],
            "m_behaviors": [{ "m_behaviorName": "UnitBehavior" }],
        }));
        assert!(!is_unit(&n, &ClassifyPolicy::default()));
    }

    #[test]
    fn test_item_requires_slot_adjective() {
        let with_slot = node(json!({
            "m_displayName": "Items_Hat",
            "m_adjectiveList": ["EQUIP_Hat"],
            "m_behaviors": [{ "m_behaviorName": "ItemBehavior" }],
        }));
        let without_slot = node(json!({
            "m_displayName": "Items_Junk",
            "m_adjectiveList": ["EQUIP_Pet", "Junk"],
            "m_behaviors": [{ "m_behaviorName": "ItemBehavior" }],
        }));
        assert!(is_item(&with_slot));
        assert!(!is_item(&without_slot));
        assert_eq!(classify(&without_slot, &ClassifyPolicy::default()), None);
    }

    #[test]
    fn test_companion_talent_and_power() {
        let talent = node(json!({ "m_bEquipEffect": false, "m_nRank": 2 }));
        let power = node(json!({ "m_bEquipEffect": true }));
        let policy = ClassifyPolicy::default();
        assert_eq!(classify(&talent, &policy), Some(Kind::CompanionTalent));
        assert_eq!(classify(&power, &policy), Some(Kind::CompanionPower));
        assert!(!is_companion_power(&talent));
    }

    #[test]
    fn test_talent_requires_ranks() {
        assert!(is_talent(&node(json!({ "m_ranks": [{}] }))));
        assert!(!is_talent(&node(json!({ "m_ranks": [] }))));
        assert!(!is_talent(&node(json!({}))));
    }

    #[test]
    fn test_power_filter() {
        let make = |category: i64, adjectives: Value| {
            node(json!({
                "m_displayName": "Powers_Blast",
                "m_adjectiveList": adjectives,
                "m_behaviors": [{ "m_behaviorName": "CombatAbilityBehavior", "m_category": category }],
            }))
        };
        let policy = ClassifyPolicy::default();
        assert!(is_power(&make(3, json!([])), &policy));
        assert!(is_power(&make(1, json!(["ADJ_Epic_Ability"])), &policy));
        assert!(!is_power(&make(1, json!([])), &policy));

        let open = ClassifyPolicy {
            power_filter: PowerFilter::any(),
            ..ClassifyPolicy::default()
        };
        assert!(is_power(&make(1, json!([])), &open));
    }

    #[test]
    fn test_curve() {
        assert!(is_curve(&node(json!({ "m_attributes": [{ "m_pointList": [] }] }))));
        assert!(!is_curve(&node(json!({ "m_attributes": [] }))));
        assert!(!is_curve(&node(json!({ "m_attributes": [{ "m_sStatName": 1 }] }))));
    }

    #[test]
    fn test_classify_among_respects_allowed() {
        let talent = node(json!({ "m_ranks": [{}] }));
        let policy = ClassifyPolicy::default();
        assert_eq!(classify_among(&talent, &policy, &[Kind::Talent]), Some(Kind::Talent));
        assert_eq!(classify_among(&talent, &policy, &[Kind::Power]), None);
    }
}
