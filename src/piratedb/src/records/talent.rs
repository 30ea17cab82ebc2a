//! Character talents and their rank ladders

use super::adjust::AdjustmentTriple;
use super::{TemplateInfo, ICON_FIELD};
use crate::lang::LangRef;
use crate::node::{icon_image, Node};
use crate::reference::{operator_name, stat_name};
use crate::schema::Fields;
use crate::Result;
use serde::Serialize;

/// Icon/tooltip field pairs shown on a rank, in display order
const RANK_SLOTS: [(&str, &str); 3] = [
    ("m_sBottomLeftIcon", "m_sBottomLeftTooltip"),
    ("m_sBottomRightIcon", "m_sBottomRightTooltip"),
    ("m_sUpperLeftIcon", "m_sUpperLeftTooltip"),
];

/// One icon shown on a rank card
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RankSlot {
    pub icon: String,
    pub tooltip: LangRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalentRank {
    /// 1-based position in the ladder
    pub rank: u32,
    pub description: LangRef,
    /// Minimum unit level, `None` when the rank is ungated
    pub unit_level: Option<i64>,
    /// Bottom-left, bottom-right and upper-left slots
    pub slots: [RankSlot; 3],
    /// Stat granted by the first effect, when it is a stat modifier
    pub stat: Option<AdjustmentTriple>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Talent {
    pub info: TemplateInfo,
    pub ranks: Vec<TalentRank>,
}

impl Talent {
    pub fn project(fields: Fields<'_>) -> Result<Self> {
        let info = TemplateInfo::read(fields, ICON_FIELD)?;
        let ranks = fields
            .req_list("m_ranks")?
            .iter()
            .filter(|r| !r.is_null())
            .zip(1..)
            .map(|(rank, number)| TalentRank::read(fields.nested(rank), number))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { info, ranks })
    }
}

impl TalentRank {
    fn read(fields: Fields<'_>, rank: u32) -> Result<Self> {
        let node = fields.node();
        let level = fields.req_i64("m_requiredUnitLevel")?;
        let slots = RANK_SLOTS.map(|(icon, tooltip)| RankSlot {
            icon: icon_image(node, icon),
            tooltip: LangRef::from_field(node, tooltip),
        });
        let stat = fields
            .opt_list("m_effects")
            .first()
            .and_then(first_effect_stat);

        Ok(Self {
            rank,
            description: LangRef::description(node),
            unit_level: (level > 0).then_some(level),
            slots,
            stat,
        })
    }
}

/// Triple for a stat-modifier effect; anything else has no stat
fn first_effect_stat(effect: &Node) -> Option<AdjustmentTriple> {
    let stat = effect.get("m_sStatName").and_then(Node::as_i64).and_then(stat_name)?;
    let operator = effect.get("m_eOperator").and_then(Node::as_i64).and_then(operator_name)?;
    let amount = effect.get("m_fAmount").and_then(Node::as_f64)?;
    AdjustmentTriple::new(stat, operator, amount).normalized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn talent() -> Node {
        Node::from(json!({
            "m_templateID": 500,
            "m_objectName": "Talent_Toughness",
            "m_displayName": "Talents_Toughness",
            "m_sIcon": ["GUI/Talents/Toughness.dds"],
            "m_ranks": [
                {
                    "m_description": "Talents_Toughness_Rank1",
                    "m_requiredUnitLevel": 0,
                    "m_sBottomLeftIcon": "GUI/Talents/Shield.dds",
                    "m_sBottomLeftTooltip": "Talents_Tip_Shield",
                    "m_effects": [{ "m_sStatName": 5, "m_eOperator": 5, "m_fAmount": 25.0 }],
                },
                {
                    "m_description": "Talents_Toughness_Rank2",
                    "m_requiredUnitLevel": 20,
                    "m_effects": [{ "m_nPowerID": 7 }],
                },
            ],
        }))
    }

    #[test]
    fn test_rank_ladder() {
        let node = talent();
        let talent = Talent::project(Fields::new(&node, "Talent_Toughness")).unwrap();
        assert_eq!(talent.ranks.len(), 2);

        let first = &talent.ranks[0];
        assert_eq!(first.rank, 1);
        assert_eq!(first.unit_level, None);
        assert_eq!(first.description.key, "Talents_Toughness_Rank1");
        assert_eq!(first.slots[0].icon, "Shield.dds");
        assert_eq!(first.slots[0].tooltip.key, "Talents_Tip_Shield");
        assert_eq!(first.slots[1], RankSlot::default());
        assert_eq!(
            first.stat,
            Some(AdjustmentTriple::new("Max Health", "Add", 25.0))
        );

        let second = &talent.ranks[1];
        assert_eq!(second.rank, 2);
        assert_eq!(second.unit_level, Some(20));
        assert_eq!(second.stat, None);
    }

    #[test]
    fn test_rank_requires_level_gate() {
        let node = Node::from(json!({
            "m_templateID": 501,
            "m_objectName": "Talent_Broken",
            "m_ranks": [{ "m_description": "x" }],
        }));
        let err = Talent::project(Fields::new(&node, "Talent_Broken")).unwrap_err();
        assert!(err.to_string().contains("m_requiredUnitLevel"));
    }
}
