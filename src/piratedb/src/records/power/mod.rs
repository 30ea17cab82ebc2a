//! Combat powers

pub mod results;

pub use results::{
    decode_results, AbsorbResult, DamageResult, DotResult, HealResult, Polarity, ProtectResult,
    ResultCase, ResultVariant, StatusEffectResult, StatusLine, SummonRef, TrapResult,
    TrapStatModifier, RESULT_TAGS,
};

use super::{TemplateInfo, ICON_FIELD};
use crate::behavior::{Behaviors, CombatAbilityBehavior, COMBAT_ABILITY_BEHAVIOR};
use crate::context::Context;
use crate::lang::LangRef;
use crate::schema::Fields;
use crate::{Error, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Power {
    pub info: TemplateInfo,
    pub description: LangRef,
    pub category: Option<i64>,
    /// Where the power may be used (`m_allowedIn`)
    pub pvp_tag: i64,
    pub target_type: i64,
    /// Decoded results, in source order
    pub results: Vec<ResultVariant>,
}

impl Power {
    pub fn project(fields: Fields<'_>, ctx: &Context<'_>) -> Result<Self> {
        let node = fields.node();
        let info = TemplateInfo::read(fields, ICON_FIELD)?;
        let ability_node = Behaviors::scan(node)
            .combat_ability
            .ok_or_else(|| Error::MissingField {
                template: info.real_name.clone(),
                field: COMBAT_ABILITY_BEHAVIOR,
            })?;
        let ability = CombatAbilityBehavior::parse(fields.nested(ability_node))?;

        Ok(Self {
            info,
            description: LangRef::description(node),
            category: ability.category,
            pvp_tag: ability.allowed_in,
            target_type: ability.target_type,
            results: decode_results(ability.results, ctx),
        })
    }

    pub fn damages(&self) -> impl Iterator<Item = &DamageResult> {
        self.results.iter().filter_map(|r| match r {
            ResultVariant::Damage(d) => Some(d),
            _ => None,
        })
    }

    /// Damage-over-time results; the Nth item is the Nth DoT in the source
    pub fn dots(&self) -> impl Iterator<Item = &DotResult> {
        self.results.iter().filter_map(|r| match r {
            ResultVariant::DamageOverTime(d) => Some(d),
            _ => None,
        })
    }

    pub fn traps(&self) -> impl Iterator<Item = &TrapResult> {
        self.results.iter().filter_map(|r| match r {
            ResultVariant::TrapSummon(t) => Some(t),
            _ => None,
        })
    }

    pub fn status_effects(&self) -> impl Iterator<Item = &StatusEffectResult> {
        self.results.iter().filter_map(|r| match r {
            ResultVariant::StatusEffect(s) => Some(s),
            _ => None,
        })
    }

    pub fn absorbs(&self) -> impl Iterator<Item = &AbsorbResult> {
        self.results.iter().filter_map(|r| match r {
            ResultVariant::Absorb(a) => Some(a),
            _ => None,
        })
    }

    pub fn heals(&self) -> impl Iterator<Item = &HealResult> {
        self.results.iter().filter_map(|r| match r {
            ResultVariant::Heal(h) => Some(h),
            _ => None,
        })
    }
}
