//! Combat power result decoding
//!
//! A power's `m_results` list is heterogeneous: each entry is a damage,
//! damage-over-time, trap, summon, protect, status effect, absorb, ability
//! trigger or heal result, with its own adjustment lists. Entries are
//! dispatched through [`RESULT_TAGS`] by type tag, or through
//! [`signature_case`] when untagged, and decoded into [`ResultVariant`]s in
//! source order.

use crate::context::Context;
use crate::lang::LangRef;
use crate::node::Node;
use crate::records::adjust::{
    adjustment_list, decode_adjustments, resolve_stat_or_skip, round3, signature,
    AdjustmentTriple, AdjustmentWalk, RatioHandling, Signature, Step,
};
use crate::reference::{
    dot_type_name, operator_name, stat_name, BUFF_ADJECTIVE, CURSE_EFFECT_ID, DEBUFF_ADJECTIVE,
    DEBUFF_OPERATOR, INHERIT_DAMAGE_TYPE, UNKNOWN,
};
use serde::Serialize;
use std::fmt;

/// Duration recorded when a result carries none
pub const NO_DURATION: i64 = -1;

/// Percent recorded for status lines that carry a stat triple instead
pub const NO_PERCENT: f64 = -1.0;

/// Magnitude recorded for absorbs without a raw magnitude adjustment
pub const NO_MAGNITUDE: f64 = -1.0;

// ============================================================================
// Variants
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Polarity {
    Buff,
    Debuff,
    Curse,
}

impl Polarity {
    pub fn name(&self) -> &'static str {
        match self {
            Polarity::Buff => "Buff",
            Polarity::Debuff => "Debuff",
            Polarity::Curse => "Curse",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DamageResult {
    pub damage_type: String,
    pub adjustments: Vec<AdjustmentTriple>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DotResult {
    pub duration: i64,
    pub dot_type: String,
    pub adjustments: Vec<AdjustmentTriple>,
}

/// Template summoned by a trap, with its resolved display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummonRef {
    pub template_id: u64,
    pub display_name: LangRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrapStatModifier {
    pub stat: String,
    pub adjustments: Vec<AdjustmentTriple>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrapResult {
    pub duration: i64,
    pub summoned: SummonRef,
    pub stat_modifiers: Vec<TrapStatModifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtectResult {
    pub duration: i64,
    pub percents: Vec<f64>,
}

/// One entry of a status effect: a percent, or a stat triple with
/// `percent == NO_PERCENT`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusLine {
    pub percent: f64,
    pub adjustment: Option<AdjustmentTriple>,
}

impl StatusLine {
    fn placeholder() -> Self {
        Self {
            percent: NO_PERCENT,
            adjustment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusEffectResult {
    pub polarity: Polarity,
    pub duration: i64,
    pub stat: String,
    pub operator: Option<String>,
    pub lines: Vec<StatusLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbsorbResult {
    pub duration: i64,
    /// Raw, unrounded magnitude; `NO_MAGNITUDE` when absent
    pub magnitude: f64,
    pub adjustments: Vec<AdjustmentTriple>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealResult {
    pub adjustments: Vec<AdjustmentTriple>,
}

/// One decoded power result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ResultVariant {
    Damage(DamageResult),
    DamageOverTime(DotResult),
    TrapSummon(TrapResult),
    UnitSummon { template_id: u64 },
    DamageProtect(ProtectResult),
    StatusEffect(StatusEffectResult),
    Absorb(AbsorbResult),
    AbilityTrigger { ability_id: u64 },
    Heal(HealResult),
}

impl ResultVariant {
    pub fn case(&self) -> ResultCase {
        match self {
            ResultVariant::Damage(_) => ResultCase::Damage,
            ResultVariant::DamageOverTime(_) => ResultCase::DamageOverTime,
            ResultVariant::TrapSummon(_) => ResultCase::TrapSummon,
            ResultVariant::UnitSummon { .. } => ResultCase::UnitSummon,
            ResultVariant::DamageProtect(_) => ResultCase::DamageProtect,
            ResultVariant::StatusEffect(_) => ResultCase::StatusEffect,
            ResultVariant::Absorb(_) => ResultCase::Absorb,
            ResultVariant::AbilityTrigger { .. } => ResultCase::AbilityTrigger,
            ResultVariant::Heal(_) => ResultCase::Heal,
        }
    }

    /// Row label, with status effects named by polarity
    pub fn label(&self) -> &'static str {
        match self {
            ResultVariant::StatusEffect(status) => status.polarity.name(),
            other => other.case().label(),
        }
    }

    /// Adjustment triples attached directly to this result
    pub fn adjustments(&self) -> &[AdjustmentTriple] {
        match self {
            ResultVariant::Damage(r) => &r.adjustments,
            ResultVariant::DamageOverTime(r) => &r.adjustments,
            ResultVariant::Absorb(r) => &r.adjustments,
            ResultVariant::Heal(r) => &r.adjustments,
            _ => &[],
        }
    }
}

// ============================================================================
// Dispatch
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCase {
    Damage,
    DamageOverTime,
    TrapSummon,
    UnitSummon,
    DamageProtect,
    StatusEffect,
    Absorb,
    AbilityTrigger,
    Heal,
}

impl ResultCase {
    pub fn label(&self) -> &'static str {
        match self {
            ResultCase::Damage => "Damage",
            ResultCase::DamageOverTime => "DoT",
            ResultCase::TrapSummon => "Trap",
            ResultCase::UnitSummon => "Summon",
            ResultCase::DamageProtect => "Protect",
            ResultCase::StatusEffect => "Status",
            ResultCase::Absorb => "Absorb",
            ResultCase::AbilityTrigger => "Ability",
            ResultCase::Heal => "Heal",
        }
    }

    fn decode(self, node: &Node, ctx: &Context<'_>, out: &mut Vec<ResultVariant>) {
        let decoded = match self {
            ResultCase::Damage => Some(decode_damage(node)),
            ResultCase::DamageOverTime => Some(decode_dot(node)),
            ResultCase::TrapSummon => decode_trap(node, ctx),
            ResultCase::UnitSummon => decode_summon(node),
            ResultCase::DamageProtect => Some(decode_protect(node)),
            ResultCase::StatusEffect => {
                out.extend(decode_status_effects(node, ctx));
                return;
            }
            ResultCase::Absorb => Some(decode_absorb(node)),
            ResultCase::AbilityTrigger => decode_ability_trigger(node),
            ResultCase::Heal => Some(decode_heal(node)),
        };
        out.extend(decoded);
    }
}

/// Result type tags and the case each one decodes as
pub const RESULT_TAGS: &[(&str, ResultCase)] = &[
    ("ResultDamage", ResultCase::Damage),
    ("ResultDamageOverTime", ResultCase::DamageOverTime),
    ("ResultTrap", ResultCase::TrapSummon),
    ("ResultSummon", ResultCase::UnitSummon),
    ("ResultSummonMinion", ResultCase::UnitSummon),
    ("ResultDamageProtect", ResultCase::DamageProtect),
    ("ResultStatusEffect", ResultCase::StatusEffect),
    ("ResultAbsorb", ResultCase::Absorb),
    ("ResultTriggerAbility", ResultCase::AbilityTrigger),
    ("ResultHeal", ResultCase::Heal),
];

pub fn tag_case(tag: &str) -> Option<ResultCase> {
    RESULT_TAGS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, case)| *case)
}

/// Case of an untagged result, by structural signature
pub fn signature_case(node: &Node) -> Option<ResultCase> {
    let case = if node.has("m_nDotType") {
        ResultCase::DamageOverTime
    } else if node.has("m_bInheritDamageType") && node.has("m_damageAdjustment") {
        ResultCase::Damage
    } else if node.has("m_summonedTemplateID") && node.has("m_statModifiers") {
        ResultCase::TrapSummon
    } else if node.has("m_unitTemplateID") || node.has("m_summonedTemplateID") {
        ResultCase::UnitSummon
    } else if node.has("m_modifyList") {
        ResultCase::DamageProtect
    } else if node.has("m_modifiers") {
        ResultCase::StatusEffect
    } else if node.has("m_absorbAdjustment") {
        ResultCase::Absorb
    } else if node.has("m_abilityID") {
        ResultCase::AbilityTrigger
    } else if node.has("m_healAdjustment") {
        ResultCase::Heal
    } else {
        return None;
    };
    Some(case)
}

/// Decode a power's result list, in source order
pub fn decode_results(results: &[Node], ctx: &Context<'_>) -> Vec<ResultVariant> {
    let mut out = Vec::with_capacity(results.len());
    for node in results.iter().filter(|n| !n.is_null()) {
        let case = match node.type_tag() {
            Some(tag) => tag_case(tag),
            None => signature_case(node),
        };
        match case {
            Some(case) => case.decode(node, ctx, &mut out),
            None => tracing::debug!(
                "Skipping unrecognized result {}",
                node.type_tag().unwrap_or("<untagged>")
            ),
        }
    }
    out
}

// ============================================================================
// Per-case decoders
// ============================================================================

fn duration(node: &Node) -> i64 {
    node.get("m_nDuration")
        .and_then(Node::as_i64)
        .unwrap_or(NO_DURATION)
}

fn decode_damage(node: &Node) -> ResultVariant {
    let inherit = node
        .get("m_bInheritDamageType")
        .and_then(Node::as_bool)
        .unwrap_or(false);
    let damage_type = if inherit {
        INHERIT_DAMAGE_TYPE
    } else {
        node.get("m_nDamageType")
            .and_then(Node::as_i64)
            .and_then(stat_name)
            .unwrap_or(UNKNOWN)
    };

    ResultVariant::Damage(DamageResult {
        damage_type: damage_type.to_string(),
        adjustments: decode_adjustments(
            adjustment_list(node, "m_damageAdjustment"),
            RatioHandling::Ignore,
        ),
    })
}

fn decode_dot(node: &Node) -> ResultVariant {
    let dot_type = node
        .get("m_nDotType")
        .and_then(Node::as_i64)
        .and_then(dot_type_name)
        .unwrap_or(UNKNOWN);

    ResultVariant::DamageOverTime(DotResult {
        duration: duration(node),
        dot_type: dot_type.to_string(),
        adjustments: decode_adjustments(
            adjustment_list(node, "m_damageAdjustment"),
            RatioHandling::Divide,
        ),
    })
}

fn decode_trap(node: &Node, ctx: &Context<'_>) -> Option<ResultVariant> {
    let template_id = node.get("m_summonedTemplateID").and_then(Node::as_u64)?;
    let Some(target) = ctx.deserialize_template(template_id) else {
        tracing::debug!("Skipping trap summoning unresolvable template {}", template_id);
        return None;
    };

    let mut stat_modifiers = Vec::new();
    let modifiers = node
        .get("m_statModifiers")
        .and_then(Node::as_list)
        .unwrap_or(&[]);
    for modifier in modifiers.iter().filter(|m| !m.is_null()) {
        // skip-one: an unknown stat drops only this modifier
        let Some(code) = modifier.get("m_sStatName").and_then(Node::as_i64) else {
            continue;
        };
        let Some(stat) = resolve_stat_or_skip(code, "trap result") else {
            continue;
        };
        stat_modifiers.push(TrapStatModifier {
            stat: stat.to_string(),
            adjustments: decode_adjustments(
                adjustment_list(modifier, "m_adjustment"),
                RatioHandling::Ignore,
            ),
        });
    }

    Some(ResultVariant::TrapSummon(TrapResult {
        duration: duration(node),
        summoned: SummonRef {
            template_id,
            display_name: LangRef::display_name(&target),
        },
        stat_modifiers,
    }))
}

fn decode_summon(node: &Node) -> Option<ResultVariant> {
    let template_id = node
        .get("m_unitTemplateID")
        .or_else(|| node.get("m_summonedTemplateID"))
        .and_then(Node::as_u64)?;
    Some(ResultVariant::UnitSummon { template_id })
}

fn decode_protect(node: &Node) -> ResultVariant {
    let percents = adjustment_list(node, "m_modifyList")
        .iter()
        .filter_map(|a| a.get("m_fAmount").and_then(Node::as_f64))
        .map(|amount| round3(amount * 100.0))
        .collect();

    ResultVariant::DamageProtect(ProtectResult {
        duration: duration(node),
        percents,
    })
}

/// Polarity declared by an effect definition's adjectives
fn explicit_polarity(definition: &Node) -> Option<Polarity> {
    definition.strings("m_adjectiveList").find_map(|adj| match adj {
        BUFF_ADJECTIVE => Some(Polarity::Buff),
        DEBUFF_ADJECTIVE => Some(Polarity::Debuff),
        _ => None,
    })
}

/// Line in source order, before rounding
enum PendingLine {
    Percent(f64),
    Triple(usize),
}

fn decode_status_effects(node: &Node, ctx: &Context<'_>) -> Vec<ResultVariant> {
    let effect_id = node.get("m_effectTemplateID").and_then(Node::as_u64);
    // Cross-reference miss falls back to operator inference
    let explicit = effect_id
        .and_then(|id| ctx.deserialize_template(id))
        .and_then(|definition| explicit_polarity(&definition));
    let cursed = effect_id == Some(CURSE_EFFECT_ID);
    let curse_override = |polarity| if cursed { Polarity::Curse } else { polarity };

    let modifiers: Vec<&Node> = node
        .get("m_modifiers")
        .and_then(Node::as_list)
        .unwrap_or(&[])
        .iter()
        .filter(|m| !m.is_null())
        .collect();

    if modifiers.is_empty() {
        return vec![ResultVariant::StatusEffect(StatusEffectResult {
            polarity: curse_override(explicit.unwrap_or(Polarity::Buff)),
            duration: duration(node),
            stat: UNKNOWN.to_string(),
            operator: None,
            lines: vec![StatusLine::placeholder()],
        })];
    }

    modifiers
        .into_iter()
        .map(|modifier| {
            let operator = modifier
                .get("m_eOperator")
                .and_then(Node::as_i64)
                .and_then(operator_name);
            let mut polarity = explicit.unwrap_or(Polarity::Buff);
            let mut negative_percent = false;
            let mut walk = AdjustmentWalk::new(RatioHandling::Ignore);
            let mut pending = Vec::new();

            for adjustment in adjustment_list_of(modifier) {
                if signature(adjustment) == Signature::Percent {
                    let raw = adjustment
                        .get("m_fPercent")
                        .or_else(|| adjustment.get("m_fAmount"))
                        .and_then(Node::as_f64)
                        .unwrap_or_default();
                    let v = raw * 100.0;
                    let stored = if v < 0.0 {
                        polarity = Polarity::Debuff;
                        negative_percent = true;
                        v.abs()
                    } else if polarity == Polarity::Debuff {
                        -(100.0 - v)
                    } else {
                        v
                    };
                    pending.push(PendingLine::Percent(stored));
                } else if let Step::Added(index) = walk.step(adjustment) {
                    pending.push(PendingLine::Triple(index));
                }
            }

            if explicit.is_none() && !negative_percent && operator == Some(DEBUFF_OPERATOR) {
                polarity = Polarity::Debuff;
            }

            let triples = walk.finish_indexed();
            let mut lines: Vec<StatusLine> = pending
                .into_iter()
                .filter_map(|line| match line {
                    PendingLine::Percent(percent) => Some(StatusLine {
                        percent: round3(percent),
                        adjustment: None,
                    }),
                    PendingLine::Triple(index) => triples
                        .get(index)
                        .cloned()
                        .flatten()
                        .map(|triple| StatusLine {
                            percent: NO_PERCENT,
                            adjustment: Some(triple),
                        }),
                })
                .collect();
            if lines.is_empty() {
                lines.push(StatusLine::placeholder());
            }

            let stat = modifier
                .get("m_sStatName")
                .and_then(Node::as_i64)
                .and_then(stat_name)
                .unwrap_or(UNKNOWN);

            ResultVariant::StatusEffect(StatusEffectResult {
                polarity: curse_override(polarity),
                duration: modifier
                    .get("m_nDuration")
                    .and_then(Node::as_i64)
                    .unwrap_or_else(|| duration(node)),
                stat: stat.to_string(),
                operator: operator.map(str::to_string),
                lines,
            })
        })
        .collect()
}

/// Non-null entries of a status modifier's own `m_adjustments`
fn adjustment_list_of(modifier: &Node) -> impl Iterator<Item = &Node> {
    modifier
        .get("m_adjustments")
        .and_then(Node::as_list)
        .unwrap_or(&[])
        .iter()
        .filter(|a| !a.is_null())
}

fn decode_absorb(node: &Node) -> ResultVariant {
    let mut walk = AdjustmentWalk::new(RatioHandling::Ignore);
    let mut magnitude = None;
    for adjustment in adjustment_list(node, "m_absorbAdjustment")
        .iter()
        .filter(|a| !a.is_null())
    {
        // A bare value with no triple to fold into is the magnitude itself
        let raw = match walk.step(adjustment) {
            Step::Unresolved(_, raw) => raw,
            Step::Dropped => adjustment,
            _ => continue,
        };
        if let Some(amount) = raw.get("m_fAmount").and_then(Node::as_f64) {
            magnitude = Some(amount);
        }
    }

    ResultVariant::Absorb(AbsorbResult {
        duration: duration(node),
        magnitude: magnitude.unwrap_or(NO_MAGNITUDE),
        adjustments: walk.finish(),
    })
}

fn decode_ability_trigger(node: &Node) -> Option<ResultVariant> {
    let ability_id = node.get("m_abilityID").and_then(Node::as_u64)?;
    Some(ResultVariant::AbilityTrigger { ability_id })
}

fn decode_heal(node: &Node) -> ResultVariant {
    // Ratio adjustments are parsed but not reported for heals
    ResultVariant::Heal(HealResult {
        adjustments: decode_adjustments(
            adjustment_list(node, "m_healAdjustment"),
            RatioHandling::Ignore,
        ),
    })
}
