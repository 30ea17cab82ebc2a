//! Stat adjustments
//!
//! Two lookup-failure policies live here and are deliberately kept apart:
//!
//! - **skip-one** ([`resolve_stat_or_skip`]): a stat code outside the table
//!   drops that one entry and the caller moves on. Used for unit modifiers,
//!   item stat effects, trap modifiers and curve attributes.
//! - **signature-redirect** ([`AdjustmentWalk`], [`decode_adjustments`]): a
//!   failed stat lookup sends the adjustment to its structural signature,
//!   which may accumulate into the previous triple or synthesize a sentinel
//!   stat. Used for every adjustment list inside a power result.

use crate::node::Node;
use crate::reference::{
    operator_name, stat_name, ADD_OPERATOR, DIVIDE_OPERATOR, PRIMARY_STAT, UNKNOWN,
    WEAPON_POWER_STAT,
};
use serde::Serialize;

/// One stat/operator/amount contribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentTriple {
    pub stat: String,
    pub operator: String,
    pub amount: f64,
}

impl AdjustmentTriple {
    pub fn new(stat: &str, operator: &str, amount: f64) -> Self {
        Self {
            stat: stat.to_string(),
            operator: operator.to_string(),
            amount,
        }
    }

    /// Round to 3 decimals; `None` when the rounded amount is zero
    pub fn normalized(self) -> Option<Self> {
        let amount = round3(self.amount);
        (amount != 0.0).then_some(Self { amount, ..self })
    }
}

/// Round to 3 decimal places
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Resolve a stat code under the skip-one policy
///
/// A miss is logged and returns `None`; the caller drops that one entry.
pub fn resolve_stat_or_skip(code: i64, owner: &str) -> Option<&'static str> {
    let name = stat_name(code);
    if name.is_none() {
        tracing::debug!("Skipping unknown stat code {} in {}", code, owner);
    }
    name
}

/// Structural signature of an adjustment node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    Value,
    DamageType,
    PrimaryStat,
    Ratio,
    Percent,
    Other,
}

const SIGNATURE_TAGS: &[(&str, Signature)] = &[
    ("ValueAdjustment", Signature::Value),
    ("DamageTypeAdjustment", Signature::DamageType),
    ("PrimaryStatAdjustment", Signature::PrimaryStat),
    ("RatioAdjustment", Signature::Ratio),
    ("PercentAdjustment", Signature::Percent),
];

/// Fields that mark an adjustment as something other than a bare value
const NON_VALUE_FIELDS: &[&str] = &[
    "m_sStatName",
    "m_nDamageType",
    "m_nPrimaryStat",
    "m_sNumeratorStat",
    "m_sDenominatorStat",
    "m_fPercent",
];

/// Classify an adjustment by type tag, or by shape when the tag is unknown
pub fn signature(node: &Node) -> Signature {
    if let Some(tag) = node.type_tag() {
        if let Some((_, sig)) = SIGNATURE_TAGS.iter().find(|(t, _)| *t == tag) {
            return *sig;
        }
    }

    if node.has("m_nDamageType") {
        Signature::DamageType
    } else if node.has("m_nPrimaryStat") {
        Signature::PrimaryStat
    } else if node.has("m_sNumeratorStat") && node.has("m_sDenominatorStat") {
        Signature::Ratio
    } else if node.has("m_fPercent") {
        Signature::Percent
    } else if node.has("m_fAmount") && !NON_VALUE_FIELDS.iter().any(|f| node.has(f)) {
        Signature::Value
    } else {
        Signature::Other
    }
}

/// Stat adjustment with both codes inside their tables, unrounded
pub fn resolve_stat_adjustment(node: &Node) -> Option<AdjustmentTriple> {
    let stat = node.get("m_sStatName").and_then(Node::as_i64).and_then(stat_name)?;
    let operator = node.get("m_eOperator").and_then(Node::as_i64).and_then(operator_name)?;
    let amount = node.get("m_fAmount").and_then(Node::as_f64)?;
    Some(AdjustmentTriple::new(stat, operator, amount))
}

/// Whether ratio adjustments produce a `Divide` triple or are ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioHandling {
    Divide,
    Ignore,
}

/// Outcome of feeding one adjustment to an [`AdjustmentWalk`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step<'a> {
    /// A new triple was recorded at this index
    Added(usize),
    /// A value was folded into the previous triple
    Accumulated,
    /// A value with nothing to fold into, or no amount
    Dropped,
    /// Neither the stat path nor a redirect applied
    Unresolved(Signature, &'a Node),
}

/// Signature-redirect decoding over one adjustment list
///
/// Amounts accumulate raw; rounding and zero-suppression happen once, in
/// [`finish`](Self::finish) or [`finish_indexed`](Self::finish_indexed).
#[derive(Debug)]
pub struct AdjustmentWalk {
    raw: Vec<AdjustmentTriple>,
    ratio: RatioHandling,
}

impl AdjustmentWalk {
    pub fn new(ratio: RatioHandling) -> Self {
        Self {
            raw: Vec::new(),
            ratio,
        }
    }

    pub fn step<'a>(&mut self, node: &'a Node) -> Step<'a> {
        if let Some(triple) = resolve_stat_adjustment(node) {
            return self.push(triple);
        }

        match signature(node) {
            Signature::Value => {
                let amount = node.get("m_fAmount").and_then(Node::as_f64);
                match (amount, self.raw.last_mut()) {
                    (Some(amount), Some(previous)) => {
                        previous.amount += amount;
                        Step::Accumulated
                    }
                    _ => Step::Dropped,
                }
            }
            Signature::DamageType => self.push_sentinel(node, WEAPON_POWER_STAT),
            Signature::PrimaryStat => self.push_sentinel(node, PRIMARY_STAT),
            Signature::Ratio if self.ratio == RatioHandling::Divide => {
                let numerator = node
                    .get("m_sNumeratorStat")
                    .and_then(Node::as_i64)
                    .and_then(stat_name)
                    .unwrap_or(UNKNOWN);
                let denominator = node
                    .get("m_sDenominatorStat")
                    .and_then(Node::as_i64)
                    .unwrap_or_default();
                self.push(AdjustmentTriple::new(
                    numerator,
                    DIVIDE_OPERATOR,
                    denominator as f64,
                ))
            }
            sig => Step::Unresolved(sig, node),
        }
    }

    fn push(&mut self, triple: AdjustmentTriple) -> Step<'static> {
        self.raw.push(triple);
        Step::Added(self.raw.len() - 1)
    }

    fn push_sentinel(&mut self, node: &Node, stat: &str) -> Step<'static> {
        let operator = node
            .get("m_eOperator")
            .and_then(Node::as_i64)
            .and_then(operator_name)
            .unwrap_or(ADD_OPERATOR);
        let amount = node.get("m_fAmount").and_then(Node::as_f64).unwrap_or_default();
        self.push(AdjustmentTriple::new(stat, operator, amount))
    }

    /// Rounded triples, zero amounts dropped
    pub fn finish(self) -> Vec<AdjustmentTriple> {
        self.raw
            .into_iter()
            .filter_map(AdjustmentTriple::normalized)
            .collect()
    }

    /// Rounded triples by [`Step::Added`] index, `None` where suppressed
    pub fn finish_indexed(self) -> Vec<Option<AdjustmentTriple>> {
        self.raw
            .into_iter()
            .map(AdjustmentTriple::normalized)
            .collect()
    }
}

/// Entries of `node.<field>.m_adjustments`
pub fn adjustment_list<'a>(node: &'a Node, field: &str) -> &'a [Node] {
    node.get_some(field)
        .and_then(|container| container.get("m_adjustments"))
        .and_then(Node::as_list)
        .unwrap_or(&[])
}

/// Decode an adjustment list under the signature-redirect policy
///
/// Unresolved adjustments are skipped.
pub fn decode_adjustments(adjustments: &[Node], ratio: RatioHandling) -> Vec<AdjustmentTriple> {
    let mut walk = AdjustmentWalk::new(ratio);
    for adjustment in adjustments.iter().filter(|a| !a.is_null()) {
        if let Step::Unresolved(sig, _) = walk.step(adjustment) {
            tracing::trace!("Skipping unresolved {:?} adjustment", sig);
        }
    }
    walk.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn nodes(value: Value) -> Vec<Node> {
        match Node::from(value) {
            Node::List(items) => items,
            other => vec![other],
        }
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round3(12.3456), 12.346);
        assert_eq!(round3(-0.0004), 0.0);
        assert_eq!(round2(1.005_1), 1.01);
    }

    #[test]
    fn test_stat_adjustment_resolves() {
        let list = nodes(json!([{ "m_sStatName": 15, "m_eOperator": 5, "m_fAmount": 12.3456 }]));
        let triples = decode_adjustments(&list, RatioHandling::Ignore);
        assert_eq!(triples, vec![AdjustmentTriple::new("Weapon Power", "Add", 12.346)]);
    }

    #[test]
    fn test_value_accumulates_into_previous() {
        let list = nodes(json!([
            { "m_sStatName": 1, "m_eOperator": 5, "m_fAmount": 1.0 },
            { "$__type": "class ValueAdjustment", "m_fAmount": 0.25 },
            { "m_fAmount": 0.25 },
        ]));
        let triples = decode_adjustments(&list, RatioHandling::Ignore);
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].amount, 1.5);
    }

    #[test]
    fn test_leading_value_is_dropped() {
        let list = nodes(json!([{ "m_fAmount": 3.0 }]));
        assert!(decode_adjustments(&list, RatioHandling::Ignore).is_empty());
    }

    #[test]
    fn test_sentinel_stats() {
        let list = nodes(json!([
            { "m_nDamageType": 99, "m_eOperator": 4, "m_fAmount": 0.5 },
            { "m_nPrimaryStat": 2, "m_fAmount": 2.0 },
        ]));
        let triples = decode_adjustments(&list, RatioHandling::Ignore);
        assert_eq!(
            triples,
            vec![
                AdjustmentTriple::new("Weapon Power", "Multiply", 0.5),
                AdjustmentTriple::new("Primary Stat", "Add", 2.0),
            ]
        );
    }

    #[test]
    fn test_zero_suppression() {
        let list = nodes(json!([
            { "m_sStatName": 4, "m_eOperator": 5, "m_fAmount": 0.0004 },
            { "m_sStatName": 3, "m_eOperator": 5, "m_fAmount": 1.0 },
            { "m_fAmount": -1.0 },
        ]));
        // Both triples round or cancel to zero
        assert!(decode_adjustments(&list, RatioHandling::Ignore).is_empty());
    }

    #[test]
    fn test_ratio_handling() {
        let list = nodes(json!([{ "m_sNumeratorStat": 2, "m_sDenominatorStat": 5 }]));
        assert_eq!(
            decode_adjustments(&list, RatioHandling::Divide),
            vec![AdjustmentTriple::new("Agility", "Divide", 5.0)]
        );
        assert!(decode_adjustments(&list, RatioHandling::Ignore).is_empty());
    }

    #[test]
    fn test_unknown_stat_redirects_by_signature() {
        // Stat 29 is unassigned, so the node falls through to its signature
        let node = Node::from(json!({ "m_sStatName": 29, "m_eOperator": 5, "m_fAmount": 4.0 }));
        let mut walk = AdjustmentWalk::new(RatioHandling::Ignore);
        assert!(matches!(walk.step(&node), Step::Unresolved(Signature::Other, _)));
        assert!(walk.finish().is_empty());
    }

    #[test]
    fn test_signature_by_tag_and_shape() {
        let tagged = Node::from(json!({ "$__type": "class PercentAdjustment", "m_fAmount": 0.1 }));
        assert_eq!(signature(&tagged), Signature::Percent);
        assert_eq!(signature(&Node::from(json!({ "m_fPercent": 0.1 }))), Signature::Percent);
        assert_eq!(signature(&Node::from(json!({ "m_fAmount": 0.1 }))), Signature::Value);
        assert_eq!(
            signature(&Node::from(json!({ "m_sStatName": 1, "m_fAmount": 0.1 }))),
            Signature::Other
        );
    }

    #[test]
    fn test_finish_indexed_keeps_positions() {
        let list = nodes(json!([
            { "m_sStatName": 0, "m_eOperator": 5, "m_fAmount": 0.0 },
            { "m_sStatName": 1, "m_eOperator": 5, "m_fAmount": 2.0 },
        ]));
        let mut walk = AdjustmentWalk::new(RatioHandling::Ignore);
        for node in &list {
            walk.step(node);
        }
        let indexed = walk.finish_indexed();
        assert_eq!(indexed.len(), 2);
        assert!(indexed[0].is_none());
        assert_eq!(indexed[1].as_ref().map(|t| t.amount), Some(2.0));
    }

    #[test]
    fn test_resolve_stat_or_skip() {
        assert_eq!(resolve_stat_or_skip(4, "Hat"), Some("Armor"));
        assert_eq!(resolve_stat_or_skip(29, "Hat"), None);
        assert_eq!(resolve_stat_or_skip(-3, "Hat"), None);
    }
}
