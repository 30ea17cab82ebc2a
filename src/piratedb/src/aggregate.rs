//! Archive scan: classify, project and collect records per kind

use crate::classify::{classify_among, Kind};
use crate::config::ScanSpec;
use crate::context::Context;
use crate::records::{
    Companion, CompanionPower, CompanionTalent, Curve, Item, Power, Talent, TemplateRecord, Unit,
};
use crate::Result;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Every record produced by one run, one ordered sequence per kind
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Records {
    pub curves: Vec<Curve>,
    pub items: Vec<Item>,
    pub units: Vec<Unit>,
    pub companions: Vec<Companion>,
    pub talents: Vec<Talent>,
    pub powers: Vec<Power>,
    pub companion_talents: Vec<CompanionTalent>,
    pub companion_powers: Vec<CompanionPower>,
}

impl Records {
    pub fn push(&mut self, record: TemplateRecord) {
        match record {
            TemplateRecord::Companion(r) => self.companions.push(r),
            TemplateRecord::Unit(r) => self.units.push(r),
            TemplateRecord::Item(r) => self.items.push(r),
            TemplateRecord::CompanionTalent(r) => self.companion_talents.push(r),
            TemplateRecord::CompanionPower(r) => self.companion_powers.push(r),
            TemplateRecord::Talent(r) => self.talents.push(r),
            TemplateRecord::Power(r) => self.powers.push(r),
            TemplateRecord::Curve(r) => self.curves.push(r),
        }
    }

    pub fn count(&self, kind: Kind) -> usize {
        match kind {
            Kind::Companion => self.companions.len(),
            Kind::Unit => self.units.len(),
            Kind::Item => self.items.len(),
            Kind::CompanionTalent => self.companion_talents.len(),
            Kind::CompanionPower => self.companion_powers.len(),
            Kind::Talent => self.talents.len(),
            Kind::Power => self.powers.len(),
            Kind::Curve => self.curves.len(),
        }
    }

    /// Record count per kind, in classification order
    pub fn counts(&self) -> Vec<(Kind, usize)> {
        Kind::ALL.iter().map(|k| (*k, self.count(*k))).collect()
    }

    pub fn len(&self) -> usize {
        Kind::ALL.iter().map(|k| self.count(*k)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collects records while keeping template ids unique per kind
#[derive(Debug, Default)]
pub struct Collector {
    records: Records,
    seen: HashMap<Kind, HashSet<u64>>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record; returns `false` if its id was already collected for its kind
    pub fn add(&mut self, record: TemplateRecord) -> bool {
        let fresh = self
            .seen
            .entry(record.kind())
            .or_default()
            .insert(record.template_id());
        if fresh {
            self.records.push(record);
        } else {
            tracing::debug!(
                "Skipping duplicate {} template {}",
                record.kind(),
                record.template_id()
            );
        }
        fresh
    }

    /// Run one scan, returning how many records it contributed
    pub fn scan(&mut self, ctx: &Context<'_>, spec: &ScanSpec) -> Result<usize> {
        let paths = ctx.archive.iter(&spec.pattern);
        let mut added = 0;

        for path in &paths {
            let Some(node) = ctx.archive.deserialize(path) else {
                tracing::debug!("Skipping {} (not deserializable)", path);
                continue;
            };
            let Some(kind) = classify_among(&node, ctx.policy, &spec.kinds) else {
                continue;
            };
            let record = TemplateRecord::project(kind, &node, ctx)?;
            if self.add(record) {
                added += 1;
            }
        }

        tracing::info!(
            "Scanned {} ({} files): {} records",
            spec.pattern,
            paths.len(),
            added
        );
        Ok(added)
    }

    pub fn finish(self) -> Records {
        self.records
    }
}

/// Run every scan in order and collect the records
///
/// A missing required field aborts the run; undeserializable and
/// unclassifiable files are skipped.
pub fn collect(ctx: &Context<'_>, scans: &[ScanSpec]) -> Result<Records> {
    let mut collector = Collector::new();
    for spec in scans {
        collector.scan(ctx, spec)?;
    }
    let records = collector.finish();
    for (kind, count) in records.counts() {
        tracing::info!("{}: {}", kind, count);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{MemoryArchive, TemplateManifest};
    use crate::config::PipelineConfig;
    use crate::node::Node;
    use crate::Error;
    use serde_json::json;

    fn archive() -> MemoryArchive {
        MemoryArchive::new()
            .with(
                "ObjectData/Items/Hat.xml",
                Node::from(json!({
                    "m_templateID": 1,
                    "m_objectName": "Hat_01",
                    "m_displayName": "Items_Hat",
                    "m_adjectiveList": ["EQUIP_Hat"],
                    "m_behaviors": [{ "m_behaviorName": "ItemBehavior", "m_itemFlags": 0 }],
                })),
            )
            .with(
                "ObjectData/Items/Junk.xml",
                Node::from(json!({
                    "m_templateID": 2,
                    "m_objectName": "Junk_01",
                    "m_displayName": "Items_Junk",
                    "m_adjectiveList": [],
                    "m_behaviors": [{ "m_behaviorName": "ItemBehavior", "m_itemFlags": 0 }],
                })),
            )
            .with(
                "ObjectData/PetTalents/Lucky.xml",
                Node::from(json!({
                    "m_templateID": 3,
                    "m_objectName": "PetTalent_Lucky",
                    "m_bEquipEffect": false,
                    "m_nRank": 1,
                    "m_nRarity": 0,
                })),
            )
            .with(
                "Talents/Toughness.xml",
                Node::from(json!({
                    "m_templateID": 4,
                    "m_objectName": "Talent_Toughness",
                    "m_ranks": [{ "m_requiredUnitLevel": 0 }],
                })),
            )
            .with(
                // A talent outside Talents/ is not collected as one
                "ObjectData/Stray/Talent.xml",
                Node::from(json!({
                    "m_templateID": 5,
                    "m_objectName": "Talent_Stray",
                    "m_ranks": [{ "m_requiredUnitLevel": 0 }],
                })),
            )
    }

    #[test]
    fn test_collect_respects_scan_kinds() {
        let archive = archive();
        let manifest = TemplateManifest::default();
        let config = PipelineConfig::default();
        let ctx = Context::new(&archive, &manifest, &config);

        let records = collect(&ctx, &config.scans).unwrap();
        assert_eq!(records.items.len(), 1);
        assert_eq!(records.companion_talents.len(), 1);
        assert_eq!(records.talents.len(), 1);
        assert_eq!(records.talents[0].info.template_id, 4);
        assert_eq!(records.len(), 3);
        assert_eq!(records.count(Kind::Power), 0);
    }

    #[test]
    fn test_collect_is_idempotent() {
        let archive = archive();
        let manifest = TemplateManifest::default();
        let config = PipelineConfig::default();
        let ctx = Context::new(&archive, &manifest, &config);

        let first = collect(&ctx, &config.scans).unwrap();
        let second = collect(&ctx, &config.scans).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_missing_required_field_aborts() {
        let archive = archive().with(
            "ObjectData/Items/Broken.xml",
            Node::from(json!({
                "m_objectName": "Broken_01",
                "m_displayName": "Items_Broken",
                "m_adjectiveList": ["EQUIP_Ring"],
                "m_behaviors": [{ "m_behaviorName": "ItemBehavior", "m_itemFlags": 0 }],
            })),
        );
        let manifest = TemplateManifest::default();
        let config = PipelineConfig::default();
        let ctx = Context::new(&archive, &manifest, &config);

        let err = collect(&ctx, &config.scans).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "m_templateID", .. }));
    }

    #[test]
    fn test_duplicate_ids_are_collected_once() {
        let archive = archive().with(
            "ObjectData/Items/HatCopy.xml",
            Node::from(json!({
                "m_templateID": 1,
                "m_objectName": "Hat_01_Copy",
                "m_displayName": "Items_Hat",
                "m_adjectiveList": ["EQUIP_Hat"],
                "m_behaviors": [{ "m_behaviorName": "ItemBehavior", "m_itemFlags": 0 }],
            })),
        );
        let manifest = TemplateManifest::default();
        let config = PipelineConfig::default();
        let ctx = Context::new(&archive, &manifest, &config);

        let records = collect(&ctx, &config.scans).unwrap();
        assert_eq!(records.items.len(), 1);
        assert_eq!(records.items[0].info.real_name, "Hat_01");
    }
}
