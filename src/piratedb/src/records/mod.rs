//! Typed records projected from classified templates
//!
//! Every projector is a pure function of a template node and the run's
//! [`Context`]. Fields the classifier or a matched behavior guarantees are
//! read as required and surface [`crate::Error::MissingField`] when absent.

pub mod adjust;
pub mod companion;
pub mod curve;
pub mod item;
pub mod power;
pub mod talent;
pub mod unit;

pub use adjust::AdjustmentTriple;
pub use companion::{Companion, CompanionPower, CompanionTalent};
pub use curve::Curve;
pub use item::Item;
pub use power::{Power, ResultVariant};
pub use talent::Talent;
pub use unit::Unit;

use crate::classify::Kind;
use crate::context::Context;
use crate::lang::LangRef;
use crate::node::{icon_image, Node};
use crate::schema::{owner_label, Fields};
use crate::Result;
use serde::Serialize;

/// Icon field used by most templates
pub const ICON_FIELD: &str = "m_sIcon";

/// Icon field used by companion talents and powers
pub const COMPANION_ICON_FIELD: &str = "m_icon";

/// Fields shared by every record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateInfo {
    pub template_id: u64,
    pub real_name: String,
    pub display_name: LangRef,
    pub image: String,
}

impl TemplateInfo {
    pub fn read(fields: Fields<'_>, icon_field: &str) -> Result<Self> {
        let node = fields.node();
        Ok(Self {
            template_id: fields.req_u64("m_templateID")?,
            real_name: fields.req_str("m_objectName")?.to_string(),
            display_name: LangRef::display_name(node),
            image: icon_image(node, icon_field),
        })
    }
}

/// A projected record of any kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateRecord {
    Companion(Companion),
    Unit(Unit),
    Item(Item),
    CompanionTalent(CompanionTalent),
    CompanionPower(CompanionPower),
    Talent(Talent),
    Power(Power),
    Curve(Curve),
}

impl TemplateRecord {
    /// Project `node` as `kind`
    pub fn project(kind: Kind, node: &Node, ctx: &Context<'_>) -> Result<Self> {
        let owner = owner_label(node);
        let fields = Fields::new(node, &owner);
        Ok(match kind {
            Kind::Companion => Self::Companion(Companion::project(fields)?),
            Kind::Unit => Self::Unit(Unit::project(fields, ctx)?),
            Kind::Item => Self::Item(Item::project(fields, ctx)?),
            Kind::CompanionTalent => Self::CompanionTalent(CompanionTalent::project(fields)?),
            Kind::CompanionPower => Self::CompanionPower(CompanionPower::project(fields)?),
            Kind::Talent => Self::Talent(Talent::project(fields)?),
            Kind::Power => Self::Power(Power::project(fields, ctx)?),
            Kind::Curve => Self::Curve(Curve::project(fields)?),
        })
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::Companion(_) => Kind::Companion,
            Self::Unit(_) => Kind::Unit,
            Self::Item(_) => Kind::Item,
            Self::CompanionTalent(_) => Kind::CompanionTalent,
            Self::CompanionPower(_) => Kind::CompanionPower,
            Self::Talent(_) => Kind::Talent,
            Self::Power(_) => Kind::Power,
            Self::Curve(_) => Kind::Curve,
        }
    }

    pub fn info(&self) -> &TemplateInfo {
        match self {
            Self::Companion(r) => &r.info,
            Self::Unit(r) => &r.info,
            Self::Item(r) => &r.info,
            Self::CompanionTalent(r) => &r.info,
            Self::CompanionPower(r) => &r.info,
            Self::Talent(r) => &r.info,
            Self::Power(r) => &r.info,
            Self::Curve(r) => &r.info,
        }
    }

    pub fn template_id(&self) -> u64 {
        self.info().template_id
    }
}
