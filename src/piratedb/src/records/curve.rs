//! Stat curves: per-level stat values for a class

use super::adjust::resolve_stat_or_skip;
use super::{TemplateInfo, ICON_FIELD};
use crate::node::Node;
use crate::reference::CURVE_STATS;
use crate::schema::Fields;
use crate::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurvePoint {
    pub level: i64,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurveAttribute {
    pub stat: String,
    pub points: Vec<CurvePoint>,
    /// Bonus points, without entries whose level or value is zero
    pub bonus: Vec<CurvePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    pub info: TemplateInfo,
    pub attributes: Vec<CurveAttribute>,
}

impl Curve {
    pub fn project(fields: Fields<'_>) -> Result<Self> {
        let info = TemplateInfo::read(fields, ICON_FIELD)?;
        let mut attributes = Vec::new();

        for attribute in fields.req_list("m_attributes")? {
            if attribute.is_null() {
                continue;
            }
            let attr = fields.nested(attribute);
            // skip-one: unknown stat codes drop only this attribute
            let Some(stat) = resolve_stat_or_skip(attr.req_i64("m_sStatName")?, &info.real_name)
            else {
                continue;
            };
            if !CURVE_STATS.contains(&stat) {
                continue;
            }

            let bonus = read_points(attr, attr.opt_list("m_bonusList"))?
                .into_iter()
                .filter(|p| p.level != 0 && p.value != 0)
                .collect();
            attributes.push(CurveAttribute {
                stat: stat.to_string(),
                points: read_points(attr, attr.req_list("m_pointList")?)?,
                bonus,
            });
        }

        Ok(Self { info, attributes })
    }

    /// Total number of regular and bonus points
    pub fn point_count(&self) -> usize {
        self.attributes
            .iter()
            .map(|a| a.points.len() + a.bonus.len())
            .sum()
    }
}

fn read_points(fields: Fields<'_>, points: &[Node]) -> Result<Vec<CurvePoint>> {
    points
        .iter()
        .filter(|p| !p.is_null())
        .map(|p| {
            let p = fields.nested(p);
            Ok(CurvePoint {
                level: p.req_i64("m_level")?,
                value: p.req_i64("m_value")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_curve_keeps_curve_stats_only() {
        let node = Node::from(json!({
            "m_templateID": 40,
            "m_objectName": "Curve_Buccaneer",
            "m_attributes": [
                {
                    "m_sStatName": 5,
                    "m_pointList": [{ "m_level": 1, "m_value": 100 }, { "m_level": 2, "m_value": 120 }],
                    "m_bonusList": [{ "m_level": 0, "m_value": 5 }, { "m_level": 10, "m_value": 0 }, { "m_level": 10, "m_value": 3 }],
                },
                { "m_sStatName": 6, "m_pointList": [{ "m_level": 1, "m_value": 1 }], "m_bonusList": [] },
                { "m_sStatName": 29, "m_pointList": [], "m_bonusList": [] },
            ],
        }));
        let curve = Curve::project(Fields::new(&node, "Curve_Buccaneer")).unwrap();
        assert_eq!(curve.attributes.len(), 1);

        let health = &curve.attributes[0];
        assert_eq!(health.stat, "Max Health");
        assert_eq!(health.points.len(), 2);
        assert_eq!(health.bonus, vec![CurvePoint { level: 10, value: 3 }]);
        assert_eq!(curve.point_count(), 3);
    }

    #[test]
    fn test_curve_point_requires_value() {
        let node = Node::from(json!({
            "m_templateID": 41,
            "m_objectName": "Curve_Broken",
            "m_attributes": [{ "m_sStatName": 0, "m_pointList": [{ "m_level": 1 }] }],
        }));
        let err = Curve::project(Fields::new(&node, "Curve_Broken")).unwrap_err();
        assert!(err.to_string().contains("m_value"));
    }
}
