//! Shared, read-only state handed to every projector

use crate::archive::{Archive, TemplateManifest};
use crate::config::{ClassifyPolicy, PipelineConfig, SchoolTable};
use crate::node::Node;

/// Archive, manifest and policy for one run
///
/// Projectors are pure functions of a template node and this context.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub archive: &'a dyn Archive,
    pub manifest: &'a TemplateManifest,
    pub policy: &'a ClassifyPolicy,
    pub schools: &'a SchoolTable,
}

impl<'a> Context<'a> {
    pub fn new(
        archive: &'a dyn Archive,
        manifest: &'a TemplateManifest,
        config: &'a PipelineConfig,
    ) -> Self {
        Self {
            archive,
            manifest,
            policy: &config.policy,
            schools: &config.schools,
        }
    }

    /// Follow a template id through the manifest and deserialize its file
    ///
    /// `None` when the id is unknown or the file cannot be deserialized.
    pub fn deserialize_template(&self, template_id: u64) -> Option<Node> {
        let path = self.manifest.resolve_path(template_id)?;
        self.archive.deserialize(path)
    }

    /// School of a class template, from its file name
    pub fn school(&self, class_id: u64) -> Option<String> {
        self.manifest
            .resolve_path(class_id)
            .and_then(|path| self.schools.school_for(path))
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryArchive;
    use serde_json::json;

    #[test]
    fn test_deserialize_template() {
        let archive = MemoryArchive::new().with(
            "ObjectData/Units/Skeleton.xml",
            Node::from(json!({ "m_displayName": "Units_Skeleton" })),
        );
        let manifest = TemplateManifest::from_pairs([
            (10, "ObjectData/Units/Skeleton.xml"),
            (11, "ObjectData/Units/Missing.xml"),
        ]);
        let config = PipelineConfig::default();
        let ctx = Context::new(&archive, &manifest, &config);

        assert!(ctx.deserialize_template(10).is_some());
        assert!(ctx.deserialize_template(11).is_none());
        assert!(ctx.deserialize_template(12).is_none());
    }

    #[test]
    fn test_school() {
        let archive = MemoryArchive::new();
        let manifest = TemplateManifest::from_pairs([
            (1, "ObjectData/Classes/Class_THF.xml"),
            (2, "ObjectData/Classes/Class_Other.xml"),
        ]);
        let config = PipelineConfig::default();
        let ctx = Context::new(&archive, &manifest, &config);

        assert_eq!(ctx.school(1).as_deref(), Some("Swashbuckler"));
        assert_eq!(ctx.school(2), None);
        assert_eq!(ctx.school(3), None);
    }
}
