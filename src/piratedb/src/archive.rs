//! Template archive access
//!
//! The binary archive reader and deserializer live outside this crate. The
//! engine only needs two things from them: list the paths matching a glob,
//! and turn one path into a [`Node`] tree (or nothing, for a malformed
//! entry). [`DirArchive`] serves a directory of JSON-exported templates and
//! [`MemoryArchive`] serves trees held in memory.

use crate::node::Node;
use crate::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Archive path of the template manifest
pub const MANIFEST_PATH: &str = "TemplateManifest.xml";

/// Source of deserialized templates
pub trait Archive {
    /// Paths matching a glob pattern, in a stable order
    fn iter(&self, pattern: &str) -> Vec<String>;

    /// Deserialize one path. `None` means the entry should be skipped.
    fn deserialize(&self, path: &str) -> Option<Node>;
}

/// Archive backed by a directory of JSON-exported templates
///
/// Each file keeps its archive path relative to the root
/// (e.g. `ObjectData/Items/Cutlass.xml`) and holds the template as JSON.
pub struct DirArchive {
    root: PathBuf,
    files: Vec<String>,
}

impl DirArchive {
    /// Open a directory and index every file beneath it
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Archive directory not found: {}", root.display()),
            )));
        }

        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(&root)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&root) {
                let archive_path = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                files.push(archive_path);
            }
        }
        files.sort();

        tracing::debug!("Indexed {} files under {}", files.len(), root.display());
        Ok(Self { root, files })
    }

    /// All indexed archive paths
    pub fn list_files(&self) -> &[String] {
        &self.files
    }
}

impl Archive for DirArchive {
    fn iter(&self, pattern: &str) -> Vec<String> {
        self.files
            .iter()
            .filter(|path| glob_match::glob_match(pattern, path))
            .cloned()
            .collect()
    }

    fn deserialize(&self, path: &str) -> Option<Node> {
        let data = match std::fs::read(self.root.join(path)) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", path, e);
                return None;
            }
        };
        match Node::from_slice(&data) {
            Ok(node) => Some(node),
            Err(e) => {
                tracing::debug!("Skipping malformed {}: {}", path, e);
                None
            }
        }
    }
}

/// Archive holding already-deserialized trees
#[derive(Debug, Default, Clone)]
pub struct MemoryArchive {
    entries: BTreeMap<String, Node>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str, node: Node) {
        self.entries.insert(path.to_string(), node);
    }

    /// Builder-style insert
    pub fn with(mut self, path: &str, node: Node) -> Self {
        self.insert(path, node);
        self
    }
}

impl Archive for MemoryArchive {
    fn iter(&self, pattern: &str) -> Vec<String> {
        self.entries
            .keys()
            .filter(|path| glob_match::glob_match(pattern, path))
            .cloned()
            .collect()
    }

    fn deserialize(&self, path: &str) -> Option<Node> {
        self.entries.get(path).cloned()
    }
}

/// Template id → archive path index
#[derive(Debug, Default, Clone)]
pub struct TemplateManifest {
    paths: HashMap<u64, String>,
}

impl TemplateManifest {
    /// Build from a deserialized manifest (`m_serializedTemplates` entries)
    pub fn from_node(node: &Node) -> Self {
        let mut paths = HashMap::new();
        let entries = node
            .get("m_serializedTemplates")
            .and_then(Node::as_list)
            .unwrap_or(&[]);

        for entry in entries {
            if entry.is_null() {
                continue;
            }
            let id = entry.get("m_id").and_then(Node::as_u64);
            let filename = entry.get("m_filename").and_then(Node::as_str);
            match (id, filename) {
                (Some(id), Some(filename)) => {
                    paths.insert(id, filename.to_string());
                }
                _ => tracing::warn!("Ignoring malformed manifest entry: {:?}", entry),
            }
        }

        Self { paths }
    }

    /// Load the manifest from its well-known archive path
    pub fn load(archive: &dyn Archive) -> Result<Self> {
        let node = archive
            .deserialize(MANIFEST_PATH)
            .ok_or_else(|| Error::ManifestMissing(MANIFEST_PATH.to_string()))?;
        let manifest = Self::from_node(&node);
        tracing::info!("Loaded template manifest with {} entries", manifest.len());
        Ok(manifest)
    }

    /// Build from explicit pairs
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u64, S)>,
        S: Into<String>,
    {
        Self {
            paths: pairs.into_iter().map(|(id, p)| (id, p.into())).collect(),
        }
    }

    /// Archive path of a template id
    pub fn resolve_path(&self, template_id: u64) -> Option<&str> {
        self.paths.get(&template_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
