//! OOXML package access: parts, relationships and content types.
//!
//! The whole archive is held in memory. Outputs are built in memory and then
//! written to a sibling temporary file that is renamed into place, so a failed
//! write never leaves a truncated package behind.

use crate::xml::{Document, Element};
use deck_core::{Error, Result};
use std::collections::{HashSet, VecDeque};
use std::fs::{self, File};
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Name of the content-types part.
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Name of the package-level relationships part.
pub const PACKAGE_RELS_PART: &str = "_rels/.rels";

const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Prefix of the transitional relationship type URIs.
pub const REL_TYPE_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/";

/// Relationship kinds, i.e. the last segment of a relationship type URI.
pub mod rel_kind {
    pub const OFFICE_DOCUMENT: &str = "officeDocument";
    pub const SLIDE: &str = "slide";
    pub const SLIDE_LAYOUT: &str = "slideLayout";
    pub const SLIDE_MASTER: &str = "slideMaster";
    pub const NOTES_SLIDE: &str = "notesSlide";
    pub const THEME: &str = "theme";
    pub const IMAGE: &str = "image";
}

/// Content type of a slide part.
pub const SLIDE_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";

/// Upper bound on the buffer reserved from a ZIP entry's declared size.
const MAX_CAPACITY_HINT: u64 = 16 * 1024 * 1024;

/// A single file inside the package.
#[derive(Debug, Clone)]
pub struct Part {
    /// Part name without a leading slash, e.g. `ppt/slides/slide1.xml`.
    pub name: String,
    pub data: Vec<u8>,
}

/// An OOXML package held in memory, parts in archive order.
#[derive(Debug, Clone, Default)]
pub struct Package {
    parts: Vec<Part>,
}

impl Package {
    /// Create an empty package.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read a package from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::UnsupportedFormat(format!("not a ZIP-based presentation: {}", e)))?;

        let mut parts = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| Error::ZipError(format!("Failed to read entry {}: {}", i, e)))?;
            if file.is_dir() {
                continue;
            }

            let name = file.name().trim_start_matches('/').to_string();
            let mut data = Vec::with_capacity(file.size().min(MAX_CAPACITY_HINT) as usize);
            file.read_to_end(&mut data)
                .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", name, e)))?;
            parts.push(Part { name, data });
        }

        let package = Self { parts };
        if !package.contains(CONTENT_TYPES_PART) {
            return Err(Error::CorruptedFile(format!(
                "archive has no {} part",
                CONTENT_TYPES_PART
            )));
        }

        log::debug!("Read package with {} parts", package.parts.len());
        Ok(package)
    }

    /// Whether a part exists.
    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|p| p.name == name)
    }

    /// Bytes of a part, if present.
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.data.as_slice())
    }

    /// Bytes of a part that must exist.
    pub fn require_part(&self, name: &str) -> Result<&[u8]> {
        self.part(name)
            .ok_or_else(|| Error::CorruptedFile(format!("missing part '{}'", name)))
    }

    /// Parse a part as XML.
    pub fn xml_part(&self, name: &str) -> Result<Document> {
        Document::parse(self.require_part(name)?)
            .map_err(|e| Error::XmlError(format!("{}: {}", name, e)))
    }

    /// Replace a part's bytes, or append it if new.
    pub fn set_part(&mut self, name: impl Into<String>, data: Vec<u8>) {
        let name = name.into();
        match self.parts.iter_mut().find(|p| p.name == name) {
            Some(part) => part.data = data,
            None => self.parts.push(Part { name, data }),
        }
    }

    /// Serialize an XML document into a part.
    pub fn set_xml_part(&mut self, name: impl Into<String>, doc: &Document) -> Result<()> {
        self.set_part(name, doc.to_bytes()?);
        Ok(())
    }

    /// Remove a part, returning its bytes.
    pub fn remove_part(&mut self, name: &str) -> Option<Vec<u8>> {
        let pos = self.parts.iter().position(|p| p.name == name)?;
        Some(self.parts.remove(pos).data)
    }

    /// Names of all parts in archive order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.name.as_str())
    }

    /// Relationships whose source is `source` (`""` for the package itself).
    pub fn relationships(&self, source: &str) -> Result<Relationships> {
        let rels_name = rels_part_name(source);
        match self.part(&rels_name) {
            Some(bytes) => Relationships::parse(bytes)
                .map_err(|e| Error::XmlError(format!("{}: {}", rels_name, e))),
            None => Ok(Relationships::default()),
        }
    }

    /// Store the relationships of `source`.
    pub fn set_relationships(&mut self, source: &str, rels: &Relationships) -> Result<()> {
        self.set_part(rels_part_name(source), rels.to_bytes()?);
        Ok(())
    }

    /// Parsed `[Content_Types].xml`.
    pub fn content_types(&self) -> Result<ContentTypes> {
        ContentTypes::parse(self.require_part(CONTENT_TYPES_PART)?)
    }

    /// Store `[Content_Types].xml`.
    pub fn set_content_types(&mut self, content_types: &ContentTypes) -> Result<()> {
        self.set_part(CONTENT_TYPES_PART, content_types.to_bytes()?);
        Ok(())
    }

    /// Name of the main presentation part.
    pub fn main_part_name(&self) -> Result<String> {
        let rels = self.relationships("")?;
        if let Some(rel) = rels.first_of_kind(rel_kind::OFFICE_DOCUMENT) {
            let name = resolve_target("", &rel.target);
            if self.contains(&name) {
                return Ok(name);
            }
            log::warn!("officeDocument relationship points at missing part '{}'", name);
        }

        let fallback = "ppt/presentation.xml";
        if self.contains(fallback) {
            Ok(fallback.to_string())
        } else {
            Err(Error::PackageError(
                "no main presentation part (is this a .pptx file?)".to_string(),
            ))
        }
    }

    /// All parts reachable from the package relationships.
    pub fn reachable_parts(&self) -> Result<HashSet<String>> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([String::new()]);

        while let Some(source) = queue.pop_front() {
            for rel in self.relationships(&source)?.iter() {
                if rel.external {
                    continue;
                }
                let target = resolve_target(&source, &rel.target);
                if !self.contains(&target) {
                    log::warn!("{} points at missing part '{}'", rels_part_name(&source), target);
                    continue;
                }
                if seen.insert(target.clone()) {
                    queue.push_back(target);
                }
            }
        }

        Ok(seen)
    }

    /// Remove parts that were reachable in `previously` but no longer are,
    /// together with their relationships and content-type overrides.
    pub fn drop_unreachable(&mut self, previously: &HashSet<String>) -> Result<Vec<String>> {
        let now = self.reachable_parts()?;
        let mut orphans: Vec<String> = previously.difference(&now).cloned().collect();
        if orphans.is_empty() {
            return Ok(orphans);
        }
        orphans.sort();

        let mut content_types = self.content_types()?;
        for name in &orphans {
            self.remove_part(name);
            self.remove_part(&rels_part_name(name));
            content_types.remove_override(name);
            log::debug!("Dropped unreferenced part '{}'", name);
        }
        self.set_content_types(&content_types)?;

        Ok(orphans)
    }

    /// Build the ZIP archive in memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let ordered = self
            .parts
            .iter()
            .filter(|p| p.name == CONTENT_TYPES_PART)
            .chain(self.parts.iter().filter(|p| p.name != CONTENT_TYPES_PART));

        for part in ordered {
            writer
                .start_file(part.name.as_str(), options)
                .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", part.name, e)))?;
            writer.write_all(&part.data)?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?;
        Ok(cursor.into_inner())
    }

    /// Write the package to `path`, replacing it only once fully written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        write_atomic(path.as_ref(), &bytes)
    }
}

/// Write `bytes` to a temporary sibling of `path` and rename it into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("output");
    let tmp = path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));

    if let Err(e) = fs::write(&tmp, bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Name of the relationships part belonging to `source`.
pub fn rels_part_name(source: &str) -> String {
    match source.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None if source.is_empty() => PACKAGE_RELS_PART.to_string(),
        None => format!("_rels/{}.rels", source),
    }
}

/// Resolve a relationship target against the part that owns the relationship.
pub fn resolve_target(source: &str, target: &str) -> String {
    let target = target.split('#').next().unwrap_or(target);
    let (base, relative) = match target.strip_prefix('/') {
        Some(absolute) => ("", absolute),
        None => (source.rsplit_once('/').map(|(dir, _)| dir).unwrap_or(""), target),
    };

    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Express `part` relative to the directory of `source`.
pub fn relative_target(source: &str, part: &str) -> String {
    let base: Vec<&str> = source
        .rsplit_once('/')
        .map(|(dir, _)| dir.split('/').collect())
        .unwrap_or_default();
    let target: Vec<&str> = part.split('/').collect();

    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count()
        .min(target.len().saturating_sub(1));

    let mut segments: Vec<&str> = vec![".."; base.len() - common];
    segments.extend(&target[common..]);
    segments.join("/")
}

/// One relationship entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    /// `TargetMode="External"`: the target is a URL, not a part.
    pub external: bool,
}

impl Relationship {
    /// Last segment of the relationship type URI, e.g. `slideLayout`.
    pub fn kind(&self) -> &str {
        self.rel_type.rsplit('/').next().unwrap_or_default()
    }
}

/// The relationships of one part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    /// Parse a `.rels` part.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let doc = Document::parse(bytes)?;
        let rels = doc
            .root
            .elements()
            .filter(|e| e.local_name() == "Relationship")
            .filter_map(|e| {
                let id = e.attr("Id")?;
                Some(Relationship {
                    id: id.to_string(),
                    rel_type: e.attr("Type").unwrap_or_default().to_string(),
                    target: e.attr("Target").unwrap_or_default().to_string(),
                    external: e.attr("TargetMode") == Some("External"),
                })
            })
            .collect();
        Ok(Self { rels })
    }

    /// Serialize to a `.rels` part.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut root = Element::new("Relationships").with_attr("xmlns", RELATIONSHIPS_NS);
        for rel in &self.rels {
            let mut el = Element::new("Relationship")
                .with_attr("Id", rel.id.as_str())
                .with_attr("Type", rel.rel_type.as_str())
                .with_attr("Target", rel.target.as_str());
            if rel.external {
                el.set_attr("TargetMode", "External");
            }
            root = root.with_child(el);
        }
        Document::new(root).to_bytes()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    pub fn len(&self) -> usize {
        self.rels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Relationship by id.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|r| r.id == id)
    }

    /// First relationship of the given kind.
    pub fn first_of_kind(&self, kind: &str) -> Option<&Relationship> {
        self.rels.iter().find(|r| r.kind() == kind)
    }

    pub fn push(&mut self, rel: Relationship) {
        self.rels.push(rel);
    }

    /// Remove a relationship by id.
    pub fn remove(&mut self, id: &str) -> Option<Relationship> {
        let pos = self.rels.iter().position(|r| r.id == id)?;
        Some(self.rels.remove(pos))
    }

    pub fn retain<F: FnMut(&Relationship) -> bool>(&mut self, keep: F) {
        self.rels.retain(keep);
    }

    /// An unused `rId<n>` identifier.
    pub fn next_id(&self) -> String {
        let max = self
            .rels
            .iter()
            .filter_map(|r| r.id.strip_prefix("rId")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        let mut n = max + 1;
        while self.get(&format!("rId{}", n)).is_some() {
            n += 1;
        }
        format!("rId{}", n)
    }
}

/// Parsed `[Content_Types].xml`.
#[derive(Debug, Clone)]
pub struct ContentTypes {
    doc: Document,
}

impl ContentTypes {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let doc = Document::parse(bytes)
            .map_err(|e| Error::CorruptedFile(format!("{}: {}", CONTENT_TYPES_PART, e)))?;
        Ok(Self { doc })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.doc.to_bytes()
    }

    /// Content type of a part: its override, else the default for its extension.
    pub fn content_type(&self, part: &str) -> Option<&str> {
        let part_name = format!("/{}", part);
        let overridden = self.doc.root.elements().find(|e| {
            e.local_name() == "Override"
                && e.attr("PartName")
                    .is_some_and(|p| p.eq_ignore_ascii_case(&part_name))
        });
        if let Some(e) = overridden {
            return e.attr("ContentType");
        }

        let ext = part.rsplit_once('.').map(|(_, ext)| ext)?;
        self.doc
            .root
            .elements()
            .find(|e| {
                e.local_name() == "Default"
                    && e.attr("Extension")
                        .is_some_and(|x| x.eq_ignore_ascii_case(ext))
            })
            .and_then(|e| e.attr("ContentType"))
    }

    /// Add or replace the override for a part.
    pub fn set_override(&mut self, part: &str, content_type: &str) {
        let part_name = format!("/{}", part);
        let existing = self.doc.root.elements_mut().find(|e| {
            e.local_name() == "Override" && e.attr("PartName") == Some(part_name.as_str())
        });
        match existing {
            Some(e) => e.set_attr("ContentType", content_type),
            None => {
                let el = Element::new(self.doc.root.sibling_name("Override"))
                    .with_attr("PartName", part_name)
                    .with_attr("ContentType", content_type);
                self.doc.root.children.push(crate::xml::Node::Element(el));
            }
        }
    }

    /// Remove the override for a part; returns whether one existed.
    pub fn remove_override(&mut self, part: &str) -> bool {
        let part_name = format!("/{}", part);
        let before = self.doc.root.children.len();
        self.doc.root.retain_elements(|e| {
            !(e.local_name() == "Override"
                && e.attr("PartName")
                    .is_some_and(|p| p.eq_ignore_ascii_case(&part_name)))
        });
        self.doc.root.children.len() != before
    }
}
