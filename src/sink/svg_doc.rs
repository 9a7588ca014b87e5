use std::{
    ops::Range,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    foundation::error::{MotionError, MotionResult},
    sink::PathSink,
};

/// Attribute that designates the animated element unless configured otherwise.
pub const DEFAULT_MARKER_ATTRIBUTE: &str = "path";

/// An SVG document whose marked element's `d` attribute is the sink.
///
/// The document text is kept verbatim; writes splice the new value into place so everything
/// outside the attribute value is preserved byte for byte. When a mirror file is set, the
/// document is written there after every update.
#[derive(Clone, Debug)]
pub struct SvgDocumentSink {
    document: String,
    value: Range<usize>,
    mirror: Option<PathBuf>,
}

impl SvgDocumentSink {
    /// Locate the first element carrying `marker_attribute` and its `d` attribute.
    pub fn from_document(document: impl Into<String>, marker_attribute: &str) -> MotionResult<Self> {
        let document = document.into();
        let value = locate_d_value(&document, marker_attribute)?;
        tracing::debug!(
            marker = marker_attribute,
            start = value.start,
            end = value.end,
            "located path sink"
        );
        Ok(Self {
            document,
            value,
            mirror: None,
        })
    }

    pub fn load(path: &Path, marker_attribute: &str) -> MotionResult<Self> {
        let document = std::fs::read_to_string(path)
            .with_context(|| format!("read svg document '{}'", path.display()))?;
        Self::from_document(document, marker_attribute)
    }

    /// Also write the whole document to `path` on every update.
    pub fn mirror_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.mirror = Some(path.into());
        self
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn into_document(self) -> String {
        self.document
    }

    pub fn save(&self, path: &Path) -> MotionResult<()> {
        std::fs::write(path, &self.document)
            .with_context(|| format!("write svg document '{}'", path.display()))?;
        Ok(())
    }
}

impl PathSink for SvgDocumentSink {
    fn read_path(&self) -> MotionResult<String> {
        Ok(self.document[self.value.clone()].to_string())
    }

    fn write_path(&mut self, d: &str) -> MotionResult<()> {
        if d.contains(['"', '\'', '<', '&']) {
            return Err(MotionError::sink(
                "path data contains markup characters and cannot be spliced",
            ));
        }
        self.document.replace_range(self.value.clone(), d);
        self.value = self.value.start..self.value.start + d.len();

        if let Some(mirror) = &self.mirror {
            std::fs::write(mirror, &self.document).map_err(|e| {
                MotionError::sink(format!("write mirror '{}': {e}", mirror.display()))
            })?;
        }
        Ok(())
    }
}

fn locate_d_value(document: &str, marker_attribute: &str) -> MotionResult<Range<usize>> {
    let doc = roxmltree::Document::parse(document).context("parse svg document")?;

    let node = doc
        .descendants()
        .find(|n| n.is_element() && n.has_attribute(marker_attribute))
        .ok_or_else(|| {
            MotionError::no_sink(format!(
                "no element carries the '{marker_attribute}' attribute"
            ))
        })?;
    let d = node.attribute_node("d").ok_or_else(|| {
        MotionError::no_sink(format!(
            "<{}> marked with '{marker_attribute}' has no 'd' attribute",
            node.tag_name().name()
        ))
    })?;

    // Raw source span between the quotes; XML value normalization is not applied.
    Ok(d.range_value())
}

#[cfg(test)]
#[path = "../../tests/unit/sink/svg_doc.rs"]
mod tests;
