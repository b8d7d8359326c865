//! Core types for the field-mapping model.
//!
//! A `Template` owns an ordered list of `FieldMapping` records. Each record is
//! either a scalar text placement or a loop: a row template repeated by
//! vertical translation, optionally continued on further pages.
//!
//! ## Z-order
//!
//! List order is paint and hit order: the last mapping is topmost. New
//! mappings are only ever appended (`Template::push_mapping`); the only way
//! to reorder is the explicit `Template::bring_to_front`.

use crate::error::ValidationError;
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Template
// ============================================================================

/// A document plus the bindings drawn on top of it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// External reference to the document file (opaque to the editor)
    pub document: String,
    /// Example data used only to suggest paths
    #[serde(default)]
    pub example_data: Value,
    #[serde(default)]
    mappings: Vec<FieldMapping>,
}

impl Template {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            example_data: Value::Null,
            mappings: Vec::new(),
        }
    }

    pub fn with_example_data(mut self, example_data: Value) -> Self {
        self.example_data = example_data;
        self
    }

    /// Mappings in z-order, bottom first.
    pub fn mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    pub fn mapping(&self, index: usize) -> Option<&FieldMapping> {
        self.mappings.get(index)
    }

    pub(crate) fn mapping_mut(&mut self, index: usize) -> Option<&mut FieldMapping> {
        self.mappings.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Append a mapping on top of all others. Returns its index.
    pub fn push_mapping(&mut self, mapping: FieldMapping) -> usize {
        self.mappings.push(mapping);
        self.mappings.len() - 1
    }

    pub(crate) fn remove_mapping(&mut self, index: usize) -> Option<FieldMapping> {
        (index < self.mappings.len()).then(|| self.mappings.remove(index))
    }

    /// Move a mapping to the top of the z-order. Returns its new index.
    pub fn bring_to_front(&mut self, index: usize) -> Option<usize> {
        if index >= self.mappings.len() {
            return None;
        }
        let mapping = self.mappings.remove(index);
        Some(self.push_mapping(mapping))
    }

    /// Every reason the template cannot be persisted, with the mapping index.
    pub fn problems(&self, min_size: i32) -> Vec<(usize, ValidationError)> {
        self.mappings
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.validate(min_size).err().map(|e| (i, e)))
            .collect()
    }

    /// First problem found, if any.
    pub fn validate(&self, min_size: i32) -> Result<(), ValidationError> {
        match self.problems(min_size).into_iter().next() {
            Some((_, err)) => Err(err),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Field mappings
// ============================================================================

/// One binding record. Serialized with an internal `kind` tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldMapping {
    Text(TextMapping),
    Loop(LoopMapping),
}

/// A scalar placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextMapping {
    pub path: String,
    pub page: u32,
    pub area: Rect,
}

/// A repeating row template.
///
/// `area` is the first row on `page`; row `k` is `area` moved down by
/// `k * area.height`. Rows are implied, never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoopMapping {
    pub path: String,
    pub page: u32,
    pub area: Rect,
    pub rows: u32,
    #[serde(default)]
    pub fields: Vec<LoopField>,
    #[serde(default)]
    pub continuations: Vec<LoopPage>,
}

/// A column inside a loop row, relative to the segment area origin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopField {
    pub path: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Continuation of a loop on another page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopPage {
    pub page: u32,
    pub area: Rect,
    pub rows: u32,
}

/// Addresses one page segment of a mapping. Text mappings only have
/// `Primary`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Primary,
    Continuation(usize),
}

/// Resolved view of a segment: where it is and how many rows it holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentView {
    pub segment: Segment,
    pub page: u32,
    pub area: Rect,
    pub rows: u32,
}

impl FieldMapping {
    pub fn text(page: u32, area: Rect, path: impl Into<String>) -> Self {
        Self::Text(TextMapping {
            path: path.into(),
            page,
            area,
        })
    }

    pub fn looped(page: u32, area: Rect, path: impl Into<String>, rows: u32) -> Self {
        Self::Loop(LoopMapping {
            path: path.into(),
            page,
            area,
            rows,
            fields: Vec::new(),
            continuations: Vec::new(),
        })
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Text(t) => &t.path,
            Self::Loop(l) => &l.path,
        }
    }

    pub(crate) fn set_path(&mut self, path: String) {
        match self {
            Self::Text(t) => t.path = path,
            Self::Loop(l) => l.path = path,
        }
    }

    /// Page of the primary segment.
    pub fn page(&self) -> u32 {
        match self {
            Self::Text(t) => t.page,
            Self::Loop(l) => l.page,
        }
    }

    /// Area of the primary segment.
    pub fn area(&self) -> Rect {
        match self {
            Self::Text(t) => t.area,
            Self::Loop(l) => l.area,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Loop(_) => "loop",
        }
    }

    pub fn is_loop(&self) -> bool {
        matches!(self, Self::Loop(_))
    }

    pub fn as_loop(&self) -> Option<&LoopMapping> {
        match self {
            Self::Loop(l) => Some(l),
            Self::Text(_) => None,
        }
    }

    pub fn as_loop_mut(&mut self) -> Option<&mut LoopMapping> {
        match self {
            Self::Loop(l) => Some(l),
            Self::Text(_) => None,
        }
    }

    /// All segments: the primary one first, then continuations in order.
    pub fn segments(&self) -> Vec<SegmentView> {
        match self {
            Self::Text(t) => vec![SegmentView {
                segment: Segment::Primary,
                page: t.page,
                area: t.area,
                rows: 1,
            }],
            Self::Loop(l) => l.segments().collect(),
        }
    }

    pub fn segment_area(&self, segment: Segment) -> Option<Rect> {
        match (self, segment) {
            (Self::Text(t), Segment::Primary) => Some(t.area),
            (Self::Text(_), Segment::Continuation(_)) => None,
            (Self::Loop(l), seg) => l.segment(seg).map(|s| s.area),
        }
    }

    pub(crate) fn segment_area_mut(&mut self, segment: Segment) -> Option<&mut Rect> {
        match (self, segment) {
            (Self::Text(t), Segment::Primary) => Some(&mut t.area),
            (Self::Text(_), Segment::Continuation(_)) => None,
            (Self::Loop(l), Segment::Primary) => Some(&mut l.area),
            (Self::Loop(l), Segment::Continuation(i)) => l.continuations.get_mut(i).map(|c| &mut c.area),
        }
    }

    /// Persistability check: non-empty paths and positive geometry.
    pub fn validate(&self, min_size: i32) -> Result<(), ValidationError> {
        validate_path(self.path())?;
        for seg in self.segments() {
            validate_size(&seg.area, min_size)?;
            validate_rows(seg.rows)?;
        }
        if let Self::Loop(l) = self {
            for field in &l.fields {
                validate_path(&field.path)?;
                if !field.rect().is_positive() {
                    return Err(ValidationError::TooSmall {
                        width: field.width,
                        height: field.height,
                        min: 1,
                    });
                }
            }
        }
        Ok(())
    }
}

impl LoopMapping {
    pub fn segments(&self) -> impl Iterator<Item = SegmentView> + '_ {
        std::iter::once(SegmentView {
            segment: Segment::Primary,
            page: self.page,
            area: self.area,
            rows: self.rows,
        })
        .chain(self.continuations.iter().enumerate().map(|(i, c)| SegmentView {
            segment: Segment::Continuation(i),
            page: c.page,
            area: c.area,
            rows: c.rows,
        }))
    }

    pub fn segment(&self, segment: Segment) -> Option<SegmentView> {
        self.segments().find(|s| s.segment == segment)
    }

    /// The segment drawn on `page`. The primary wins if several match.
    pub fn segment_on_page(&self, page: u32) -> Option<SegmentView> {
        self.segments().find(|s| s.page == page)
    }

    /// Rows represented across all segments, saturating at `u32::MAX`.
    pub fn total_rows(&self) -> u32 {
        self.segments().fold(0u32, |acc, s| acc.saturating_add(s.rows))
    }

    /// Area of row `row` within a segment. `None` past the last row, or when
    /// the row would lie beyond the `i32` coordinate range.
    pub fn row_area(&self, segment: Segment, row: u32) -> Option<Rect> {
        let seg = self.segment(segment)?;
        if row >= seg.rows {
            return None;
        }
        let dy = i32::try_from(row).ok()?.checked_mul(seg.area.height)?;
        let y = seg.area.y.checked_add(dy)?;
        Some(Rect::new(seg.area.x, y, seg.area.width, seg.area.height))
    }

    /// Absolute rectangle of a column on a given row of a segment.
    pub fn field_rect(&self, field: usize, segment: Segment, row: u32) -> Option<Rect> {
        let row_area = self.row_area(segment, row)?;
        let f = self.fields.get(field)?;
        Some(Rect::new(
            row_area.x.checked_add(f.x)?,
            row_area.y.checked_add(f.y)?,
            f.width,
            f.height,
        ))
    }

    /// Columns that no longer fit inside a segment's area. Containment is
    /// only checked when a column is created, so container edits can leave
    /// columns hanging outside.
    pub fn fields_outside(&self, segment: Segment) -> Vec<usize> {
        let Some(seg) = self.segment(segment) else {
            return Vec::new();
        };
        let bounds = Rect::new(0, 0, seg.area.width, seg.area.height);
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| !bounds.contains_rect(&f.rect()))
            .map(|(i, _)| i)
            .collect()
    }
}

impl LoopField {
    pub fn new(path: impl Into<String>, rect: Rect) -> Self {
        Self {
            path: path.into(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }

    /// Offset rectangle relative to the segment origin.
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }
}

// ============================================================================
// Validation helpers
// ============================================================================

pub(crate) fn validate_path(path: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        Err(ValidationError::EmptyPath)
    } else {
        Ok(())
    }
}

pub(crate) fn validate_size(rect: &Rect, min: i32) -> Result<(), ValidationError> {
    if rect.meets_minimum(min) && rect.is_positive() {
        Ok(())
    } else {
        Err(ValidationError::TooSmall {
            width: rect.width,
            height: rect.height,
            min,
        })
    }
}

pub(crate) fn validate_rows(rows: u32) -> Result<(), ValidationError> {
    if rows >= 1 {
        Ok(())
    } else {
        Err(ValidationError::InvalidRowCount(rows.to_string()))
    }
}

/// Parse a row count typed by the operator. Accepts positive integers only.
pub fn parse_row_count(input: &str) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    match trimmed.parse::<u32>() {
        Ok(rows) if rows >= 1 => Ok(rows),
        _ => Err(ValidationError::InvalidRowCount(trimmed.to_string())),
    }
}
