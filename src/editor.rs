//! Mapping editor facade - every mutation of the template goes through here.
//!
//! Operations validate first and mutate second, so a rejected call leaves
//! the template exactly as it was. Nothing here performs I/O.

use crate::constants::MIN_MAPPING_SIZE;
use crate::error::{ValidationError, ValidationResult};
use crate::geometry::Rect;
use crate::hit_test::HitTarget;
use crate::types::{
    FieldMapping, LoopField, LoopMapping, LoopPage, Segment, Template, validate_path,
    validate_rows, validate_size,
};
use tracing::{debug, warn};

/// Geometry a gesture can move or resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditTarget {
    /// Text mapping area or one loop segment area (absolute)
    Area { mapping: usize, segment: Segment },
    /// Loop column offset (relative to its segment)
    LoopField { mapping: usize, field: usize },
}

impl EditTarget {
    pub fn from_hit(hit: &HitTarget) -> Option<Self> {
        match *hit {
            HitTarget::None => None,
            HitTarget::Mapping {
                mapping, segment, ..
            } => Some(Self::Area { mapping, segment }),
            HitTarget::LoopField { mapping, field, .. } => {
                Some(Self::LoopField { mapping, field })
            }
        }
    }

    pub fn mapping(&self) -> usize {
        match *self {
            Self::Area { mapping, .. } | Self::LoopField { mapping, .. } => mapping,
        }
    }
}

/// A structural edit that moved mapping indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexShift {
    Removed(usize),
    MovedToFront { from: usize, to: usize },
}

impl IndexShift {
    /// Where a mapping previously at `index` is now; `None` if it was removed.
    pub fn apply(self, index: usize) -> Option<usize> {
        match self {
            Self::Removed(removed) if index == removed => None,
            Self::Removed(removed) if index > removed => Some(index - 1),
            Self::MovedToFront { from, to } if index == from => Some(to),
            Self::MovedToFront { from, .. } if index > from => Some(index - 1),
            Self::Removed(_) | Self::MovedToFront { .. } => Some(index),
        }
    }
}

/// Owns the template for an editing session.
#[derive(Debug, Clone)]
pub struct MappingEditor {
    template: Template,
    min_size: i32,
    /// Index moves since the last `take_shifts`
    shifts: Vec<IndexShift>,
}

impl MappingEditor {
    pub fn new(template: Template) -> Self {
        Self::with_min_size(template, MIN_MAPPING_SIZE)
    }

    pub fn with_min_size(template: Template, min_size: i32) -> Self {
        Self {
            template,
            min_size: min_size.max(1),
            shifts: Vec::new(),
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn min_size(&self) -> i32 {
        self.min_size
    }

    /// Swap in a freshly loaded template wholesale.
    pub fn replace_template(&mut self, template: Template) -> Template {
        self.shifts.clear();
        std::mem::replace(&mut self.template, template)
    }

    /// Drain the index moves recorded by removals and reorders, oldest first.
    pub(crate) fn take_shifts(&mut self) -> Vec<IndexShift> {
        std::mem::take(&mut self.shifts)
    }

    // ========================================================================
    // Creation
    // ========================================================================

    pub fn add_text_field(&mut self, page: u32, rect: Rect, path: &str) -> ValidationResult<usize> {
        validate_path(path).and_then(|()| validate_size(&rect, self.min_size)).inspect_err(
            |e| warn!(page, ?rect, error = %e, "Rejected text mapping"),
        )?;

        let index = self
            .template
            .push_mapping(FieldMapping::text(page, rect, path.trim()));
        debug!(index, page, ?rect, path, "Added text mapping");
        Ok(index)
    }

    pub fn add_loop(
        &mut self,
        page: u32,
        rect: Rect,
        path: &str,
        rows: u32,
    ) -> ValidationResult<usize> {
        validate_path(path)
            .and_then(|()| validate_size(&rect, self.min_size))
            .and_then(|()| validate_rows(rows))
            .inspect_err(|e| warn!(page, ?rect, rows, error = %e, "Rejected loop"))?;

        let index = self
            .template
            .push_mapping(FieldMapping::looped(page, rect, path.trim(), rows));
        debug!(index, page, ?rect, rows, path, "Added loop");
        Ok(index)
    }

    /// Add a column to a loop. `relative` is expressed against the origin of
    /// `segment`'s area and must fit inside it.
    pub fn add_loop_field(
        &mut self,
        loop_index: usize,
        segment: Segment,
        relative: Rect,
        path: &str,
    ) -> ValidationResult<usize> {
        let min_size = self.min_size;
        let result = (|| {
            validate_path(path)?;
            validate_size(&relative, min_size)?;
            let l = loop_ref(&self.template, loop_index)?;
            let seg = l.segment(segment).ok_or(no_segment(loop_index, segment))?;
            let bounds = Rect::new(0, 0, seg.area.width, seg.area.height);
            if !bounds.contains_rect(&relative) {
                return Err(ValidationError::OutsideLoopArea);
            }
            Ok(())
        })();
        result.inspect_err(|e| warn!(loop_index, ?relative, error = %e, "Rejected loop field"))?;

        let l = loop_mut(&mut self.template, loop_index)?;
        l.fields.push(LoopField::new(path.trim(), relative));
        let field = l.fields.len() - 1;
        debug!(loop_index, field, ?relative, path, "Added loop field");
        Ok(field)
    }

    /// Continue a loop on a page it does not cover yet. Returns the
    /// continuation index.
    pub fn add_loop_page(
        &mut self,
        loop_index: usize,
        page: u32,
        rect: Rect,
        rows: u32,
    ) -> ValidationResult<usize> {
        validate_size(&rect, self.min_size)
            .and_then(|()| validate_rows(rows))
            .and_then(|()| loop_ref(&self.template, loop_index))
            .and_then(|l| match l.segment_on_page(page) {
                Some(_) => Err(ValidationError::PageAlreadyCovered {
                    mapping: loop_index,
                    page,
                }),
                None => Ok(()),
            })
            .inspect_err(|e| warn!(loop_index, page, rows, error = %e, "Rejected loop page"))?;

        let l = loop_mut(&mut self.template, loop_index)?;
        l.continuations.push(LoopPage {
            page,
            area: rect,
            rows,
        });
        let continuation = l.continuations.len() - 1;
        debug!(loop_index, continuation, page, ?rect, rows, "Added loop page");
        Ok(continuation)
    }

    // ========================================================================
    // Updates
    // ========================================================================

    pub fn update_rows(
        &mut self,
        loop_index: usize,
        segment: Segment,
        rows: u32,
    ) -> ValidationResult<()> {
        validate_rows(rows)?;
        let l = loop_mut(&mut self.template, loop_index)?;
        match segment {
            Segment::Primary => l.rows = rows,
            Segment::Continuation(i) => {
                l.continuations
                    .get_mut(i)
                    .ok_or(ValidationError::NoSuchContinuation {
                        mapping: loop_index,
                        continuation: i,
                    })?
                    .rows = rows;
            }
        }
        debug!(loop_index, ?segment, rows, "Updated row count");
        Ok(())
    }

    pub fn update_path(&mut self, index: usize, path: &str) -> ValidationResult<()> {
        validate_path(path)?;
        self.template
            .mapping_mut(index)
            .ok_or(ValidationError::NoSuchMapping(index))?
            .set_path(path.trim().to_string());
        Ok(())
    }

    pub fn update_loop_field_path(
        &mut self,
        loop_index: usize,
        field: usize,
        path: &str,
    ) -> ValidationResult<()> {
        validate_path(path)?;
        let l = loop_mut(&mut self.template, loop_index)?;
        l.fields
            .get_mut(field)
            .ok_or(ValidationError::NoSuchLoopField {
                mapping: loop_index,
                field,
            })?
            .path = path.trim().to_string();
        Ok(())
    }

    pub fn bring_to_front(&mut self, index: usize) -> ValidationResult<usize> {
        let to = self
            .template
            .bring_to_front(index)
            .ok_or(ValidationError::NoSuchMapping(index))?;
        self.shifts.push(IndexShift::MovedToFront { from: index, to });
        Ok(to)
    }

    // ========================================================================
    // Removal
    // ========================================================================

    pub fn remove_field(&mut self, index: usize) -> ValidationResult<FieldMapping> {
        let removed = self
            .template
            .remove_mapping(index)
            .ok_or(ValidationError::NoSuchMapping(index))?;
        self.shifts.push(IndexShift::Removed(index));
        debug!(index, kind = removed.kind_name(), "Removed mapping");
        Ok(removed)
    }

    pub fn remove_loop_field(
        &mut self,
        loop_index: usize,
        field: usize,
    ) -> ValidationResult<LoopField> {
        let l = loop_mut(&mut self.template, loop_index)?;
        if field >= l.fields.len() {
            return Err(ValidationError::NoSuchLoopField {
                mapping: loop_index,
                field,
            });
        }
        debug!(loop_index, field, "Removed loop field");
        Ok(l.fields.remove(field))
    }

    pub fn remove_loop_page(
        &mut self,
        loop_index: usize,
        continuation: usize,
    ) -> ValidationResult<LoopPage> {
        let l = loop_mut(&mut self.template, loop_index)?;
        if continuation >= l.continuations.len() {
            return Err(ValidationError::NoSuchContinuation {
                mapping: loop_index,
                continuation,
            });
        }
        debug!(loop_index, continuation, "Removed loop page");
        Ok(l.continuations.remove(continuation))
    }

    // ========================================================================
    // Gesture support
    // ========================================================================

    /// Current rectangle of a target. Loop columns are relative.
    pub fn rect_of(&self, target: EditTarget) -> Option<Rect> {
        match target {
            EditTarget::Area { mapping, segment } => {
                self.template.mapping(mapping)?.segment_area(segment)
            }
            EditTarget::LoopField { mapping, field } => self
                .template
                .mapping(mapping)?
                .as_loop()?
                .fields
                .get(field)
                .map(LoopField::rect),
        }
    }

    /// Overwrite a target's rectangle. Geometry must stay positive.
    pub fn set_rect(&mut self, target: EditTarget, rect: Rect) -> ValidationResult<()> {
        if !rect.is_positive() {
            return Err(ValidationError::TooSmall {
                width: rect.width,
                height: rect.height,
                min: 1,
            });
        }
        match target {
            EditTarget::Area { mapping, segment } => {
                let m = self
                    .template
                    .mapping_mut(mapping)
                    .ok_or(ValidationError::NoSuchMapping(mapping))?;
                *m.segment_area_mut(segment)
                    .ok_or(no_segment(mapping, segment))? = rect;
            }
            EditTarget::LoopField { mapping, field } => {
                loop_mut(&mut self.template, mapping)?
                    .fields
                    .get_mut(field)
                    .ok_or(ValidationError::NoSuchLoopField { mapping, field })?
                    .set_rect(rect);
            }
        }
        Ok(())
    }

    /// Move a target by whole document units, keeping its origin at `>= 0`.
    pub fn translate(&mut self, target: EditTarget, dx: i32, dy: i32) -> ValidationResult<Rect> {
        let rect = self
            .rect_of(target)
            .ok_or(ValidationError::NoSuchMapping(target.mapping()))?;
        let moved = Rect::new(
            (rect.x + dx).max(0),
            (rect.y + dy).max(0),
            rect.width,
            rect.height,
        );
        self.set_rect(target, moved)?;
        Ok(moved)
    }

    /// Copy of a mapping, taken before a gesture so it can be reverted.
    pub fn snapshot(&self, index: usize) -> Option<FieldMapping> {
        self.template.mapping(index).cloned()
    }

    /// Put back a snapshot taken with [`MappingEditor::snapshot`].
    pub fn restore(&mut self, index: usize, mapping: FieldMapping) -> ValidationResult<()> {
        let slot = self
            .template
            .mapping_mut(index)
            .ok_or(ValidationError::NoSuchMapping(index))?;
        *slot = mapping;
        Ok(())
    }
}

fn no_segment(mapping: usize, segment: Segment) -> ValidationError {
    match segment {
        Segment::Primary => ValidationError::NoSuchMapping(mapping),
        Segment::Continuation(continuation) => ValidationError::NoSuchContinuation {
            mapping,
            continuation,
        },
    }
}

fn loop_ref(template: &Template, index: usize) -> ValidationResult<&LoopMapping> {
    template
        .mapping(index)
        .ok_or(ValidationError::NoSuchMapping(index))?
        .as_loop()
        .ok_or(ValidationError::NotALoop(index))
}

fn loop_mut(template: &mut Template, index: usize) -> ValidationResult<&mut LoopMapping> {
    template
        .mapping_mut(index)
        .ok_or(ValidationError::NoSuchMapping(index))?
        .as_loop_mut()
        .ok_or(ValidationError::NotALoop(index))
}
