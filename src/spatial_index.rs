//! Spatial Index Module
//!
//! R-tree over the rectangles drawn on one page, used to pre-filter hit-test
//! candidates. The index only narrows the search; the z-order walk in
//! `hit_test` still decides which target wins.

use crate::geometry::{Point, Rect};
use crate::types::{Segment, Template};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashSet;

/// What a spatial entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKey {
    /// A text mapping or one segment of a loop container
    Mapping { mapping: usize, segment: Segment },
    /// A loop column positioned on row 0 of a segment
    LoopField {
        mapping: usize,
        field: usize,
        segment: Segment,
    },
}

/// A rectangle on the page with its key.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub key: EntryKey,
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl SpatialEntry {
    pub fn new(key: EntryKey, rect: &Rect) -> Self {
        Self {
            key,
            min_x: rect.x as f32,
            min_y: rect.y as f32,
            max_x: rect.right() as f32,
            max_y: rect.bottom() as f32,
        }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

/// Spatial index of every hit-testable rectangle on a single page.
pub struct SpatialIndex {
    page: u32,
    tree: RTree<SpatialEntry>,
}

impl SpatialIndex {
    /// Index every mapping segment and loop column drawn on `page`.
    pub fn for_page(template: &Template, page: u32) -> Self {
        let mut entries = Vec::new();
        for (index, mapping) in template.mappings().iter().enumerate() {
            for seg in mapping.segments().into_iter().filter(|s| s.page == page) {
                entries.push(SpatialEntry::new(
                    EntryKey::Mapping {
                        mapping: index,
                        segment: seg.segment,
                    },
                    &seg.area,
                ));
                if let Some(l) = mapping.as_loop() {
                    for (field, f) in l.fields.iter().enumerate() {
                        entries.push(SpatialEntry::new(
                            EntryKey::LoopField {
                                mapping: index,
                                field,
                                segment: seg.segment,
                            },
                            &f.rect().absolute_in(&seg.area),
                        ));
                    }
                }
            }
        }

        Self {
            page,
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Keys of all rectangles within `tolerance` of the point.
    pub fn query_point(&self, p: Point, tolerance: f32) -> HashSet<EntryKey> {
        let envelope = AABB::from_corners(
            [p.x - tolerance, p.y - tolerance],
            [p.x + tolerance, p.y + tolerance],
        );

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.key)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
