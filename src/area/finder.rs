//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
//! Decomposition of a sample into rectangles.
use lazy_static::lazy_static;

use super::{Area, AreaKey, AreaSample, AREA_COUNT};

struct AreaTable {
    /// Sorted by size (descending), then by key (ascending).
    areas: Vec<Area>,
    /// Maps a raw key to an index into `areas`.
    index_by_key: Vec<u16>,
}

lazy_static! {
    static ref AREA_TABLE: AreaTable = AreaTable::new();
}

impl AreaTable {
    fn new() -> Self {
        let mut keys: Vec<AreaKey> = AreaKey::all().collect();
        keys.sort_by(|a, b| b.size().cmp(&a.size()).then(a.cmp(b)));
        debug_assert_eq!(keys.len(), AREA_COUNT);

        let mut index_by_key = vec![!0u16; 1 << 16];
        let areas = keys
            .into_iter()
            .enumerate()
            .map(|(i, key)| {
                index_by_key[key.raw() as usize] = i as u16;
                Area::new(key, i)
            })
            .collect();

        log::trace!("built the area table ({} entries)", AREA_COUNT);

        Self {
            areas,
            index_by_key,
        }
    }
}

/// Get the table of every valid area, larger ones first.
///
/// The table is built on first use and never modified afterward.
pub fn area_table() -> &'static [Area] {
    &AREA_TABLE.areas[..]
}

impl Area {
    /// Get the table entry for `key`.
    pub fn of(key: AreaKey) -> Area {
        let table = &*AREA_TABLE;
        table.areas[table.index_by_key[key.raw() as usize] as usize]
    }

    /// Get the table entry at `index`.
    pub fn by_index(index: usize) -> Option<Area> {
        area_table().get(index).copied()
    }
}

/// Decompose `sample` into non-overlapping areas whose union is `sample`.
///
/// The largest area fitting in the remaining cells is picked each time.
pub fn find_disjoint(sample: &AreaSample, mut sink: impl FnMut(Area)) {
    let mut remaining = *sample;
    let mut count = remaining.count();

    for area in area_table() {
        if count == 0 {
            break;
        }
        if area.size() > count {
            continue;
        }
        if remaining.includes(area) {
            sink(*area);
            remaining.remove(area);
            count -= area.size();
        }
    }

    debug_assert!(remaining.is_empty());
}

/// Decompose `sample` into possibly overlapping areas whose union is
/// `sample`.
///
/// An area is emitted if it is contained by `sample` and covers at least one
/// cell not covered by the areas emitted so far. This usually produces fewer
/// and larger areas than [`find_disjoint`].
pub fn find_overlapping(sample: &AreaSample, mut sink: impl FnMut(Area)) {
    if sample.is_empty() {
        return;
    }

    let mut covered = AreaSample::new();

    for area in area_table() {
        if sample.includes(area) && area.is_additive(covered.bits(), 0) {
            sink(*area);
            covered.fill(area);
            if covered == *sample {
                break;
            }
        }
    }

    debug_assert_eq!(covered, *sample);
}
