//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
//! Occluder geometry of a 16×16×16 chunk.
use crate::{
    area::{find_overlapping, AreaSample},
    debug::{NoPrint, ShapePrinter},
    project::LocalBox,
};

/// The chunk axis perpendicular to a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Map the cell `(u, v)` of the slice at `depth` to block coordinates.
    ///
    /// The slice axes follow the order `X, Y, Z` with `axis` removed.
    pub fn to_block(self, depth: u8, u: u8, v: u8) -> [u8; 3] {
        match self {
            Axis::X => [depth, u, v],
            Axis::Y => [u, depth, v],
            Axis::Z => [u, v, depth],
        }
    }
}

/// Build the sample of a slice from a block predicate.
///
/// `solid(p)` must return `true` iff the block at `p` fully occludes what is
/// behind it.
pub fn sample_slice(axis: Axis, depth: u8, mut solid: impl FnMut([u8; 3]) -> bool) -> AreaSample {
    debug_assert!(depth < 16);
    let mut sample = AreaSample::new();
    for v in 0..16u8 {
        for u in 0..16u8 {
            if solid(axis.to_block(depth, u, v)) {
                sample.fill_rect(u as u32, v as u32, u as u32, v as u32);
            }
        }
    }
    sample
}

/// Converts slices of solid blocks into block-thick occluder boxes.
#[derive(Debug)]
pub struct OccluderBuilder<P = NoPrint> {
    printer: P,
    boxes: Vec<LocalBox>,
}

impl Default for OccluderBuilder<NoPrint> {
    fn default() -> Self {
        Self::new()
    }
}

impl OccluderBuilder<NoPrint> {
    pub fn new() -> Self {
        Self::with_printer(NoPrint)
    }
}

impl<P: ShapePrinter> OccluderBuilder<P> {
    /// Construct an `OccluderBuilder` that reports every slice and every area
    /// it finds to `printer`.
    pub fn with_printer(printer: P) -> Self {
        Self {
            printer,
            boxes: Vec::new(),
        }
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    /// Decompose the slice at `depth` along `axis` into rectangles and emit
    /// one box for each of them.
    pub fn add_slice(&mut self, axis: Axis, depth: u8, sample: &AreaSample) {
        debug_assert!(depth < 16);

        let printer = &mut self.printer;
        let boxes = &mut self.boxes;
        let wants_shapes = printer.wants_shapes();

        if wants_shapes {
            sample.print(&mut *printer);
        }

        let axis_i = axis.index();
        let start = boxes.len();

        find_overlapping(sample, |area| {
            if wants_shapes {
                area.print_shape(&mut *printer);
            }

            let key = area.key();
            let mut min = axis.to_block(depth, key.x0() as u8, key.y0() as u8);
            let mut max = axis.to_block(depth, key.x1() as u8 + 1, key.y1() as u8 + 1);
            min[axis_i] = depth;
            max[axis_i] = depth + 1;
            boxes.push(LocalBox::new(min, max));
        });

        log::trace!(
            "slice {:?}@{}: {} cells, {} boxes",
            axis,
            depth,
            sample.count(),
            boxes.len() - start
        );
    }

    pub fn boxes(&self) -> &[LocalBox] {
        &self.boxes
    }

    /// Take the boxes emitted so far, leaving the builder empty.
    pub fn take_boxes(&mut self) -> Vec<LocalBox> {
        std::mem::replace(&mut self.boxes, Vec::new())
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::StringPrinter;

    #[test]
    fn solid_slice_is_one_box() {
        let mut builder = OccluderBuilder::new();
        let sample = sample_slice(Axis::Y, 3, |_| true);
        assert_eq!(sample.count(), 256);

        builder.add_slice(Axis::Y, 3, &sample);
        assert_eq!(
            builder.boxes(),
            &[LocalBox::new([0, 3, 0], [16, 4, 16])]
        );
    }

    #[test]
    fn slice_axes() {
        // A wall at x = 5 with a 4×2 window of solid blocks at y = 1..5, z = 6..8
        let solid = |p: [u8; 3]| p[0] == 5 && (1..5).contains(&p[1]) && (6..8).contains(&p[2]);
        let sample = sample_slice(Axis::X, 5, solid);
        assert_eq!(sample.count(), 8);

        let mut builder = OccluderBuilder::new();
        builder.add_slice(Axis::X, 5, &sample);
        assert_eq!(
            builder.take_boxes(),
            vec![LocalBox::new([5, 1, 6], [6, 5, 8])]
        );
        assert!(builder.boxes().is_empty());
    }

    #[test]
    fn empty_slice_emits_nothing() {
        let mut builder = OccluderBuilder::new();
        builder.add_slice(Axis::Z, 0, &AreaSample::new());
        assert!(builder.boxes().is_empty());
    }

    #[test]
    fn printer_receives_shapes() {
        let mut sample = AreaSample::new();
        sample.fill_rect(0, 0, 3, 3);
        sample.fill_rect(8, 8, 9, 15);

        let mut builder = OccluderBuilder::with_printer(StringPrinter::default());
        builder.add_slice(Axis::Z, 2, &sample);
        assert_eq!(builder.boxes().len(), 2);

        // The slice itself and then one shape per area
        let shapes = builder.printer().output.split("\n\n").filter(|s| !s.is_empty()).count();
        assert_eq!(shapes, 3);
    }
}
