//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
/// A trait for observing 256-bit masks produced by Tenebra, for development
/// visualization.
pub trait ShapePrinter {
    /// Return `false` if the printer discards everything, which allows callers
    /// to skip preparing the output.
    fn wants_shapes(&self) -> bool {
        true
    }

    fn print_shape(&mut self, bits: &[u64; 4]);
}

impl<T: ShapePrinter + ?Sized> ShapePrinter for &mut T {
    fn wants_shapes(&self) -> bool {
        (**self).wants_shapes()
    }

    fn print_shape(&mut self, bits: &[u64; 4]) {
        (**self).print_shape(bits)
    }
}

/// `ShapePrinter` implementation that does nothing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct NoPrint;

impl ShapePrinter for NoPrint {
    fn wants_shapes(&self) -> bool {
        false
    }

    fn print_shape(&mut self, _bits: &[u64; 4]) {}
}

/// `ShapePrinter` implementation that writes to the `log` facade at the
/// `debug` level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct LogPrinter;

impl ShapePrinter for LogPrinter {
    fn wants_shapes(&self) -> bool {
        log::log_enabled!(log::Level::Debug)
    }

    fn print_shape(&mut self, bits: &[u64; 4]) {
        log::debug!("shape:\n{}", format_shape(bits));
    }
}

/// `ShapePrinter` implementation that appends to a `String`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StringPrinter {
    pub output: String,
}

impl ShapePrinter for StringPrinter {
    fn print_shape(&mut self, bits: &[u64; 4]) {
        self.output.push_str(&format_shape(bits));
        self.output.push('\n');
    }
}

/// Render a 256-bit mask as 16 lines of 16 characters. `#` denotes a set
/// cell. The first line is the row `y = 0`.
pub fn format_shape(bits: &[u64; 4]) -> String {
    let mut out = String::with_capacity(17 * 16);
    for y in 0..16 {
        let word = bits[y >> 2];
        for x in 0..16 {
            let bit = (y & 3) << 4 | x;
            out.push(if word & (1u64 << bit) != 0 { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

/// Render an 8×8 tile word as 8 lines of 8 characters.
pub fn format_tile(word: u64) -> String {
    let mut out = String::with_capacity(9 * 8);
    for y in 0..8 {
        for x in 0..8 {
            out.push(if word & (1u64 << (y << 3 | x)) != 0 { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_shape_sanity() {
        let mut bits = [0u64; 4];
        // (0, 0), (15, 0), (1, 5)
        bits[0] |= 1 | 1 << 15;
        bits[1] |= 1 << (1 << 4 | 1);
        let text = format_shape(&bits);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], "#..............#");
        assert_eq!(lines[5], ".#..............");
        assert_eq!(lines[15], "................");
    }

    #[test]
    fn format_tile_sanity() {
        let text = format_tile(0xff | 1 << 63);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "########");
        assert_eq!(lines[7], ".......#");
    }

    #[test]
    fn string_printer_collects() {
        let mut printer = StringPrinter::default();
        printer.print_shape(&[!0; 4]);
        assert!(printer.wants_shapes());
        assert_eq!(printer.output.matches('#').count(), 256);
    }

    #[test]
    fn builtin_printers_through_references() {
        fn print_twice(mut printer: impl ShapePrinter) {
            if printer.wants_shapes() {
                printer.print_shape(&[0; 4]);
                printer.print_shape(&[1; 4]);
            }
        }

        print_twice(NoPrint);
        print_twice(LogPrinter);

        let mut printer = StringPrinter::default();
        print_twice(&mut printer);
        assert_eq!(printer.output.lines().count(), 34);
    }
}
