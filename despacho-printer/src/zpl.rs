//! ZPL command builder
//!
//! Provides a fluent API for building ZPL II label formats.

use crate::escape::{escape_field, needs_escape};

/// Horizontal justification inside a field block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

impl Justify {
    fn code(self) -> char {
        match self {
            Justify::Left => 'L',
            Justify::Center => 'C',
            Justify::Right => 'R',
        }
    }
}

/// ZPL label builder
///
/// Coordinates are in printer dots (203 dpi: 8 dots per mm).
/// All text is sent as UTF-8 (`^CI28`).
pub struct ZplBuilder {
    buf: String,
}

impl ZplBuilder {
    /// Create a new label format with the given print width and label length in dots
    ///
    /// Common sizes at 203 dpi:
    /// - 100 x 150 mm: 800 x 1200
    /// - 100 x 100 mm: 800 x 800
    pub fn new(width: u32, length: u32) -> Self {
        let mut buf = String::with_capacity(1024);
        buf.push_str("^XA\n^CI28\n");
        buf.push_str(&format!("^PW{}\n^LL{}\n^LH0,0\n", width, length));
        Self { buf }
    }

    // === Text ===

    /// Single line of text with the scalable font at (x, y)
    pub fn text(&mut self, x: u32, y: u32, height: u32, s: &str) -> &mut Self {
        self.origin(x, y);
        self.buf.push_str(&format!("^A0N,{},{}", height, height));
        self.field_data(s)
    }

    /// Text inside a field block: wraps up to `lines` lines within `block_width`
    #[allow(clippy::too_many_arguments)]
    pub fn text_block(
        &mut self,
        x: u32,
        y: u32,
        height: u32,
        block_width: u32,
        lines: u32,
        justify: Justify,
        s: &str,
    ) -> &mut Self {
        self.origin(x, y);
        self.buf.push_str(&format!(
            "^A0N,{},{}^FB{},{},0,{},0",
            height,
            height,
            block_width,
            lines.max(1),
            justify.code()
        ));
        self.field_data(s)
    }

    // === Barcodes ===

    /// Code 128 barcode with the interpretation line printed below
    ///
    /// `module` is the narrow bar width in dots (1-10).
    pub fn code128(&mut self, x: u32, y: u32, height: u32, module: u8, data: &str) -> &mut Self {
        let module = module.clamp(1, 10);
        self.buf.push_str(&format!("^BY{},3,{}\n", module, height));
        self.origin(x, y);
        self.buf.push_str(&format!("^BCN,{},Y,N,N", height));
        self.field_data(data)
    }

    // === Graphics ===

    /// Horizontal rule (`^GB` box as tall as its border)
    pub fn hline(&mut self, x: u32, y: u32, width: u32, thickness: u32) -> &mut Self {
        self.origin(x, y);
        self.buf
            .push_str(&format!("^GB{},{},{}^FS\n", width, thickness, thickness));
        self
    }

    /// Rectangle outline
    pub fn frame(&mut self, x: u32, y: u32, width: u32, height: u32, thickness: u32) -> &mut Self {
        self.origin(x, y);
        self.buf
            .push_str(&format!("^GB{},{},{}^FS\n", width, height, thickness));
        self
    }

    // === Build ===

    /// Close the format (`^XZ`) and return the ZPL text
    pub fn build(mut self) -> String {
        self.buf.push_str("^XZ\n");
        self.buf
    }

    fn origin(&mut self, x: u32, y: u32) {
        self.buf.push_str(&format!("^FO{},{}", x, y));
    }

    fn field_data(&mut self, s: &str) -> &mut Self {
        if needs_escape(s) {
            self.buf.push_str("^FH");
        }
        self.buf.push_str("^FD");
        self.buf.push_str(&escape_field(s));
        self.buf.push_str("^FS\n");
        self
    }
}

impl Default for ZplBuilder {
    fn default() -> Self {
        Self::new(800, 1200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_frame() {
        let zpl = ZplBuilder::new(800, 1200).build();
        assert!(zpl.starts_with("^XA\n^CI28\n^PW800\n^LL1200\n"));
        assert!(zpl.ends_with("^XZ\n"));
    }

    #[test]
    fn test_text_field() {
        let mut b = ZplBuilder::new(800, 600);
        b.text(40, 60, 30, "Ñuñoa");
        let zpl = b.build();
        assert!(zpl.contains("^FO40,60^A0N,30,30^FDÑuñoa^FS"));
    }

    #[test]
    fn test_text_block_justify() {
        let mut b = ZplBuilder::default();
        b.text_block(0, 10, 40, 800, 2, Justify::Center, "TITULO");
        let zpl = b.build();
        assert!(zpl.contains("^FB800,2,0,C,0^FDTITULO^FS"));
    }

    #[test]
    fn test_field_with_caret_uses_hex() {
        let mut b = ZplBuilder::default();
        b.text(0, 0, 20, "A^XZ");
        let zpl = b.build();
        assert!(zpl.contains("^FH^FDA_5EXZ^FS"));
        // Only the closing format terminator remains
        assert_eq!(zpl.matches("^XZ").count(), 1);
    }

    #[test]
    fn test_code128() {
        let mut b = ZplBuilder::default();
        b.code128(50, 700, 150, 3, "000123456");
        let zpl = b.build();
        assert!(zpl.contains("^BY3,3,150"));
        assert!(zpl.contains("^FO50,700^BCN,150,Y,N,N^FD000123456^FS"));
    }
}
