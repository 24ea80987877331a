//! Shipping label renderer
//!
//! Renders one shipment [`Record`] into a ZPL label for a 100 x 150 mm
//! thermal label (203 dpi).

use despacho_printer::{Justify, ZplBuilder};
use shared::{MissingField, Record};
use thiserror::Error;

/// Keys every shipment record must carry to be labelled
pub const REQUIRED_FIELDS: [&str; 7] = [
    "razsoc",
    "dir",
    "comuna",
    "ciudad",
    "guia",
    "bultos",
    "transporte",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("Missing field: {0}")]
    MissingField(String),
}

impl From<MissingField> for LabelError {
    fn from(e: MissingField) -> Self {
        LabelError::MissingField(e.0)
    }
}

pub type LabelResult<T> = Result<T, LabelError>;

/// Field values of one label, borrowed from the record
struct LabelFields<'a> {
    razsoc: &'a str,
    dir: &'a str,
    comuna: &'a str,
    ciudad: &'a str,
    guia: &'a str,
    bultos: &'a str,
    transporte: &'a str,
}

impl<'a> LabelFields<'a> {
    fn from_record(record: &'a Record) -> LabelResult<Self> {
        Ok(Self {
            razsoc: record.require("razsoc")?,
            dir: record.require("dir")?,
            comuna: record.require("comuna")?,
            ciudad: record.require("ciudad")?,
            guia: record.require("guia")?,
            bultos: record.require("bultos")?,
            transporte: record.require("transporte")?,
        })
    }
}

/// Shipping label renderer
pub struct ShippingLabelRenderer {
    width: u32,
    length: u32,
}

impl ShippingLabelRenderer {
    const MARGIN: u32 = 30;

    /// Create a renderer for a label of `width` x `length` dots
    pub fn new(width: u32, length: u32) -> Self {
        Self { width, length }
    }

    /// Render a record to ZPL
    ///
    /// Fails on the first required key the record lacks.
    pub fn render(&self, record: &Record) -> LabelResult<String> {
        let fields = LabelFields::from_record(record)?;
        let mut b = ZplBuilder::new(self.width, self.length);

        self.render_frame(&mut b);
        self.render_recipient(&mut b, &fields);
        self.render_destination(&mut b, &fields);
        self.render_shipment(&mut b, &fields);
        self.render_barcode(&mut b, &fields);

        Ok(b.build())
    }

    fn inner_width(&self) -> u32 {
        self.width.saturating_sub(2 * Self::MARGIN)
    }

    fn render_frame(&self, b: &mut ZplBuilder) {
        b.frame(
            Self::MARGIN / 2,
            Self::MARGIN / 2,
            self.width.saturating_sub(Self::MARGIN),
            self.length.saturating_sub(Self::MARGIN),
            4,
        );
    }

    /// Recipient name and street address
    fn render_recipient(&self, b: &mut ZplBuilder, f: &LabelFields<'_>) {
        let w = self.inner_width();
        b.text(Self::MARGIN, 50, 30, "DESTINATARIO");
        b.text_block(Self::MARGIN, 95, 60, w, 2, Justify::Left, f.razsoc);
        b.text_block(Self::MARGIN, 235, 40, w, 3, Justify::Left, f.dir);
        b.hline(Self::MARGIN, 380, w, 3);
    }

    /// Comuna and city in large type
    fn render_destination(&self, b: &mut ZplBuilder, f: &LabelFields<'_>) {
        let w = self.inner_width();
        b.text(Self::MARGIN, 400, 30, "COMUNA");
        b.text_block(Self::MARGIN, 440, 80, w, 1, Justify::Left, f.comuna);
        b.text(Self::MARGIN, 540, 30, "CIUDAD");
        b.text_block(Self::MARGIN, 580, 60, w, 1, Justify::Left, f.ciudad);
        b.hline(Self::MARGIN, 665, w, 3);
    }

    /// Package count and carrier side by side
    fn render_shipment(&self, b: &mut ZplBuilder, f: &LabelFields<'_>) {
        let half = self.inner_width() / 2;
        let right = Self::MARGIN + half;
        b.text(Self::MARGIN, 685, 30, "BULTOS");
        b.text_block(Self::MARGIN, 725, 90, half, 1, Justify::Left, f.bultos);
        b.text(right, 685, 30, "TRANSPORTE");
        b.text_block(right, 725, 50, half, 2, Justify::Left, f.transporte);
        b.hline(Self::MARGIN, 850, self.inner_width(), 3);
    }

    fn render_barcode(&self, b: &mut ZplBuilder, f: &LabelFields<'_>) {
        b.text(Self::MARGIN, 870, 30, "GUIA");
        b.code128(Self::MARGIN + 20, 920, 180, 3, f.guia);
    }
}

impl Default for ShippingLabelRenderer {
    /// 100 x 150 mm at 203 dpi
    fn default() -> Self {
        Self::new(800, 1200)
    }
}

/// Render a record with the default label size
pub fn generate(record: &Record) -> LabelResult<String> {
    ShippingLabelRenderer::default().render(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        [
            ("razsoc", "Ferretería Los Andes SpA"),
            ("dir", "Av. Providencia 1234, of. 5"),
            ("comuna", "Providencia"),
            ("ciudad", "Santiago"),
            ("guia", "000123456"),
            ("bultos", "3"),
            ("transporte", "Urbano Express"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_generate_contains_every_field() {
        let zpl = generate(&sample()).unwrap();

        assert!(zpl.starts_with("^XA\n^CI28\n"));
        assert!(zpl.ends_with("^XZ\n"));
        for value in [
            "Ferretería Los Andes SpA",
            "Av. Providencia 1234, of. 5",
            "Providencia",
            "Santiago",
            "3",
            "Urbano Express",
        ] {
            assert!(zpl.contains(&format!("^FD{}^FS", value)), "missing {}", value);
        }
        assert!(zpl.contains("^BCN,180,Y,N,N^FD000123456^FS"));
    }

    #[test]
    fn test_each_missing_key_is_reported() {
        for key in REQUIRED_FIELDS {
            let record: Record = sample()
                .iter()
                .filter(|(k, _)| *k != key)
                .collect();
            assert_eq!(
                generate(&record),
                Err(LabelError::MissingField(key.to_string()))
            );
        }
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let mut record = sample();
        record.insert("razsoc", "ACME ^XZ~JA");

        let zpl = generate(&record).unwrap();
        assert!(zpl.contains("^FH^FDACME _5EXZ_7EJA^FS"));
        assert_eq!(zpl.matches("^XZ").count(), 1);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let mut record = sample();
        record.insert("observacion", "frágil");
        assert!(!generate(&record).unwrap().contains("frágil"));
    }
}
