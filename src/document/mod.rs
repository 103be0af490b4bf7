//! Printable ticket generation: a one-page PDF with the booking details and a
//! QR code carrying the same values in machine-readable form.
//!
//! The QR code is rasterised to `ticket_<id>.png` next to the output, embedded
//! into the page, and removed again before [`TicketPrinter::print`] returns.

mod artifact;
mod payload;

use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, Luma};
use printpdf::{BuiltinFont, Image, ImageTransform, Line, Mm, PdfDocument, Point};
use qrcode::{Color, QrCode};
use tracing::info;

use crate::error::DocumentError;
use crate::models::{format_date, Reservation, FARE_UNIT};

use artifact::ScopedArtifact;
pub use payload::{encode_payload, parse_payload, TicketPayload};

pub const TICKET_TITLE: &str = "Smart Ticketing System";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const TITLE_FONT_SIZE: f32 = 16.0;
const BODY_FONT_SIZE: f32 = 12.0;
/// Bordered body region as (left, top, width, height), measured from the top
/// left corner of the page.
const BORDER_MM: (f32, f32, f32, f32) = (10.0, 30.0, 190.0, 80.0);
const FIRST_FIELD_TOP_MM: f32 = 40.0;
const FIELD_SPACING_MM: f32 = 8.0;
/// QR code placement as (left, top, side), from the top left corner.
const BARCODE_MM: (f32, f32, f32) = (80.0, 120.0, 50.0);
/// Pixels per QR module in the intermediate PNG.
const MODULE_PX: u32 = 8;
/// Light border around the code, in modules, so scanners can find it.
const QUIET_ZONE: u32 = 4;

pub fn ticket_file_name(id: i64) -> String {
    format!("Ticket_{id}.pdf")
}

fn barcode_file_name(id: i64) -> String {
    format!("ticket_{id}.png")
}

/// `Label: value` lines printed inside the bordered region, in print order.
pub fn ticket_lines(reservation: &Reservation) -> Vec<String> {
    vec![
        format!("Ticket ID: {}", reservation.id),
        format!("Passenger Name: {}", reservation.passenger_name),
        format!("Age: {}", reservation.age),
        format!("Gender: {}", reservation.gender),
        format!("Source: {}", reservation.source),
        format!("Destination: {}", reservation.destination),
        format!("Journey Date: {}", format_date(reservation.journey_date)),
        format!("Return Date: {}", format_date(reservation.return_date)),
        format!("Fare: {} {FARE_UNIT}", reservation.fare_display()),
    ]
}

/// Writes ticket PDFs into one output directory.
#[derive(Debug, Clone)]
pub struct TicketPrinter {
    output_dir: PathBuf,
}

impl TicketPrinter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Render the ticket for `reservation` and write it to
    /// `<output_dir>/Ticket_<id>.pdf`, returning that path.
    pub fn print(&self, reservation: &Reservation) -> Result<PathBuf, DocumentError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| DocumentError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let barcode = self.write_barcode(reservation)?;
        let bytes = render(reservation, barcode.path())?;

        let path = self.output_dir.join(ticket_file_name(reservation.id));
        fs::write(&path, &bytes).map_err(|source| DocumentError::Io {
            path: path.clone(),
            source,
        })?;

        info!(id = reservation.id, path = %path.display(), "ticket PDF generated");
        Ok(path)
    }

    /// Rasterise the payload QR code to a PNG and hand back the guard that
    /// deletes it.
    fn write_barcode(&self, reservation: &Reservation) -> Result<ScopedArtifact, DocumentError> {
        let image = barcode_image(&encode_payload(reservation))?;
        let path = self.output_dir.join(barcode_file_name(reservation.id));
        let artifact = ScopedArtifact::claim(path);
        image.save_with_format(artifact.path(), ImageFormat::Png)?;
        Ok(artifact)
    }
}

/// Draw the QR code for `payload` as a black-on-white grayscale image.
pub fn barcode_image(payload: &str) -> Result<GrayImage, DocumentError> {
    let code = QrCode::new(payload.as_bytes())?;
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let side = (modules + 2 * QUIET_ZONE) * MODULE_PX;

    Ok(GrayImage::from_fn(side, side, |x, y| {
        let mx = (x / MODULE_PX) as i64 - QUIET_ZONE as i64;
        let my = (y / MODULE_PX) as i64 - QUIET_ZONE as i64;
        let inside = (0..modules as i64).contains(&mx) && (0..modules as i64).contains(&my);
        let dark = inside && colors[(my as usize) * modules as usize + mx as usize] == Color::Dark;
        if dark {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    }))
}

/// Assemble the PDF bytes for `reservation`, embedding the PNG at
/// `barcode_path`.
pub fn render(reservation: &Reservation, barcode_path: &Path) -> Result<Vec<u8>, DocumentError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Ticket {}", reservation.id),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Ticket",
    );
    let layer = doc.get_page(page).get_layer(layer);
    let title_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;
    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;

    let title_x = (PAGE_WIDTH_MM - approx_text_width_mm(TICKET_TITLE, TITLE_FONT_SIZE)) / 2.0;
    layer.use_text(TICKET_TITLE, TITLE_FONT_SIZE, Mm(title_x), from_top(18.0), &title_font);

    let (left, top, width, height) = BORDER_MM;
    layer.set_outline_thickness(0.5);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(left), from_top(top)), false),
            (Point::new(Mm(left + width), from_top(top)), false),
            (Point::new(Mm(left + width), from_top(top + height)), false),
            (Point::new(Mm(left), from_top(top + height)), false),
        ],
        is_closed: true,
    });

    for (index, line) in ticket_lines(reservation).into_iter().enumerate() {
        let y = FIRST_FIELD_TOP_MM + index as f32 * FIELD_SPACING_MM;
        layer.use_text(line, BODY_FONT_SIZE, Mm(left + 5.0), from_top(y), &body_font);
    }

    let barcode = image::open(barcode_path)?;
    let (bx, by, side) = BARCODE_MM;
    let dpi = barcode.width() as f32 * 25.4 / side;
    Image::from_dynamic_image(&barcode).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(bx)),
            translate_y: Some(from_top(by + side)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );

    doc.save_to_bytes().map_err(pdf_error)
}

/// PDF coordinates grow upwards; the layout constants are measured downwards.
fn from_top(mm: f32) -> Mm {
    Mm(PAGE_HEIGHT_MM - mm)
}

/// Rough Helvetica width, good enough to centre a short title.
fn approx_text_width_mm(text: &str, font_size: f32) -> f32 {
    let points = text.chars().count() as f32 * font_size * 0.55;
    points * 25.4 / 72.0
}

fn pdf_error(err: printpdf::Error) -> DocumentError {
    DocumentError::Pdf(format!("{err:?}"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::Gender;

    fn reservation() -> Reservation {
        Reservation {
            id: 7,
            passenger_name: "Meera Iyer".into(),
            age: 41,
            gender: Gender::Female,
            source: "Bengaluru".into(),
            destination: "Udupi".into(),
            journey_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            fare: 850.5,
        }
    }

    #[test]
    fn field_lines_follow_fixed_order() {
        assert_eq!(
            ticket_lines(&reservation()),
            vec![
                "Ticket ID: 7",
                "Passenger Name: Meera Iyer",
                "Age: 41",
                "Gender: Female",
                "Source: Bengaluru",
                "Destination: Udupi",
                "Journey Date: 2025-03-10",
                "Return Date: 2025-03-14",
                "Fare: 850.50 INR",
            ]
        );
    }

    #[test]
    fn file_names_derive_from_the_id() {
        assert_eq!(ticket_file_name(12), "Ticket_12.pdf");
        assert_eq!(barcode_file_name(12), "ticket_12.png");
    }

    #[test]
    fn barcode_image_is_square_with_quiet_zone() {
        let image = barcode_image(&encode_payload(&reservation())).unwrap();
        assert_eq!(image.width(), image.height());
        assert_eq!(image.width() % MODULE_PX, 0);
        assert_eq!(image.get_pixel(0, 0), &Luma([255u8]));
        // Top-left finder pattern starts right after the quiet zone.
        let corner = QUIET_ZONE * MODULE_PX;
        assert_eq!(image.get_pixel(corner, corner), &Luma([0u8]));
    }
}
