//! PDF report writer.
//!
//! The trend charts are rendered as SVG, rasterized to PNG, and embedded
//! above the statistics table on a single A4 page.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use printpdf::{BuiltinFont, Image, ImageTransform, Mm, PdfDocument};

use crate::aggregation::{calculate_report_stats, SeriesStats};
use crate::storage::StoredObservation;

use super::chart::render_trend_svg;


// A4 page
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

// Chart raster dimensions; at 150 dpi this is 152.4 x 118.5 mm
const CHART_WIDTH_PX: u32 = 900;
const CHART_HEIGHT_PX: u32 = 700;
const CHART_DPI: f32 = 150.0;


/// Write the report window to a single-page PDF.
pub fn write_pdf_report(
    rows: &[StoredObservation],
    hours: u32,
    output_path: &Path,
) -> Result<()> {
    if rows.is_empty() {
        anyhow::bail!("No rows to report");
    }

    let mut sorted: Vec<StoredObservation> = rows.to_vec();
    sorted.sort_by_key(|r| r.timestamp);

    let stats = calculate_report_stats(&sorted);
    let chart_png = rasterize_chart(&sorted)?;

    let (doc, page, layer_id) =
        PdfDocument::new("Weather Data Report", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Report");
    let layer = doc.get_page(page).get_layer(layer_id);

    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    // Title
    layer.use_text("Weather Data Report", 20.0, Mm(62.0), Mm(276.0), &bold);

    // Metadata block
    let first = &sorted[0];
    let last = &sorted[sorted.len() - 1];
    let metadata = [
        format!("Location: Lat {:.4}, Lon {:.4}", first.latitude, first.longitude),
        format!(
            "Date Range: {} to {}",
            first.timestamp.format("%Y-%m-%d %H:%M"),
            last.timestamp.format("%Y-%m-%d %H:%M")
        ),
        format!("Data Period: Last {hours} hours"),
        format!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
        format!("Total Records: {}", sorted.len()),
    ];
    let mut y = 264.0;
    for line in &metadata {
        layer.use_text(line.as_str(), 10.0, Mm(25.0), Mm(y), &font);
        y -= 6.0;
    }

    // Chart
    let chart_width_mm = CHART_WIDTH_PX as f32 / CHART_DPI * 25.4;
    let chart_height_mm = CHART_HEIGHT_PX as f32 / CHART_DPI * 25.4;
    let image = Image::from_dynamic_image(&chart_png);
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm((PAGE_WIDTH_MM - chart_width_mm) / 2.0)),
            translate_y: Some(Mm(228.0 - chart_height_mm)),
            dpi: Some(CHART_DPI),
            ..Default::default()
        },
    );

    // Statistics table
    layer.use_text("Statistical Summary", 12.0, Mm(25.0), Mm(100.0), &bold);
    layer.use_text("Metric", 10.0, Mm(35.0), Mm(92.0), &bold);
    layer.use_text("Temperature (°C)", 10.0, Mm(85.0), Mm(92.0), &bold);
    layer.use_text("Humidity (%)", 10.0, Mm(145.0), Mm(92.0), &bold);

    let table_rows = [
        ("Average", stat_cell(stats.temperature, |s| s.avg, 2), stat_cell(stats.humidity, |s| s.avg, 1)),
        ("Maximum", stat_cell(stats.temperature, |s| s.max, 2), stat_cell(stats.humidity, |s| s.max, 1)),
        ("Minimum", stat_cell(stats.temperature, |s| s.min, 2), stat_cell(stats.humidity, |s| s.min, 1)),
    ];
    let mut y = 84.0;
    for (metric, temperature, humidity) in &table_rows {
        layer.use_text(*metric, 10.0, Mm(35.0), Mm(y), &font);
        layer.use_text(temperature.as_str(), 10.0, Mm(85.0), Mm(y), &font);
        layer.use_text(humidity.as_str(), 10.0, Mm(145.0), Mm(y), &font);
        y -= 8.0;
    }

    // Footer
    layer.use_text(
        "Generated by weather-report | Data provided by Open-Meteo",
        8.0,
        Mm(60.0),
        Mm(12.0),
        &font,
    );

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    doc.save(&mut BufWriter::new(file))
        .with_context(|| format!("Failed to write PDF to {}", output_path.display()))?;

    Ok(())
}


/// Format one statistics cell, or a dash when the series had no values.
fn stat_cell(
    stats: Option<SeriesStats>,
    select: fn(&SeriesStats) -> f64,
    precision: usize,
) -> String {
    match stats {
        Some(s) => format!("{:.*}", precision, select(&s)),
        None => "-".to_string(),
    }
}


/// Render the trend charts and rasterize them to an embeddable image.
fn rasterize_chart(rows: &[StoredObservation]) -> Result<printpdf::image_crate::DynamicImage> {
    let svg = render_trend_svg(rows, CHART_WIDTH_PX, CHART_HEIGHT_PX)?;

    let tree = resvg::usvg::Tree::from_str(&svg, &resvg::usvg::Options::default())
        .context("Failed to parse chart SVG")?;

    let size = tree.size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width() as u32, size.height() as u32)
        .context("Failed to create pixmap")?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let png_bytes = pixmap.encode_png().context("Failed to encode chart PNG")?;
    let decoded = printpdf::image_crate::load_from_memory(&png_bytes)
        .context("Failed to decode chart PNG")?;

    // Drop the alpha channel; the page background is already white
    Ok(printpdf::image_crate::DynamicImage::ImageRgb8(decoded.to_rgb8()))
}
