use std::fmt;
use std::path::Path;

use chrono::NaiveDateTime;
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::coord::types::{RangedCoordf64, RangedDateTime};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::core::time_axis::{MAJOR_LABEL_FORMAT, MINOR_LABEL_FORMAT};
use crate::error::{RenderError, RenderResult};
use crate::render::scene::{ChartScene, SeriesShape};
use crate::render::style::{self, ChartStyle, Rgb};

/// Output encoding, chosen from the target path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
}

impl ImageFormat {
    /// Infers the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> RenderResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("jpg" | "jpeg") => Ok(Self::Jpeg),
            Some("bmp") => Ok(Self::Bmp),
            Some("svg") => Ok(Self::Svg),
            _ => Err(RenderError::UnsupportedImageFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Bmp => "bmp",
            Self::Svg => "svg",
        };
        f.write_str(name)
    }
}

/// Renders a scene into encoded image bytes.
///
/// Drawing happens against an in-memory surface and only then gets encoded,
/// so callers can decide what to do with the bytes (write a file, hand them
/// to a bot API) without ever exposing a half-written image.
pub fn render_chart_bytes(
    scene: &ChartScene,
    style: &ChartStyle,
    format: ImageFormat,
) -> RenderResult<Vec<u8>> {
    debug!(%format, width = style.width, height = style.height, "rendering chart");
    match format {
        ImageFormat::Svg => {
            let mut document = String::new();
            {
                let root = SVGBackend::with_string(&mut document, (style.width, style.height))
                    .into_drawing_area();
                draw_chart(&root, scene, style)?;
            }
            Ok(document.into_bytes())
        }
        ImageFormat::Png => {
            let raw = rasterize(scene, style)?;
            let mut encoded = Vec::new();
            PngEncoder::new(&mut encoded)
                .write_image(&raw, style.width, style.height, ExtendedColorType::Rgb8)
                .map_err(|err| encode_error(format, &err))?;
            Ok(encoded)
        }
        ImageFormat::Jpeg => {
            let raw = rasterize(scene, style)?;
            let mut encoded = Vec::new();
            JpegEncoder::new_with_quality(&mut encoded, 95)
                .write_image(&raw, style.width, style.height, ExtendedColorType::Rgb8)
                .map_err(|err| encode_error(format, &err))?;
            Ok(encoded)
        }
        ImageFormat::Bmp => {
            let raw = rasterize(scene, style)?;
            let mut encoded = Vec::new();
            BmpEncoder::new(&mut encoded)
                .write_image(&raw, style.width, style.height, ExtendedColorType::Rgb8)
                .map_err(|err| encode_error(format, &err))?;
            Ok(encoded)
        }
    }
}

/// Draws the scene into a tightly packed RGB8 pixel buffer.
fn rasterize(scene: &ChartScene, style: &ChartStyle) -> RenderResult<Vec<u8>> {
    let mut raw = vec![0u8; style.width as usize * style.height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (style.width, style.height))
            .into_drawing_area();
        draw_chart(&root, scene, style)?;
    }
    Ok(raw)
}

fn encode_error(format: ImageFormat, err: &image::ImageError) -> RenderError {
    RenderError::Backend(format!("{format} encoding failed: {err}"))
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scene: &ChartScene,
    style: &ChartStyle,
) -> RenderResult<()> {
    let background = plotters_color(style::BACKGROUND);
    let grid = plotters_color(style::GRID_COLOR);
    let text = plotters_color(style::TEXT_COLOR);

    root.fill(&background).map_err(backend_error)?;

    let mut chart = ChartBuilder::on(root)
        .margin(12)
        .x_label_area_size(34)
        .y_label_area_size(52)
        .build_cartesian_2d(
            RangedDateTime::from(scene.x_domain.0..scene.x_domain.1),
            scene.y_domain.0..scene.y_domain.1,
        )
        .map_err(backend_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        // The two-tier time labels are drawn by hand below; the datetime axis
        // still needs a label hint of at least one to plan its key points.
        .x_labels(1)
        .x_label_formatter(&|_| String::new())
        .y_labels(6)
        .light_line_style(TRANSPARENT)
        .bold_line_style(grid)
        .axis_style(grid)
        .label_style(("sans-serif", 14).into_font().color(&text))
        .y_label_formatter(&|value| format_value_label(*value))
        .y_desc(scene.unit.as_str())
        .draw()
        .map_err(backend_error)?;

    // Vertical grid lines sit on the day boundaries, under the data.
    for major in &scene.ticks.majors {
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![
                    (*major, scene.y_domain.0),
                    (*major, scene.y_domain.1),
                ],
                grid.stroke_width(1),
            )))
            .map_err(backend_error)?;
    }

    for series in &scene.series {
        let color = plotters_color(series.color);
        match &series.shape {
            SeriesShape::Line(points) => {
                chart
                    .draw_series(AreaSeries::new(
                        points.iter().map(|point| (point.at, point.value)),
                        scene.y_domain.0,
                        color.mix(style.underglow_alpha),
                    ))
                    .map_err(backend_error)?;
                chart
                    .draw_series(LineSeries::new(
                        points.iter().map(|point| (point.at, point.value)),
                        color.mix(0.35).stroke_width(4),
                    ))
                    .map_err(backend_error)?;
                chart
                    .draw_series(LineSeries::new(
                        points.iter().map(|point| (point.at, point.value)),
                        color.stroke_width(2),
                    ))
                    .map_err(backend_error)?
                    .label(series.label.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                    });
            }
            SeriesShape::Band(bands) => {
                let mut envelope: Vec<(_, f64)> =
                    bands.iter().map(|band| (band.at, band.min)).collect();
                envelope.extend(bands.iter().rev().map(|band| (band.at, band.max)));
                chart
                    .draw_series(std::iter::once(Polygon::new(
                        envelope,
                        color.mix(style.band_alpha),
                    )))
                    .map_err(backend_error)?;
                chart
                    .draw_series(LineSeries::new(
                        bands.iter().map(|band| (band.at, band.mean)),
                        color.stroke_width(2),
                    ))
                    .map_err(backend_error)?
                    .label(series.label.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                    });
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(background.mix(0.6))
        .border_style(grid)
        .label_font(("sans-serif", 14).into_font().color(&text))
        .draw()
        .map_err(backend_error)?;

    draw_time_labels(root, &chart, scene, &text, &grid)?;

    root.present().map_err(backend_error)?;
    Ok(())
}

/// Draws the two-tier time axis by hand: day boundaries get a longer tick and
/// a `%d/%m` label, the in-day ticks get `%H:%M`.
fn draw_time_labels<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &ChartContext<'_, DB, Cartesian2d<RangedDateTime<NaiveDateTime>, RangedCoordf64>>,
    scene: &ChartScene,
    text: &RGBColor,
    grid: &RGBColor,
) -> RenderResult<()> {
    let label_style = ("sans-serif", 13)
        .into_font()
        .color(text)
        .pos(Pos::new(HPos::Center, VPos::Top));
    let axis_y = chart.backend_coord(&(scene.x_domain.0, scene.y_domain.0)).1;

    for major in &scene.ticks.majors {
        let x = chart.backend_coord(&(*major, scene.y_domain.0)).0;
        root.draw(&PathElement::new(
            vec![(x, axis_y), (x, axis_y + 5)],
            grid.stroke_width(1),
        ))
        .map_err(backend_error)?;
        root.draw(&Text::new(
            major.format(MAJOR_LABEL_FORMAT).to_string(),
            (x, axis_y + 7),
            label_style.clone(),
        ))
        .map_err(backend_error)?;
    }

    for minor in &scene.ticks.minors {
        let x = chart.backend_coord(&(*minor, scene.y_domain.0)).0;
        root.draw(&PathElement::new(
            vec![(x, axis_y), (x, axis_y + 3)],
            grid.stroke_width(1),
        ))
        .map_err(backend_error)?;
        root.draw(&Text::new(
            minor.format(MINOR_LABEL_FORMAT).to_string(),
            (x, axis_y + 7),
            label_style.clone(),
        ))
        .map_err(backend_error)?;
    }

    Ok(())
}

/// Formats a y tick value: whole numbers lose the fraction, everything else
/// gets at most two decimals with trailing zeros trimmed.
fn format_value_label(value: f64) -> String {
    if value == value.trunc() {
        return format!("{value:.0}");
    }
    let text = format!("{value:.2}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn plotters_color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.red, rgb.green, rgb.blue)
}

fn backend_error<E: fmt::Debug>(err: E) -> RenderError {
    RenderError::Backend(format!("{err:?}"))
}
