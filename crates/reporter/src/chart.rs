//! Feature importance bar chart

use crate::{RankedFeature, ReportError};
use ab_glyph::{FontRef, PxScale};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::io::Cursor;
use tracing::debug;

static FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Padding between a bar label and the y axis
const LABEL_PAD: i32 = 6;

/// Chart geometry and colours
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    /// Blank border around the chart
    pub margin: u32,
    /// Vertical gap between bars
    pub gap: u32,
    /// Column left of the y axis holding feature names
    pub label_width: u32,
    /// Band above the plot holding the title
    pub title_height: u32,
    /// Band below the plot holding the x axis label
    pub axis_label_height: u32,
    /// Label text size in pixels; the title is drawn a third larger
    pub font_size: f32,
    pub background: Rgb<u8>,
    pub bar: Rgb<u8>,
    pub axis: Rgb<u8>,
    pub text: Rgb<u8>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
            margin: 20,
            gap: 6,
            label_width: 150,
            title_height: 32,
            axis_label_height: 28,
            font_size: 14.0,
            background: Rgb([255, 255, 255]),
            bar: Rgb([31, 119, 180]),
            axis: Rgb([64, 64, 64]),
            text: Rgb([0, 0, 0]),
        }
    }
}

/// Region the bars are drawn in
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlotArea {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

impl ChartStyle {
    fn plot_area(&self) -> Option<PlotArea> {
        let used_w = 2 * self.margin + self.label_width;
        let used_h = 2 * self.margin + self.title_height + self.axis_label_height;
        if self.width <= used_w || self.height <= used_h {
            return None;
        }
        Some(PlotArea {
            left: self.margin + self.label_width,
            top: self.margin + self.title_height,
            width: self.width - used_w,
            height: self.height - used_h,
        })
    }
}

/// Render a horizontal bar chart as PNG, strongest feature on top. Each bar
/// is labelled with its feature name; lengths are relative to the largest
/// importance.
pub fn render_chart(ranked: &[RankedFeature], style: &ChartStyle) -> Result<Vec<u8>, ReportError> {
    let plot = style.plot_area().ok_or_else(|| {
        ReportError::Chart(format!(
            "{}x{} canvas leaves no room for the plot",
            style.width, style.height
        ))
    })?;
    let font = FontRef::try_from_slice(FONT_DATA)
        .map_err(|e| ReportError::Chart(format!("chart font: {}", e)))?;
    let label_scale = PxScale::from(style.font_size);
    let title_scale = PxScale::from(style.font_size * 4.0 / 3.0);

    let mut img = RgbImage::from_pixel(style.width, style.height, style.background);

    let max = ranked
        .iter()
        .map(|r| r.importance)
        .fold(0.0_f64, f64::max);

    if !ranked.is_empty() {
        let row_h = plot.height / ranked.len() as u32;
        let bar_h = row_h.saturating_sub(style.gap);

        for (i, feature) in ranked.iter().enumerate() {
            let row_top = plot.top + i as u32 * row_h;

            let (text_w, text_h) = text_size(label_scale, &font, &feature.name);
            let x = (plot.left as i32 - LABEL_PAD - text_w as i32).max(style.margin as i32);
            let y = (row_top + row_h / 2) as i32 - text_h as i32 / 2;
            draw_text_mut(&mut img, style.text, x, y, label_scale, &font, &feature.name);

            if max <= 0.0 {
                continue;
            }
            let bar_w = ((feature.importance.max(0.0) / max) * plot.width as f64).round() as u32;
            if bar_w == 0 || bar_h == 0 {
                continue;
            }
            let bar_top = (row_top + style.gap / 2) as i32;
            draw_filled_rect_mut(
                &mut img,
                Rect::at(plot.left as i32, bar_top).of_size(bar_w, bar_h),
                style.bar,
            );
        }
    }

    let left = plot.left as f32;
    let bottom = (plot.top + plot.height) as f32;
    draw_line_segment_mut(&mut img, (left, plot.top as f32), (left, bottom), style.axis);
    draw_line_segment_mut(
        &mut img,
        (left, bottom),
        ((plot.left + plot.width) as f32, bottom),
        style.axis,
    );

    let title = format!("Top {} Features", ranked.len());
    let (title_w, title_h) = text_size(title_scale, &font, &title);
    draw_text_mut(
        &mut img,
        style.text,
        centered(plot.left, plot.width, title_w),
        (style.margin + style.title_height / 2) as i32 - title_h as i32 / 2,
        title_scale,
        &font,
        &title,
    );

    let (axis_w, axis_h) = text_size(label_scale, &font, "Importance");
    draw_text_mut(
        &mut img,
        style.text,
        centered(plot.left, plot.width, axis_w),
        (plot.top + plot.height + style.axis_label_height / 2) as i32 - axis_h as i32 / 2,
        label_scale,
        &font,
        "Importance",
    );

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    debug!("Rendered {} bar chart ({} bytes)", ranked.len(), bytes.len());
    Ok(bytes)
}

fn centered(start: u32, span: u32, text_w: u32) -> i32 {
    start as i32 + (span as i32 - text_w as i32) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(weights: &[(&str, f64)]) -> Vec<RankedFeature> {
        weights
            .iter()
            .map(|&(name, importance)| RankedFeature {
                name: name.to_string(),
                importance,
            })
            .collect()
    }

    fn decode(png: &[u8]) -> RgbImage {
        image::load_from_memory(png).unwrap().to_rgb8()
    }

    /// Pixels in `[x0, x1) x [y0, y1)` that differ from the background
    fn inked(
        img: &RgbImage,
        style: &ChartStyle,
        (x0, x1): (u32, u32),
        (y0, y1): (u32, u32),
    ) -> usize {
        (y0..y1)
            .flat_map(|y| (x0..x1).map(move |x| (x, y)))
            .filter(|&(x, y)| *img.get_pixel(x, y) != style.background)
            .count()
    }

    #[test]
    fn test_png_output() {
        let style = ChartStyle::default();
        let features = ranked(&[("OverallQual", 0.6), ("GrLivArea", 0.3)]);
        let png = render_chart(&features, &style).unwrap();

        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!(decode(&png).dimensions(), (style.width, style.height));
    }

    #[test]
    fn test_bars_scaled_to_largest() {
        let style = ChartStyle::default();
        let plot = style.plot_area().unwrap();
        let img = decode(&render_chart(&ranked(&[("A", 0.8), ("B", 0.4)]), &style).unwrap());

        let row_h = plot.height / 2;
        let first_row = plot.top + row_h / 2;
        let second_row = plot.top + row_h + row_h / 2;
        let right_edge = plot.left + plot.width - 1;
        let middle = plot.left + plot.width / 2 - 2;

        assert_eq!(*img.get_pixel(right_edge, first_row), style.bar);
        assert_eq!(*img.get_pixel(right_edge, second_row), style.background);
        assert_eq!(*img.get_pixel(middle, second_row), style.bar);
    }

    #[test]
    fn test_each_bar_has_a_label() {
        let style = ChartStyle::default();
        let plot = style.plot_area().unwrap();
        let img = decode(
            &render_chart(&ranked(&[("OverallQual", 0.6), ("GrLivArea", 0.3)]), &style).unwrap(),
        );

        let label_column = (style.margin, plot.left - 1);
        let row_h = plot.height / 2;
        assert!(inked(&img, &style, label_column, (plot.top, plot.top + row_h)) > 0);
        assert!(inked(&img, &style, label_column, (plot.top + row_h, plot.top + 2 * row_h)) > 0);
    }

    #[test]
    fn test_title_and_axis_label() {
        let style = ChartStyle::default();
        let plot = style.plot_area().unwrap();
        let img = decode(&render_chart(&ranked(&[("A", 1.0)]), &style).unwrap());

        let across = (plot.left, plot.left + plot.width);
        assert!(inked(&img, &style, across, (style.margin, plot.top)) > 0);
        let below = (plot.top + plot.height + 1, style.height - style.margin);
        assert!(inked(&img, &style, across, below) > 0);
    }

    #[test]
    fn test_empty_ranking() {
        let style = ChartStyle::default();
        let plot = style.plot_area().unwrap();
        let img = decode(&render_chart(&[], &style).unwrap());

        // no labels, only the axes
        let label_column = (style.margin, plot.left - 1);
        assert_eq!(inked(&img, &style, label_column, (plot.top, plot.top + plot.height)), 0);
    }

    #[test]
    fn test_canvas_too_small() {
        let style = ChartStyle {
            width: 30,
            ..ChartStyle::default()
        };
        assert!(matches!(
            render_chart(&ranked(&[("A", 1.0)]), &style),
            Err(ReportError::Chart(_))
        ));
    }
}
