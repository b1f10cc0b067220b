//! Static Dashboard Renderer
//! Draws the personality dashboard into an RGB bitmap with plotters.
//!
//! Layout (see `layout.rs`):
//! 1. Suptitle "Behavioral Personality Dashboard" across the top
//! 2. Row 0: pies for Stage Fear, Drained After Socializing, Personality
//! 3. Rows 1-2: stacked bars of each numeric field by personality
//! 4. Bottom-right: unframed caption text

use crate::charts::layout::{DashboardLayout, PanelKind, PanelRect};
use crate::charts::palette::Palette;
use crate::data::schema::{Field, BAR_FIELDS, PIE_FIELDS};
use crate::stats::{CountTable, CrossTab, DashboardData};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;
use tracing::debug;

pub const SUPTITLE: &str = "Behavioral Personality Dashboard";
pub const CAPTION: &str = "Extrovert vs. Introvert Behavioral Data Analysis";
const Y_AXIS_DESC: &str = "Number of people";
const NO_DATA: &str = "No data";

const FONT: &str = "sans-serif";
const SUPTITLE_SIZE: u32 = 28;
const CAPTION_SIZE: u32 = 24;
const PANEL_TITLE_SIZE: u32 = 20;
const AXIS_DESC_SIZE: u32 = 16;
const LABEL_SIZE: u32 = 14;
const TICK_SIZE: u32 = 13;

/// Slices meet at 12 o'clock; plotters measures clockwise from +x.
const PIE_START_ANGLE: f64 = -90.0;
/// Pie radius as a fraction of the smaller panel side.
const PIE_RADIUS: f64 = 0.33;
/// Tick labels are rotated 45 degrees counter-clockwise.
const TICK_ROTATION: f64 = 45.0;
const TICK_LENGTH: i32 = 5;
/// Blank border around a tick label before it is rotated.
const GLYPH_PAD: u32 = 2;
const X_LABEL_AREA: u32 = 70;
const Y_LABEL_AREA: u32 = 55;
/// Half the bar width in axis units; bars sit on integer positions.
const BAR_HALF_WIDTH: f64 = 0.4;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Invalid canvas size {0}x{1}")]
    InvalidCanvas(u32, u32),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(err.to_string())
    }
}

/// Renders the dashboard bitmap.
pub struct DashboardRenderer;

impl DashboardRenderer {
    /// Render the full dashboard at `width` x `height` pixels.
    pub fn render(
        data: &DashboardData,
        palette: &Palette,
        width: u32,
        height: u32,
    ) -> Result<RgbImage, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidCanvas(width, height));
        }

        let layout = DashboardLayout::new(width, height);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;

            let title_area = Self::sub_area(&root, &layout.title);
            Self::draw_centered_text(&title_area, SUPTITLE, SUPTITLE_SIZE)?;

            for panel in layout.panels() {
                let area = Self::sub_area(&root, &panel.rect);
                debug!("Drawing {:?} at row {} col {}", panel.kind, panel.row, panel.col);

                match panel.kind {
                    PanelKind::Pie(i) => {
                        let table = data.pies.get(i).cloned().unwrap_or_default();
                        Self::draw_pie(&root, &area, &PIE_FIELDS[i], &table, palette)?;
                    }
                    PanelKind::StackedBar(i) => {
                        let table = data.bars.get(i).cloned().unwrap_or_default();
                        Self::draw_stacked_bars(&root, &area, &BAR_FIELDS[i], &table, palette)?;
                    }
                    PanelKind::Caption => {
                        Self::draw_centered_text(&area, CAPTION, CAPTION_SIZE)?;
                    }
                }
            }

            root.present()?;
        }

        RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RenderError::Draw("bitmap buffer size mismatch".to_string()))
    }

    fn sub_area<'a>(root: &Area<'a>, rect: &PanelRect) -> Area<'a> {
        root.clone().shrink((rect.x, rect.y), (rect.w, rect.h))
    }

    fn draw_centered_text(area: &Area, text: &str, size: u32) -> Result<(), RenderError> {
        let (w, h) = area.dim_in_pixel();
        let style = (FONT, size)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new(text, (w as i32 / 2, h as i32 / 2), style))?;
        Ok(())
    }

    fn draw_pie(
        root: &Area,
        area: &Area,
        field: &Field,
        table: &CountTable,
        palette: &Palette,
    ) -> Result<(), RenderError> {
        let inner = area.titled(field.title, (FONT, PANEL_TITLE_SIZE))?;
        if table.is_empty() {
            return Self::draw_centered_text(&inner, NO_DATA, LABEL_SIZE);
        }

        // Pie positions itself in backend pixels, so it is drawn on the root
        // with an absolute center.
        let (w, h) = inner.dim_in_pixel();
        let (base_x, base_y) = inner.get_base_pixel();
        let center = (base_x + w as i32 / 2, base_y + h as i32 / 2);
        let radius = w.min(h) as f64 * PIE_RADIUS;
        let slices = pie_slices(table, palette);
        let labels: Vec<&str> = slices.iter().map(|(label, _, _)| *label).collect();
        let sizes: Vec<f64> = slices.iter().map(|(_, size, _)| *size).collect();
        let colors: Vec<RGBColor> = slices.iter().map(|(_, _, color)| *color).collect();

        let mut pie = Pie::new(&center, &radius, &sizes[..], &colors[..], &labels[..]);
        pie.start_angle(PIE_START_ANGLE);
        pie.label_style((FONT, LABEL_SIZE).into_font().color(&BLACK));
        pie.percentages((FONT, TICK_SIZE).into_font().color(&BLACK));
        root.draw(&pie)?;
        Ok(())
    }

    fn draw_stacked_bars(
        root: &Area,
        area: &Area,
        field: &Field,
        table: &CrossTab,
        palette: &Palette,
    ) -> Result<(), RenderError> {
        if table.is_empty() {
            let inner = area.titled(field.title, (FONT, PANEL_TITLE_SIZE))?;
            return Self::draw_centered_text(&inner, NO_DATA, LABEL_SIZE);
        }

        let ticks = table.tick_labels();
        let n = ticks.len();
        let y_top = (table.max_stack() as f64 * 1.1).ceil().max(1.0) as usize;

        let mut chart = ChartBuilder::on(area)
            .caption(field.title, (FONT, PANEL_TITLE_SIZE))
            .margin(8)
            .x_label_area_size(X_LABEL_AREA)
            .y_label_area_size(Y_LABEL_AREA)
            .build_cartesian_2d(-0.5f64..n as f64 - 0.5, 0usize..y_top)?;

        // x tick labels are drawn below, one per bar.
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_label_style((FONT, TICK_SIZE))
            .x_desc(field.description)
            .y_desc(Y_AXIS_DESC)
            .axis_desc_style((FONT, AXIS_DESC_SIZE))
            .draw()?;

        for (i, tick) in ticks.iter().enumerate() {
            let (x, y) = chart.backend_coord(&(i as f64, 0));
            root.draw(&PathElement::new(vec![(x, y), (x, y + TICK_LENGTH)], BLACK))?;
            Self::draw_rotated_label(root, tick, (x, y + TICK_LENGTH + 2))?;
        }

        let labels = table.display_labels();
        let colors = palette.label_colors(labels.iter().map(String::as_str));
        let mut bottoms = vec![0usize; n];
        for (label, color) in labels.into_iter().zip(colors) {
            let mut bars = Vec::with_capacity(n);
            for (i, count) in table.series(&label).into_iter().enumerate() {
                let bottom = bottoms[i];
                bottoms[i] += count;
                if count > 0 {
                    let x = i as f64;
                    bars.push(Rectangle::new(
                        [(x - BAR_HALF_WIDTH, bottom), (x + BAR_HALF_WIDTH, bottom + count)],
                        color.filled(),
                    ));
                }
            }

            chart
                .draw_series(bars)?
                .label(label)
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT, LABEL_SIZE))
            .draw()?;

        Ok(())
    }

    /// Draw `text` at `TICK_ROTATION`, its bounding box centered on
    /// `anchor.0` with the top edge at `anchor.1`.
    fn draw_rotated_label(root: &Area, text: &str, anchor: (i32, i32)) -> Result<(), RenderError> {
        let style = (FONT, TICK_SIZE).into_font().color(&BLACK);
        let (tw, th) = root.estimate_text_size(text, &style)?;
        let size = (tw + 2 * GLYPH_PAD, th + 2 * GLYPH_PAD);

        let mut glyphs = vec![255u8; size.0 as usize * size.1 as usize * 3];
        {
            let canvas = BitMapBackend::with_buffer(&mut glyphs, size).into_drawing_area();
            canvas.draw_text(text, &style, (GLYPH_PAD as i32, GLYPH_PAD as i32))?;
            canvas.present()?;
        }

        let (mask, (w, _)) = rotate_glyphs(&glyphs, size, TICK_ROTATION);
        let left = anchor.0 - w as i32 / 2;
        for (i, &ink) in mask.iter().enumerate() {
            if ink == 0 {
                continue;
            }
            let x = left + (i as u32 % w) as i32;
            let y = anchor.1 + (i as u32 / w) as i32;
            root.draw_pixel((x, y), &BLACK.mix(f64::from(ink) / 255.0))?;
        }
        Ok(())
    }
}

/// Pie slices as (label, size, color) in drawing order.
///
/// plotters lays slices out clockwise, so the table order is reversed: the
/// first label then sits counter-clockwise of 12 o'clock.
fn pie_slices<'t>(table: &'t CountTable, palette: &Palette) -> Vec<(&'t str, f64, RGBColor)> {
    let mut slices: Vec<_> = table
        .iter()
        .zip(palette.pie_colors(table))
        .map(|((label, count), color)| (label, count as f64, color))
        .collect();
    slices.reverse();
    slices
}

/// Rotate an RGB bitmap of dark text on white by `degrees` counter-clockwise.
///
/// Returns the ink coverage (0 blank, 255 solid) of the rotated bounding box
/// and its size. Sampling is nearest-neighbour.
fn rotate_glyphs(rgb: &[u8], size: (u32, u32), degrees: f64) -> (Vec<u8>, (u32, u32)) {
    let (w, h) = (f64::from(size.0), f64::from(size.1));
    let (sin, cos) = degrees.to_radians().sin_cos();
    let out_w = (w * cos.abs() + h * sin.abs()).ceil() as u32;
    let out_h = (w * sin.abs() + h * cos.abs()).ceil() as u32;

    let mut mask = vec![0u8; out_w as usize * out_h as usize];
    for y in 0..out_h {
        for x in 0..out_w {
            let u = f64::from(x) + 0.5 - f64::from(out_w) / 2.0;
            let v = f64::from(y) + 0.5 - f64::from(out_h) / 2.0;
            // Screen y points down, so a counter-clockwise turn maps
            // source (1, 0) to (cos, -sin).
            let sx = (u * cos - v * sin + w / 2.0).floor();
            let sy = (u * sin + v * cos + h / 2.0).floor();
            if sx < 0.0 || sy < 0.0 || sx >= w || sy >= h {
                continue;
            }
            let src = (sy as usize * size.0 as usize + sx as usize) * 3;
            mask[y as usize * out_w as usize + x as usize] = 255 - rgb[src];
        }
    }
    (mask, (out_w, out_h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Aggregator;
    use polars::prelude::*;

    /// Four respondents: one bar per panel, half Introvert and half
    /// Extrovert, and 50/50 Yes/No answers.
    fn dashboard() -> DashboardData {
        let df = df!(
            "time_spent_alone" => [3.0, 3.0, 3.0, 3.0],
            "stage_fear" => ["No", "No", "Yes", "Yes"],
            "social_event_attendance" => [4.0, 4.0, 6.0, 6.0],
            "going_outside" => [2.0, 2.0, 5.0, 5.0],
            "drained_after_socializing" => ["Yes", "No", "Yes", "No"],
            "friends_circle_size" => [3i64, 3, 12, 12],
            "post_frequency" => [1.0, 2.0, 8.0, 9.0],
            "personality" => ["Introvert", "Introvert", "Extrovert", "Extrovert"]
        )
        .unwrap();
        Aggregator::build_dashboard(&df).unwrap()
    }

    fn panel_rect(width: u32, height: u32, kind: PanelKind) -> PanelRect {
        DashboardLayout::new(width, height)
            .panels()
            .iter()
            .find(|p| p.kind == kind)
            .map(|p| p.rect)
            .unwrap()
    }

    /// (x, y) of every pixel inside `rect` painted exactly `color`.
    fn pixels_of(image: &RgbImage, rect: &PanelRect, color: RGBColor) -> Vec<(i32, i32)> {
        let mut found = Vec::new();
        for y in rect.y.max(0)..rect.bottom().min(image.height() as i32) {
            for x in rect.x.max(0)..rect.right().min(image.width() as i32) {
                if image.get_pixel(x as u32, y as u32).0 == [color.0, color.1, color.2] {
                    found.push((x, y));
                }
            }
        }
        found
    }

    fn mean_x(pixels: &[(i32, i32)]) -> f64 {
        pixels.iter().map(|&(x, _)| f64::from(x)).sum::<f64>() / pixels.len() as f64
    }

    #[test]
    fn test_zero_canvas_is_rejected() {
        let data = DashboardData::default();
        let result = DashboardRenderer::render(&data, &Palette::default(), 0, 600);
        assert!(matches!(result, Err(RenderError::InvalidCanvas(0, 600))));
    }

    #[test]
    fn test_render_dashboard() {
        let palette = Palette::default();
        let data = dashboard();

        for (width, height) in [(1600, 1200), (800, 600)] {
            let image = DashboardRenderer::render(&data, &palette, width, height).unwrap();
            assert_eq!(image.dimensions(), (width, height));
        }
    }

    #[test]
    fn test_stacked_bar_puts_introverts_at_the_bottom() {
        let palette = Palette::default();
        let image = DashboardRenderer::render(&dashboard(), &palette, 1600, 1200).unwrap();
        let rect = panel_rect(1600, 1200, PanelKind::StackedBar(0));

        let introvert = pixels_of(&image, &rect, palette.introvert);
        let extrovert = pixels_of(&image, &rect, palette.extrovert);
        assert!(!introvert.is_empty() && !extrovert.is_empty());

        // Legend swatches sit at the top, so the lowest pixel of each color
        // belongs to its bar segment.
        let lowest = |px: &[(i32, i32)]| px.iter().map(|&(_, y)| y).max().unwrap();
        assert!(lowest(&introvert) > lowest(&extrovert));
    }

    #[test]
    fn test_first_pie_label_is_left_of_twelve_o_clock() {
        let palette = Palette::default();
        let image = DashboardRenderer::render(&dashboard(), &palette, 1600, 1200).unwrap();

        // Stage fear: "No" comes first and takes the extrovert color.
        let rect = panel_rect(1600, 1200, PanelKind::Pie(0));
        let no = pixels_of(&image, &rect, palette.extrovert);
        let yes = pixels_of(&image, &rect, palette.introvert);
        assert!(!no.is_empty() && !yes.is_empty());
        assert!(mean_x(&no) < mean_x(&yes));

        // Personality: "Extrovert" comes first and takes the introvert color.
        let rect = panel_rect(1600, 1200, PanelKind::Pie(2));
        let extrovert = pixels_of(&image, &rect, palette.introvert);
        let introvert = pixels_of(&image, &rect, palette.extrovert);
        assert!(mean_x(&extrovert) < mean_x(&introvert));
    }

    #[test]
    fn test_empty_dashboard_renders_no_data_panels() {
        let palette = Palette::default();
        let image = DashboardRenderer::render(&DashboardData::default(), &palette, 800, 600).unwrap();

        let full = PanelRect { x: 0, y: 0, w: 800, h: 600 };
        assert!(pixels_of(&image, &full, palette.introvert).is_empty());
        assert!(pixels_of(&image, &full, palette.extrovert).is_empty());
    }

    #[test]
    fn test_pie_slices_are_reversed_for_clockwise_drawing() {
        let df = df!("stage_fear" => ["Yes", "No", "Yes"]).unwrap();
        let table = Aggregator::count(&df, "stage_fear").unwrap();
        let palette = Palette::default();

        assert_eq!(
            pie_slices(&table, &palette),
            vec![("Yes", 2.0, palette.introvert), ("No", 1.0, palette.extrovert)]
        );
    }

    #[test]
    fn test_rotate_glyphs_turns_text_upward() {
        // A 20x4 white strip with a solid line on rows 1 and 2.
        let (w, h) = (20u32, 4u32);
        let mut rgb = vec![255u8; (w * h * 3) as usize];
        for y in 1..3 {
            for x in 0..w {
                let i = ((y * w + x) * 3) as usize;
                rgb[i..i + 3].copy_from_slice(&[0, 0, 0]);
            }
        }

        let (mask, (out_w, out_h)) = rotate_glyphs(&rgb, (w, h), 45.0);
        assert_eq!((out_w, out_h), (17, 17));

        let ink = |x: u32, y: u32| mask[(y * out_w + x) as usize];
        // The line now rises from bottom-left to top-right.
        assert_eq!(ink(14, 2), 255);
        assert_eq!(ink(2, 14), 255);
        assert_eq!(ink(2, 2), 0);
        assert_eq!(ink(14, 14), 0);
    }
}
