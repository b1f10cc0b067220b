//! Dashboard Layout
//! Pixel rectangles for the suptitle band and the 3x3 panel grid.
//!
//! Grid geometry:
//! - suptitle band: top 4% of the canvas
//! - 3 rows with height ratios 1 : 1 : 1.2, 3 equal columns
//! - vertical gap 0.4 and horizontal gap 0.2, as fractions of the mean cell size
//!
//! Panel placement:
//! ```text
//!   (0,0) pie 0     (0,1) pie 1     (0,2) pie 2
//!   (1,0) bars 0    (1,1) bars 1    (1,2) bars 2
//!   (2,0) bars 3    (2,1) bars 4    (2,2) caption
//! ```

pub const GRID_ROWS: usize = 3;
pub const GRID_COLS: usize = 3;
const HEIGHT_RATIOS: [f64; GRID_ROWS] = [1.0, 1.0, 1.2];
const WIDTH_RATIOS: [f64; GRID_COLS] = [1.0, 1.0, 1.0];
const HSPACE: f64 = 0.4;
const WSPACE: f64 = 0.2;
const TITLE_BAND: f64 = 0.04;
/// Left, right and bottom margin as a fraction of the canvas width.
const OUTER_MARGIN: f64 = 0.02;

/// A pixel rectangle on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[cfg(test)]
impl PanelRect {
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn overlaps(&self, other: &PanelRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// What a panel shows. Indices refer to the pie/bar panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Pie(usize),
    StackedBar(usize),
    Caption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub row: usize,
    pub col: usize,
    pub kind: PanelKind,
    pub rect: PanelRect,
}

/// Fixed dashboard layout for one canvas size.
#[derive(Debug, Clone)]
pub struct DashboardLayout {
    pub width: u32,
    pub height: u32,
    pub title: PanelRect,
    panels: Vec<Panel>,
}

/// Split `total` pixels into cells with the given ratios and a gap of
/// `space` times the mean cell size. Returns (offset, length) per cell.
fn split_track(start: f64, total: f64, ratios: &[f64], space: f64) -> Vec<(f64, f64)> {
    let n = ratios.len() as f64;
    let ratio_sum: f64 = ratios.iter().sum();
    let unit = total / (ratio_sum * (1.0 + (n - 1.0) * space / n));
    let gap = space * ratio_sum * unit / n;

    let mut offset = start;
    ratios
        .iter()
        .map(|ratio| {
            let cell = (offset, ratio * unit);
            offset += ratio * unit + gap;
            cell
        })
        .collect()
}

fn kind_at(row: usize, col: usize) -> PanelKind {
    match (row, col) {
        (0, c) => PanelKind::Pie(c),
        (2, 2) => PanelKind::Caption,
        (r, c) => PanelKind::StackedBar((r - 1) * GRID_COLS + c),
    }
}

impl DashboardLayout {
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as f64, height as f64);
        let margin = (w * OUTER_MARGIN).round();
        let title_h = (h * TITLE_BAND).round();

        let rows = split_track(title_h, h - title_h - margin, &HEIGHT_RATIOS, HSPACE);
        let cols = split_track(margin, w - 2.0 * margin, &WIDTH_RATIOS, WSPACE);

        let mut panels = Vec::with_capacity(GRID_ROWS * GRID_COLS);
        for (row, &(y, ch)) in rows.iter().enumerate() {
            for (col, &(x, cw)) in cols.iter().enumerate() {
                panels.push(Panel {
                    row,
                    col,
                    kind: kind_at(row, col),
                    rect: PanelRect {
                        x: x.round() as i32,
                        y: y.round() as i32,
                        w: cw.floor().max(1.0) as i32,
                        h: ch.floor().max(1.0) as i32,
                    },
                });
            }
        }

        Self {
            width,
            height,
            title: PanelRect {
                x: 0,
                y: 0,
                w: width as i32,
                h: title_h.max(1.0) as i32,
            },
            panels,
        }
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }
}
