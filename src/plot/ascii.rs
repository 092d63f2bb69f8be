//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - grid: `.` dotted lines at the quarters
//! - actual price: `*` line
//! - predicted price: `+` line
//! - cells where both lines pass: `#`

use crate::app::view::{ChartData, x_to_date};
use crate::report::format_price;

const GRID: char = '.';
const ACTUAL: char = '*';
const PREDICTED: char = '+';
const OVERLAP: char = '#';

/// Render `chart` into a `width` x `height` character grid with a header
/// and a legend line.
pub fn render_ascii_chart(chart: &ChartData, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let [x_min, x_max] = chart.x_bounds;
    let [y_min, y_max] = chart.y_bounds;

    let mut grid = vec![vec![' '; width]; height];
    draw_grid(&mut grid);

    let frame = Frame {
        x_min,
        x_max,
        y_min,
        y_max,
    };
    draw_polyline(&mut grid, &chart.actual, &frame, ACTUAL);
    draw_polyline(&mut grid, &chart.predicted, &frame, PREDICTED);

    let mut out = String::new();
    out.push_str(&chart.title);
    out.push('\n');
    out.push_str(&format!(
        "{}: [{}, {}] | {}: [{}, {}]\n",
        chart.y_label,
        format_price(y_min),
        format_price(y_max),
        chart.x_label,
        fmt_date(x_min),
        fmt_date(x_max),
    ));

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    if chart.is_empty() {
        out.push_str("(no rows in range)\n");
    }
    out.push_str(&format!("Legend: {ACTUAL} Actual  {PREDICTED} Predicted  {OVERLAP} both\n"));
    out
}

struct Frame {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

fn fmt_date(x: f64) -> String {
    x_to_date(x)
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn draw_grid(grid: &mut [Vec<char>]) {
    let height = grid.len();
    let width = grid[0].len();
    for k in 1..4 {
        let r = ((height - 1) as f64 * k as f64 / 4.0).round() as usize;
        for c in (0..width).step_by(3) {
            grid[r][c] = GRID;
        }
        let c = ((width - 1) as f64 * k as f64 / 4.0).round() as usize;
        for r in (0..height).step_by(2) {
            grid[r][c] = GRID;
        }
    }
}

fn map_x(x: f64, frame: &Frame, width: usize) -> usize {
    let width = width.max(2);
    let span = frame.x_max - frame.x_min;
    let u = if span > 0.0 {
        ((x - frame.x_min) / span).clamp(0.0, 1.0)
    } else {
        0.5
    };
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, frame: &Frame, height: usize) -> usize {
    let height = height.max(2);
    let span = frame.y_max - frame.y_min;
    let u = if span > 0.0 {
        ((y - frame.y_min) / span).clamp(0.0, 1.0)
    } else {
        0.5
    };
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(grid: &mut [Vec<char>], points: &[(f64, f64)], frame: &Frame, ch: char) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in points {
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        let cx = map_x(x, frame, width);
        let cy = map_y(y, frame, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, cx, cy, ch),
            None => set_cell(grid, cx, cy, ch),
        }
        prev = Some((cx, cy));
    }
}

fn set_cell(grid: &mut [Vec<char>], x: usize, y: usize, ch: char) {
    let Some(cell) = grid.get_mut(y).and_then(|row| row.get_mut(x)) else {
        return;
    };
    *cell = match *cell {
        ' ' | GRID => ch,
        c if c == ch => c,
        _ => OVERLAP,
    };
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x0 >= 0 && y0 >= 0 {
            set_cell(grid, x0 as usize, y0 as usize, ch);
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(actual: Vec<(f64, f64)>, predicted: Vec<(f64, f64)>) -> ChartData {
        ChartData {
            title: "Bitcoin Price Prediction - LSTM - 5 Tahun".to_string(),
            x_label: "Date".to_string(),
            y_label: "Price (USD)".to_string(),
            actual,
            predicted,
            x_bounds: [738886.0, 738888.0],
            y_bounds: [10.0, 30.0],
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let c = chart(
            vec![(738886.0, 10.0), (738887.0, 20.0), (738888.0, 30.0)],
            vec![(738886.0, 30.0), (738888.0, 10.0)],
        );
        let txt = render_ascii_chart(&c, 12, 5);
        let expected = concat!(
            "Bitcoin Price Prediction - LSTM - 5 Tahun\n",
            "Price (USD): [10.00, 30.00] | Date: [2024-01-01, 2024-01-03]\n",
            "++ .  . . **\n",
            ". +++ . **\n",
            ".  . ##*..\n",
            ". *** .+++\n",
            "** .  . . ++\n",
            "Legend: * Actual  + Predicted  # both\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_chart_draws_grid_only() {
        let c = chart(Vec::new(), Vec::new());
        let txt = render_ascii_chart(&c, 12, 5);
        assert!(txt.contains("(no rows in range)"));
        let grid: Vec<&str> = txt.lines().skip(2).take(5).collect();
        assert_eq!(grid.len(), 5);
        for row in grid {
            assert!(row.chars().all(|c| c == ' ' || c == GRID), "{row:?}");
        }
    }

    #[test]
    fn tiny_sizes_are_raised_to_minimum() {
        let c = chart(vec![(738886.0, 10.0)], Vec::new());
        let txt = render_ascii_chart(&c, 1, 1);
        // title + header + 5 grid rows + legend
        assert_eq!(txt.lines().count(), 8);
    }
}
