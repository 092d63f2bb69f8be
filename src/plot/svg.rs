//! SVG rendering of a chart with Plotters.
//!
//! Used by the HTML page. The styling follows the classic dashboard look:
//! white background, light mesh, solid blue actual price, dashed orange
//! prediction, legend in the upper-left corner.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::app::view::{ChartData, x_to_date};
use crate::error::AppError;
use crate::report::format_thousands;

const ACTUAL_COLOR: RGBColor = RGBColor(31, 119, 180);
const PREDICTED_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Render `chart` as an SVG document string of `width` x `height` pixels.
pub fn render_svg_chart(chart: &ChartData, width: u32, height: u32) -> Result<String, AppError> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (width, height)).into_drawing_area();
        draw_chart(&root, chart)
            .map_err(|e| AppError::output(format!("Failed to draw chart '{}': {e}", chart.title)))?;
    }
    Ok(buffer)
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &ChartData,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let [x0, x1] = chart.x_bounds;
    let [y0, y1] = chart.y_bounds;

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    ctx.configure_mesh()
        .x_labels(6)
        .y_labels(8)
        .x_desc(&chart.x_label)
        .y_desc(&chart.y_label)
        .x_label_formatter(&|v| x_to_date(*v).map(|d| d.to_string()).unwrap_or_default())
        .y_label_formatter(&|v| format_thousands(*v, 0))
        .light_line_style(RGBColor(235, 235, 235))
        .draw()?;

    if chart.is_empty() {
        return root.present();
    }

    ctx.draw_series(LineSeries::new(
        chart.actual.iter().copied(),
        ACTUAL_COLOR.stroke_width(1),
    ))?
    .label("Actual")
    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ACTUAL_COLOR));

    ctx.draw_series(DashedLineSeries::new(
        chart.predicted.iter().copied(),
        6,
        4,
        PREDICTED_COLOR.stroke_width(2),
    ))?
    .label("Predicted")
    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PREDICTED_COLOR.stroke_width(2)));

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()
}
