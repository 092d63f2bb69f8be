//! Plotters-powered actual-vs-predicted chart widget for Ratatui.
//!
//! Plotters output is drawn into the Ratatui buffer using `plotters-ratatui-backend`,
//! which gives date tick labels and a mesh without hand-rolled axis code.
//! An empty chart still draws its mesh and axis labels.

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::app::view::{ChartData, x_to_date};

/// Terminal palette: solid cyan for the actual close, dashed yellow for the prediction.
pub const ACTUAL_COLOR: RGBColor = RGBColor(0, 255, 255);
pub const PREDICTED_COLOR: RGBColor = RGBColor(255, 215, 0);

/// Render-only view over one model's [`ChartData`].
pub struct PredictionChart<'a> {
    pub chart: &'a ChartData,
}

impl<'a> Widget for PredictionChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out the label areas in a tiny rect.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.chart.x_bounds;
        let [y0, y1] = self.chart.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let chart = self.chart;
        let widget = widget_fn(move |root| {
            let mut ctx = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 10)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            ctx.configure_mesh()
                .x_desc(&chart.x_label)
                .y_desc(&chart.y_label)
                .x_labels(4)
                .y_labels(5)
                .x_label_formatter(&|v| x_to_date(*v).map(|d| d.format("%Y-%m").to_string()).unwrap_or_default())
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(WHITE)
                .bold_line_style(RGBColor(90, 90, 90))
                .light_line_style(TRANSPARENT)
                .draw()?;

            ctx.draw_series(LineSeries::new(chart.actual.iter().copied(), &ACTUAL_COLOR))?;
            ctx.draw_series(DashedLineSeries::new(
                chart.predicted.iter().copied(),
                2,
                2,
                PREDICTED_COLOR.stroke_width(1),
            ))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
