pub mod charting;
pub mod summary;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_italic_style = Style::default()
            .add_modifier(Modifier::DIM)
            .add_modifier(Modifier::ITALIC);

        let series = self.series();

        if series.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "no records to plot - adjust filters or check the input file",
                dim_italic_style,
            ))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

            empty.render(area, buf);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(area);

        // header: plot title plus the source file, truncated to fit
        let mut header = format!("{} - {}", series.kind.title(), self.source_label());
        let avail = chunks[0].width as usize;
        while header.width() > avail && !header.is_empty() {
            header.pop();
        }
        Paragraph::new(Span::styled(header, bold_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let ([x_min, x_max], [y_min, y_max]) = charting::compute_bounds(&series.points);

        let buckets = charting::shade_buckets(series);
        let band_strips: Vec<(String, ratatui::style::Color, Vec<(f64, f64)>)> = if self
            .config
            .show_bands
        {
            self.config
                .bands
                .iter()
                .enumerate()
                .map(|(i, band)| {
                    // stagger strips so overlapping bands stay visible
                    let strip_y = y_max * 0.02 * (i + 1) as f64;
                    (
                        format!("{} [{}-{}]", band.name, band.lo, band.hi),
                        charting::band_color(i),
                        charting::band_strip(band.lo, band.hi, strip_y),
                    )
                })
                .collect()
        } else {
            Vec::new()
        };

        let mut datasets: Vec<Dataset> = buckets
            .iter()
            .map(|(color, points)| {
                Dataset::default()
                    .marker(ratatui::symbols::Marker::Braille)
                    .style(Style::default().fg(*color))
                    .graph_type(GraphType::Scatter)
                    .data(points)
            })
            .collect();

        for (name, color, points) in &band_strips {
            datasets.push(
                Dataset::default()
                    .name(name.clone())
                    .marker(ratatui::symbols::Marker::Dot)
                    .style(Style::default().fg(*color))
                    .graph_type(GraphType::Scatter)
                    .data(points),
            );
        }

        let x_mid = (x_min + x_max) / 2.0;
        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .title(series.kind.x_label())
                    .bounds([x_min, x_max])
                    .labels(vec![
                        Span::styled(charting::format_label(x_min), bold_style),
                        Span::styled(charting::format_label(x_mid), bold_style),
                        Span::styled(charting::format_label(x_max), bold_style),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title(series.kind.y_label())
                    .bounds([y_min, y_max])
                    .labels(vec![
                        Span::styled(charting::format_label(y_min), bold_style),
                        Span::styled(charting::format_label(y_max), bold_style),
                    ]),
            );

        chart.render(chunks[1], buf);

        let hints = Paragraph::new(format!(
            "plot: {} | (1)scatter (2)average (3)solver-share (4)solver-share-average | (b)ands (s)ummary (esc)ape",
            self.kind()
        ))
        .style(dim_italic_style)
        .alignment(Alignment::Center);
        hints.render(chunks[2], buf);
    }
}
