// src/gui/components/chart.rs
//
// Line chart of the transformed table, drawn straight onto a painter.
// Column 0 is the selected item and gets the heavy stroke; the legend
// lists each child with its share of the selected item's weight.
// Opens on the latest months unless the panel asks for full history.

use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, StrokeKind, Vec2, pos2, vec2,
};

use crate::{config::consts::CHART_WINDOW_MONTHS, gui::view::PanelView};

const PALETTE: [Color32; 10] = [
    Color32::from_rgb(31, 119, 180),
    Color32::from_rgb(255, 127, 14),
    Color32::from_rgb(44, 160, 44),
    Color32::from_rgb(214, 39, 40),
    Color32::from_rgb(148, 103, 189),
    Color32::from_rgb(140, 86, 75),
    Color32::from_rgb(227, 119, 194),
    Color32::from_rgb(127, 127, 127),
    Color32::from_rgb(188, 189, 34),
    Color32::from_rgb(23, 190, 207),
];

const LEGEND_W: f32 = 230.0;
const MARGIN_L: f32 = 56.0;
const MARGIN_T: f32 = 24.0;
const MARGIN_B: f32 = 24.0;
const Y_TICKS: usize = 5;

const WEIGHT_NOTE: &str = "()内の数字はウェイト";

fn color_of(ix: usize) -> Color32 {
    PALETTE[ix % PALETTE.len()]
}

pub fn draw(ui: &mut egui::Ui, view: &PanelView, full_history: bool, height: f32) {
    let table = &view.shown;
    let size = vec2(ui.available_width(), height);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let full = response.rect;

    let first = view.window_start(full_history);
    let Some((lo, hi)) = view.y_range(first) else {
        let msg = if view.steps.is_empty() { "No data" } else { "No data for this selection / base month" };
        painter.text(full.center(), Align2::CENTER_CENTER, msg, FontId::proportional(14.0), ui.visuals().weak_text_color());
        return;
    };

    let text_color = ui.visuals().text_color();
    if let Some(title) = view.title() {
        painter.text(pos2(full.left() + 2.0, full.top()), Align2::LEFT_TOP, title, FontId::proportional(14.0), text_color);
    }
    painter.text(
        pos2(full.right() - LEGEND_W + 10.0, full.top() + 2.0),
        Align2::LEFT_TOP,
        WEIGHT_NOTE,
        FontId::proportional(11.0),
        ui.visuals().weak_text_color(),
    );

    let plot = Rect::from_min_max(
        pos2(full.left() + MARGIN_L, full.top() + MARGIN_T),
        pos2(full.right() - LEGEND_W, full.bottom() - MARGIN_B),
    );
    let grid = Stroke::new(0.5, ui.visuals().weak_text_color().gamma_multiply(0.5));
    painter.rect_stroke(plot, 0.0, grid, StrokeKind::Inside);

    let n = table.len();
    let shown = n - first;
    let x_of = |i: usize| -> f32 {
        if shown <= 1 { plot.center().x } else { plot.left() + plot.width() * (i - first) as f32 / (shown - 1) as f32 }
    };
    let y_of = |v: f64| -> f32 { plot.bottom() - plot.height() * ((v - lo) / (hi - lo)) as f32 };

    // y grid + labels
    for t in 0..=Y_TICKS {
        let v = lo + (hi - lo) * t as f64 / Y_TICKS as f64;
        let y = y_of(v);
        painter.line_segment([pos2(plot.left(), y), pos2(plot.right(), y)], grid);
        painter.text(pos2(plot.left() - 4.0, y), Align2::RIGHT_CENTER, format!("{v:.1}"), FontId::proportional(11.0), text_color);
    }
    if lo < 0.0 && hi > 0.0 {
        let y = y_of(0.0);
        painter.line_segment([pos2(plot.left(), y), pos2(plot.right(), y)], Stroke::new(1.0, text_color));
    }

    // x labels: every month in a short window, otherwise Januaries; thinned to fit
    let months = table.months();
    let monthly = shown <= 2 * CHART_WINDOW_MONTHS;
    for (i, m) in months.iter().enumerate().skip(first) {
        let label = if monthly {
            let every = ((shown as f32 * 52.0) / plot.width()).ceil().max(1.0) as usize;
            ((n - 1 - i) % every == 0).then(|| m.to_string())
        } else {
            let years = shown / 12 + 1;
            let every = ((years as f32 * 44.0) / plot.width()).ceil().max(1.0) as i32;
            (m.month() == 1 && m.year() % every == 0).then(|| m.year().to_string())
        };
        if let Some(label) = label {
            let x = x_of(i);
            painter.line_segment([pos2(x, plot.bottom()), pos2(x, plot.bottom() + 4.0)], grid);
            painter.text(pos2(x, plot.bottom() + 5.0), Align2::CENTER_TOP, label, FontId::proportional(11.0), text_color);
        }
    }

    // Children first so the selected item sits on top
    let cols = table.columns();
    for (ci, c) in cols.iter().enumerate().rev() {
        let width = if ci == 0 { 3.0 } else { 1.2 };
        let color = if ci == 0 { text_color } else { color_of(ci - 1) };
        let points: Vec<Pos2> = c
            .values
            .iter()
            .enumerate()
            .skip(first)
            .filter_map(|(i, v)| v.map(|v| pos2(x_of(i), y_of(v * 100.0))))
            .collect();
        painter.add(Shape::line(points, Stroke::new(width, color)));
    }

    draw_legend(&painter, view, pos2(plot.right() + 10.0, plot.top()), text_color);

    // Hover: nearest month in the window
    if let Some(p) = response.hover_pos().filter(|p| plot.contains(*p)) {
        let j = if shown <= 1 { 0 } else { (((p.x - plot.left()) / plot.width()) * (shown - 1) as f32).round() as usize };
        let i = first + j.min(shown - 1);
        let x = x_of(i);
        painter.line_segment([pos2(x, plot.top()), pos2(x, plot.bottom())], Stroke::new(1.0, text_color.gamma_multiply(0.4)));
        response.on_hover_ui_at_pointer(|ui| {
            ui.strong(months[i].to_string());
            for c in cols {
                if let Some(v) = c.values[i] {
                    ui.label(format!("{}: {:.2}%", c.name, v * 100.0));
                }
            }
        });
    }
}

fn draw_legend(painter: &egui::Painter, view: &PanelView, origin: Pos2, text_color: Color32) {
    let Some(step) = view.last() else { return };
    let font = FontId::proportional(11.0);
    let row_h = 15.0;
    let max_y = painter.clip_rect().bottom() - row_h;

    let mut y = origin.y;
    for (ci, c) in view.shown.columns().iter().enumerate() {
        if y > max_y {
            painter.text(pos2(origin.x, y), Align2::LEFT_TOP, "…", font.clone(), text_color);
            break;
        }
        let (color, label) = if ci == 0 {
            (text_color, c.name.clone())
        } else {
            let share = step.ratios.get(&c.name).copied().unwrap_or(0.0);
            (color_of(ci - 1), format!("{} ({:.1}%)", c.name, share * 100.0))
        };
        let swatch = Rect::from_min_size(pos2(origin.x, y + 4.0), Vec2::new(14.0, if ci == 0 { 3.0 } else { 2.0 }));
        painter.rect_filled(swatch, 0.0, color);
        painter.text(pos2(origin.x + 20.0, y), Align2::LEFT_TOP, label, font.clone(), text_color);
        y += row_h;
    }
}
