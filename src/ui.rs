use crate::chart::short_label;
use crate::models::{ChartResponse, DerivedSummary, Entry, Metric, Targets};
use crate::summary::ratio;
use chrono::Local;
use std::fmt::Write;

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 240.0;
const PAD_LEFT: f64 = 52.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 14.0;
const PAD_BOTTOM: f64 = 30.0;

pub struct IndexView<'a> {
    pub entries: Vec<&'a Entry>,
    pub summary: DerivedSummary,
    pub charts: Vec<ChartResponse>,
    pub targets: Targets,
    pub editing: Option<&'a Entry>,
}

pub fn render_index(view: &IndexView<'_>) -> String {
    let charts: String = view.charts.iter().map(render_chart).collect();
    INDEX_HTML
        .replace("{{SUMMARY}}", &render_summary(&view.summary, &view.targets))
        .replace("{{FORM}}", &render_form(view.editing))
        .replace("{{CHARTS}}", &charts)
        .replace("{{ENTRIES}}", &render_entries(&view.entries))
}

fn render_summary(summary: &DerivedSummary, targets: &Targets) -> String {
    let latest = summary.latest.as_ref();
    let mut html = String::new();
    for metric in Metric::ALL {
        let decimals = decimals(metric);
        let delta = match metric {
            Metric::Po4 => summary.delta_po4,
            Metric::No3 => summary.delta_no3,
        };
        let target = targets.for_metric(metric);
        let _ = write!(
            html,
            r#"<div class="stat"><span class="label">Latest {label}</span><span class="value">{value}</span><span class="hint">{delta} vs previous &middot; target {min}&ndash;{max} {unit}</span></div>"#,
            label = metric.label(),
            value = number(latest.and_then(|entry| metric.value_of(entry)), decimals),
            delta = signed(delta, decimals),
            min = target.min,
            max = target.max,
            unit = metric.unit(),
        );
    }
    let _ = write!(
        html,
        r#"<div class="stat"><span class="label">NO3:PO4 now</span><span class="value">{current}</span><span class="hint">average {average}</span></div>"#,
        current = number(summary.current_ratio, 0),
        average = number(summary.average_ratio, 0),
    );
    html
}

fn render_form(editing: Option<&Entry>) -> String {
    let (action, title, date, po4, no3, notes) = match editing {
        Some(entry) => (
            format!("/entries/{}", escape(&entry.id)),
            "Edit reading",
            entry.date.to_string(),
            entry.po4.map(|v| v.to_string()).unwrap_or_default(),
            entry.no3.map(|v| v.to_string()).unwrap_or_default(),
            escape(&entry.notes),
        ),
        None => (
            "/entries".to_string(),
            "Add reading",
            Local::now().date_naive().to_string(),
            String::new(),
            String::new(),
            String::new(),
        ),
    };
    let cancel = if editing.is_some() {
        r#"<a class="link" href="/">Cancel</a>"#
    } else {
        ""
    };

    format!(
        r#"<form class="entry-form" method="post" action="{action}">
      <h2>{title}</h2>
      <label>Date <input type="date" name="date" value="{date}" required /></label>
      <label>PO4 (ppm) <input type="number" name="po4" step="0.001" min="0" value="{po4}" /></label>
      <label>NO3 (ppm) <input type="number" name="no3" step="0.1" min="0" value="{no3}" /></label>
      <label class="wide">Notes <input type="text" name="notes" value="{notes}" /></label>
      <div class="actions"><button type="submit">Save</button>{cancel}</div>
    </form>"#
    )
}

fn render_chart(chart: &ChartResponse) -> String {
    let plot_w = CHART_WIDTH - PAD_LEFT - PAD_RIGHT;
    let plot_h = CHART_HEIGHT - PAD_TOP - PAD_BOTTOM;
    let px = |fraction: f64| PAD_LEFT + fraction * plot_w;
    let py = |fraction: f64| CHART_HEIGHT - PAD_BOTTOM - fraction * plot_h;
    let projection = &chart.projection;
    let decimals = decimals(chart.metric);

    let mut svg = String::new();
    if let Some(band) = projection.band.filter(|band| band.high > band.low) {
        let _ = write!(
            svg,
            r#"<rect class="chart-band" x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" />"#,
            x = PAD_LEFT,
            y = py(band.high),
            w = plot_w,
            h = (band.high - band.low) * plot_h,
        );
    }
    for fraction in chart.grid {
        let value = projection.y_min + fraction * (projection.y_max - projection.y_min);
        let _ = write!(
            svg,
            r#"<line class="chart-grid" x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" /><text class="chart-label" x="{lx:.2}" y="{ly:.2}" text-anchor="end">{value:.decimals$}</text>"#,
            x1 = PAD_LEFT,
            x2 = CHART_WIDTH - PAD_RIGHT,
            y = py(fraction),
            lx = PAD_LEFT - 8.0,
            ly = py(fraction) + 4.0,
        );
    }

    if projection.points.is_empty() {
        let _ = write!(
            svg,
            r#"<text class="chart-empty" x="{x:.2}" y="{y:.2}" text-anchor="middle">No {label} readings yet</text>"#,
            x = CHART_WIDTH / 2.0,
            y = CHART_HEIGHT / 2.0,
            label = chart.metric.label(),
        );
    } else {
        let path: Vec<String> = projection
            .points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let command = if i == 0 { 'M' } else { 'L' };
                format!("{command} {:.2} {:.2}", px(point.x), py(point.y))
            })
            .collect();
        let _ = write!(svg, r#"<path class="chart-line" d="{}" />"#, path.join(" "));

        for (i, (point, source)) in projection.points.iter().zip(&chart.series.points).enumerate() {
            let _ = write!(
                svg,
                r#"<circle class="chart-point" cx="{cx:.2}" cy="{cy:.2}" r="4"><title>{date}: {value}</title></circle>"#,
                cx = px(point.x),
                cy = py(point.y),
                date = source.date,
                value = point.value,
            );
            if i % chart.label_stride == 0 {
                let _ = write!(
                    svg,
                    r#"<text class="chart-label" x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
                    x = px(point.x),
                    y = CHART_HEIGHT - PAD_BOTTOM + 18.0,
                    label = short_label(source.date),
                );
            }
        }
    }

    format!(
        r#"<section class="chart-card">
      <h2>{label} trend <small>({unit}, target {min}&ndash;{max})</small></h2>
      <svg class="chart" viewBox="0 0 {w} {h}" role="img" aria-label="{label} trend">{svg}</svg>
    </section>"#,
        label = chart.metric.label(),
        unit = chart.unit,
        min = chart.target.min,
        max = chart.target.max,
        w = CHART_WIDTH,
        h = CHART_HEIGHT,
    )
}

fn render_entries(entries: &[&Entry]) -> String {
    if entries.is_empty() {
        return r#"<p class="empty">No readings yet. Add one above.</p>"#.to_string();
    }

    let mut rows = String::new();
    for entry in entries {
        let id = escape(&entry.id);
        let _ = write!(
            rows,
            r#"<tr><td>{date}</td><td>{po4}</td><td>{no3}</td><td>{ratio}</td><td>{notes}</td><td class="row-actions"><a class="link" href="/?edit={id}">Edit</a><form method="post" action="/entries/{id}/delete"><button class="danger" type="submit">Delete</button></form></td></tr>"#,
            date = entry.date,
            po4 = number(entry.po4, decimals(Metric::Po4)),
            no3 = number(entry.no3, decimals(Metric::No3)),
            ratio = number(ratio(entry), 0),
            notes = escape(&entry.notes),
        );
    }

    format!(
        r#"<table class="entries"><thead><tr><th>Date</th><th>PO4</th><th>NO3</th><th>NO3:PO4</th><th>Notes</th><th></th></tr></thead><tbody>{rows}</tbody></table>"#
    )
}

fn decimals(metric: Metric) -> usize {
    match metric {
        Metric::Po4 => 3,
        Metric::No3 => 1,
    }
}

fn number(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(value) => format!("{value:.decimals$}"),
        None => "n/a".to_string(),
    }
}

fn signed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(value) => format!("{value:+.decimals$}"),
        None => "n/a".to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Nutrient Tracker</title>
  <style>
    :root {
      --bg: #eaf4f4;
      --ink: #1f2d3a;
      --accent: #1b8a9c;
      --band: rgba(64, 176, 120, 0.18);
      --card: #ffffff;
      --muted: #6b7b88;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: linear-gradient(160deg, var(--bg), #d5ecef);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .stat, .chart-card, .entry-form, .entries {
      background: var(--card);
      border-radius: 16px;
      padding: 18px;
      box-shadow: 0 12px 30px rgba(31, 45, 58, 0.08);
    }

    .stat span {
      display: block;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent);
    }

    .stat .hint {
      font-size: 0.85rem;
      color: var(--muted);
    }

    .entry-form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 12px;
    }

    .entry-form h2, .entry-form .wide, .entry-form .actions {
      grid-column: 1 / -1;
    }

    .entry-form input {
      width: 100%;
      padding: 8px;
      border: 1px solid #c8d6dc;
      border-radius: 8px;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      background: var(--accent);
      color: white;
      font-weight: 600;
      cursor: pointer;
    }

    button.danger {
      background: #c0504d;
      padding: 6px 12px;
    }

    .link {
      margin: 0 10px;
      color: var(--accent);
    }

    .chart {
      width: 100%;
      height: auto;
    }

    .chart-band {
      fill: var(--band);
    }

    .chart-grid {
      stroke: #dde6ea;
    }

    .chart-label, .chart-empty {
      fill: var(--muted);
      font-size: 11px;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 2.5;
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .entries {
      width: 100%;
      border-collapse: collapse;
    }

    .entries th, .entries td {
      text-align: left;
      padding: 8px;
      border-bottom: 1px solid #edf2f4;
    }

    .row-actions {
      display: flex;
      align-items: center;
    }

    .row-actions form {
      margin: 0;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Nutrient Tracker</h1>
      <p class="subtitle">Phosphate and nitrate readings against target ranges.</p>
    </header>
    <section class="panel">{{SUMMARY}}</section>
    {{FORM}}
    {{CHARTS}}
    <section>
      <h2>History</h2>
      {{ENTRIES}}
    </section>
  </main>
</body>
</html>
"#;
