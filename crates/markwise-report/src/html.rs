//! HTML class summary.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined, including an
//! SVG chart of how often each topic ranked among students' weakest.

use std::path::Path;

use anyhow::Result;

use markwise_core::analytics::{ClassSummary, RankPosition};
use markwise_core::analyzer::analyze;
use markwise_core::compose::{format_number, TOPIC_SEPARATOR};
use markwise_core::roster::ClassState;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate the class summary page. `summary` is `None` when the class has
/// no eligible students; the page then shows a neutral empty state.
pub fn generate_html(state: &ClassState, summary: Option<&ClassSummary>, top_n: usize) -> String {
    let mut html = String::new();
    let scheme = state.scheme();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>markwise class summary — {}</title>\n",
        html_escape(scheme.name())
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Class summary</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Exam: <strong>{}</strong> | {} questions | {} students | {}</p>\n",
        html_escape(scheme.name()),
        scheme.len(),
        state.len(),
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    let Some(summary) = summary else {
        html.push_str("<section class=\"empty\">\n<p>No data: no students with scores matching this exam.</p>\n</section>\n");
        html.push_str("</body>\n</html>");
        return html;
    };

    // Statistics
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Overview</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Mean</th><th>Median</th><th>Highest</th><th>Lowest</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{}%</td><td>{}%</td><td>{}%</td><td>{}%</td></tr></tbody>\n",
        format_number(summary.mean),
        format_number(summary.median),
        format_number(summary.max),
        format_number(summary.min),
    ));
    html.push_str("</table>\n");

    if !summary.needs_assistance.is_empty() {
        html.push_str(&format!(
            "<h3>Needing additional assistance (below {}%)</h3>\n<ul class=\"assist\">\n",
            format_number(summary.assistance_threshold)
        ));
        for s in &summary.needs_assistance {
            html.push_str(&format!(
                "<li>{} ({}%)</li>\n",
                html_escape(&s.name),
                format_number(s.overall_percentage)
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");

    // Rank distribution
    if !summary.topic_ranks.is_empty() {
        html.push_str("<section class=\"ranks\">\n");
        html.push_str("<h2>Weakest topics across the class</h2>\n");
        html.push_str(&generate_rank_chart(summary));
        html.push_str("<table class=\"rank-table\">\n");
        html.push_str("<thead><tr><th>Topic</th><th>First</th><th>Second</th><th>Third</th><th>Total</th></tr></thead>\n<tbody>\n");
        for entry in &summary.topic_ranks {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                html_escape(&entry.topic),
                entry.first,
                entry.second,
                entry.third,
                entry.total
            ));
        }
        html.push_str("</tbody></table>\n</section>\n");
    }

    // Per-student results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Students</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Name</th><th onclick=\"sortTable(1)\">%</th><th onclick=\"sortTable(2)\">Weakest topics</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for record in state.records() {
        let row = match analyze(record, scheme, state.merger(), top_n) {
            Ok(analysis) => {
                let class = if analysis.overall_percentage < summary.assistance_threshold {
                    "fail"
                } else {
                    "pass"
                };
                format!(
                    "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    class,
                    html_escape(&record.name),
                    format_number(analysis.overall_percentage),
                    html_escape(&analysis.ranked_weak_topics.join(TOPIC_SEPARATOR))
                )
            }
            Err(e) => format!(
                "<tr class=\"excluded\"><td>{}</td><td>-</td><td>{}</td></tr>\n",
                html_escape(&record.name),
                html_escape(&e.to_string())
            ),
        };
        html.push_str(&row);
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(summary)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write the class summary page to a file.
pub fn write_html_report(
    state: &ClassState,
    summary: Option<&ClassSummary>,
    top_n: usize,
    path: &Path,
) -> Result<()> {
    crate::write_export(path, &generate_html(state, summary, top_n))
}

fn position_color(position: RankPosition) -> &'static str {
    match position {
        RankPosition::First => "#ef4444",
        RankPosition::Second => "#f97316",
        RankPosition::Third => "#eab308",
    }
}

/// Horizontal stacked bars, one per topic, segments per rank position.
fn generate_rank_chart(summary: &ClassSummary) -> String {
    let entries = &summary.topic_ranks;
    let rows = summary.rank_chart_rows();
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 240;
    let legend_height = 30;

    let max_total = entries.iter().map(|e| e.total).max().unwrap_or(0).max(1);
    let unit = max_width as f64 / max_total as f64;
    let total_height = entries.len() * (bar_height + padding) + padding + legend_height;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, position) in RankPosition::ALL.into_iter().enumerate() {
        let x = label_width + i * 100;
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"5\" width=\"14\" height=\"14\" fill=\"{}\"/>\n",
            x,
            position_color(position)
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"12\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            x + 20,
            position
        ));
    }

    for (i, entry) in entries.iter().enumerate() {
        let y = legend_height + i * (bar_height + padding) + padding;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&entry.topic)
        ));

        let mut x = label_width as f64;
        for (_, position, count) in rows.iter().filter(|(topic, _, _)| *topic == entry.topic) {
            let (position, count) = (*position, *count);
            let width = count as f64 * unit;
            svg.push_str(&format!(
                "  <rect x=\"{:.1}\" y=\"{}\" width=\"{:.1}\" height=\"{}\" fill=\"{}\"><title>{}: {}</title></rect>\n",
                x,
                y,
                width,
                bar_height,
                position_color(position),
                position,
                count
            ));
            x += width;
        }

        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            x + 8.0,
            y + bar_height / 2,
            entry.total
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --muted: #f3f4f6; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --muted: #1f2937; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.excluded { background: var(--muted); font-style: italic; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    if (!isNaN(na) && !isNaN(nb)) return asc ? na - nb : nb - na;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use markwise_core::analytics::{SummaryOptions, TopicRankEntry};
    use markwise_core::merge::TopicMerger;
    use markwise_core::scheme::ExamScheme;

    fn make_class() -> ClassState {
        let scheme = ExamScheme::preset("2nd Year Higher").unwrap();
        let mut state = ClassState::new(scheme, TopicMerger::standard());
        state
            .add_student("Aoife", vec![18.0, 20.0, 30.0, 31.0, 20.0, 20.0, 15.0, 25.0, 9.0, 12.0])
            .unwrap();
        state
            .add_student("<Brian>", vec![8.0, 10.0, 20.0, 11.0, 5.0, 10.0, 9.0, 12.0, 3.0, 7.0])
            .unwrap();
        state.add_student("Short", vec![1.0, 2.0]).unwrap();
        state
    }

    #[test]
    fn html_report_contains_required_elements() {
        let state = make_class();
        let summary = state.summarize(&SummaryOptions::default()).unwrap();
        let html = generate_html(&state, Some(&summary), 3);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("2nd Year Higher"));
        assert!(html.contains("Aoife"));
        assert!(html.contains("&lt;Brian&gt;"));
        assert!(!html.contains("<Brian>"));
        assert!(html.contains("<svg"));
        assert!(html.contains("Area, perimeter and volume"));
        assert!(html.contains("incompatible with the current exam scheme"));
        assert!(html.contains("Needing additional assistance"));
    }

    #[test]
    fn html_empty_state_has_no_chart() {
        let scheme = ExamScheme::preset("5th Year").unwrap();
        let state = ClassState::new(scheme, TopicMerger::standard());
        let html = generate_html(&state, None, 3);
        assert!(html.contains("No data"));
        assert!(!html.contains("<svg"));
    }

    fn summary_with_ranks(topic_ranks: Vec<TopicRankEntry>) -> ClassSummary {
        ClassSummary {
            students: vec![],
            mean: 0.0,
            median: 0.0,
            max: 0.0,
            min: 0.0,
            assistance_threshold: 40.0,
            needs_assistance: vec![],
            topic_ranks,
            excluded: vec![],
        }
    }

    #[test]
    fn chart_has_one_bar_label_per_topic() {
        let summary = summary_with_ranks(vec![
            TopicRankEntry {
                topic: "Algebra".into(),
                first: 2,
                second: 1,
                third: 0,
                total: 3,
            },
            TopicRankEntry {
                topic: "Number".into(),
                first: 0,
                second: 0,
                third: 1,
                total: 1,
            },
        ]);
        let svg = generate_rank_chart(&summary);
        assert!(svg.contains(">Algebra</text>"));
        assert!(svg.contains(">Number</text>"));
        // 3 legend swatches + 3 non-zero segments
        assert_eq!(svg.matches("<rect").count(), 6);
        assert!(svg.contains("<title>First: 2</title>"));
        assert!(svg.contains("<title>Third: 1</title>"));
        assert!(!svg.contains("<title>Third: 0</title>"));
    }

    #[test]
    fn html_report_write_to_file() {
        let state = make_class();
        let summary = state.summarize(&SummaryOptions::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.html");

        write_html_report(&state, Some(&summary), 3, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
