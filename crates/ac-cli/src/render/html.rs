//! Standalone HTML page presenter.

use super::{ActivityCard, Card, Dashboard, Section, TABLE_TITLE, Table, sections};

const STYLE: &str = r"
    body { font-family: sans-serif; margin: 0 1.5rem 1.5rem; }
    header { position: sticky; top: 0; background: white; z-index: 100;
             box-shadow: 0 2px 4px rgba(0,0,0,0.1); padding: 1rem 0 0.5rem; }
    nav a { margin-right: 1.5rem; font-weight: bold; color: #333; text-decoration: none; }
    .generated { color: #555; font-size: 12px; }
    .notice { background: #fff3cd; border: 1px solid #e0c36c; padding: 8px 12px; border-radius: 8px; }
    .grid { display: grid; gap: 6px; }
    .card { background-color: #f0f0f0; padding: 16px; border-radius: 12px; text-align: center;
            box-shadow: 0 4px 6px rgba(0,0,0,0.2); margin: 6px; }
    .title { font-weight: bold; margin-bottom: -4px; }
    .activity { font-size: 16px; color: #555; }
    .countdown { font-weight: bold; font-size: 48px; }
    .status { font-weight: bold; font-size: 32px; min-height: 1em; }
    .delayed { color: red; }
    .details { font-size: 12px; text-align: left; }
    .scroll-table { overflow-x: auto; }
    table { border-collapse: collapse; width: 100%; font-size: 13px; }
    th, td { border: 1px solid #ddd; padding: 4px 8px; text-align: left; white-space: nowrap; }
";

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn render_activity_card(card: &ActivityCard) -> String {
    let delayed = if card.is_delayed() { " delayed" } else { "" };
    format!(
        "<div class=\"card\">\
         <div class=\"title\">{code}</div>\
         <div class=\"activity\">{activity}</div>\
         <div class=\"countdown{delayed}\">{countdown}</div>\
         <div class=\"status{delayed}\">{label}</div>\
         <div class=\"details\">\
         <b>Plan Start:</b> {plan_start}<br>\
         <b>Plan End:</b> {plan_end}<br>\
         <b>Actual Start:</b> {actual_start}\
         </div></div>",
        code = escape_html(&card.code),
        activity = escape_html(&card.activity),
        countdown = escape_html(&card.countdown),
        label = card.label(),
        plan_start = escape_html(&card.plan_start),
        plan_end = escape_html(&card.plan_end),
        actual_start = escape_html(&card.actual_start),
    )
}

/// Renders one card.
pub fn render_card(card: &Card) -> String {
    match card {
        Card::Activity(card) => render_activity_card(card),
        Card::Error { message } => format!(
            "<div class=\"card\"><b>Error:</b> {}</div>",
            escape_html(message)
        ),
    }
}

fn render_section(id: &str, section: &Section) -> String {
    let cards: String = section.cards.iter().map(render_card).collect();
    format!(
        "<section id=\"{id}\"><h2>{title}</h2>\
         <div class=\"grid\" style=\"grid-template-columns: repeat({columns}, 1fr);\">{cards}</div>\
         </section>\n",
        title = section.title,
        columns = section.columns,
    )
}

/// Renders the table section.
pub fn render_table(table: &Table) -> String {
    let headers: String = table
        .headers
        .iter()
        .map(|header| format!("<th>{}</th>", escape_html(header)))
        .collect();
    let rows: String = table
        .rows
        .iter()
        .map(|(number, cells)| {
            let cells: String = cells
                .iter()
                .map(|cell| format!("<td>{}</td>", escape_html(cell)))
                .collect();
            format!("<tr><th>{number}</th>{cells}</tr>")
        })
        .collect();

    format!(
        "<section id=\"table\"><h2>{TABLE_TITLE}</h2><div class=\"scroll-table\">\
         <table><thead><tr><th></th>{headers}</tr></thead><tbody>{rows}</tbody></table>\
         </div></section>\n"
    )
}

/// Renders the full page. The page reloads itself every `refresh_secs` seconds.
pub fn render_page(dashboard: &Dashboard<'_>, refresh_secs: u64) -> String {
    let title = escape_html(dashboard.title);
    let mut page = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"{refresh_secs}\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<header>\n\
         <h1>{title}</h1>\n<div class=\"generated\">Updated {generated}</div>\n",
        generated = dashboard.generated_at_text(),
    );

    if let Some(notice) = &dashboard.notice {
        page.push_str(&format!(
            "<div class=\"notice\">{}</div>\n",
            escape_html(notice)
        ));
    }

    let sections = sections(&dashboard.buckets);
    let ids = ["main", "parallel", "delay"];
    page.push_str("<nav>");
    for (id, section) in ids.iter().zip(&sections) {
        page.push_str(&format!("<a href=\"#{id}\">{}</a>", section.title));
    }
    page.push_str(&format!("<a href=\"#table\">{TABLE_TITLE}</a></nav>\n</header>\n"));

    for (id, section) in ids.iter().zip(&sections) {
        page.push_str(&render_section(id, section));
    }
    page.push_str(&render_table(&Table::from_records(dashboard.records)));
    page.push_str("</body>\n</html>\n");
    page
}
