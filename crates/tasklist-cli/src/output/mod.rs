use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&["field", "value"], &rows, table_options()))
        }
        scalar => Ok(table::render_entity_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            table_options(),
        )),
    }
}

/// Columns follow the field order of the first row.
fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no tasks)");
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, table_options());
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => if *v { "yes" } else { "no" }.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::{render, table::render_entity_table};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        id: &'static str,
        title: &'static str,
        is_done: bool,
        due_date: Option<&'static str>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: "tsk-00000001",
                title: "Buy milk",
                is_done: false,
                due_date: Some("2099-01-01T09:00:00Z"),
            },
            Row {
                id: "tsk-00000002",
                title: "Call mum",
                is_done: true,
                due_date: None,
            },
        ]
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&rows(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed[0]["id"], "tsk-00000001");
        assert_eq!(parsed[1]["is_done"], true);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&rows(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_columns_keep_field_order() {
        let out = render(&rows(), OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header line");
        let id_at = header.find("id").expect("id column");
        let title_at = header.find("title").expect("title column");
        let done_at = header.find("is_done").expect("is_done column");
        assert!(id_at < title_at && title_at < done_at);
        assert!(out.contains("Buy milk"));
        assert!(out.lines().nth(3).is_some_and(|line| line.contains("yes")));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let out = render(&Vec::<Row>::new(), OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no tasks)");
    }

    #[test]
    fn table_alignment_handles_mixed_widths() {
        let headers = ["id", "status", "title"];
        let rows = vec![
            vec!["tsk-1".to_string(), "open".to_string(), "short".to_string()],
            vec![
                "tsk-200".to_string(),
                "overdue".to_string(),
                "a much longer title".to_string(),
            ],
        ];

        let table = render_entity_table(
            &headers,
            &rows,
            super::table::TableOptions {
                max_width: None,
                color: false,
            },
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2].len(), lines[3].len());
    }
}
