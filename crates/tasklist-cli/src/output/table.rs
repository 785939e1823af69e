#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN_WIDTH: usize = 4;
const SEPARATOR: &str = "  ";

/// Render an aligned table of string rows.
#[must_use]
pub fn render_entity_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    shrink_to_fit(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map_or("-", String::as_str);
                let cell = pad(&truncate(cell, *width), *width);
                if options.color { colorize(&cell) } else { cell }
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        lines.push(line);
    }
    lines.join("\n")
}

/// Narrow the widest columns one character at a time until the table fits.
fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].len().max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{value}{}", " ".repeat(width.saturating_sub(len)))
}

/// Color whole cells whose trimmed text is a known task state.
fn colorize(cell: &str) -> String {
    let code = match cell.trim() {
        "done" | "healthy" => Some("32"),
        "open" => Some("33"),
        "overdue" => Some("31"),
        _ => None,
    };
    code.map_or_else(|| cell.to_string(), |code| format!("\u{1b}[{code}m{cell}\u{1b}[0m"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let rows = vec![vec![
            "tsk-00000001".to_string(),
            "a title that is far too long for the terminal".to_string(),
        ]];
        let table = render_entity_table(
            &["id", "title"],
            &rows,
            TableOptions {
                max_width: Some(30),
                color: false,
            },
        );
        let row = table.lines().nth(2).unwrap();
        assert!(row.chars().count() <= 30);
        assert!(row.contains('…'));
        assert!(row.starts_with("tsk-00000001"));
    }

    #[test]
    fn color_marks_overdue_cells() {
        let rows = vec![vec!["overdue".to_string()]];
        let table = render_entity_table(
            &["state"],
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(table.contains("\u{1b}[31m"));
    }
}
