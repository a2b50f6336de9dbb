use crate::core::{StockRecord, ValuedRecord, HEADERS};

const MENU_WIDTH: usize = 46;

const MENU_OPTIONS: [&str; 7] = [
    "Add a new record to stock",
    "View all records in stock",
    "Restock the lowest-stock record",
    "Search for a record by product code",
    "View total stock value of each record",
    "Display record with highest stock",
    "Exit the Stock App",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// ANSI escape codes for the menu; all empty when colour is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub blue: &'static str,
    pub green: &'static str,
    pub cyan: &'static str,
    pub bold: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        if color {
            Self {
                blue: "\x1b[94m",
                green: "\x1b[92m",
                cyan: "\x1b[96m",
                bold: "\x1b[1m",
                reset: "\x1b[0m",
            }
        } else {
            Self::plain()
        }
    }

    pub fn plain() -> Self {
        Self {
            blue: "",
            green: "",
            cyan: "",
            bold: "",
            reset: "",
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::plain()
    }
}

pub fn main_menu(palette: &Palette) -> String {
    let Palette {
        blue,
        green,
        cyan,
        bold,
        reset,
    } = *palette;
    let rule = "═".repeat(MENU_WIDTH);

    let mut lines = vec![
        format!("{bold}{cyan}╔{rule}╗{reset}"),
        format!(
            "{bold}{cyan}║{reset}{bold}{blue}{:^width$}{reset}{cyan}║{reset}",
            "STOCK MANAGEMENT MENU",
            width = MENU_WIDTH
        ),
        format!("{bold}{cyan}╠{rule}╣{reset}"),
    ];
    for (i, label) in MENU_OPTIONS.iter().enumerate() {
        lines.push(format!(
            "{bold}{cyan}║{reset}  {green}{}.{reset} {:<width$}{cyan}║{reset}",
            i + 1,
            label,
            width = MENU_WIDTH - 5
        ));
    }
    lines.push(format!("{bold}{cyan}╚{rule}╝{reset}"));
    lines.join("\n")
}

/// Renders rows in a box-drawing outline: ruled header, no rules between rows.
pub fn render_table(headers: &[&str], rows: &[Vec<String>], align: &[Align]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut lines = vec![
        border(&widths, '╒', '═', '╤', '╕'),
        table_row(&header_cells, &widths, align),
        border(&widths, '╞', '═', '╪', '╡'),
    ];
    for row in rows {
        lines.push(table_row(row, &widths, align));
    }
    lines.push(border(&widths, '╘', '═', '╧', '╛'));
    lines.join("\n")
}

fn border(widths: &[usize], left: char, fill: char, joint: char, right: char) -> String {
    let segments: Vec<String> = widths
        .iter()
        .map(|w| fill.to_string().repeat(w + 2))
        .collect();
    let joint = joint.to_string();
    format!("{left}{}{right}", segments.join(joint.as_str()))
}

fn table_row(cells: &[String], widths: &[usize], align: &[Align]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| match align.get(i).copied().unwrap_or(Align::Left) {
            Align::Left => format!(" {:<width$} ", cell),
            Align::Right => format!(" {:>width$} ", cell),
        })
        .collect();
    format!("│{}│", padded.join("│"))
}

pub fn records_table(records: &[StockRecord]) -> String {
    let rows: Vec<Vec<String>> = records.iter().map(|r| r.fields().to_vec()).collect();
    render_table(&HEADERS, &rows, &column_alignment(HEADERS.len()))
}

pub fn value_table(items: &[ValuedRecord<'_>]) -> String {
    let headers = ["Country", "Code", "Product", "Cost", "Quantity", "Value"];
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            let mut row = item.record.fields().to_vec();
            row.push(group_thousands(item.value));
            row
        })
        .collect();
    render_table(&headers, &rows, &column_alignment(headers.len()))
}

/// Text columns left, numeric columns (cost onwards) right.
fn column_alignment(columns: usize) -> Vec<Align> {
    (0..columns)
        .map(|i| if i < 3 { Align::Left } else { Align::Right })
        .collect()
}

/// `1234567` -> `1,234,567`.
pub fn group_thousands(value: i128) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(2000), "2,000");
        assert_eq!(group_thousands(1_000_000), "1,000,000");
        assert_eq!(group_thousands(-1_234_567), "-1,234,567");
    }

    #[test]
    fn test_records_table_layout() {
        let records = vec![
            StockRecord::new("China", "SKU1", "Jordan 1", 3200, 50),
            StockRecord::new("Vietnam", "SKU22", "Blazer", 1700, 5),
        ];

        let table = records_table(&records);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(
            lines,
            vec![
                "╒═════════╤═══════╤══════════╤══════╤══════════╕",
                "│ Country │ Code  │ Product  │ Cost │ Quantity │",
                "╞═════════╪═══════╪══════════╪══════╪══════════╡",
                "│ China   │ SKU1  │ Jordan 1 │ 3200 │       50 │",
                "│ Vietnam │ SKU22 │ Blazer   │ 1700 │        5 │",
                "╘═════════╧═══════╧══════════╧══════╧══════════╛",
            ]
        );
    }

    #[test]
    fn test_value_table_groups_digits() {
        let record = StockRecord::new("USA", "SKU9", "Pegasus", 100, 10_000);
        let items = vec![ValuedRecord {
            record: &record,
            value: record.value(),
        }];

        let table = value_table(&items);

        assert!(table.contains("│     Value │"));
        assert!(table.contains("│ 1,000,000 │"));
    }

    #[test]
    fn test_plain_menu_lines_have_equal_width() {
        let menu = main_menu(&Palette::plain());
        let widths: Vec<usize> = menu.lines().map(|l| l.chars().count()).collect();

        assert_eq!(widths.len(), 11);
        assert!(widths.iter().all(|&w| w == MENU_WIDTH + 2));
        assert!(menu.contains("7. Exit the Stock App"));
    }
}
