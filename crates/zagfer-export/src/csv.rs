//! CSV table export with spreadsheet-friendly quoting.
//!
//! Every field, headers included, is double-quoted with embedded quotes
//! doubled, and the output starts with a UTF-8 BOM so Excel picks the
//! right encoding. Accessors return `None` for absent values, which
//! render as empty quoted fields.

/// UTF-8 byte order mark prepended to every export.
const BOM: &str = "\u{feff}";

/// One output column: a header plus an accessor into the row type.
pub struct Column<T> {
    header: String,
    accessor: Box<dyn Fn(&T) -> Option<String> + Send + Sync>,
}

impl<T> Column<T> {
    pub fn new(
        header: impl Into<String>,
        accessor: impl Fn(&T) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            header: header.into(),
            accessor: Box::new(accessor),
        }
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Render `rows` as CSV bytes. With no rows the output still carries the
/// BOM and header line.
pub fn export_table<T>(rows: &[T], columns: &[Column<T>]) -> Vec<u8> {
    let header = columns
        .iter()
        .map(|c| quote(&c.header))
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(header);
    for row in rows {
        let line = columns
            .iter()
            .map(|c| quote(&(c.accessor)(row).unwrap_or_default()))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    let mut out = String::from(BOM);
    out.push_str(&lines.join("\n"));
    out.into_bytes()
}
