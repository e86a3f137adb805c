/// Output formatting: table, JSON and custom-template modes.
use std::io::Write;

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use console::style;
use serde::Serialize;
use serde::ser::SerializeMap;
use tracing::debug;

use super::args::OutputFormat;
use crate::cloud::CloudError;

/// Output context passed to all commands.
#[derive(Debug, Clone)]
pub struct OutputCtx {
    pub format: OutputFormat,
    /// Template for [`OutputFormat::Custom`]. Always set in custom mode.
    pub fields: Option<String>,
    pub pretty: bool,
    pub no_header: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    ///
    /// # Errors
    ///
    /// Returns `CloudError::InvalidFlag` when `-o custom` is used without `--fields`.
    pub fn new(
        format: OutputFormat,
        fields: Option<&str>,
        pretty: bool,
        no_header: bool,
    ) -> Result<Self, CloudError> {
        let fields = fields.filter(|f| !f.trim().is_empty()).map(str::to_owned);
        if format == OutputFormat::Custom && fields.is_none() {
            return Err(CloudError::InvalidFlag(
                "'-o custom' needs a template, pass it with '--fields'".to_owned(),
            ));
        }
        Ok(Self {
            format,
            fields,
            pretty,
            no_header,
        })
    }

    /// Start a named timer that logs its elapsed time at debug level on drop.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label)
    }

    /// The custom-output template (empty outside custom mode).
    #[must_use]
    pub fn template(&self) -> &str {
        self.fields.as_deref().unwrap_or_default()
    }
}

/// Collects rows of `key = value` cells for rendering in any output format.
///
/// Keys (used by JSON and custom output) and labels (table headers) are taken
/// from the first row; later rows are expected to append the same keys in the
/// same order.
#[derive(Debug, Default)]
pub struct OutputWriter {
    keys: Vec<String>,
    labels: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl OutputWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new row.
    pub fn start_line(&mut self) {
        self.rows.push(Vec::new());
    }

    /// Append a cell whose table header is the key itself.
    pub fn append_data(&mut self, key: &str, value: impl Into<String>) {
        self.append_data_with_label(key, value, key);
    }

    /// Append a cell to the current row.
    pub fn append_data_with_label(&mut self, key: &str, value: impl Into<String>, label: &str) {
        if self.rows.is_empty() {
            self.start_line();
        }
        if self.rows.len() == 1 {
            self.keys.push(key.to_owned());
            self.labels.push(label.to_owned());
        }
        if let Some(row) = self.rows.last_mut() {
            row.push(value.into());
        }
    }

    /// Render a list result in the context's format.
    ///
    /// # Errors
    ///
    /// Returns `CloudError::Io` if writing fails.
    pub fn write(&self, ctx: &OutputCtx, out: &mut dyn Write) -> Result<(), CloudError> {
        match ctx.format {
            OutputFormat::Json => self.write_multiple_objects_json(out, ctx.pretty),
            OutputFormat::Custom => self.write_custom_output(out, ctx.template()),
            OutputFormat::Human => self.write_table(out, ctx.no_header),
        }
    }

    /// Write all rows as a table.
    ///
    /// # Errors
    ///
    /// Returns `CloudError::Io` if writing fails.
    pub fn write_table(&self, out: &mut dyn Write, no_header: bool) -> Result<(), CloudError> {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        if !no_header {
            table.set_header(&self.labels);
        }
        for row in &self.rows {
            table.add_row(row);
        }
        writeln!(out, "{table}")?;
        Ok(())
    }

    /// Write the first row as one JSON object.
    ///
    /// # Errors
    ///
    /// Returns `CloudError::Io` if serialization or writing fails.
    pub fn write_single_object_json(
        &self,
        out: &mut dyn Write,
        pretty: bool,
    ) -> Result<(), CloudError> {
        let first = self.rows.first().map_or(&[][..], Vec::as_slice);
        write_json(out, &self.object(first), pretty)
    }

    /// Write every row as a JSON array of objects.
    ///
    /// # Errors
    ///
    /// Returns `CloudError::Io` if serialization or writing fails.
    pub fn write_multiple_objects_json(
        &self,
        out: &mut dyn Write,
        pretty: bool,
    ) -> Result<(), CloudError> {
        let objects: Vec<RowObject<'_>> = self.rows.iter().map(|r| self.object(r)).collect();
        write_json(out, &objects, pretty)
    }

    /// Write one line per row, rendered from `template`.
    ///
    /// # Errors
    ///
    /// Returns `CloudError::Io` if writing fails.
    pub fn write_custom_output(&self, out: &mut dyn Write, template: &str) -> Result<(), CloudError> {
        for row in &self.rows {
            writeln!(out, "{}", render_custom(template, &self.keys, row))?;
        }
        Ok(())
    }

    fn object<'a>(&'a self, values: &'a [String]) -> RowObject<'a> {
        RowObject {
            keys: &self.keys,
            values,
        }
    }
}

/// A row serialized as a JSON object with keys in insertion order.
struct RowObject<'a> {
    keys: &'a [String],
    values: &'a [String],
}

impl Serialize for RowObject<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in self.keys.iter().zip(self.values) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Replace every occurrence of a key in `template` with the row's value.
///
/// At each position the longest matching key wins, so `firewall_id` is never
/// split into `firewall_` + `id`. Literal `\t` and `\n` become tab and newline.
#[must_use]
pub fn render_custom(template: &str, keys: &[String], values: &[String]) -> String {
    let template = template.replace("\\t", "\t").replace("\\n", "\n");

    let mut by_length: Vec<usize> = (0..keys.len()).filter(|&i| !keys[i].is_empty()).collect();
    by_length.sort_by(|&a, &b| keys[b].len().cmp(&keys[a].len()));

    let mut rendered = String::with_capacity(template.len());
    let mut rest = template.as_str();
    while !rest.is_empty() {
        if let Some(&i) = by_length.iter().find(|&&i| rest.starts_with(keys[i].as_str())) {
            rendered.push_str(values.get(i).map_or("", String::as_str));
            rest = &rest[keys[i].len()..];
            continue;
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            rendered.push(c);
        }
        rest = chars.as_str();
    }
    rendered
}

/// Serialize `value` as JSON followed by a newline.
///
/// # Errors
///
/// Returns `CloudError::Io` if serialization or writing fails.
pub fn write_json<T: Serialize + ?Sized>(
    out: &mut dyn Write,
    value: &T,
    pretty: bool,
) -> Result<(), CloudError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// `"Yes"` / `"No"` for table cells.
#[must_use]
pub fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &crate::types::ErrorOutput, format: OutputFormat) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match format {
        OutputFormat::Json => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        OutputFormat::Human | OutputFormat::Custom => {
            let _ = writeln!(
                out,
                "{} {}",
                style("Error:").red().bold().for_stderr(),
                err.error.message
            );
            if let Some(candidates) = &err.error.candidates {
                let _ = writeln!(out, "  Candidates:");
                for c in candidates {
                    let _ = writeln!(out, "    {c}");
                }
            }
        }
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Visible with `--debug` or `RUST_LOG=debug`.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        debug!(label = self.label, elapsed_ms = ms, "timing");
    }
}
