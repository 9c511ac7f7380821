use console::{measure_text_width, pad_str, Alignment};
use std::io::{self, Write};

/// Rounded box drawing characters.
mod border {
    pub const TOP_LEFT: &str = "╭";
    pub const TOP_RIGHT: &str = "╮";
    pub const BOTTOM_LEFT: &str = "╰";
    pub const BOTTOM_RIGHT: &str = "╯";
    pub const HORIZONTAL: &str = "─";
    pub const VERTICAL: &str = "│";
    pub const TOP_TEE: &str = "┬";
    pub const BOTTOM_TEE: &str = "┴";
    pub const LEFT_TEE: &str = "├";
    pub const RIGHT_TEE: &str = "┤";
    pub const CROSS: &str = "┼";
}

type Paint = Box<dyn Fn(&str) -> String>;

pub struct Column {
    header: String,
    style: Option<Paint>,
}

impl Column {
    pub fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
            style: None,
        }
    }

    /// Style applied to every line of the column's cells.
    pub fn style(mut self, paint: impl Fn(&str) -> String + 'static) -> Self {
        self.style = Some(Box::new(paint));
        self
    }
}

/// A table of multi-line cells, with a blank line between rows. Cell text may
/// already carry ANSI styling; widths are measured without it.
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    header_style: Option<Paint>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            header_style: None,
        }
    }

    pub fn header_style(mut self, paint: impl Fn(&str) -> String + 'static) -> Self {
        self.header_style = Some(Box::new(paint));
        self
    }

    /// Missing cells render empty, extra cells are dropped.
    pub fn add_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .flat_map(|row| row[i].lines())
                    .chain(std::iter::once(column.header.as_str()))
                    .map(measure_text_width)
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        let widths = self.widths();

        self.write_rule(out, &widths, border::TOP_LEFT, border::TOP_TEE, border::TOP_RIGHT)?;

        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        self.write_cells(out, &widths, &headers, true)?;

        self.write_rule(out, &widths, border::LEFT_TEE, border::CROSS, border::RIGHT_TEE)?;

        for (index, row) in self.rows.iter().enumerate() {
            if index > 0 {
                self.write_cells(out, &widths, &vec![String::new(); widths.len()], false)?;
            }
            self.write_cells(out, &widths, row, false)?;
        }

        self.write_rule(
            out,
            &widths,
            border::BOTTOM_LEFT,
            border::BOTTOM_TEE,
            border::BOTTOM_RIGHT,
        )
    }

    fn write_rule(
        &self,
        out: &mut impl Write,
        widths: &[usize],
        left: &str,
        middle: &str,
        right: &str,
    ) -> io::Result<()> {
        let segments: Vec<String> = widths
            .iter()
            .map(|w| border::HORIZONTAL.repeat(w + 2))
            .collect();
        let rule = format!("{}{}{}", left, segments.join(middle), right);
        writeln!(out, "{}", rule)
    }

    fn write_cells(
        &self,
        out: &mut impl Write,
        widths: &[usize],
        cells: &[String],
        header: bool,
    ) -> io::Result<()> {
        let cell_lines: Vec<Vec<&str>> = cells.iter().map(|c| c.lines().collect()).collect();
        let height = cell_lines.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let vertical = border::VERTICAL;

        for line_index in 0..height {
            let mut line = String::new();
            for (i, width) in widths.iter().enumerate() {
                let text = cell_lines[i].get(line_index).copied().unwrap_or("");
                let padded = pad_str(text, *width, Alignment::Left, None);
                let styled = match (header, &self.header_style, &self.columns[i].style) {
                    _ if text.is_empty() => padded.into_owned(),
                    (true, Some(paint), _) | (false, _, Some(paint)) => paint(&*padded),
                    _ => padded.into_owned(),
                };
                line.push_str(vertical);
                line.push(' ');
                line.push_str(&styled);
                line.push(' ');
            }
            line.push_str(vertical);
            writeln!(out, "{}", line)?;
        }

        Ok(())
    }
}

/// A fitted panel around a single line of text.
pub fn write_panel(
    out: &mut impl Write,
    text: &str,
    border_paint: impl Fn(&str) -> String,
) -> io::Result<()> {
    let width = measure_text_width(text);
    let rule = border::HORIZONTAL.repeat(width + 2);
    writeln!(
        out,
        "{}",
        border_paint(&format!("{}{}{}", border::TOP_LEFT, rule, border::TOP_RIGHT))
    )?;
    writeln!(
        out,
        "{} {} {}",
        border_paint(border::VERTICAL),
        text,
        border_paint(border::VERTICAL)
    )?;
    writeln!(
        out,
        "{}",
        border_paint(&format!("{}{}{}", border::BOTTOM_LEFT, rule, border::BOTTOM_RIGHT))
    )
}

/// Greedy word wrap on whitespace. Words longer than `width` get a line of
/// their own.
pub fn wrap(text: &str, width: usize) -> String {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if !current.is_empty()
                && measure_text_width(&current) + 1 + measure_text_width(word) > width
            {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    lines.join("\n")
}
