use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

/// Trait for writing catalog output in a tabular format
pub trait ResultWriter {
    fn write_schema_header(&mut self, headers: Vec<String>);
    fn write_row(&mut self, values: Vec<String>);
    fn write_message(&mut self, message: &str);
}

#[derive(Default)]
pub struct CliResultWriter {
    table: Option<Table>,
    headers: Vec<String>,
}

impl CliResultWriter {
    pub fn new() -> Self {
        Self {
            table: None,
            headers: Vec::new(),
        }
    }

    fn ensure_table(&mut self) {
        if self.table.is_none() {
            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BOX_CHARS);

            if !self.headers.is_empty() {
                table.set_titles(Row::new(
                    self.headers
                        .iter()
                        .map(|h| Cell::new(&h.bold().to_string()))
                        .collect(),
                ));
            }

            self.table = Some(table);
        }
    }

    fn flush(&mut self) {
        if let Some(table) = self.table.take() {
            table.printstd();
            println!();
        }
    }
}

impl ResultWriter for CliResultWriter {
    fn write_schema_header(&mut self, headers: Vec<String>) {
        self.flush();
        self.headers = headers;
        self.ensure_table();
    }

    fn write_row(&mut self, values: Vec<String>) {
        self.ensure_table();

        if let Some(table) = self.table.as_mut() {
            table.add_row(Row::new(values.iter().map(|v| Cell::new(v)).collect()));
        }
    }

    fn write_message(&mut self, message: &str) {
        self.flush();
        println!("{}", message);
    }
}

impl Drop for CliResultWriter {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Keeps everything written to it in memory.
#[derive(Debug, Default)]
pub struct BufferedResultWriter {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    messages: Vec<String>,
}

impl BufferedResultWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_headers(&self) -> &[String] {
        &self.headers
    }

    pub fn get_rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn get_messages(&self) -> &[String] {
        &self.messages
    }
}

impl ResultWriter for BufferedResultWriter {
    fn write_schema_header(&mut self, headers: Vec<String>) {
        self.headers = headers;
    }

    fn write_row(&mut self, values: Vec<String>) {
        self.rows.push(values);
    }

    fn write_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
