//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::Style;
use itpam_ops::{ActionDescriptor, ActionResult, OutputValue, ParameterDescriptor};
use itpam_types::OutputFormat;
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    format: OutputFormat,
    colors_enabled: bool,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(format: OutputFormat, colors_enabled: bool) -> Self {
        Self {
            format,
            colors_enabled,
        }
    }

    /// Render the result of one action
    pub fn render_result(&self, result: &ActionResult) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = result.to_json().map_err(io::Error::other)?;
                println!("{json}");
            }
            OutputFormat::Plain => {
                println!("{}", result.message);
                for output in &result.outputs {
                    if let OutputValue::List(values) = &output.value {
                        for value in values {
                            println!("{value}");
                        }
                    }
                }
            }
            OutputFormat::Tty => {
                let style = if result.success {
                    Style::new().green()
                } else {
                    Style::new().red()
                };
                let style = style.force_styling(self.colors_enabled);
                println!("{}", style.apply_to(&result.message));

                for output in &result.outputs {
                    if let OutputValue::List(values) = &output.value {
                        if !values.is_empty() {
                            println!();
                            println!("{}", dataset_table(output.name, values));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Render the action catalog
    pub fn render_catalog(&self, descriptors: &[&'static ActionDescriptor]) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            let json = serde_json::to_string_pretty(descriptors).map_err(io::Error::other)?;
            println!("{json}");
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Action").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Inputs").add_attribute(Attribute::Bold),
            Cell::new("Outputs").add_attribute(Attribute::Bold),
        ]);

        for descriptor in descriptors {
            table.add_row(vec![
                Cell::new(descriptor.name).fg(Color::Cyan),
                Cell::new(descriptor.category),
                Cell::new(parameter_list(descriptor.inputs)),
                Cell::new(parameter_list(descriptor.outputs)),
            ]);
        }

        println!("{table}");
        Ok(())
    }
}

/// Dataset as a two-column table; entries are `name:value` lines
fn dataset_table(title: &str, lines: &[String]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new(title).add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    for line in lines {
        let (name, value) = line.split_once(':').unwrap_or((line.as_str(), ""));
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }

    table
}

fn parameter_list(params: &[ParameterDescriptor]) -> String {
    params
        .iter()
        .map(|param| match param.default {
            Some(default) => format!("{} (default {default})", param.name),
            None => param.name.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
