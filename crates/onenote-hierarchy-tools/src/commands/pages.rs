use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, Color, Table};
use jiff::Timestamp;

use crate::summary::{PageFilter, PageRow, page_rows};
use crate::utils::file as file_utils;
use crate::{OutputFormat, ParserStrategy};

pub fn execute(
    file: &Path,
    format: OutputFormat,
    strategy: ParserStrategy,
    filter: PageFilter,
) -> Result<()> {
    let notebooks = file_utils::parse_hierarchy_file(file, strategy.into())?;
    let rows = page_rows(&notebooks, &filter);

    match format {
        OutputFormat::Text => output_text(&rows),
        OutputFormat::Json => output_json(&rows),
    }
}

fn output_text(rows: &[PageRow]) -> Result<()> {
    if rows.is_empty() {
        println!("{}", "No matching pages".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
    table.set_header(vec!["Page", "Location", "Created"]);

    for row in rows {
        let mut name = Cell::new(format!("{}{}", indent(row.level), row.name));
        if row.unread {
            name = name.fg(Color::Cyan);
        }
        if row.in_recycle_bin {
            name = name.fg(Color::DarkGrey);
        }
        table.add_row(vec![
            name,
            Cell::new(location(&row.relative_path)),
            Cell::new(short_date(&row.created)),
        ]);
    }

    println!("{table}");
    println!("{} pages", rows.len());
    Ok(())
}

fn output_json(rows: &[PageRow]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}

/// Deepest subpage nesting shown in the listing.
const MAX_INDENT_LEVEL: i32 = 16;

/// Indentation for a page at outline `level`. Level 1 is not indented.
fn indent(level: i32) -> String {
    let depth = level.saturating_sub(1).clamp(0, MAX_INDENT_LEVEL);
    "  ".repeat(depth as usize)
}

/// Relative path of the containing section.
fn location(relative_path: &str) -> &str {
    relative_path
        .rsplit_once(onenote_hierarchy::schema::RELATIVE_PATH_SEPARATOR)
        .map_or(relative_path, |(parent, _)| parent)
}

fn short_date(timestamp: &str) -> String {
    match timestamp.parse::<Timestamp>() {
        Ok(ts) => ts.strftime("%Y-%m-%d %H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}
