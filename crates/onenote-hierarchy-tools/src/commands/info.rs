use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, Color, Table};

use crate::summary::HierarchyStats;
use crate::utils::file as file_utils;
use crate::{OutputFormat, ParserStrategy};

pub fn execute(file: &Path, format: OutputFormat, strategy: ParserStrategy) -> Result<()> {
    let notebooks = file_utils::parse_hierarchy_file(file, strategy.into())?;
    let stats = HierarchyStats::collect(&notebooks);

    match format {
        OutputFormat::Text => output_text(&stats),
        OutputFormat::Json => output_json(&stats),
    }
}

fn output_text(stats: &HierarchyStats) -> Result<()> {
    println!("{}", "Hierarchy Summary".bold());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);

    for (label, count) in [
        ("Notebooks", stats.notebooks),
        ("Section Groups", stats.section_groups),
        ("Sections", stats.sections),
        ("Pages", stats.pages),
    ] {
        table.add_row(vec![
            Cell::new(label).fg(Color::Cyan),
            Cell::new(count.to_string()),
        ]);
    }

    if stats.unread_pages > 0 {
        table.add_row(vec![
            Cell::new("Unread Pages").fg(Color::Cyan),
            Cell::new(stats.unread_pages.to_string()),
        ]);
    }
    if stats.locked_sections > 0 {
        table.add_row(vec![
            Cell::new("Locked Sections").fg(Color::Cyan),
            Cell::new(stats.locked_sections.to_string()),
        ]);
    }
    if stats.recycle_bin_items > 0 {
        table.add_row(vec![
            Cell::new("In Recycle Bin").fg(Color::Cyan),
            Cell::new(stats.recycle_bin_items.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn output_json(stats: &HierarchyStats) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}
