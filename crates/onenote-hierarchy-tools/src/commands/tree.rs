use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use onenote_hierarchy::{Details, Item};
use termtree::Tree;

use crate::utils::{color::swatch, file as file_utils};
use crate::{OutputFormat, ParserStrategy};

pub fn execute(
    file: &Path,
    format: OutputFormat,
    strategy: ParserStrategy,
    depth: Option<usize>,
) -> Result<()> {
    let notebooks = file_utils::parse_hierarchy_file(file, strategy.into())?;

    match format {
        OutputFormat::Text => {
            let root = file
                .file_name()
                .map_or_else(|| file.display().to_string(), |name| name.to_string_lossy().into_owned());
            print!("{}", build_tree(root, &notebooks, depth));
        }
        OutputFormat::Json => {
            let json: Vec<_> = notebooks.iter().map(|nb| to_json(nb, depth, 0)).collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

/// Render notebooks under `root_label`. `depth` 0 shows notebooks only.
pub fn build_tree(root_label: String, notebooks: &[Arc<Item>], depth: Option<usize>) -> Tree<String> {
    fn build_node(item: &Item, depth: Option<usize>, level: usize) -> Tree<String> {
        let expand = depth.is_none_or(|max| level < max);
        let mut text = label(item);
        if !expand && !item.children().is_empty() {
            text = format!("{text} {}", format!("(+{})", item.children().len()).dimmed());
        }

        let leaves: Vec<Tree<String>> = if expand {
            item.children()
                .iter()
                .map(|child| build_node(child, depth, level + 1))
                .collect()
        } else {
            Vec::new()
        };
        Tree::new(text).with_leaves(leaves)
    }

    let leaves: Vec<Tree<String>> = notebooks
        .iter()
        .map(|notebook| build_node(notebook, depth, 0))
        .collect();
    Tree::new(root_label).with_leaves(leaves)
}

fn label(item: &Item) -> String {
    let text = match item.details() {
        Details::Notebook(notebook) => {
            format!("{} {}", swatch(notebook.color), item.name().bold())
        }
        Details::SectionGroup(_) => format!("{}/", item.name().blue()),
        Details::Section(section) => {
            let mut text = format!("{} {}", swatch(section.color), item.name());
            if section.locked {
                text.push_str(&format!(" {}", "(locked)".yellow()));
            }
            text
        }
        Details::Page(_) if item.is_unread() => item.name().cyan().to_string(),
        Details::Page(_) => item.name().to_string(),
    };

    if item.is_in_recycle_bin() {
        text.dimmed().to_string()
    } else {
        text
    }
}

fn to_json(item: &Item, depth: Option<usize>, level: usize) -> serde_json::Value {
    let mut value = serde_json::json!({
        "kind": item.kind().tag(),
        "id": item.id(),
        "name": item.name(),
        "relative_path": item.relative_path(),
    });
    if let Some(color) = item.color() {
        value["color"] = serde_json::json!(color.to_hex());
    }
    if depth.is_none_or(|max| level < max) && !item.children().is_empty() {
        value["children"] = item
            .children()
            .iter()
            .map(|child| to_json(child, depth, level + 1))
            .collect();
    }
    value
}
