use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use wil_markup::{
    AttrValue, AttributeMap, BreadcrumbAccessor, HandlerRegistry, Loader, NodeToolkit,
    ParseOptions, WidgetNode, to_markup,
};

use crate::cli::Command;

/// Run one subcommand, returning what should go to stdout.
pub fn run(command: &Command, options: ParseOptions) -> Result<String> {
    match command {
        Command::Check { file, handlers } => check(file, handlers, options),
        Command::Tree { file } => Ok(outline(&load(file, options)?)),
        Command::Fmt { file, write } => format_file(file, *write, options),
        Command::Get { file, path } => {
            let root = load(file, options)?;
            let found = BreadcrumbAccessor::new(&root)
                .get(path)
                .with_context(|| format!("lookup of {path:?} in {} failed", file.display()))?;
            Ok(to_markup(found))
        }
    }
}

fn read(file: &Path) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

fn load(file: &Path, options: ParseOptions) -> Result<WidgetNode> {
    let src = read(file)?;
    wil_markup::parse_str_with(&src, options)
        .with_context(|| format!("{} is not a valid .wil document", file.display()))
}

fn check(file: &Path, handlers: &[String], options: ParseOptions) -> Result<String> {
    let src = read(file)?;
    let registry = handlers
        .iter()
        .fold(HandlerRegistry::new(), |registry, name| registry.with(name.as_str(), ()));

    let mut loader = Loader::new(NodeToolkit).with_options(options);
    if !registry.is_empty() {
        loader = loader.with_handlers(&registry);
    }
    let root = loader
        .load(&src)
        .with_context(|| format!("{} is not a valid .wil document", file.display()))?;

    log::debug!("{}: root {} with {} handler(s) available", file.display(), root.widget, registry.len());
    Ok(format!("{}: ok ({} widget(s))\n", file.display(), count(&root)))
}

fn format_file(file: &Path, write: bool, options: ParseOptions) -> Result<String> {
    let formatted = to_markup(&load(file, options)?);
    if !write {
        return Ok(formatted);
    }
    fs::write(file, &formatted).with_context(|| format!("failed to write {}", file.display()))?;
    log::info!("formatted {}", file.display());
    Ok(String::new())
}

fn count(node: &WidgetNode) -> usize {
    1 + node.children.iter().map(count).sum::<usize>()
}

// ── Outline ───────────────────────────────────────────────────────────────

/// One line per widget: `Type #id key='value' block{...}`.
pub fn outline(root: &WidgetNode) -> String {
    let mut out = String::new();
    outline_node(&mut out, root, 0);
    out
}

fn outline_node(out: &mut String, node: &WidgetNode, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&node.widget);
    if let Some(id) = node.id() {
        let _ = write!(out, " #{id}");
    }
    for (key, value) in node.attributes.iter().filter(|(key, _)| key.as_str() != "id") {
        out.push(' ');
        outline_attribute(out, key, value);
    }
    out.push('\n');
    for child in &node.children {
        outline_node(out, child, depth + 1);
    }
}

fn outline_attribute(out: &mut String, key: &str, value: &AttrValue) {
    match value {
        AttrValue::Scalar(s) => {
            let _ = write!(out, "{key}={s:?}");
        }
        AttrValue::Block(map) => {
            let _ = write!(out, "{key}{{");
            outline_block(out, map);
            out.push('}');
        }
    }
}

fn outline_block(out: &mut String, map: &AttributeMap) {
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        outline_attribute(out, key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_shows_ids_attributes_and_blocks() {
        let root = wil_markup::parse_str(
            "Box:\n    id: main\n    style:\n        padding: 10\n        flex: 1\n    Label:\n        text: 'Hi there'",
        )
        .unwrap();
        assert_eq!(
            outline(&root),
            "Box #main style{flex=\"1\", padding=\"10\"}\n  Label text=\"Hi there\"\n"
        );
    }

    #[test]
    fn counts_every_widget() {
        let root = wil_markup::parse_str("Box:\n    Box:\n        Label:\n    Button:").unwrap();
        assert_eq!(count(&root), 4);
    }
}
