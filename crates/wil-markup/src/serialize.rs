//! Writes widget trees back out as `.wil` markup.
//!
//! Output uses four-space steps, lists a widget's attributes before its
//! children, and single-quotes every non-empty value. Parsing the output of
//! [`to_markup`] gives back an equal tree for anything [`parse_str`]
//! produced.
//!
//! [`parse_str`]: crate::parse_str

use std::fmt::{self, Write};

use crate::ast::{AttrValue, AttributeMap, WidgetNode};

const STEP: &str = "    ";

pub fn to_markup(node: &WidgetNode) -> String {
    node.to_string()
}

impl fmt::Display for WidgetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_widget(f, self, 0)
    }
}

fn write_widget(out: &mut impl Write, node: &WidgetNode, depth: usize) -> fmt::Result {
    indent(out, depth)?;
    writeln!(out, "{}:", node.widget)?;
    write_attributes(out, &node.attributes, depth + 1)?;
    for child in &node.children {
        write_widget(out, child, depth + 1)?;
    }
    Ok(())
}

fn write_attributes(out: &mut impl Write, attributes: &AttributeMap, depth: usize) -> fmt::Result {
    for (key, value) in attributes {
        indent(out, depth)?;
        match value {
            AttrValue::Scalar(s) if s.is_empty() => writeln!(out, "{key}:")?,
            // Parsing strips `"` then `'` from both ends; a parsed value never
            // starts or ends with `'`, so single quotes always survive.
            AttrValue::Scalar(s) => writeln!(out, "{key}: '{s}'")?,
            AttrValue::Block(map) => {
                writeln!(out, "{key}:")?;
                write_attributes(out, map, depth + 1)?;
            }
        }
    }
    Ok(())
}

fn indent(out: &mut impl Write, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str(STEP)?;
    }
    Ok(())
}
