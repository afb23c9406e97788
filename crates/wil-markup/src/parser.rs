use std::collections::BTreeMap;

use crate::ast::{AttrValue, AttributeMap, WidgetNode};
use crate::error::{Error, Result};
use crate::handlers::{HandlerRegistry, is_handler_key};
use crate::line::{LineKind, SourceLine, scan};
use crate::options::ParseOptions;
use crate::reader::LineReader;
use crate::toolkit::{NodeToolkit, Toolkit, WidgetSpec};

// ── Loader ────────────────────────────────────────────────────────────────

/// Loads `.wil` documents into widgets of toolkit `T`.
///
/// ```rust
/// use wil_markup::{HandlerRegistry, Loader, NodeToolkit};
///
/// let registry = HandlerRegistry::new().with("calculate", ());
/// let root = Loader::new(NodeToolkit)
///     .with_handlers(&registry)
///     .load("Box:\n    Button:\n        on_press: calculate")
///     .unwrap();
/// assert_eq!(root.children[0].widget, "Button");
/// ```
pub struct Loader<'h, T: Toolkit> {
    toolkit: T,
    handlers: Option<&'h HandlerRegistry<T::Handler>>,
    options: ParseOptions,
}

impl<'h, T: Toolkit> Loader<'h, T> {
    pub fn new(toolkit: T) -> Self {
        Self { toolkit, handlers: None, options: ParseOptions::default() }
    }

    /// Resolve every `on_*` attribute against `registry`. Without a registry
    /// handler names are passed through as plain strings.
    pub fn with_handlers(mut self, registry: &'h HandlerRegistry<T::Handler>) -> Self {
        self.handlers = Some(registry);
        self
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    /// Parse `src` and realize its single root widget.
    pub fn load(&mut self, src: &str) -> Result<T::Widget> {
        let lines = scan(src, &self.options)?;
        log::debug!(
            "loading wil document: {} line(s), {} widget(s)",
            lines.len(),
            lines.iter().filter(|l| l.kind == LineKind::Widget).count()
        );
        TreeBuilder {
            reader: LineReader::new(&lines),
            toolkit: &mut self.toolkit,
            handlers: self.handlers,
            max_depth: self.options.max_depth,
        }
        .build_document()
    }
}

// ── Public parse entry points ─────────────────────────────────────────────

/// Parse a `.wil` source string into a [`WidgetNode`] tree.
pub fn parse_str(src: &str) -> Result<WidgetNode> {
    parse_str_with(src, ParseOptions::default())
}

pub fn parse_str_with(src: &str, options: ParseOptions) -> Result<WidgetNode> {
    Loader::new(NodeToolkit).with_options(options).load(src)
}

// ── Tree builder ──────────────────────────────────────────────────────────

/// What the lines of a level are nested under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent<'s> {
    /// Depth 0: only the root widget lives here.
    Root,
    /// The widget line above; this level holds its attributes and children.
    Widget,
    /// An attribute line such as `style:`; this level is its value.
    Block(&'s str),
}

/// Why a level stopped consuming lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    /// The next line is shallower. `levels_to_skip` counts the levels above
    /// the immediate caller that must return as well without reading.
    Dedent { levels_to_skip: usize },
    EndOfInput,
}

/// What one level hands back to the level above it.
struct LevelResult<W> {
    /// Attribute lines found at this level.
    attributes: AttributeMap,
    /// Widgets found at this level, all closed and built.
    children: Vec<W>,
    exit: Exit,
}

/// A widget whose attributes may still grow.
struct OpenWidget<'s> {
    widget: &'s str,
    attributes: AttributeMap,
    line: usize,
}

/// Working state of one level while its lines are read.
struct Frame<'s, W> {
    open: Option<OpenWidget<'s>>,
    attributes: AttributeMap,
    /// The attribute line just read, in case the next lines are its block.
    pending_key: Option<&'s str>,
    children: Vec<W>,
}

impl<'s, W> Frame<'s, W> {
    fn new() -> Self {
        Self { open: None, attributes: AttributeMap::new(), pending_key: None, children: Vec::new() }
    }

    fn finish(self, exit: Exit) -> LevelResult<W> {
        LevelResult { attributes: self.attributes, children: self.children, exit }
    }
}

struct TreeBuilder<'a, 's, 't, 'h, T: Toolkit> {
    reader: LineReader<'a, 's>,
    toolkit: &'t mut T,
    handlers: Option<&'h HandlerRegistry<T::Handler>>,
    max_depth: usize,
}

impl<'a, 's, T: Toolkit> TreeBuilder<'a, 's, '_, '_, T> {
    fn build_document(mut self) -> Result<T::Widget> {
        if self.reader.current().is_none() {
            return Err(Error::structure(None, "empty document: no root widget"));
        }
        let level = self.build_level(0, Parent::Root)?;
        // Root-level attributes and extra roots are rejected as they are read.
        level.children.into_iter().next().ok_or_else(|| Error::structure(None, "no root widget"))
    }

    /// Consume every line at `depth`, recursing into deeper blocks, until a
    /// shallower line or the end of input.
    fn build_level(&mut self, depth: usize, parent: Parent<'s>) -> Result<LevelResult<T::Widget>> {
        if depth > self.max_depth {
            return Err(Error::structure(
                self.reader.current().map(|l| l.number),
                format!("nesting exceeds the maximum depth of {}", self.max_depth),
            ));
        }

        let mut frame = Frame::new();

        while let Some(line) = self.reader.current() {
            debug_assert_eq!(line.depth, depth);
            self.read_line(&mut frame, line, parent)?;

            let next_depth = self.reader.peek_next().map(|next| next.depth);
            self.reader.advance();

            let exit = match next_depth {
                None => Exit::EndOfInput,
                Some(next) if next > depth => {
                    let nested_parent = match line.kind {
                        LineKind::Widget => Parent::Widget,
                        LineKind::Attribute => Parent::Block(line.key),
                    };
                    let nested = self.build_level(depth + 1, nested_parent)?;
                    self.fold(&mut frame, line, nested.attributes, nested.children)?;
                    match nested.exit {
                        Exit::Dedent { levels_to_skip: 0 } => continue,
                        Exit::Dedent { levels_to_skip } => {
                            Exit::Dedent { levels_to_skip: levels_to_skip - 1 }
                        }
                        Exit::EndOfInput => Exit::EndOfInput,
                    }
                }
                Some(next) if next < depth => Exit::Dedent { levels_to_skip: depth - next - 1 },
                Some(_) => continue,
            };

            self.close(&mut frame)?;
            return Ok(frame.finish(exit));
        }

        self.close(&mut frame)?;
        Ok(frame.finish(Exit::EndOfInput))
    }

    /// Record one line into the frame of its level.
    fn read_line(
        &mut self,
        frame: &mut Frame<'s, T::Widget>,
        line: &'a SourceLine<'s>,
        parent: Parent<'s>,
    ) -> Result<()> {
        match (line.kind, parent) {
            (LineKind::Widget, Parent::Block(key)) => Err(Error::structure(
                line.number,
                format!("widget {:?} cannot be nested inside attribute block {key:?}", line.key),
            )),
            (LineKind::Widget, Parent::Root)
                if frame.open.is_some() || !frame.children.is_empty() =>
            {
                Err(Error::structure(
                    line.number,
                    format!("multiple root elements: {:?} follows the root widget", line.key),
                ))
            }
            (LineKind::Widget, _) if !line.value.is_empty() => Err(Error::structure(
                line.number,
                format!("widget {:?} cannot take a value; put it in an attribute", line.key),
            )),
            (LineKind::Widget, _) => {
                self.close(frame)?;
                frame.open = Some(OpenWidget {
                    widget: line.key,
                    attributes: AttributeMap::new(),
                    line: line.number,
                });
                frame.pending_key = None;
                Ok(())
            }
            (LineKind::Attribute, Parent::Root) => Err(Error::structure(
                line.number,
                format!("attribute {:?} is outside of any widget", line.key),
            )),
            (LineKind::Attribute, _) => {
                frame.attributes.insert(line.key, line.value);
                frame.pending_key = Some(line.key);
                Ok(())
            }
        }
    }

    /// Attach what a deeper block produced to the line that opened it.
    fn fold(
        &mut self,
        frame: &mut Frame<'s, T::Widget>,
        line: &SourceLine<'s>,
        attributes: AttributeMap,
        children: Vec<T::Widget>,
    ) -> Result<()> {
        if let Some(key) = frame.pending_key.take() {
            // A block only ever holds attributes; widget lines inside one were
            // rejected by `read_line`.
            let previous = frame.attributes.insert(key, AttrValue::Block(attributes));
            if let Some(AttrValue::Scalar(value)) = previous {
                if !value.is_empty() {
                    log::warn!(
                        "line {}: value {value:?} of {key:?} is replaced by its nested block",
                        line.number
                    );
                }
            }
            return Ok(());
        }

        match frame.open.take() {
            Some(mut open) => {
                open.attributes.extend(attributes);
                if children.is_empty() {
                    // Only attributes so far; a later sibling or dedent closes it.
                    frame.open = Some(open);
                } else {
                    let widget = self.finalize(open, children)?;
                    frame.children.push(widget);
                }
            }
            // No widget and no pending key to hang the block on: merge it into
            // the enclosing widget's attributes rather than dropping it.
            None => {
                frame.attributes.extend(attributes);
                frame.children.extend(children);
            }
        }
        Ok(())
    }

    /// Close the open widget of this level, if any, as a leaf.
    fn close(&mut self, frame: &mut Frame<'s, T::Widget>) -> Result<()> {
        if let Some(open) = frame.open.take() {
            let widget = self.finalize(open, Vec::new())?;
            frame.children.push(widget);
        }
        Ok(())
    }

    /// Instantiate a closed widget and attach its children.
    fn finalize(&mut self, open: OpenWidget<'s>, children: Vec<T::Widget>) -> Result<T::Widget> {
        let handlers = self.resolve_handlers(&open)?;
        log::trace!(
            "line {}: building {} ({} attribute(s), {} child(ren))",
            open.line,
            open.widget,
            open.attributes.len(),
            children.len()
        );

        let OpenWidget { widget: name, attributes, line } = open;
        let toolkit_err = |source| Error::Toolkit { line, widget: name.to_string(), source };

        let spec = WidgetSpec { widget: name.to_string(), attributes, handlers, line };
        let mut widget = self.toolkit.instantiate(spec).map_err(toolkit_err)?;
        if !children.is_empty() {
            self.toolkit.attach_children(&mut widget, children).map_err(toolkit_err)?;
        }
        Ok(widget)
    }

    fn resolve_handlers(&self, open: &OpenWidget<'s>) -> Result<BTreeMap<String, T::Handler>> {
        let mut resolved = BTreeMap::new();
        let Some(registry) = self.handlers else {
            return Ok(resolved);
        };
        for (event, value) in &open.attributes {
            let Some(name) = value.as_str().filter(|_| is_handler_key(event)) else {
                continue;
            };
            let handler = registry.get(name).ok_or_else(|| Error::UnresolvedHandler {
                line: open.line,
                event: event.clone(),
                handler: name.to_string(),
            })?;
            resolved.insert(event.clone(), handler.clone());
        }
        Ok(resolved)
    }
}
