/// How raw leading-space counts are turned into nesting depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentPolicy {
    /// One fixed step size for the whole document, taken from the first
    /// indented line. Offsets that are not a multiple of the step, or that
    /// jump more than one level at once, are syntax errors.
    #[default]
    Uniform,
    /// Every deeper line opens exactly one new level whatever its step size;
    /// a dedent must land on a level that is still open.
    Nested,
}

/// Parse-time configuration shared by the scanner and the tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub indent: IndentPolicy,
    /// Deepest nesting level accepted before the load is aborted. Bounds the
    /// builder's recursion for untrusted input.
    pub max_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    pub fn new() -> Self {
        Self { indent: IndentPolicy::default(), max_depth: Self::DEFAULT_MAX_DEPTH }
    }

    pub fn indent(mut self, policy: IndentPolicy) -> Self {
        self.indent = policy;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
