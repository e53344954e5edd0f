/// Parser configuration.
///
/// ## Examples
/// ```rust
/// use kpl_syntax::parser::ParseOptions;
///
/// let options = ParseOptions::new().with_bare_expressions(true).with_max_nesting_depth(64);
/// assert!(options.allow_bare_expressions);
/// assert_eq!(options.max_nesting_depth, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept bare expressions between top-level units (`1 + 2` outside any `header` / `code`).
    ///
    /// Off by default: real programs consist of units only.
    pub allow_bare_expressions: bool,
    /// Maximum nesting of blocks, expressions and types before the parser gives up with "nesting too deep".
    pub max_nesting_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bare_expressions(mut self, allow: bool) -> Self {
        self.allow_bare_expressions = allow;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_bare_expressions: false,
            max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}
