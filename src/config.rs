//! Configuration for the engine public API.
//!
//! [`MarkdownEngine`] bundles the parser configuration, the CSS classes
//! used by codegen and an input size cap behind one front door, with a
//! fluent builder for the pieces callers usually touch.
use crate::ast::Document;
use crate::codegen::{generate_html, CssClasses};
use crate::error::{MarkdownError, Result};
use crate::parser::{self, ParserConfig};
use serde::{Deserialize, Serialize};

/// Main configuration struct for the Markdown engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// CSS classes injected into generated HTML.
    pub css_classes: CssClasses,
    /// Maximum input size in bytes; larger inputs are rejected before
    /// parsing to bound memory use. `None` disables the check.
    pub max_input_size: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            css_classes: CssClasses::default(),
            max_input_size: Some(100 * 1024 * 1024),
        }
    }
}

impl EngineConfig {
    /// Creates a builder for configuring the engine.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }
}

/// Builder for [`EngineConfig`] providing a fluent configuration API.
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parser configuration.
    pub fn parser(mut self, parser: ParserConfig) -> Self {
        self.config.parser = parser;
        self
    }

    /// Sets the CSS classes used by HTML generation.
    pub fn css_classes(mut self, classes: CssClasses) -> Self {
        self.config.css_classes = classes;
        self
    }

    /// Sets the maximum nesting depth for parsing.
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.config.parser.max_nesting_depth = depth;
        self
    }

    /// Sets or disables the maximum input size.
    pub fn max_input_size(mut self, limit: Option<usize>) -> Self {
        self.config.max_input_size = limit;
        self
    }

    /// Builds the final configuration.
    pub fn build(self) -> EngineConfig {
        self.config
    }
}

/// High-level interface over the parse-then-generate pipeline.
///
/// # Examples
///
/// ```
/// use inkdown::{CssClasses, EngineConfig, MarkdownEngine};
///
/// let engine = MarkdownEngine::with_config(
///     EngineConfig::builder()
///         .css_classes(CssClasses {
///             heading: Some("title".to_string()),
///             ..CssClasses::default()
///         })
///         .build(),
/// );
/// let html = engine.to_html("# Hello").unwrap();
/// assert_eq!(html, "<h1 class=\"title\">Hello</h1>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkdownEngine {
    config: EngineConfig,
}

impl MarkdownEngine {
    /// Creates an engine with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parses a Markdown string into its AST.
    pub fn parse_to_ast(&self, source: &str) -> Result<Document> {
        self.check_input_size(source)?;
        Ok(parser::parse_with_config(
            source,
            0,
            source.len(),
            &self.config.parser,
        ))
    }

    /// Converts a Markdown string to HTML with the configured CSS classes.
    pub fn to_html(&self, source: &str) -> Result<String> {
        let document = self.parse_to_ast(source)?;
        Ok(generate_html(&document.body, &self.config.css_classes))
    }

    fn check_input_size(&self, source: &str) -> Result<()> {
        if let Some(limit) = self.config.max_input_size {
            if source.len() > limit {
                return Err(MarkdownError::InputTooLarge {
                    len: source.len(),
                    limit,
                });
            }
        }
        Ok(())
    }
}
