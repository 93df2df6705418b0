use crate::error::{JavaError, Result};
use tree_sitter::{Language, Parser, Tree};

/// tree-sitter front end for Java sources. Cheap to clone.
#[derive(Clone)]
pub struct JavaParser {
    language: Language,
}

impl JavaParser {
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_java::LANGUAGE.into();
        // Fail early on an ABI mismatch instead of on the first parse
        Parser::new()
            .set_language(&language)
            .map_err(|e| JavaError::Language(e.to_string()))?;
        Ok(Self { language })
    }

    pub fn parse(&self, source: &str) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| JavaError::Language(e.to_string()))?;
        parser
            .parse(source, None)
            .ok_or_else(|| JavaError::Parsing("parser returned no tree".to_string()))
    }
}
