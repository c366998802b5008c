//! Qualified paths identifying documented nodes.

/// Spellings from the outermost named ancestor down to the node itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QualifiedPath(pub Vec<String>);

impl QualifiedPath {
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn joined(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}
