//! Emission configuration.

/// Logical name of the single file the structured-document backend produces.
pub const DEFAULT_FILE_NAME: &str = "program.json";

/// Permissions for written artifacts: owner read/write.
pub const DEFAULT_FILE_MODE: u32 = 0o600;

/// Emission configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// Number of spaces per indentation level in the serialized document
    pub indent_width: usize,
    /// Logical file name the document is stored under
    pub file_name: String,
    /// Unix permission bits for written files (ignored elsewhere)
    pub file_mode: u32,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            file_name: DEFAULT_FILE_NAME.to_string(),
            file_mode: DEFAULT_FILE_MODE,
        }
    }
}

impl EmitConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the output file name
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Set the permission bits for written files
    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    /// Indentation unit handed to the JSON pretty printer.
    pub(crate) fn indent(&self) -> String {
        " ".repeat(self.indent_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmitConfig::default();
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.file_name, "program.json");
        assert_eq!(config.file_mode, 0o600);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(EmitConfig::new(), EmitConfig::default());
    }

    #[test]
    fn test_builder_chain() {
        let config = EmitConfig::new()
            .with_indent_width(4)
            .with_file_name("graph.json")
            .with_file_mode(0o640);

        assert_eq!(config.indent_width, 4);
        assert_eq!(config.file_name, "graph.json");
        assert_eq!(config.file_mode, 0o640);
    }

    #[test]
    fn test_builder_override() {
        let config = EmitConfig::new().with_indent_width(2).with_indent_width(8);
        assert_eq!(config.indent_width, 8); // Last value wins
    }

    #[test]
    fn test_indent_unit() {
        assert_eq!(EmitConfig::new().indent(), "  ");
        assert_eq!(EmitConfig::new().with_indent_width(0).indent(), "");
    }
}
