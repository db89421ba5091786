//! Mapper configuration.

use crate::warnings::warnings_enabled;

/// Options for a [`Mapper`](crate::Mapper).
#[derive(Debug, Clone, Copy)]
pub struct MapperConfig {
    /// Log warnings (`None` defers to [`set_warnings`](crate::set_warnings)).
    pub emit_warnings: Option<bool>,
    /// Clear target sequences and maps before filling them, so element `i`
    /// of the target always comes from element `i` of the source. When
    /// false, mapped elements are appended to whatever the target holds.
    pub clear_collections: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            emit_warnings: None,
            clear_collections: true,
        }
    }
}

impl MapperConfig {
    /// Override the process-wide warning toggle for this mapper.
    #[must_use]
    pub fn with_warnings(mut self, enabled: bool) -> Self {
        self.emit_warnings = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_clear_collections(mut self, enable: bool) -> Self {
        self.clear_collections = enable;
        self
    }

    /// Whether warnings should be logged.
    pub fn warnings_enabled(&self) -> bool {
        self.emit_warnings.unwrap_or_else(warnings_enabled)
    }
}
