use intake_api::error::ReaderError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("reader error: {0}")]
    Reader(#[from] ReaderError),

    #[error("component not found: {0}")]
    ComponentNotFound(String),

    #[error("component '{component}' is disabled")]
    ComponentDisabled { component: String },

    #[error("component '{component}' API version mismatch: component={component_api}, host={host_api}")]
    ApiVersionMismatch {
        component: String,
        component_api: u32,
        host_api: u32,
    },
}

impl EngineError {
    /// Add context to the error.
    ///
    /// For `Reader` variant, context is added to the inner `ReaderError`.
    /// For other variants, context is prepended to the message.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            EngineError::Reader(e) => EngineError::Reader(e.with_context(ctx)),
            EngineError::Config(msg) => EngineError::Config(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}
