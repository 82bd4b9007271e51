use thiserror::Error;

pub type EmbedResult<T> = Result<T, EmbedError>;

/// Fatal bootstrap errors. The display strings are shown to the user
/// verbatim on the viewer page, so keep them stable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmbedError {
    #[error("No model URL provided")]
    MissingModelUrl,

    #[error("Invalid model URL provided")]
    InvalidModelUrl { value: String },

    #[error("Failed to load model-viewer script")]
    ScriptLoad,

    #[error("Failed to load 3D model: {reason}")]
    ModelLoad { reason: String },

    #[error("Page element '{id}' not found")]
    MissingElement { id: String },

    #[error("Invalid allowlist config: {0}")]
    Config(String),
}
