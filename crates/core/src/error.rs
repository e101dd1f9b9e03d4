#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Client-supplied data could not be interpreted (e.g. a non-numeric pulse).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
