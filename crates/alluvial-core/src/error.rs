pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid flow value {value} at record {index}: flows must be finite and non-negative")]
    InvalidFlow { index: usize, value: f64 },

    #[error("self-referential edge '{key}' -> '{key}' at record {index} is not supported")]
    SelfLoopEdge { key: String, index: usize },
}
