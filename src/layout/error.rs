/// Contract violations caught before any geometry is produced.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("forest must be a JSON array of nodes, found {found}")]
    InvalidForest { found: &'static str },
    #[error("node at {location} has no id")]
    MissingId { location: String },
    #[error("duplicate node id `{id}`")]
    DuplicateId { id: String },
    #[error("config field `{field}` must be a finite number")]
    NonFiniteConfig { field: &'static str },
    #[error("config field `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
    #[error("node `{id}` field `{field}` must be a finite number")]
    NonFiniteNodeValue { id: String, field: &'static str },
    #[error("malformed forest: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
