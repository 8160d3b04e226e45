use thiserror::Error;

#[derive(Error, Debug)]
pub enum RedraftError {
    #[error("Not a Word package: {message}")]
    InvalidPackage { message: String },

    #[error("Package has no '{part_path}' part")]
    MissingPart { part_path: String },

    #[error("Malformed XML in {location}: {message}")]
    XmlParse { message: String, location: String },

    #[error("Could not serialize XML: {0}")]
    XmlWrite(String),

    #[error("Invalid relationship: {message}")]
    InvalidRelationship { message: String },

    #[error("Invalid replacement directive for style '{style}': {message}")]
    InvalidDirective { style: String, message: String },

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, RedraftError>;
