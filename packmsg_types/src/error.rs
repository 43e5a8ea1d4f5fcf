use thiserror::Error;

/// A declaration that cannot be compiled into a layout.
///
/// Every variant names the field it concerns. Declarations that have no usable
/// name are identified by their position, as `#<index>`.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Malformed declaration of field {field:?}: {reason}")]
    Malformed { field: String, reason: String },

    #[error("Unknown type tag {tag:?} of field {field:?}")]
    UnknownType { field: String, tag: String },

    #[error("String field {field:?} declares no capacity")]
    MissingCapacity { field: String },

    #[error("Unknown charset {charset:?} of field {field:?}")]
    UnknownCharset { field: String, charset: String },

    #[error("Field {field:?} is declared more than once")]
    DuplicateField { field: String },

    #[error("In struct field {field:?}: {source}")]
    Nested {
        field: String,
        #[source]
        source: Box<SchemaError>,
    },

    #[error("Schema is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn nested(field: impl Into<String>, source: SchemaError) -> Self {
        Self::Nested {
            field: field.into(),
            source: Box::new(source),
        }
    }

    /// The innermost error, after unwrapping all [`SchemaError::Nested`] layers.
    pub fn root_cause(&self) -> &SchemaError {
        match self {
            Self::Nested { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
