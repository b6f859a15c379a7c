use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarginaliaError {
    /// The backing store could not be opened or attached
    #[error("Connection error: {0}")]
    Connection(String),

    /// A compiled statement failed against the store
    #[error("Query error: {source} (statement: {sql})")]
    Query {
        sql: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Schema mapping configuration could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// A lookup matched no rows where one was expected
    #[error("{entity} not found: {lookup}")]
    NotFound { entity: &'static str, lookup: String },

    /// Entity type missing from the schema configuration
    #[error("Unknown entity type: {0}")]
    UnknownEntity(String),

    /// Logical field missing from the entity's mapping
    #[error("Unknown field `{field}` on entity {entity}")]
    UnknownField { entity: String, field: String },

    /// Association table missing from the schema configuration
    #[error("Unknown association table: {0}")]
    UnknownAssociation(String),

    /// Relation name missing from the relation registry
    #[error("Unknown relation `{relation}` on entity {entity}")]
    UnknownRelation { entity: String, relation: String },

    /// The declared field list disagrees with the schema configuration
    #[error("Schema mismatch for {entity}: {detail}")]
    SchemaMismatch { entity: &'static str, detail: String },

    /// Color name outside the fixed highlight enumeration
    #[error("Unknown highlight color: {0}")]
    UnknownColor(String),
}

/// Result type for mapping operations
pub type Result<T> = std::result::Result<T, MarginaliaError>;
