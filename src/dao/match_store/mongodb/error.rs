use mongodb::error::Error as MongoError;
use thiserror::Error;
use uuid::Uuid;

/// Result alias for MongoDB store internals.
pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

/// Failures raised by the MongoDB backend.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// A required connection setting is absent from the environment.
    #[error("missing environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the variable.
        var: &'static str,
    },
    /// The connection string could not be parsed.
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        /// Rejected URI.
        uri: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The driver rejected the client options.
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The database never answered while connecting.
    #[error("MongoDB database `{database}` did not answer after {attempts} ping(s)")]
    Unreachable {
        /// Database that was pinged.
        database: String,
        /// Pings sent before giving up.
        attempts: u32,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A health ping on an established connection failed.
    #[error("MongoDB ping health check failed")]
    HealthPing {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Index creation failed at startup.
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        /// Collection being indexed.
        collection: &'static str,
        /// Logical index name.
        index: &'static str,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Writing a match failed.
    #[error("failed to save match `{id}`")]
    SaveMatch {
        /// Match being written.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Writing a team failed.
    #[error("failed to save team `{id}`")]
    SaveTeam {
        /// Team being written.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Reading a match failed.
    #[error("failed to load match `{id}`")]
    LoadMatch {
        /// Match being read.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Reading a team failed.
    #[error("failed to load team `{id}`")]
    LoadTeam {
        /// Team being read.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The match listing query failed.
    #[error("failed to list matches")]
    ListMatches {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A stored document no longer matches the domain model.
    #[error("document `{id}` could not be decoded: {message}")]
    Decode {
        /// `_id` of the document.
        id: String,
        /// Decoder complaint.
        message: String,
    },
}
