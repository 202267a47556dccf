use thiserror::Error;

/// Errors raised by the weighted selector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Cannot select from a wheel with no segments")]
    EmptySegmentSet,
}

/// Authoring-time problems found by `sequence::validate`.
///
/// The engine itself never raises these; it degrades gracefully at runtime.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SequenceError {
    #[error("Start step '{0}' does not exist in the sequence")]
    MissingStartStep(String),

    #[error("Step id '{0}' is used by more than one step")]
    DuplicateStepId(String),

    #[error("Step '{step_id}' has a wheel with no segments")]
    EmptyWheel { step_id: String },

    #[error("Segment '{segment_id}' on step '{step_id}' has an invalid weight: {weight}")]
    InvalidWeight {
        step_id: String,
        segment_id: String,
        weight: f64,
    },

    #[error("Every segment on step '{step_id}' has zero weight")]
    ZeroWeightWheel { step_id: String },

    #[error("Step '{source_step_id}' points to '{missing_step_id}', which does not exist")]
    DanglingReference {
        source_step_id: String,
        missing_step_id: String,
    },

    #[error(
        "A branch condition on step '{step_id}' references step '{referenced_step_id}', which does not exist"
    )]
    UnknownConditionStep {
        step_id: String,
        referenced_step_id: String,
    },

    #[error("Step '{step_id}' uses determiner '{determiner_step_id}', which is not a determiner step")]
    InvalidDeterminer {
        step_id: String,
        determiner_step_id: String,
    },
}

/// Errors that can occur when converting an authoring document into a `Sequence`.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to parse sequence JSON: {0}")]
    JsonParseError(String),

    #[error("Invalid sequence data: {0}")]
    ValidationError(String),

    #[error("Could not read sequence file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while saving or loading a history snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot serialization failed: {0}")]
    Encode(String),

    #[error("Snapshot deserialization failed: {0}")]
    Decode(String),

    #[error("Snapshot I/O failed for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the async session host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActorError {
    #[error("The session actor has shut down")]
    SessionClosed,
}
