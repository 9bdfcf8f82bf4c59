//! Error types for trajectory planning operations
//!
//! Every failure in this crate is a deterministic function of the input
//! data: a malformed reference graph, a bad target specification, or an
//! inconsistent geometry. Nothing is retried and nothing is silently
//! substituted; all operations return `Result<T, PlanError>`.

use thiserror::Error;

/// Trajectory planning error types
#[derive(Error, Debug)]
pub enum PlanError {
    /// A record names a reference id that is not present in the table
    ///
    /// This error occurs when:
    /// - A `reference` column value is misspelled
    /// - The referenced landmark row was dropped from the table
    ///
    /// # Example
    /// ```no_run
    /// # use skullsweep::error::PlanError;
    /// let err = PlanError::MissingReference {
    ///     record: "s1".to_string(),
    ///     reference: "bergma".to_string(),
    /// };
    /// ```
    #[error("missing reference: record '{record}' points at '{reference}', which is not in the table")]
    MissingReference {
        /// Id of the record whose chain could not be walked
        record: String,
        /// The reference id that was not found
        reference: String,
    },

    /// A reference chain never reaches the ultimate reference
    ///
    /// Detected via a hop bound equal to the table length: any acyclic
    /// chain terminates within that many hops, so exceeding the bound
    /// means the chain loops (e.g. A references B and B references A).
    #[error("cyclic reference chain starting at '{record}': no path to '{ultimate}' within {hops} hops")]
    CyclicReference {
        /// Id of the record whose chain loops
        record: String,
        /// The ultimate reference the chain was expected to reach
        ultimate: String,
        /// Number of hops walked before giving up
        hops: usize,
    },

    /// No record in the table carries the requested target id
    #[error("unknown target: no record with id '{0}'")]
    UnknownTarget(String),

    /// More than one record shares the requested target id
    #[error("ambiguous target: {count} records share id '{id}'")]
    AmbiguousTarget {
        /// The duplicated id
        id: String,
        /// How many records carry it
        count: usize,
    },

    /// No record is tagged as skull tissue, so there is no surface to
    /// project the trajectory onto
    #[error("no skull points to project onto")]
    EmptySkullSet,

    /// The projection-distance radicand went negative beyond tolerance
    ///
    /// `|point - target|^2 - t^2` may dip a hair below zero from floating
    /// rounding, which is clamped. A negative beyond the epsilon indicates
    /// a data or angle-convention inconsistency (typically a non-unit
    /// direction vector from an extreme compound-angle combination) and is
    /// surfaced with the offending values.
    #[error("projection radicand {radicand} below tolerance for record '{record}' (t = {t})")]
    NumericDomain {
        /// Id of the skull record whose projection failed
        record: String,
        /// The negative radicand value
        radicand: f64,
        /// The scalar projection offset at which it occurred
        t: f64,
    },

    /// I/O error while reading a point table file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A point table file or in-memory table does not have the expected
    /// shape (missing required columns, unparseable cells, empty table)
    #[error("malformed table: {0}")]
    MalformedTable(String),
}

/// Result type alias for trajectory planning operations
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlanError::MissingReference {
            record: "s1".to_string(),
            reference: "bergma".to_string(),
        };
        assert!(err.to_string().contains("s1"));
        assert!(err.to_string().contains("bergma"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: PlanError = io.into();
        assert!(matches!(err, PlanError::Io(_)));
    }
}
