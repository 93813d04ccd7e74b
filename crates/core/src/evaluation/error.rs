//! Evaluation error types.

use costplan_shared::types::{EvaluationId, EvaluationRowId};
use thiserror::Error;

/// Evaluation-related errors.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The row belongs to a different evaluation.
    #[error("Row {row_id} does not belong to evaluation {evaluation_id}")]
    RowNotInEvaluation {
        /// Row being deleted.
        row_id: EvaluationRowId,
        /// Evaluation passed by the caller.
        evaluation_id: EvaluationId,
    },

    /// The persisted tombstone map could not be decoded or encoded.
    #[error("Invalid tombstone data: {0}")]
    Tombstones(#[from] serde_json::Error),
}
