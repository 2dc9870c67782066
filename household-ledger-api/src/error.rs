use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Money has already moved but a later settlement step did not commit.
    /// The intent stays unfinished and can be resumed.
    #[error("Settlement {intent_id} left incomplete at stage {stage}: {message}")]
    PartialSettlement {
        intent_id: Uuid,
        stage: String,
        message: String,
    },

    /// Soft failure of the budget backfill. Only used for diagnostics,
    /// a settlement never returns it.
    #[error("Budget update failed: {0}")]
    BudgetUpdateFailed(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl LedgerError {
    /// Maps a store/repository failure into the retryable database class.
    pub fn database(err: impl std::fmt::Display) -> Self {
        LedgerError::DatabaseError(err.to_string())
    }

    /// True for failures the caller should present as "please try again".
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::DatabaseError(_) | LedgerError::PartialSettlement { .. })
    }
}

impl From<validator::ValidationErrors> for LedgerError {
    fn from(errors: validator::ValidationErrors) -> Self {
        LedgerError::ValidationError(errors.to_string())
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
