use sea_orm::{DbErr, SqlErr, TransactionError};

/// True when the database rejected a write because of a unique or primary-key constraint.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Unwrap a transaction error into the underlying `DbErr`.
pub fn flatten_transaction_error(err: TransactionError<DbErr>) -> DbErr {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_not_flag_generic_errors_as_unique_violation() {
        assert!(!is_unique_violation(&DbErr::Custom("boom".into())));
        assert!(!is_unique_violation(&DbErr::RecordNotFound("users".into())));
    }

    #[test]
    fn should_flatten_both_transaction_error_variants() {
        let conn = flatten_transaction_error(TransactionError::Connection(DbErr::Custom(
            "conn".into(),
        )));
        let txn = flatten_transaction_error(TransactionError::Transaction(DbErr::Custom(
            "txn".into(),
        )));
        assert!(matches!(conn, DbErr::Custom(ref m) if m == "conn"));
        assert!(matches!(txn, DbErr::Custom(ref m) if m == "txn"));
    }
}
