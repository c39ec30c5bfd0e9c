use error_stack::Report;
use kernel::KernelError;
use sqlx::Error;

const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(db) => match db.code().as_deref() {
                    Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED) => {
                        KernelError::Concurrency
                    }
                    Some(UNIQUE_VIOLATION) | Some(FOREIGN_KEY_VIOLATION) => KernelError::Conflict,
                    _ => KernelError::Internal,
                },
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use super::ConvertError;

    #[test]
    fn pool_timeout_is_timeout() {
        let result: Result<(), sqlx::Error> = Err(sqlx::Error::PoolTimedOut);
        let err = result.convert_error().unwrap_err();
        assert_eq!(err.current_context(), &KernelError::Timeout);
    }

    #[test]
    fn other_errors_are_internal() {
        let result: Result<(), sqlx::Error> = Err(sqlx::Error::RowNotFound);
        let err = result.convert_error().unwrap_err();
        assert_eq!(err.current_context(), &KernelError::Internal);
    }
}
