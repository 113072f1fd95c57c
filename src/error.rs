//! Exit-coded application error.
//!
//! Every failure path carries the process exit code it should terminate with:
//! - 2: environment and IO problems (dataset parsing, figure output, exports)
//! - 3: degenerate fit input (fewer than two points, zero variance in x)
//! - 4: internal math failures that valid input should never trigger

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_carries_exit_code_and_message() {
        let err = AppError::new(3, "Zero variance in x.");
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), "Zero variance in x.");
    }

    #[test]
    fn error_message_accepts_owned_strings() {
        let err = AppError::new(2, format!("Dataset line {}: bad row.", 7));
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("line 7"));
    }
}
