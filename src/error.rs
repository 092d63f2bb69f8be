/// Exit code for unreadable or malformed input (files, columns, CLI dates).
pub const EXIT_INPUT: u8 = 2;
/// Exit code for inputs that parse but carry no usable data.
pub const EXIT_EMPTY: u8 = 3;
/// Exit code for terminal and output-file failures.
pub const EXIT_OUTPUT: u8 = 4;

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

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self::new(EXIT_EMPTY, message)
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::new(EXIT_OUTPUT, message)
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
