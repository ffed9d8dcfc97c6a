use catapult_core::parameters::ParameterError;

/// Errors that can occur while setting up or running a simulated match.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Parameter {name}: {reason}")]
    Parameter {
        name: String,
        reason: ParameterError,
    },

    #[error("Script line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("Script input {index}: {message}")]
    ScriptInput { index: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
