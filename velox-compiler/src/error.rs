/// Template source the parser cannot recover from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("unterminated interpolation starting at byte {offset}")]
    UnterminatedInterpolation { offset: usize },
    #[error("unterminated value for attribute `{name}`")]
    UnterminatedAttribute { name: String },
}

pub type Result<T> = std::result::Result<T, CompileError>;
