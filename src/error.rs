use thiserror::Error;

/// 调用错误
///
/// 命令行参数或修改表达式不合法时产生，调用方应直接终止，不做重试。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    #[error("Path to GITHUB_ENV file not defined")]
    MissingPath,

    #[error("Unexpected modification expression \"{0}\"")]
    MalformedExpression(String),

    #[error("Empty variable name in modification expression \"{0}\"")]
    EmptyKey(String),

    #[error("Cannot remove undefined variable \"{0}\"")]
    UndefinedVariable(String),
}

/// 自定义错误类型
#[derive(Error, Debug)]
pub enum EnvError {
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EnvError {
    /// 是否为调用错误（而非文件系统错误）
    pub fn is_invocation(&self) -> bool {
        matches!(self, EnvError::Invocation(_))
    }
}
