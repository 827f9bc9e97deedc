//! IO 抽象层
//!
//! 变量文件的读写接口，表格逻辑只通过这些 trait 访问文件系统，
//! 便于在测试中注入内存实现。
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use github_env::io::{DefaultEnvFileReader, EnvFileReader};
//!
//! let reader = DefaultEnvFileReader;
//! let contents = reader.read(Path::new("github_env"))?;
//! ```

use std::path::Path;

use crate::error::EnvError;

/// 变量文件读取 trait
///
/// 文件不存在时返回 `Ok(None)`，其他错误原样传播。
pub trait EnvFileReader {
    fn read(&self, path: &Path) -> Result<Option<String>, EnvError>;
}

/// 变量文件写入 trait
///
/// 整体覆盖写入，文件不存在时创建。
pub trait EnvFileWriter {
    fn write(&self, contents: &str, path: &Path) -> Result<(), EnvError>;
}

/// 默认的文件系统读取实现
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnvFileReader;

impl EnvFileReader for DefaultEnvFileReader {
    fn read(&self, path: &Path) -> Result<Option<String>, EnvError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EnvError::IoError(e)),
        }
    }
}

/// 默认的文件系统写入实现
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnvFileWriter;

impl EnvFileWriter for DefaultEnvFileWriter {
    fn write(&self, contents: &str, path: &Path) -> Result<(), EnvError> {
        std::fs::write(path, contents)?;
        Ok(())
    }
}
