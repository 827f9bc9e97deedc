//! 调用配置
//!
//! 在程序入口处一次性构造，之后以引用传入各项操作。
//! 库代码不直接读取进程环境变量，默认路径由调用方作为参数传入。

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::InvocationError;

/// 未指定 `--file` 时读取的环境变量名
pub const GITHUB_ENV_VAR: &str = "GITHUB_ENV";

/// `--if` 条件只有等于该值时才执行
pub const CONDITION_TRUE: &str = "true";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 变量文件路径
    pub file: PathBuf,
    /// 执行条件，`None` 表示无条件执行
    pub condition: Option<String>,
    /// 是否输出差异报告
    pub verbose: bool,
}

impl Config {
    /// 解析配置
    ///
    /// # 参数
    /// * `file` - 命令行指定的文件路径
    /// * `fallback` - 环境变量 `GITHUB_ENV` 的值
    /// * `condition` - `--if` 条件
    /// * `verbose` - 是否输出差异报告
    ///
    /// # 错误
    /// 两处都没有给出路径时返回 `InvocationError::MissingPath`，
    /// 无论条件是否成立。
    pub fn resolve(
        file: Option<PathBuf>,
        fallback: Option<OsString>,
        condition: Option<String>,
        verbose: bool,
    ) -> Result<Self, InvocationError> {
        let file = file
            .or_else(|| fallback.map(PathBuf::from))
            .ok_or(InvocationError::MissingPath)?;

        Ok(Self {
            file,
            condition,
            verbose,
        })
    }

    /// 条件未给出或恰好为 `true` 时返回 true
    pub fn is_enabled(&self) -> bool {
        self.condition
            .as_deref()
            .map_or(true, |cond| cond == CONDITION_TRUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_takes_precedence() {
        let config = Config::resolve(
            Some(PathBuf::from("flag")),
            Some(OsString::from("env")),
            None,
            false,
        )
        .unwrap();
        assert_eq!(config.file, PathBuf::from("flag"));
    }

    #[test]
    fn test_fallback_used() {
        let config = Config::resolve(None, Some(OsString::from("env")), None, true).unwrap();
        assert_eq!(config.file, PathBuf::from("env"));
        assert!(config.verbose);
    }

    #[test]
    fn test_missing_path() {
        let result = Config::resolve(None, None, Some("false".to_string()), false);
        assert_eq!(result, Err(InvocationError::MissingPath));
    }

    #[test]
    fn test_condition_gate() {
        let resolve = |condition: Option<&str>| {
            Config::resolve(
                Some(PathBuf::from("env")),
                None,
                condition.map(str::to_string),
                false,
            )
            .unwrap()
        };

        assert!(resolve(None).is_enabled());
        assert!(resolve(Some("true")).is_enabled());
        assert!(!resolve(Some("false")).is_enabled());
        assert!(!resolve(Some("True")).is_enabled());
        assert!(!resolve(Some("")).is_enabled());
    }
}
