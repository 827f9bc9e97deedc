//! 修改表达式
//!
//! 命令行上的每个表达式对应一次变量表操作：
//!
//! | 表达式        | 操作           |
//! |---------------|----------------|
//! | `!KEY`        | 删除变量       |
//! | `KEY-=VALUE`  | 移除一项       |
//! | `KEY++=VALUE` | 在开头插入一项 |
//! | `KEY+=VALUE`  | 在末尾追加一项 |
//! | `KEY=VALUE`   | 设置变量       |

use std::fmt;
use std::str::FromStr;

use crate::error::InvocationError;
use crate::vars::Vars;

/// 解析后的修改操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modification {
    Set { key: String, value: String },
    Append { key: String, value: String },
    Prepend { key: String, value: String },
    RemoveValue { key: String, value: String },
    RemoveVar { key: String },
}

#[derive(Debug, Clone, Copy)]
enum SuffixOp {
    RemoveValue,
    Prepend,
    Append,
}

/// 键后缀与操作的对应关系，按顺序匹配
///
/// `++` 必须排在 `+` 之前，否则 `KEY++=V` 会被当作追加 `KEY+`。
const SUFFIXES: &[(&str, SuffixOp)] = &[
    ("-", SuffixOp::RemoveValue),
    ("++", SuffixOp::Prepend),
    ("+", SuffixOp::Append),
];

impl Modification {
    /// 解析单个修改表达式
    pub fn parse(expr: &str) -> Result<Self, InvocationError> {
        let Some((lhs, value)) = expr.split_once('=') else {
            return match expr.strip_prefix('!') {
                Some("") => Err(InvocationError::EmptyKey(expr.to_string())),
                Some(key) => Ok(Modification::RemoveVar {
                    key: key.to_string(),
                }),
                None => Err(InvocationError::MalformedExpression(expr.to_string())),
            };
        };

        let (key, op) = SUFFIXES
            .iter()
            .find_map(|(suffix, op)| lhs.strip_suffix(*suffix).map(|key| (key, Some(*op))))
            .unwrap_or((lhs, None));

        if key.is_empty() {
            return Err(InvocationError::EmptyKey(expr.to_string()));
        }

        let key = key.to_string();
        let value = value.to_string();

        Ok(match op {
            Some(SuffixOp::RemoveValue) => Modification::RemoveValue { key, value },
            Some(SuffixOp::Prepend) => Modification::Prepend { key, value },
            Some(SuffixOp::Append) => Modification::Append { key, value },
            None => Modification::Set { key, value },
        })
    }

    /// 被修改的变量名
    pub fn key(&self) -> &str {
        match self {
            Modification::Set { key, .. }
            | Modification::Append { key, .. }
            | Modification::Prepend { key, .. }
            | Modification::RemoveValue { key, .. }
            | Modification::RemoveVar { key } => key,
        }
    }

    /// 将修改应用到变量表
    ///
    /// # 错误
    /// 删除不存在的变量时返回 `InvocationError::UndefinedVariable`
    pub fn apply(&self, vars: &mut Vars) -> Result<(), InvocationError> {
        tracing::debug!(key = self.key(), modification = %self, "applying modification");

        match self {
            Modification::Set { key, value } => vars.set(key, value),
            Modification::Append { key, value } => vars.append(key, value),
            Modification::Prepend { key, value } => vars.prepend(key, value),
            Modification::RemoveValue { key, value } => vars.remove_value(key, value),
            Modification::RemoveVar { key } => vars.remove_var(key)?,
        }

        Ok(())
    }
}

impl FromStr for Modification {
    type Err = InvocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modification::Set { key, value } => write!(f, "{}={}", key, value),
            Modification::Append { key, value } => write!(f, "{}+={}", key, value),
            Modification::Prepend { key, value } => write!(f, "{}++={}", key, value),
            Modification::RemoveValue { key, value } => write!(f, "{}-={}", key, value),
            Modification::RemoveVar { key } => write!(f, "!{}", key),
        }
    }
}
