//! 变量表模块
//!
//! 维护 `KEY=VALUE` 变量文件的内存状态。所有修改仅作用于内存，
//! 需要显式调用 `dump` 才会写回文件。
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use github_env::Vars;
//!
//! let mut vars = Vars::load(Path::new("github_env"))?;
//! vars.append("PATH", "/opt/bin");
//! for line in vars.changes() {
//!     eprintln!("{}", line);
//! }
//! vars.dump(Path::new("github_env"))?;
//! ```

pub mod diff;


use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{EnvError, InvocationError};
use crate::io::{DefaultEnvFileReader, DefaultEnvFileWriter, EnvFileReader, EnvFileWriter};

pub use diff::{Diff, DiffLine};

/// 加载后立即捕获的变量表快照，只用于生成差异报告
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    vars: BTreeMap<String, String>,
}

impl Snapshot {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// 变量表
///
/// # 不变量
/// - 每个键对应且仅对应一个值（可以为空字符串）
/// - 删除会移除键本身，之后读取为 `None` 而非空字符串
/// - 迭代与输出始终按键的字节序升序
#[derive(Debug, Clone, Default)]
pub struct Vars {
    vars: BTreeMap<String, String>,
    original: Snapshot,
}

impl Vars {
    /// 创建空变量表
    pub fn new() -> Self {
        Self::default()
    }

    /// 从文本解析变量表
    ///
    /// 每行去除首尾空白后按第一个 `=` 拆分为键和值。
    /// 不含 `=` 的非空行会被跳过并输出警告，空行直接忽略。
    pub fn parse(contents: &str) -> Self {
        let mut vars = BTreeMap::new();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match line.split_once('=') {
                Some((key, value)) => {
                    vars.insert(key.to_string(), value.to_string());
                }
                None => {
                    tracing::warn!("stray line in GITHUB_ENV file: \"{}\"", line);
                }
            }
        }

        let mut table = Self {
            vars,
            original: Snapshot::default(),
        };
        table.original = table.snapshot();
        table
    }

    /// 从文件加载变量表，文件不存在时返回空表
    pub fn load(path: &Path) -> Result<Self, EnvError> {
        Self::load_with(&DefaultEnvFileReader, path)
    }

    /// 使用指定的读取器加载变量表
    pub fn load_with<R: EnvFileReader>(reader: &R, path: &Path) -> Result<Self, EnvError> {
        match reader.read(path)? {
            Some(contents) => {
                let vars = Self::parse(&contents);
                tracing::debug!(path = %path.display(), count = vars.len(), "loaded variables");
                Ok(vars)
            }
            None => {
                tracing::debug!(path = %path.display(), "variables file does not exist, starting empty");
                Ok(Self::new())
            }
        }
    }

    /// 序列化为文本，每行一个 `KEY=VALUE`，按键升序
    pub fn render(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}={}\n", key, value))
            .collect()
    }

    /// 将变量表整体写回文件
    pub fn dump(&self, path: &Path) -> Result<(), EnvError> {
        self.dump_with(&DefaultEnvFileWriter, path)
    }

    /// 使用指定的写入器写回变量表
    pub fn dump_with<W: EnvFileWriter>(&self, writer: &W, path: &Path) -> Result<(), EnvError> {
        writer.write(&self.render(), path)?;
        tracing::debug!(path = %path.display(), count = self.len(), "dumped variables");
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// 按键升序遍历所有变量
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 加载时捕获的快照
    pub fn original(&self) -> &Snapshot {
        &self.original
    }

    /// 捕获当前状态的快照
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            vars: self.vars.clone(),
        }
    }

    /// 设置变量，覆盖已有值
    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    /// 在变量末尾追加一项，以单个空格分隔
    pub fn append(&mut self, key: &str, value: &str) {
        let joined = match self.get(key) {
            Some(old) if !old.is_empty() => format!("{} {}", old, value),
            _ => value.to_string(),
        };
        self.vars.insert(key.to_string(), joined);
    }

    /// 在变量开头插入一项，以单个空格分隔
    pub fn prepend(&mut self, key: &str, value: &str) {
        let joined = match self.get(key) {
            Some(old) if !old.is_empty() => format!("{} {}", value, old),
            _ => value.to_string(),
        };
        self.vars.insert(key.to_string(), joined);
    }

    /// 删除变量
    ///
    /// # 错误
    /// 变量不存在时返回 `InvocationError::UndefinedVariable`
    pub fn remove_var(&mut self, key: &str) -> Result<(), InvocationError> {
        self.vars
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| InvocationError::UndefinedVariable(key.to_string()))
    }

    /// 从变量中移除所有等于 `token` 的项
    ///
    /// 变量不存在或为空时不做任何事；移除后即使为空也保留该变量。
    pub fn remove_value(&mut self, key: &str, token: &str) {
        if let Some(value) = self.vars.get_mut(key) {
            if value.is_empty() {
                return;
            }
            *value = value
                .split_whitespace()
                .filter(|item| *item != token)
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    /// 与给定快照比较，按键升序生成差异行
    pub fn diff<'a>(&'a self, original: &'a Snapshot) -> Diff<'a> {
        Diff::new(&original.vars, &self.vars)
    }

    /// 与加载时的快照比较
    pub fn changes(&self) -> Diff<'_> {
        self.diff(&self.original)
    }
}
