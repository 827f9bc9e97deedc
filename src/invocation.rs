//! 一次完整的调用流程
//!
//! 条件判断 → 解析全部表达式 → 加载 → 按顺序应用 → （可选）差异报告 → 写回。

use std::io::Write;

use crate::config::Config;
use crate::error::EnvError;
use crate::modification::Modification;
use crate::vars::Vars;

/// 调用结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 条件不成立，未访问文件
    Skipped,
    /// 已写回文件，`changed` 为差异行数
    Applied { changed: usize },
}

/// 执行一次调用
///
/// # 参数
/// * `config` - 调用配置
/// * `expressions` - 修改表达式，按给出的顺序应用
/// * `report` - 差异报告的输出位置（通常为 stderr）
///
/// # 错误
/// 任何表达式解析失败时在访问文件之前返回；删除不存在的变量时
/// 在写回之前返回，文件保持不变。
pub fn execute<S: AsRef<str>>(
    config: &Config,
    expressions: &[S],
    report: &mut dyn Write,
) -> Result<Outcome, EnvError> {
    if !config.is_enabled() {
        tracing::debug!(condition = ?config.condition, "condition is not true, skipping");
        return Ok(Outcome::Skipped);
    }

    let modifications = expressions
        .iter()
        .map(|expr| Modification::parse(expr.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut vars = Vars::load(&config.file)?;

    for modification in &modifications {
        modification.apply(&mut vars)?;
    }

    let mut changed = 0;
    for line in vars.changes() {
        if config.verbose {
            writeln!(report, "{}", line)?;
        }
        changed += 1;
    }

    vars.dump(&config.file)?;

    Ok(Outcome::Applied { changed })
}
