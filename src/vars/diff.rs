//! 差异报告模块
//!
//! 对比加载时的快照与当前变量表，按键升序惰性生成 `-KEY=OLD` / `+KEY=NEW` 行。

use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::Peekable;

/// 单条差异行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLine<'a> {
    /// 快照中存在的旧值
    Removed { key: &'a str, value: &'a str },
    /// 当前变量表中的新值
    Added { key: &'a str, value: &'a str },
}

impl<'a> DiffLine<'a> {
    pub fn key(&self) -> &'a str {
        match self {
            DiffLine::Removed { key, .. } | DiffLine::Added { key, .. } => *key,
        }
    }

    pub fn value(&self) -> &'a str {
        match self {
            DiffLine::Removed { value, .. } | DiffLine::Added { value, .. } => *value,
        }
    }
}

impl std::fmt::Display for DiffLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = match self {
            DiffLine::Removed { .. } => '-',
            DiffLine::Added { .. } => '+',
        };
        write!(f, "{}{}={}", sign, self.key(), self.value())
    }
}

/// 差异迭代器
///
/// 对两个有序表做归并遍历。值发生变化（包括出现或消失）的键先输出
/// 旧值行（若快照中存在），再输出新值行（若当前存在）。
pub struct Diff<'a> {
    old: Peekable<btree_map::Iter<'a, String, String>>,
    new: Peekable<btree_map::Iter<'a, String, String>>,
    pending: Option<DiffLine<'a>>,
}

type Entry<'a> = (&'a String, &'a String);

impl<'a> Diff<'a> {
    pub(crate) fn new(old: &'a BTreeMap<String, String>, new: &'a BTreeMap<String, String>) -> Self {
        Self {
            old: old.iter().peekable(),
            new: new.iter().peekable(),
            pending: None,
        }
    }

    /// 取出下一个值有变化的键对应的旧/新条目
    fn next_change(&mut self) -> Option<(Option<Entry<'a>>, Option<Entry<'a>>)> {
        loop {
            let old_key = self.old.peek().map(|(key, _)| *key);
            let new_key = self.new.peek().map(|(key, _)| *key);

            let ordering = match (old_key, new_key) {
                (None, None) => return None,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(old_key), Some(new_key)) => old_key.cmp(new_key),
            };

            match ordering {
                Ordering::Less => return Some((self.old.next(), None)),
                Ordering::Greater => return Some((None, self.new.next())),
                Ordering::Equal => {
                    let old = self.old.next();
                    let new = self.new.next();
                    if old.map(|(_, value)| value) != new.map(|(_, value)| value) {
                        return Some((old, new));
                    }
                }
            }
        }
    }
}

impl<'a> Iterator for Diff<'a> {
    type Item = DiffLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(line) = self.pending.take() {
            return Some(line);
        }

        let (old, new) = self.next_change()?;
        let added = new.map(|(key, value)| DiffLine::Added {
            key: key.as_str(),
            value: value.as_str(),
        });

        match old {
            Some((key, value)) => {
                self.pending = added;
                Some(DiffLine::Removed {
                    key: key.as_str(),
                    value: value.as_str(),
                })
            }
            None => added,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn render(diff: Diff<'_>) -> Vec<String> {
        diff.map(|line| line.to_string()).collect()
    }

    #[test]
    fn test_no_changes() {
        let old = table(&[("FOO", "1"), ("BAR", "2")]);
        let new = old.clone();
        assert!(render(Diff::new(&old, &new)).is_empty());
    }

    #[test]
    fn test_changed_added_removed() {
        let old = table(&[("A", "1"), ("B", "2"), ("C", "3")]);
        let new = table(&[("B", "2"), ("C", "4"), ("D", "")]);

        assert_eq!(
            render(Diff::new(&old, &new)),
            vec!["-A=1", "-C=3", "+C=4", "+D="]
        );
    }

    #[test]
    fn test_empty_value_differs_from_absent() {
        let old = table(&[]);
        let new = table(&[("FOO", "")]);
        assert_eq!(render(Diff::new(&old, &new)), vec!["+FOO="]);

        assert_eq!(render(Diff::new(&new, &old)), vec!["-FOO="]);
    }

    #[test]
    fn test_diff_line_accessors() {
        let line = DiffLine::Removed { key: "FOO", value: "1 2" };
        assert_eq!(line.key(), "FOO");
        assert_eq!(line.value(), "1 2");
        assert_eq!(line.to_string(), "-FOO=1 2");
    }
}
