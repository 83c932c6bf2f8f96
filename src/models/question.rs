//! 题目模型
//!
//! 一道题由题干文本和唯一的标准答案组成，答案的每一位数字互不相同，
//! 这样才能用不重复的实体数字卡片拼出来。

use std::collections::HashSet;
use std::fmt::Display;

/// 运算类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Multiply,
}

impl Operation {
    /// 所有可选运算，出题时从中均匀抽取
    pub const ALL: [Operation; 2] = [Operation::Add, Operation::Multiply];

    /// 题干中使用的运算词
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Add => "plus",
            Operation::Multiply => "times",
        }
    }

    /// 计算结果
    pub fn apply(&self, first: u32, second: u32) -> u32 {
        match self {
            Operation::Add => first + second,
            Operation::Multiply => first * second,
        }
    }
}

/// 一道题目
///
/// 由出题器创建，创建后不可变；每一轮直接替换而不是修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    answer: u32,
}

impl Question {
    /// 根据运算和两个操作数构造题目
    pub fn from_operands(operation: Operation, first: u32, second: u32) -> Self {
        Self {
            prompt: format!("What is {} {} {}?", first, operation.verb(), second),
            answer: operation.apply(first, second),
        }
    }

    /// 直接构造题目，答案必须满足数字不重复
    ///
    /// 答案有重复数字时返回 `None`
    pub fn new(prompt: impl Into<String>, answer: u32) -> Option<Self> {
        if !has_unique_digits(answer) {
            return None;
        }
        Some(Self {
            prompt: prompt.into(),
            answer,
        })
    }

    /// 题干文本
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// 标准答案
    pub fn answer(&self) -> u32 {
        self.answer
    }
}

impl Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (答案: {})", self.prompt, self.answer)
    }
}

/// 判断十进制表示中每一位数字是否互不相同
pub fn has_unique_digits(value: u32) -> bool {
    let digits = value.to_string();
    let unique: HashSet<char> = digits.chars().collect();
    unique.len() == digits.len()
}
