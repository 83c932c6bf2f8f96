//! 出题服务 - 业务能力层
//!
//! 只负责"生成一道答案数字不重复的题目"，不关心题目何时被展示、何时被作答。

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use tracing::debug;

use crate::models::{has_unique_digits, Operation, Question};

/// 加法第一个操作数范围
pub const ADD_FIRST: RangeInclusive<u32> = 1..=50;
/// 加法第二个操作数范围
pub const ADD_SECOND: RangeInclusive<u32> = 1..=49;
/// 乘法第一个操作数范围
pub const MULTIPLY_FIRST: RangeInclusive<u32> = 1..=10;
/// 乘法第二个操作数范围
pub const MULTIPLY_SECOND: RangeInclusive<u32> = 1..=9;

/// 题目来源
///
/// 校验器通过该 trait 获取下一道题，测试中可以替换为固定序列
pub trait QuestionSource {
    fn next_question(&mut self) -> Question;
}

/// 随机出题器
///
/// 职责：
/// - 均匀抽取运算类型和操作数
/// - 丢弃答案有重复数字的结果并重新抽取（每次重抽都重新选择运算）
/// - 不持有任何外部状态
pub struct QuestionGenerator<R: Rng = StdRng> {
    rng: R,
}

impl QuestionGenerator<StdRng> {
    /// 使用系统熵源创建
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// 使用固定种子创建，题目序列可复现
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuestionGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// 生成一道题目
    pub fn generate(&mut self) -> Question {
        let (question, rejected) = retry_until_unique(|| self.draw());
        if rejected > 0 {
            debug!("出题时丢弃了 {} 个有重复数字的答案", rejected);
        }
        question
    }

    /// 抽取一次，不检查答案
    fn draw(&mut self) -> Question {
        let operation = *Operation::ALL
            .choose(&mut self.rng)
            .unwrap_or(&Operation::Add);

        let (first, second) = match operation {
            Operation::Add => (
                self.rng.gen_range(ADD_FIRST),
                self.rng.gen_range(ADD_SECOND),
            ),
            Operation::Multiply => (
                self.rng.gen_range(MULTIPLY_FIRST),
                self.rng.gen_range(MULTIPLY_SECOND),
            ),
        };

        Question::from_operands(operation, first, second)
    }
}

impl<R: Rng> QuestionSource for QuestionGenerator<R> {
    fn next_question(&mut self) -> Question {
        self.generate()
    }
}

/// 反复抽取直到答案数字互不相同
///
/// 返回被接受的题目和被丢弃的次数
fn retry_until_unique(mut draw: impl FnMut() -> Question) -> (Question, usize) {
    let mut rejected = 0;
    loop {
        let candidate = draw();
        if has_unique_digits(candidate.answer()) {
            return (candidate, rejected);
        }
        rejected += 1;
    }
}
