//! 答案校验流程 - 流程层
//!
//! 核心职责：持有当前标准答案，逐帧比对拼接结果，驱动 Idle → Locked → Idle 的出题循环
//!
//! 流程顺序：
//! 1. start_cycle → 出题 → 通知展示层
//! 2. evaluate（每帧）→ 拼接 → 比对 → 命中则锁定并申请防抖回调
//! 3. 防抖回调 → 通知答对 → 申请下一题回调
//! 4. 下一题回调 → start_cycle
//!
//! 本模块不包含任何定时器，延迟回调以 [`Deferred`] 的形式交给宿主调度，
//! 到期后再通过 [`AnswerVerifier::fire`] 送回。

use std::time::Duration;
use tracing::{debug, info};

use crate::models::{Question, TrackedMarker};
use crate::services::{MarkerAggregator, QuestionSource};
use crate::workflow::presenter::QuizPresenter;

/// 默认防抖延迟
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
/// 默认下一题延迟
pub const DEFAULT_NEXT_QUESTION: Duration = Duration::from_millis(1000);

/// 校验器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierState {
    /// 接受逐帧比对
    Idle,
    /// 本轮已答对，忽略后续帧直到下一题生效
    Locked,
}

/// 延迟回调的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// 防抖结束，发出答对信号
    SignalCorrect,
    /// 展示成功后开始下一轮
    StartCycle,
}

/// 需要宿主延迟执行的回调
///
/// `generation` 是申请时的轮次编号，轮次变化或被取消后回调失效
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub action: DeferredAction,
    pub delay: Duration,
    pub generation: u64,
}

/// 两段固定延迟
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifierDelays {
    pub debounce: Duration,
    pub next_question: Duration,
}

impl Default for VerifierDelays {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            next_question: DEFAULT_NEXT_QUESTION,
        }
    }
}

/// 校验统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifierStats {
    pub questions_asked: usize,
    pub correct_answers: usize,
    pub stale_callbacks: usize,
}

/// 答案校验器
///
/// - 单一所有者，标准答案和状态只由自身修改
/// - 不持有定时器，也不阻塞
/// - 每轮最多发出一次答对信号：命中瞬间就清空标准答案
pub struct AnswerVerifier<S, P> {
    source: S,
    presenter: P,
    aggregator: MarkerAggregator,
    delays: VerifierDelays,
    state: VerifierState,
    expected_answer: Option<u32>,
    current: Option<Question>,
    generation: u64,
    pending: Option<DeferredAction>,
    stats: VerifierStats,
}

impl<S: QuestionSource, P: QuizPresenter> AnswerVerifier<S, P> {
    /// 创建校验器，尚未出题，需要调用 [`start_cycle`](Self::start_cycle)
    pub fn new(source: S, presenter: P, delays: VerifierDelays) -> Self {
        Self {
            source,
            presenter,
            aggregator: MarkerAggregator::new(),
            delays,
            state: VerifierState::Idle,
            expected_answer: None,
            current: None,
            generation: 0,
            pending: None,
            stats: VerifierStats::default(),
        }
    }

    /// 出一道新题并进入 Idle
    ///
    /// 轮次编号随之递增，之前申请的回调全部失效
    pub fn start_cycle(&mut self) {
        let question = self.source.next_question();
        self.generation += 1;
        self.pending = None;
        self.expected_answer = Some(question.answer());
        self.state = VerifierState::Idle;
        self.stats.questions_asked += 1;

        info!(
            "📝 第 {} 题: {}",
            self.stats.questions_asked,
            question.prompt()
        );
        debug!("标准答案: {} (轮次 {})", question.answer(), self.generation);

        self.presenter.on_question_changed(question.prompt());
        self.current = Some(question);
    }

    /// 比对一帧
    ///
    /// 命中时返回防抖回调，宿主应在 `delay` 之后通过 [`fire`](Self::fire) 送回
    pub fn evaluate(&mut self, snapshot: &[TrackedMarker]) -> Option<Deferred> {
        if self.state != VerifierState::Idle {
            return None;
        }
        let expected = self.expected_answer?;

        let value = self.aggregator.assemble(snapshot);
        if value != expected {
            return None;
        }

        // 先清空答案再锁定，后续帧即使在状态可见之前也无法再次命中
        self.expected_answer = None;
        self.state = VerifierState::Locked;
        self.pending = Some(DeferredAction::SignalCorrect);

        info!("🎯 拼出正确答案 {}，等待防抖", value);
        Some(self.defer(DeferredAction::SignalCorrect, self.delays.debounce))
    }

    /// 执行一个到期的回调
    ///
    /// 过期或重复的回调直接丢弃，不修改任何状态
    pub fn fire(&mut self, deferred: Deferred) -> Option<Deferred> {
        if deferred.generation != self.generation || self.pending != Some(deferred.action) {
            self.stats.stale_callbacks += 1;
            debug!(
                "丢弃过期回调 {:?} (回调轮次 {}, 当前轮次 {})",
                deferred.action, deferred.generation, self.generation
            );
            return None;
        }
        self.pending = None;

        match deferred.action {
            DeferredAction::SignalCorrect => Some(self.on_correct_signal()),
            DeferredAction::StartCycle => {
                self.start_cycle();
                None
            }
        }
    }

    /// 使所有待执行的回调失效
    ///
    /// 用于会话结束或暂停。之后需要重新调用 [`start_cycle`](Self::start_cycle) 才会继续出题
    pub fn cancel_pending(&mut self) {
        self.generation += 1;
        if let Some(action) = self.pending.take() {
            debug!("取消待执行回调 {:?}", action);
        }
    }

    fn on_correct_signal(&mut self) -> Deferred {
        self.stats.correct_answers += 1;
        info!("✅ 回答正确 (累计 {} 题)", self.stats.correct_answers);

        self.presenter.on_correct();
        self.pending = Some(DeferredAction::StartCycle);
        self.defer(DeferredAction::StartCycle, self.delays.next_question)
    }

    fn defer(&self, action: DeferredAction, delay: Duration) -> Deferred {
        Deferred {
            action,
            delay,
            generation: self.generation,
        }
    }

    pub fn state(&self) -> VerifierState {
        self.state
    }

    pub fn expected_answer(&self) -> Option<u32> {
        self.expected_answer
    }

    /// 当前题目（锁定期间仍保留，直到下一题生效）
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stats(&self) -> VerifierStats {
        self.stats
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }
}
