//! 答题会话 - 编排层
//!
//! ## 职责
//!
//! 把逐帧输入和延迟回调放在同一个任务里串行处理：
//!
//! - 帧通道每收到一帧，调用一次 `evaluate`
//! - 校验器申请的延迟回调交给 `JoinSet` 中的计时任务，到期后经通道送回同一个任务执行
//! - 帧通道关闭或收到关闭信号即视为会话结束，所有未到期回调作废并中止
//!
//! 计时任务只负责等待和送回，不接触校验器，因此校验器不需要加锁。

use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::models::Snapshot;
use crate::services::QuestionSource;
use crate::workflow::{AnswerVerifier, Deferred, QuizPresenter, VerifierStats};

/// 会话结束时的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// 收到的帧数
    pub frames: usize,
    /// 校验器统计
    pub stats: VerifierStats,
}

/// 答题会话
pub struct QuizSession<S, P> {
    verifier: AnswerVerifier<S, P>,
    max_tracked_markers: usize,
}

impl<S: QuestionSource, P: QuizPresenter> QuizSession<S, P> {
    /// `max_tracked_markers` 为 0 时不限制每帧的追踪标记数，超过上限的帧不参与比对
    pub fn new(verifier: AnswerVerifier<S, P>, max_tracked_markers: usize) -> Self {
        Self {
            verifier,
            max_tracked_markers,
        }
    }

    /// 运行到帧通道关闭
    pub async fn run(self, frames: mpsc::Receiver<Snapshot>) -> SessionReport {
        self.run_until(frames, std::future::pending()).await
    }

    /// 运行到帧通道关闭或 `shutdown` 完成
    pub async fn run_until<F>(
        mut self,
        mut frames: mpsc::Receiver<Snapshot>,
        shutdown: F,
    ) -> SessionReport
    where
        F: Future<Output = ()>,
    {
        let (timer_tx, mut timer_rx) = mpsc::unbounded_channel::<Deferred>();
        let mut timers = JoinSet::new();
        let mut report = SessionReport::default();

        tokio::pin!(shutdown);
        self.verifier.start_cycle();

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("🛑 收到关闭信号，会话结束");
                    break;
                }
                frame = frames.recv() => {
                    let Some(snapshot) = frame else {
                        info!("📭 帧输入结束，会话结束");
                        break;
                    };
                    report.frames += 1;

                    let snapshot = limit_tracked(snapshot, self.max_tracked_markers);
                    if let Some(deferred) = self.verifier.evaluate(&snapshot) {
                        schedule(&mut timers, &timer_tx, deferred);
                    }
                }
                Some(deferred) = timer_rx.recv() => {
                    if let Some(next) = self.verifier.fire(deferred) {
                        schedule(&mut timers, &timer_tx, next);
                    }
                }
                Some(_) = timers.join_next(), if !timers.is_empty() => {}
            }
        }

        // 会话结束后到期的回调一律作废
        self.verifier.cancel_pending();
        if !timers.is_empty() {
            debug!("中止 {} 个未到期的回调", timers.len());
        }
        timers.abort_all();

        report.stats = self.verifier.stats();
        report
    }
}

/// 启动计时任务，到期后把回调送回会话
fn schedule(
    timers: &mut JoinSet<()>,
    timer_tx: &mpsc::UnboundedSender<Deferred>,
    deferred: Deferred,
) {
    debug!(
        "⏳ {:?} 将在 {}ms 后执行 (轮次 {})",
        deferred.action,
        deferred.delay.as_millis(),
        deferred.generation
    );

    let tx = timer_tx.clone();
    timers.spawn(async move {
        tokio::time::sleep(deferred.delay).await;
        // 会话已结束时接收端不存在，直接丢弃
        let _ = tx.send(deferred);
    });
}

/// 追踪标记数超过 `max` 的帧视为没有候选答案
///
/// 只看数量，不依赖交付顺序；`max` 为 0 时不限制
fn limit_tracked(snapshot: Snapshot, max: usize) -> Snapshot {
    if max == 0 {
        return snapshot;
    }

    let tracked = snapshot.iter().filter(|marker| marker.is_tracked).count();
    if tracked <= max {
        return snapshot;
    }

    debug!("帧中有 {} 个追踪标记，超过上限 {}，本帧不参与比对", tracked, max);
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrackedMarker;
    use crate::services::MarkerAggregator;

    fn assemble(snapshot: &[TrackedMarker]) -> u32 {
        MarkerAggregator::new().assemble(snapshot)
    }

    #[test]
    fn test_limit_tracked_within_cap_is_unchanged() {
        let snapshot = vec![
            TrackedMarker::tracked("A", "1", 3.0),
            TrackedMarker::new("B", "9", 0.0, false),
            TrackedMarker::tracked("C", "2", 1.0),
        ];

        assert_eq!(limit_tracked(snapshot.clone(), 2), snapshot);
        assert_eq!(assemble(&limit_tracked(snapshot, 2)), 21);
    }

    #[test]
    fn test_limit_tracked_over_cap_ignores_delivery_order() {
        // 按坐标读作 785
        let forward = vec![
            TrackedMarker::tracked("seven", "7", 0.0),
            TrackedMarker::tracked("eight", "8", 1.0),
            TrackedMarker::tracked("five", "5", 2.0),
        ];
        let reversed: Snapshot = forward.iter().rev().cloned().collect();

        assert_eq!(assemble(&forward), 785);
        assert_eq!(assemble(&reversed), 785);

        // 超过上限时两种顺序都不会拼出 78 或 85
        assert_eq!(assemble(&limit_tracked(forward.clone(), 2)), 0);
        assert_eq!(assemble(&limit_tracked(reversed.clone(), 2)), 0);

        assert_eq!(assemble(&limit_tracked(forward, 0)), 785);
        assert_eq!(assemble(&limit_tracked(reversed, 3)), 785);
    }
}
