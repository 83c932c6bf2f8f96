//! 控制台展示层 - 基础设施层
//!
//! 用日志代替动画，把题目和答对信号输出到终端

use tracing::info;

use crate::workflow::QuizPresenter;

/// 控制台展示层
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    shown: usize,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuizPresenter for ConsolePresenter {
    fn on_question_changed(&mut self, prompt: &str) {
        self.shown += 1;
        info!("\n{}", "─".repeat(60));
        info!("❓ {}", prompt);
        info!("{}", "─".repeat(60));
    }

    fn on_correct(&mut self) {
        info!("🎉 第 {} 题回答正确！", self.shown);
    }
}
