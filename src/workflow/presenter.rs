//! 展示层接口
//!
//! 校验器只通过这两个回调通知外部，动画和渲染由实现方负责。

/// 展示层回调
pub trait QuizPresenter {
    /// 新题目生效时调用
    fn on_question_changed(&mut self, prompt: &str);

    /// 每轮答对后调用一次（防抖延迟之后）
    fn on_correct(&mut self);
}

/// 展示层收到的事件，测试和录制用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    QuestionChanged(String),
    Correct,
}

/// 记录所有事件的展示层
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 收到的答对通知次数
    pub fn correct_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, PresenterEvent::Correct))
            .count()
    }
}

impl QuizPresenter for RecordingPresenter {
    fn on_question_changed(&mut self, prompt: &str) {
        self.events
            .push(PresenterEvent::QuestionChanged(prompt.to_string()));
    }

    fn on_correct(&mut self) {
        self.events.push(PresenterEvent::Correct);
    }
}
