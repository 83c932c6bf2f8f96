//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行、统计）
//! - 组装出题器、展示层和会话
//! - 把标准输入接入帧通道
//!
//! ### `quiz_session` - 答题会话
//! - 在单个任务中串行处理帧和延迟回调
//! - 持有唯一的 `AnswerVerifier`
//! - 会话结束时作废所有未到期回调
//!
//! ## 层次关系
//!
//! ```text
//! app (组装 + 生命周期)
//!     ↓
//! quiz_session (帧 / 计时回调 调度)
//!     ↓
//! workflow::AnswerVerifier (单帧比对 + 状态机)
//!     ↓
//! services (能力层：出题 / 拼接)
//! ```

pub mod app;
pub mod quiz_session;

// 重新导出主要类型
pub use app::App;
pub use quiz_session::{QuizSession, SessionReport};
