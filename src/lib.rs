//! # Tile Quiz
//!
//! 出一道算术题，再确认用户用实体数字卡片拼出的答案
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 对接外部协作方，只暴露能力
//! - `snapshot_reader` - 读取追踪子系统的逐帧输出
//! - `ConsolePresenter` - 用日志代替动画的展示层
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，无状态或只持有随机源
//! - `QuestionGenerator` - 生成答案数字互不相同的题目
//! - `MarkerAggregator` - 把一帧卡片拼成一个整数
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整生命周期
//! - `AnswerVerifier` - Idle → Locked → Idle 状态机，防止重复触发
//! - `QuizPresenter` - 展示层回调接口
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/quiz_session` - 串行调度逐帧比对和延迟回调
//! - `orchestrator/app` - 应用组装和生命周期
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Question, Snapshot, TrackedMarker};
pub use orchestrator::{App, QuizSession, SessionReport};
pub use services::{MarkerAggregator, QuestionGenerator, QuestionSource};
pub use workflow::{AnswerVerifier, QuizPresenter, VerifierDelays, VerifierState};
