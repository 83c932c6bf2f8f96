//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：校验配置、输出启动信息
//! 2. **组装组件**：出题器（固定种子或系统熵源）、控制台展示层、答题会话
//! 3. **接入帧输入**：独立线程读取标准输入中的 JSON Lines，转发到会话
//! 4. **生命周期**：输入结束或 Ctrl-C 时结束会话并输出统计

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppResult, SessionError};
use crate::infrastructure::{spawn_stdin_reader, ConsolePresenter};
use crate::orchestrator::quiz_session::{QuizSession, SessionReport};
use crate::services::QuestionGenerator;
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::AnswerVerifier;

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        log_startup(&config);
        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<SessionReport> {
        let generator = match self.config.rng_seed {
            Some(seed) => QuestionGenerator::from_seed(seed),
            None => QuestionGenerator::from_entropy(),
        };
        let verifier =
            AnswerVerifier::new(generator, ConsolePresenter::new(), self.config.delays());
        let session = QuizSession::new(verifier, self.config.max_tracked_markers);

        let (tx, rx) = mpsc::channel(self.config.frame_buffer);
        let reader = spawn_stdin_reader(tx).context("无法启动帧输入线程")?;

        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("⚠️ 无法监听 Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        };
        let report = session.run_until(rx, shutdown).await;

        // Ctrl-C 结束时读取线程可能仍阻塞在标准输入上，不等待它
        if reader.is_finished() {
            let forwarded = reader
                .join()
                .map_err(|_| SessionError::TaskFailed("帧输入线程 panic".to_string()))?
                .context("帧输入读取失败")?;
            debug!("共转发 {} 帧", forwarded);
        } else {
            debug!("帧输入线程仍在等待标准输入，随进程退出");
        }

        print_final_stats(&report);
        Ok(report)
    }
}
