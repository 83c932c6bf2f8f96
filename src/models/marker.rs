//! 追踪标记模型
//!
//! 由外部追踪子系统每帧提供，核心逻辑不持有、不跨帧保存。

use serde::Deserialize;

/// 被追踪的数字卡片
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedMarker {
    /// 追踪子系统分配的标识，核心逻辑不解释其含义
    pub id: String,

    /// 识别出的标签，正常情况下是单个十进制数字
    pub label: String,

    /// 沿排序轴的坐标
    #[serde(alias = "x")]
    pub position: f64,

    /// 当前帧是否处于追踪状态
    #[serde(default = "default_tracked", alias = "tracked")]
    pub is_tracked: bool,
}

fn default_tracked() -> bool {
    true
}

impl TrackedMarker {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        position: f64,
        is_tracked: bool,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position,
            is_tracked,
        }
    }

    /// 处于追踪状态的标记
    pub fn tracked(id: impl Into<String>, label: impl Into<String>, position: f64) -> Self {
        Self::new(id, label, position, true)
    }
}

/// 一帧观测到的全部标记，顺序为追踪子系统的交付顺序
pub type Snapshot = Vec<TrackedMarker>;
