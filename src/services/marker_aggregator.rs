//! 卡片拼接服务 - 业务能力层
//!
//! 把一帧追踪结果拼成一个整数，纯函数，不跨帧保存任何状态。

use tracing::trace;

use crate::models::TrackedMarker;

/// 卡片拼接器
///
/// 步骤：
/// 1. 只保留处于追踪状态的标记
/// 2. 按坐标升序稳定排序（坐标相同保持交付顺序）
/// 3. 依次拼接标签
/// 4. 按十进制解析，空串或解析失败（含溢出）时返回 0
///
/// 出题器不会产生答案 0，因此空帧永远不会误判为正确。
/// 标签识别出错时同样会退化为 0，这是保留下来的可观察行为。
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerAggregator;

impl MarkerAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 拼接一帧并解析为整数
    pub fn assemble(&self, snapshot: &[TrackedMarker]) -> u32 {
        let digits = self.digit_string(snapshot);
        let value = digits.parse::<u32>().unwrap_or(0);
        trace!("拼接结果: {:?} -> {}", digits, value);
        value
    }

    /// 按坐标顺序拼接出的原始标签串
    pub fn digit_string(&self, snapshot: &[TrackedMarker]) -> String {
        let mut visible: Vec<&TrackedMarker> =
            snapshot.iter().filter(|marker| marker.is_tracked).collect();

        // total_cmp 对 NaN 也有全序，sort_by 是稳定排序
        visible.sort_by(|a, b| a.position.total_cmp(&b.position));

        visible.iter().map(|marker| marker.label.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble(snapshot: &[TrackedMarker]) -> u32 {
        MarkerAggregator::new().assemble(snapshot)
    }

    #[test]
    fn test_untracked_excluded_and_sorted_by_position() {
        let snapshot = vec![
            TrackedMarker::tracked("B", "1", 1.0),
            TrackedMarker::tracked("A", "3", 5.0),
            TrackedMarker::new("C", "2", 3.0, false),
        ];
        assert_eq!(assemble(&snapshot), 13);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let forward = vec![
            TrackedMarker::tracked("A", "7", -0.2),
            TrackedMarker::tracked("B", "8", 0.4),
        ];
        let reversed: Vec<TrackedMarker> = forward.iter().rev().cloned().collect();

        assert_eq!(assemble(&forward), 78);
        assert_eq!(assemble(&reversed), 78);
    }

    #[test]
    fn test_empty_snapshot_is_zero() {
        assert_eq!(assemble(&[]), 0);
    }

    #[test]
    fn test_all_untracked_is_zero() {
        let snapshot = vec![
            TrackedMarker::new("A", "4", 0.0, false),
            TrackedMarker::new("B", "2", 1.0, false),
        ];
        assert_eq!(assemble(&snapshot), 0);
    }

    #[test]
    fn test_malformed_label_falls_back_to_zero() {
        let snapshot = vec![
            TrackedMarker::tracked("A", "4", 0.0),
            TrackedMarker::tracked("B", "x", 1.0),
        ];
        assert_eq!(assemble(&snapshot), 0);

        let multi = vec![TrackedMarker::tracked("A", "12", 0.0)];
        assert_eq!(assemble(&multi), 12);
    }

    #[test]
    fn test_overflow_falls_back_to_zero() {
        let snapshot: Vec<TrackedMarker> = (0..12)
            .map(|i| TrackedMarker::tracked(format!("m{}", i), "9", i as f64))
            .collect();
        assert_eq!(assemble(&snapshot), 0);
    }

    #[test]
    fn test_ties_keep_delivery_order() {
        let snapshot = vec![
            TrackedMarker::tracked("A", "5", 2.0),
            TrackedMarker::tracked("B", "6", 2.0),
        ];
        assert_eq!(assemble(&snapshot), 56);
    }

    #[test]
    fn test_nan_position_does_not_panic() {
        let snapshot = vec![
            TrackedMarker::tracked("A", "1", f64::NAN),
            TrackedMarker::tracked("B", "2", 0.0),
        ];
        let digits = MarkerAggregator::new().digit_string(&snapshot);
        assert_eq!(digits.len(), 2);
    }
}
