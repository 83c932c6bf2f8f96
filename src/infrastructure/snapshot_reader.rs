//! 帧输入读取器 - 基础设施层
//!
//! 把外部追踪子系统的输出转成帧，只暴露"读帧并转发"的能力

use serde_json::Value as JsonValue;
use std::io::BufRead;
use std::thread;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::SessionError;
use crate::models::Snapshot;

/// 从 JSON Lines 输入读取帧并发送到会话
///
/// 每行是一个标记数组，空行跳过，格式错误的行记录警告后跳过。
/// 会话关闭接收端时提前结束。
///
/// # 返回
/// 返回成功转发的帧数
pub async fn forward_snapshots<R>(
    reader: R,
    tx: mpsc::Sender<Snapshot>,
) -> Result<usize, SessionError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut forwarded = 0;
    let mut line_no = 0;

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(SessionError::FeedReadFailed)?
    {
        line_no += 1;
        let Some(snapshot) = decode_line(line_no, &line) else {
            continue;
        };

        if tx.send(snapshot).await.is_err() {
            debug!("会话已关闭，停止读取帧");
            break;
        }
        forwarded += 1;
    }

    Ok(forwarded)
}

/// 同步版本，在普通线程中阻塞读取
///
/// 用于标准输入：阻塞读取无法被 tokio 任务中止，放在独立线程里不会拖住运行时退出
pub fn forward_snapshots_blocking<R>(
    reader: R,
    tx: mpsc::Sender<Snapshot>,
) -> Result<usize, SessionError>
where
    R: BufRead,
{
    let mut forwarded = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(SessionError::FeedReadFailed)?;
        let Some(snapshot) = decode_line(idx + 1, &line) else {
            continue;
        };

        if tx.blocking_send(snapshot).is_err() {
            debug!("会话已关闭，停止读取帧");
            break;
        }
        forwarded += 1;
    }

    Ok(forwarded)
}

/// 在独立线程中读取标准输入
///
/// 线程不会被等待，进程退出时随之结束
pub fn spawn_stdin_reader(
    tx: mpsc::Sender<Snapshot>,
) -> std::io::Result<thread::JoinHandle<Result<usize, SessionError>>> {
    thread::Builder::new()
        .name("stdin-frames".to_string())
        .spawn(move || forward_snapshots_blocking(std::io::stdin().lock(), tx))
}

/// 空行返回 `None`，格式错误的行记录警告后返回 `None`
fn decode_line(line_no: usize, line: &str) -> Option<Snapshot> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    match parse_snapshot(trimmed) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("⚠️ 第 {} 行不是合法的帧，已跳过: {}", line_no, e);
            None
        }
    }
}

/// 解析单帧
///
/// 接受标记数组，或带 `markers` 字段的对象
pub fn parse_snapshot(line: &str) -> Result<Snapshot, serde_json::Error> {
    let value: JsonValue = serde_json::from_str(line)?;
    match value {
        JsonValue::Object(mut map) if map.contains_key("markers") => {
            let markers = map.remove("markers").unwrap_or(JsonValue::Null);
            serde_json::from_value(markers)
        }
        other => serde_json::from_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrackedMarker;

    #[test]
    fn test_parse_wrapped_snapshot() {
        let snapshot =
            parse_snapshot(r#"{"frame": 12, "markers": [{"id": "A", "label": "4", "x": 0.5}]}"#)
                .unwrap();
        assert_eq!(snapshot, vec![TrackedMarker::tracked("A", "4", 0.5)]);
    }

    #[tokio::test]
    async fn test_forward_skips_blank_and_malformed_lines() {
        let input = concat!(
            r#"[{"id": "A", "label": "7", "x": 0.0}, {"id": "B", "label": "8", "x": 1.0}]"#,
            "\n",
            "\n",
            "not json\n",
            r#"[{"id": "A", "label": "7"}]"#,
            "\n",
            "[]\n",
        );

        let (tx, mut rx) = mpsc::channel(8);
        let forwarded = forward_snapshots(input.as_bytes(), tx).await.unwrap();
        assert_eq!(forwarded, 2);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.len(), 2);
        let second = rx.recv().await.unwrap();
        assert!(second.is_empty());
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_forward_stops_when_receiver_dropped() {
        let input = "[]\n[]\n[]\n";
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let forwarded = forward_snapshots(input.as_bytes(), tx).await.unwrap();
        assert_eq!(forwarded, 0);
    }

    #[test]
    fn test_blocking_forward_matches_async_behavior() {
        let input = "[{\"id\": \"A\", \"label\": \"3\", \"x\": 1.0}]\n\nbroken\n[]\n";
        let (tx, mut rx) = mpsc::channel(8);

        let forwarded = forward_snapshots_blocking(input.as_bytes(), tx).unwrap();
        assert_eq!(forwarded, 2);

        assert_eq!(
            rx.blocking_recv().unwrap(),
            vec![TrackedMarker::tracked("A", "3", 1.0)]
        );
        assert!(rx.blocking_recv().unwrap().is_empty());
        assert!(rx.blocking_recv().is_none());
    }

    #[test]
    fn test_blocking_forward_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let forwarded = forward_snapshots_blocking("[]\n[]\n".as_bytes(), tx).unwrap();
        assert_eq!(forwarded, 0);
    }
}
