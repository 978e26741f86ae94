//! 全部完成式的并发等待
//!
//! 每个操作独立成功或失败，结果包装为 [`Settled`]。先完成的不会提前结束等待，
//! 先失败的也不会取消其他操作。

use std::fmt;
use std::future::Future;
use tracing::{error, warn};

use crate::error::{AppError, Result};

/// 页面数据的三个资源槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Meals,
    Preferences,
    Recommendation,
}

impl PageSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSlot::Meals => "meals",
            PageSlot::Preferences => "preferences",
            PageSlot::Recommendation => "recommendation",
        }
    }
}

impl fmt::Display for PageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个操作的最终结果
#[derive(Debug)]
pub enum Settled<T> {
    Fulfilled(T),
    Rejected(AppError),
}

impl<T> From<Result<T>> for Settled<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Settled::Fulfilled(value),
            Err(e) => Settled::Rejected(e),
        }
    }
}

impl<T> Settled<T> {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Settled::Fulfilled(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Settled<U> {
        match self {
            Settled::Fulfilled(value) => Settled::Fulfilled(f(value)),
            Settled::Rejected(e) => Settled::Rejected(e),
        }
    }

    /// 取出成功值；失败时记录日志并使用该槽位的默认值
    pub fn or_fallback(self, slot: PageSlot, fallback: impl FnOnce() -> T) -> T {
        match self {
            Settled::Fulfilled(value) => value,
            Settled::Rejected(e) if e.is_unavailable() => {
                warn!(slot = slot.as_str(), error = %e, "resource unavailable, using default");
                fallback()
            }
            Settled::Rejected(e) => {
                error!(slot = slot.as_str(), error = %e, "unexpected failure, using default");
                fallback()
            }
        }
    }
}

/// 并发驱动三个操作，等待全部结束
pub async fn settle3<A, B, C>(
    a: impl Future<Output = Result<A>>,
    b: impl Future<Output = Result<B>>,
    c: impl Future<Output = Result<C>>,
) -> (Settled<A>, Settled<B>, Settled<C>) {
    let (a, b, c) = tokio::join!(a, b, c);
    (a.into(), b.into(), c.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fulfilled_passes_through() {
        let settled: Settled<Vec<u32>> = Ok(vec![1, 2]).into();
        assert!(settled.is_fulfilled());
        assert_eq!(settled.or_fallback(PageSlot::Meals, Vec::new), vec![1, 2]);
    }

    #[test]
    fn test_rejected_uses_fallback() {
        let settled: Settled<Vec<u32>> = Err(AppError::Http("refused".into())).into();
        assert!(!settled.is_fulfilled());
        assert!(settled.or_fallback(PageSlot::Meals, Vec::new).is_empty());
    }

    #[test]
    fn test_map_keeps_rejection() {
        let settled: Settled<u32> = Err(AppError::NoContent("recommendation".into())).into();
        let mapped = settled.map(Some);
        assert_eq!(mapped.or_fallback(PageSlot::Recommendation, || None), None);
    }

    #[tokio::test]
    async fn test_fast_failure_does_not_cancel_slow_success() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok::<_, AppError>("slow")
        };
        let fast_fail = async { Err::<u8, _>(AppError::Parse("bad body".into())) };
        let fast_ok = async { Ok::<_, AppError>(7u8) };

        let (a, b, c) = settle3(slow, fast_fail, fast_ok).await;

        assert!(a.is_fulfilled());
        assert!(!b.is_fulfilled());
        assert!(c.is_fulfilled());
    }

    #[test]
    fn test_slot_names() {
        assert_eq!(PageSlot::Meals.to_string(), "meals");
        assert_eq!(PageSlot::Preferences.as_str(), "preferences");
        assert_eq!(PageSlot::Recommendation.as_str(), "recommendation");
    }
}
