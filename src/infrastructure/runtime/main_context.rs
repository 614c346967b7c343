//! Main Context - 单一主执行上下文

use std::panic::{catch_unwind, AssertUnwindSafe};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// 主执行上下文句柄
///
/// 内部是一个按 FIFO 顺序逐个执行任务的 tokio 任务。句柄可以任意克隆，
/// 所有克隆都被丢弃后主循环退出。
#[derive(Clone)]
pub struct MainContext {
    tx: mpsc::UnboundedSender<Job>,
}

impl MainContext {
    /// 启动主循环，必须在 tokio 运行时内调用
    pub fn start() -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        let handle = tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                if catch_unwind(AssertUnwindSafe(job)).is_err() {
                    tracing::error!("Job panicked on main context");
                }
            }
            tracing::debug!("Main context stopped");
        });
        (Self { tx }, handle)
    }

    /// 投递任务，主循环已退出时返回 false
    pub fn post(&self, job: impl FnOnce() + Send + 'static) -> bool {
        if self.tx.send(Box::new(job)).is_err() {
            tracing::warn!("Main context is gone, dropping job");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_jobs_run_in_order() {
        let (main, _handle) = MainContext::start();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..20 {
            let seen = Arc::clone(&seen);
            main.post(move || seen.lock().unwrap().push(i));
        }
        let (tx, rx) = oneshot::channel();
        main.post(move || {
            let _ = tx.send(());
        });
        rx.await.unwrap();

        assert_eq!(*seen.lock().unwrap(), (0..20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_panicking_job_does_not_stop_loop() {
        let (main, _handle) = MainContext::start();
        main.post(|| panic!("boom"));

        let (tx, rx) = oneshot::channel();
        assert!(main.post(move || {
            let _ = tx.send(42);
        }));
        assert_eq!(rx.await.unwrap(), 42);
    }
}
