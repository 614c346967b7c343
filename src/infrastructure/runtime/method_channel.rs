//! Method Channel - 命名命令通道

use std::sync::Arc;

use tokio::sync::oneshot;

use crate::application::{ApplicationError, CallHandler, CommandResult, MethodCall};

use super::MainContext;

/// 命令通道：后台执行命令，回复投递到主上下文
pub struct MethodChannel {
    name: String,
    handler: Arc<dyn CallHandler>,
    main: MainContext,
}

impl MethodChannel {
    pub fn new(name: impl Into<String>, handler: Arc<dyn CallHandler>, main: MainContext) -> Self {
        Self {
            name: name.into(),
            handler,
            main,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 发起调用，`reply` 在主上下文上执行
    pub fn invoke<F>(&self, call: MethodCall, reply: F)
    where
        F: FnOnce(CommandResult) + Send + 'static,
    {
        let handler = Arc::clone(&self.handler);
        let main = self.main.clone();
        let channel = self.name.clone();

        tokio::spawn(async move {
            let method = call.method.clone();
            let result = match tokio::spawn(async move { handler.handle(call).await }).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(channel = %channel, method = %method, error = %e, "Command task failed");
                    ApplicationError::internal(format!("{} did not complete", method))
                        .into_command_result()
                }
            };
            main.post(move || reply(result));
        });
    }

    /// `invoke` 的 async 版本
    pub async fn call(&self, call: MethodCall) -> CommandResult {
        let (tx, rx) = oneshot::channel();
        self.invoke(call, move |result| {
            let _ = tx.send(result);
        });
        rx.await.unwrap_or_else(|_| {
            ApplicationError::internal("reply was dropped before delivery").into_command_result()
        })
    }
}
