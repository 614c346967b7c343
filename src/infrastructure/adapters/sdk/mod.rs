//! Camera SDK Adapter - 内存模拟 SDK
//!
//! 没有真实设备时使用。行为上尽量贴近厂商 SDK：
//! 未初始化时拒绝调用、加密设备需要验证码、释放后的句柄不可再用。
//! 同时记录调用流水，供测试断言调用顺序。

mod mock_player;
mod mock_sdk;

pub use mock_player::MockPlayerHandle;
pub use mock_sdk::{MockCameraSdk, MockSdkConfig, SdkCall};
