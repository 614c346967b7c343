//! 应用层 - 命令
//!
//! 宿主通过「方法名 + 无类型参数表」调用桥接层：
//! - call: MethodCall / CommandResult
//! - arguments: 宽松参数解码
//! - methods: 方法名表
//! - sdk_commands / player_commands: 每个命令的参数结构及默认值

mod arguments;
mod call;
mod methods;
mod player_commands;
mod sdk_commands;

pub use arguments::{Arguments, FromArguments};
pub use call::{CommandResult, MethodCall};
pub use methods::{PlayerMethod, SdkMethod};
pub use player_commands::*;
pub use sdk_commands::*;
