pub mod types;
pub mod config;
pub mod error;
pub mod naming;
pub mod codec;
pub mod split;
pub mod merge;

// 重新导出公共接口
pub use error::*;
pub use merge::*;
pub use split::*;
pub use types::*;
