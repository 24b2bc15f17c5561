//! 把大图切分成固定尺寸的 chunk 文件, 也能把一个 chunk 目录重新拼回完整图片
//!
//! 切分和拼接共用同一套文件命名约定 `{主体}-{行}+{列}{扩展名}`,
//! 两个方向只通过这个约定耦合, 运行时互不依赖

pub mod chunk;
pub mod utils;

// 重新导出公共接口
pub use chunk::error::{ChunkError, Result};
pub use chunk::merge::{merge, scan_grid};
pub use chunk::split::{split, SplitOptions};
pub use chunk::types::{ChunkCoord, ChunkEntry, GridLayout, SplitReport};
