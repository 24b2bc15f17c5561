use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// chunk 在网格中的坐标 (从左上角开始, 行优先, 从 0 计数)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkCoord {
    pub row: u32, // 行索引
    pub col: u32, // 列索引
}

// 从文件名解析出来的 chunk 信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkName {
    pub base: String,      // 原图的文件名主体 (不含扩展名)
    pub coord: ChunkCoord, // 网格坐标
    pub ext: String,       // 扩展名 (含 `.`), 决定编解码格式
}

// 目录里的一个 chunk 文件
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChunkEntry {
    pub coord: ChunkCoord, // 网格坐标
    pub path: PathBuf,     // 文件路径
}

// 一个 chunk 目录解析出来的网格布局
#[derive(Debug, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: u32,               // 行数 (最大行索引 + 1)
    pub cols: u32,               // 列数 (最大列索引 + 1)
    pub chunk_width: u32,        // chunk 宽度 (取样自坐标最小的 chunk)
    pub chunk_height: u32,       // chunk 高度
    pub base: String,            // 所有 chunk 共同的文件名主体
    pub ext: String,             // 所有 chunk 共同的扩展名
    pub entries: Vec<ChunkEntry>, // 全部 chunk 文件, 按坐标升序
}

// 切分结果元数据
#[derive(Debug, Serialize, Deserialize)]
pub struct SplitReport {
    pub source_width: u32,   // 原图宽度
    pub source_height: u32,  // 原图高度
    pub padded_width: u32,   // 补齐后的画布宽度
    pub padded_height: u32,  // 补齐后的画布高度
    pub x_offset: u32,       // 原图在画布里的 X 偏移
    pub y_offset: u32,       // 原图在画布里的 Y 偏移
    pub rows: u32,           // 网格行数
    pub cols: u32,           // 网格列数
    pub files: Vec<PathBuf>, // 写出的 chunk 文件, 行优先
}
