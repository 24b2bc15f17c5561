use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChunkError>;

// 切分和拼接所有失败情况的错误类型
// 每个变体都带上出错的路径或文件名, 方便定位问题
#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("输入图片不存在: {0}")]
    InputNotFound(PathBuf),

    #[error("输出目录不存在: {0}")]
    OutputDirNotFound(PathBuf),

    #[error("chunk 目录不存在: {0}")]
    InputDirNotFound(PathBuf),

    #[error("不支持的图片格式: {0} (支持的格式: png, jpg, jpeg, bmp, tiff)")]
    UnsupportedFormat(PathBuf),

    #[error("文件名缺少扩展名: {0}")]
    MissingExtension(String),

    #[error("chunk 尺寸不能为 0")]
    BadChunkDimensions,

    #[error("无法解析 chunk 文件名: {name} ({reason})")]
    InvalidChunkName { name: String, reason: String },

    #[error("目录里没有 chunk 文件: {0}")]
    EmptyChunkSet(PathBuf),

    #[error("chunk 网格不完整: 期望 {expected} 个文件, 实际 {actual} 个")]
    IncompleteGrid { expected: u64, actual: u64 },

    #[error("chunk 坐标重复: {name}")]
    DuplicateChunk { name: String },

    #[error("chunk 文件名不一致: {first} 和 {second} 不属于同一张图")]
    MixedChunkNames { first: String, second: String },

    #[error(
        "chunk 尺寸不一致: {path} 是 {width}x{height}, 期望 {expected_width}x{expected_height}"
    )]
    InconsistentChunkSize {
        path: PathBuf,
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error("图片编解码失败: {path}: {source}")]
    Codec {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}
