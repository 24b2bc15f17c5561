// chunk 的默认尺寸
// 单个 chunk 的内存大小应该为 100 * 100 * 4 = 40,000 字节
pub const DEFAULT_CHUNK_WIDTH: u32 = 100;
pub const DEFAULT_CHUNK_HEIGHT: u32 = 100;

// 切分时的默认编码质量, 只对 jpeg 生效
pub const DEFAULT_QUALITY: u8 = 75;

// 拼接输出固定用最高质量编码
pub const MERGE_QUALITY: u8 = 100;
