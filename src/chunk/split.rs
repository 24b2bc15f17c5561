//! 切分: 原图 -> 补齐画布 -> 固定尺寸的 chunk 文件

use std::path::Path;

use image::{imageops, Rgba, RgbaImage};

use crate::utils::time::now_ms;

use super::codec::{decode_rgba, encode_rgba};
use super::config::{DEFAULT_CHUNK_HEIGHT, DEFAULT_CHUNK_WIDTH, DEFAULT_QUALITY};
use super::error::{ChunkError, Result};
use super::naming::{format_chunk_filename, split_source_name};
use super::types::{ChunkCoord, SplitReport};

// 补齐画布的填充色: 白色
const PADDING_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);

// 切分参数
#[derive(Debug, Clone, Copy)]
pub struct SplitOptions {
    pub chunk_width: u32,  // 单个 chunk 的宽度
    pub chunk_height: u32, // 单个 chunk 的高度
    pub quality: u8,       // 编码质量, 只对 jpeg 生效
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            chunk_width: DEFAULT_CHUNK_WIDTH,
            chunk_height: DEFAULT_CHUNK_HEIGHT,
            quality: DEFAULT_QUALITY,
        }
    }
}

// 单轴的补齐计算, 返回 (补齐后的尺寸, 原图偏移)
// 尺寸向上补到 chunk 的整数倍, 偏移取差值的一半让原图居中
fn padded_axis(size: u32, chunk: u32) -> (u32, u32) {
    if size % chunk == 0 {
        return (size, 0);
    }
    let padded = size + (chunk - size % chunk);
    (padded, (padded - size) / 2)
}

/// 把一张图片切成固定尺寸的 chunk 文件
/// # Arguments
/// * `source_path` - 原图路径, 扩展名决定 chunk 的编码格式
/// * `output_dir` - chunk 输出目录, 必须已存在
/// * `options` - chunk 尺寸和编码质量
/// # Returns
/// * `Result<SplitReport>` - 网格尺寸 / 补齐信息 / 输出文件列表
pub fn split(source_path: &Path, output_dir: &Path, options: SplitOptions) -> Result<SplitReport> {
    let start_time = now_ms();
    println!("[SPLIT] 开始切分图片: {}", source_path.display());

    if options.chunk_width == 0 || options.chunk_height == 0 {
        return Err(ChunkError::BadChunkDimensions);
    }
    if !source_path.is_file() {
        return Err(ChunkError::InputNotFound(source_path.to_path_buf()));
    }
    if !output_dir.is_dir() {
        return Err(ChunkError::OutputDirNotFound(output_dir.to_path_buf()));
    }

    // 从路径取出文件名主体和扩展名
    let filename = source_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ChunkError::InputNotFound(source_path.to_path_buf()))?;
    let (base, ext) = split_source_name(filename)?;

    // 检查文件扩展名, chunk 要用同样的格式重新编码
    let ext_lower = ext[1..].to_lowercase();
    if !matches!(ext_lower.as_str(), "png" | "jpg" | "jpeg" | "bmp" | "tiff") {
        return Err(ChunkError::UnsupportedFormat(source_path.to_path_buf()));
    }

    let decode_start = now_ms();
    let img = decode_rgba(source_path)?;
    let (source_width, source_height) = img.dimensions();
    println!(
        "[SPLIT] 解码完成: {}x{} (耗时: {}ms)",
        source_width,
        source_height,
        now_ms() - decode_start
    );

    // 每个轴独立向上补齐到 chunk 尺寸的整数倍
    let (padded_width, x_offset) = padded_axis(source_width, options.chunk_width);
    let (padded_height, y_offset) = padded_axis(source_height, options.chunk_height);

    // 需要补齐时新建一张白色画布, 把原图贴到居中位置, 原图 buffer 随即释放
    let img = if (padded_width, padded_height) != (source_width, source_height) {
        println!(
            "[SPLIT] 补齐画布: {}x{} -> {}x{}, 原图偏移 ({}, {})",
            source_width, source_height, padded_width, padded_height, x_offset, y_offset
        );
        let mut canvas = RgbaImage::from_pixel(padded_width, padded_height, PADDING_FILL);
        imageops::replace(&mut canvas, &img, i64::from(x_offset), i64::from(y_offset));
        canvas
    } else {
        img
    };

    let rows = padded_height / options.chunk_height;
    let cols = padded_width / options.chunk_width;
    println!(
        "[SPLIT] 网格: {} 行 x {} 列, 每个 chunk {}x{}",
        rows, cols, options.chunk_width, options.chunk_height
    );

    // 行优先切出每个子区域, 编码完立即释放
    // 峰值内存 = 整张画布 + 一个 chunk
    let mut files = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let x = col * options.chunk_width;
            let y = row * options.chunk_height;
            let chunk =
                imageops::crop_imm(&img, x, y, options.chunk_width, options.chunk_height)
                    .to_image();

            let chunk_filename = format_chunk_filename(base, ChunkCoord { row, col }, ext);
            let save_path = output_dir.join(&chunk_filename);
            encode_rgba(&chunk, &save_path, options.quality)?;

            println!("[SPLIT] chunk ({}, {}) 已写入: {}", row, col, chunk_filename);
            files.push(save_path);
        }
    }

    println!(
        "[SPLIT] 切分完成: 共 {} 个 chunk (总耗时: {}ms)",
        files.len(),
        now_ms() - start_time
    );

    Ok(SplitReport {
        source_width,
        source_height,
        padded_width,
        padded_height,
        x_offset,
        y_offset,
        rows,
        cols,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_axis_rounds_up_to_chunk_multiple() {
        // 250 补到 300, 原图偏移 25
        assert_eq!(padded_axis(250, 100), (300, 25));
        // 刚好整除时不补齐
        assert_eq!(padded_axis(200, 100), (200, 0));
        assert_eq!(padded_axis(100, 100), (100, 0));
        // 偏移是差值的一半, 向下取整
        assert_eq!(padded_axis(1, 100), (100, 49));
        assert_eq!(padded_axis(150, 100), (200, 25));
    }
}
