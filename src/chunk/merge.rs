//! 拼接: chunk 目录 -> 网格布局 -> 完整图片
//!
//! 每个 chunk 的落点只由它自己文件名里的坐标决定,
//! 和目录的枚举顺序无关

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use image::{imageops, RgbaImage};

use crate::utils::time::now_ms;

use super::codec::{decode_rgba, encode_rgba};
use super::config::MERGE_QUALITY;
use super::error::{ChunkError, Result};
use super::naming::{format_chunk_filename, parse_chunk_filename, source_filename};
use super::types::{ChunkEntry, GridLayout};

/// 扫描 chunk 目录, 解析出网格布局
/// 网格尺寸直接取坐标最大值加一; chunk 尺寸取样自坐标最小的文件,
/// 所以结果和目录的枚举顺序无关
/// # Arguments
/// * `input_dir` - chunk 目录
/// # Returns
/// * `Result<GridLayout>` - 网格布局, entries 按坐标升序
pub fn scan_grid(input_dir: &Path) -> Result<GridLayout> {
    if !input_dir.is_dir() {
        return Err(ChunkError::InputDirNotFound(input_dir.to_path_buf()));
    }

    // 目录下的每个文件都必须能按命名约定解析, 否则直接报错
    let mut entries: Vec<ChunkEntry> = Vec::new();
    let mut ident: Option<(String, String)> = None; // 共同的 (主体, 扩展名)
    let mut first_name = String::new();

    for dir_entry in fs::read_dir(input_dir)? {
        let dir_entry = dir_entry?;
        let os_name = dir_entry.file_name();
        let filename = os_name.to_str().ok_or_else(|| ChunkError::InvalidChunkName {
            name: os_name.to_string_lossy().into_owned(),
            reason: "文件名不是合法的 UTF-8".to_string(),
        })?;
        let name = parse_chunk_filename(filename)?;

        // 所有 chunk 必须属于同一张图
        match &ident {
            None => {
                ident = Some((name.base.clone(), name.ext.clone()));
                first_name = filename.to_string();
            }
            Some((base, ext)) if *base != name.base || *ext != name.ext => {
                return Err(ChunkError::MixedChunkNames {
                    first: first_name,
                    second: filename.to_string(),
                });
            }
            Some(_) => {}
        }

        entries.push(ChunkEntry {
            coord: name.coord,
            path: dir_entry.path(),
        });
    }

    let (base, ext) = ident.ok_or_else(|| ChunkError::EmptyChunkSet(input_dir.to_path_buf()))?;

    // 排序只是为了取样和日志的确定性, 拼接位置不依赖这个顺序
    entries.sort_by_key(|e| e.coord);

    // 网格尺寸 = 坐标最大值 + 1
    let rows = entries.iter().map(|e| e.coord.row).max().map_or(0, |m| m + 1);
    let cols = entries.iter().map(|e| e.coord.col).max().map_or(0, |m| m + 1);

    // 网格必须是完整的: 每个坐标都在, 且只出现一次
    let expected = u64::from(rows) * u64::from(cols);
    let mut seen = HashSet::new();
    for entry in &entries {
        if !seen.insert(entry.coord) {
            return Err(ChunkError::DuplicateChunk {
                name: format_chunk_filename(&base, entry.coord, &ext),
            });
        }
    }
    if entries.len() as u64 != expected {
        return Err(ChunkError::IncompleteGrid {
            expected,
            actual: entries.len() as u64,
        });
    }

    // 用坐标最小的 chunk 取样, 它的尺寸就是整个网格统一的 chunk 尺寸
    let sample = &entries[0];
    let (chunk_width, chunk_height) = decode_rgba(&sample.path)?.dimensions();

    Ok(GridLayout {
        rows,
        cols,
        chunk_width,
        chunk_height,
        base,
        ext,
        entries,
    })
}

/// 把一个 chunk 目录拼回完整图片
/// # Arguments
/// * `input_dir` - chunk 目录
/// * `output_path` - 输出图片路径, 格式由扩展名决定
pub fn merge(input_dir: &Path, output_path: &Path) -> Result<()> {
    let start_time = now_ms();
    println!("[MERGE] 开始拼接目录: {}", input_dir.display());

    let layout = scan_grid(input_dir)?;
    println!(
        "[MERGE] 网格: {} 行 x {} 列, 每个 chunk {}x{}, 原图文件名推断为 {}",
        layout.rows,
        layout.cols,
        layout.chunk_width,
        layout.chunk_height,
        source_filename(&layout.base, &layout.ext)
    );

    let mut canvas = RgbaImage::new(
        layout.cols * layout.chunk_width,
        layout.rows * layout.chunk_height,
    );

    // 逐个解码并贴到画布上, chunk buffer 在每轮循环结束时释放
    // 峰值内存 = 整张画布 + 一个 chunk
    for entry in &layout.entries {
        let chunk = decode_rgba(&entry.path)?;
        let (width, height) = chunk.dimensions();
        if (width, height) != (layout.chunk_width, layout.chunk_height) {
            return Err(ChunkError::InconsistentChunkSize {
                path: entry.path.clone(),
                width,
                height,
                expected_width: layout.chunk_width,
                expected_height: layout.chunk_height,
            });
        }

        let x = entry.coord.col * layout.chunk_width;
        let y = entry.coord.row * layout.chunk_height;
        imageops::replace(&mut canvas, &chunk, i64::from(x), i64::from(y));
        println!(
            "[MERGE] chunk ({}, {}) 已拼入位置 ({}, {})",
            entry.coord.row, entry.coord.col, x, y
        );
    }

    encode_rgba(&canvas, output_path, MERGE_QUALITY)?;
    println!(
        "[MERGE] 拼接完成: {}x{} -> {} (总耗时: {}ms)",
        canvas.width(),
        canvas.height(),
        output_path.display(),
        now_ms() - start_time
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn scan_rejects_missing_directory() {
        let err = scan_grid(Path::new("definitely-missing-dir")).unwrap_err();
        assert!(matches!(err, ChunkError::InputDirNotFound(_)));
    }

    #[test]
    fn scan_rejects_empty_directory() {
        let dir = tempdir().unwrap();
        let err = scan_grid(dir.path()).unwrap_err();
        assert!(matches!(err, ChunkError::EmptyChunkSet(_)));
    }

    #[test]
    fn scan_rejects_unparseable_names() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("photo-a+b.png"), b"x").unwrap();
        let err = scan_grid(dir.path()).unwrap_err();
        assert!(matches!(err, ChunkError::InvalidChunkName { .. }));
    }

    #[test]
    fn scan_rejects_mixed_base_names() {
        let dir = tempdir().unwrap();
        let tile = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));
        tile.save(dir.path().join("photo-0+0.png")).unwrap();
        tile.save(dir.path().join("other-0+1.png")).unwrap();
        let err = scan_grid(dir.path()).unwrap_err();
        assert!(matches!(err, ChunkError::MixedChunkNames { .. }));
    }

    #[test]
    fn scan_rejects_duplicate_coordinates() {
        // 前导零会让两个不同的文件名落在同一个坐标上
        let dir = tempdir().unwrap();
        let tile = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));
        tile.save(dir.path().join("photo-0+0.png")).unwrap();
        tile.save(dir.path().join("photo-0+1.png")).unwrap();
        tile.save(dir.path().join("photo-0+01.png")).unwrap();
        let err = scan_grid(dir.path()).unwrap_err();
        assert!(matches!(err, ChunkError::DuplicateChunk { .. }));
    }

    #[test]
    fn scan_rejects_incomplete_grid() {
        // 只有对角线上的两个 chunk, 2x2 网格缺了一半
        let dir = tempdir().unwrap();
        let tile = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));
        tile.save(dir.path().join("photo-0+0.png")).unwrap();
        tile.save(dir.path().join("photo-1+1.png")).unwrap();
        let err = scan_grid(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ChunkError::IncompleteGrid {
                expected: 4,
                actual: 2
            }
        ));
    }
}
