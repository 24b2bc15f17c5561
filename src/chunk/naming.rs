//! chunk 文件名约定: `{主体}-{行}+{列}{扩展名}`
//!
//! 切分和拼接共用这一个模块, 保证两个方向的命名规则完全一致

use super::error::{ChunkError, Result};
use super::types::{ChunkCoord, ChunkName};

// 把坐标编码进文件名, 例如 ("photo", (1, 2), ".png") -> "photo-1+2.png"
pub fn format_chunk_filename(base: &str, coord: ChunkCoord, ext: &str) -> String {
    format!("{}-{}+{}{}", base, coord.row, coord.col, ext)
}

// 由主体和扩展名还原原图的文件名
pub fn source_filename(base: &str, ext: &str) -> String {
    format!("{}{}", base, ext)
}

/// 把原图文件名拆成主体和扩展名
/// 扩展名从最后一个 `.` 开始 (含 `.`), 决定 chunk 的编码格式
/// # Arguments
/// * `filename` - 原图文件名, 例如 `photo.png`
/// # Returns
/// * `Result<(&str, &str)>` - (主体, 扩展名)
pub fn split_source_name(filename: &str) -> Result<(&str, &str)> {
    match filename.rfind('.') {
        // 主体不能为空, 像 `.png` 这样的文件名直接拒绝
        Some(p) if p > 0 => Ok((&filename[..p], &filename[p..])),
        _ => Err(ChunkError::MissingExtension(filename.to_string())),
    }
}

/// 解析 chunk 文件名
/// 先定位最后一个 `.`, 再定位它之前的最后一个 `-`,
/// 两者之间的坐标段按 `+` 拆成行和列
/// # Arguments
/// * `filename` - chunk 文件名, 例如 `photo-3+4.png`
/// # Returns
/// * `Result<ChunkName>` - 解析出的主体 / 坐标 / 扩展名
pub fn parse_chunk_filename(filename: &str) -> Result<ChunkName> {
    let invalid = |reason: &str| ChunkError::InvalidChunkName {
        name: filename.to_string(),
        reason: reason.to_string(),
    };

    let dot = filename.rfind('.').ok_or_else(|| invalid("缺少扩展名"))?;
    let dash = filename[..dot]
        .rfind('-')
        .ok_or_else(|| invalid("缺少坐标段"))?;
    if dash == 0 {
        return Err(invalid("文件名主体为空"));
    }

    let coords = &filename[dash + 1..dot];
    let (row, col) = coords.split_once('+').ok_or_else(|| invalid("坐标段缺少 `+`"))?;
    let row = parse_coord(row).ok_or_else(|| invalid("行坐标不是非负整数"))?;
    let col = parse_coord(col).ok_or_else(|| invalid("列坐标不是非负整数"))?;

    Ok(ChunkName {
        base: filename[..dash].to_string(),
        coord: ChunkCoord { row, col },
        ext: filename[dot..].to_string(),
    })
}

// 坐标只接受纯十进制数字, 不接受正负号和空白
// (str::parse 会放过前导 `+`, 所以先逐字节检查)
fn parse_coord(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_encodes_row_and_col() {
        let name = format_chunk_filename("photo", ChunkCoord { row: 1, col: 23 }, ".jpg");
        assert_eq!(name, "photo-1+23.jpg");
    }

    #[test]
    fn parse_recovers_all_parts() {
        let name = parse_chunk_filename("photo-3+4.png").unwrap();
        assert_eq!(name.base, "photo");
        assert_eq!(name.coord, ChunkCoord { row: 3, col: 4 });
        assert_eq!(name.ext, ".png");
    }

    #[test]
    fn parse_and_format_round_trip() {
        for raw in ["a-0+0.png", "my-photo-12+3.jpeg", "x.y-7+40.bmp"] {
            let name = parse_chunk_filename(raw).unwrap();
            assert_eq!(format_chunk_filename(&name.base, name.coord, &name.ext), raw);
        }
    }

    #[test]
    fn parse_keeps_dashes_and_dots_in_base() {
        // 主体里的 `-` 和 `.` 不能干扰坐标段的定位
        let name = parse_chunk_filename("holiday-2024.08-1+2.png").unwrap();
        assert_eq!(name.base, "holiday-2024.08");
        assert_eq!(name.coord, ChunkCoord { row: 1, col: 2 });
    }

    #[test]
    fn parse_rejects_malformed_names() {
        for raw in [
            "photo.png",      // 没有坐标段
            "photo-a+b.jpg",  // 坐标不是数字
            "photo-1.png",    // 坐标段缺少 `+`
            "photo-1+-2.png", // 负数坐标
            "photo-+1+2.png", // 行坐标为空
            "photo-1+.png",   // 列坐标为空
            "photo-1+2",      // 没有扩展名
            "-1+2.png",       // 主体为空
            "photo-1++2.png", // `+` 后面又出现 `+`
        ] {
            let err = parse_chunk_filename(raw).unwrap_err();
            assert!(
                matches!(err, ChunkError::InvalidChunkName { .. }),
                "{raw} 应该解析失败"
            );
        }
    }

    #[test]
    fn split_source_name_uses_last_dot() {
        assert_eq!(split_source_name("photo.png").unwrap(), ("photo", ".png"));
        assert_eq!(
            split_source_name("archive.tar.png").unwrap(),
            ("archive.tar", ".png")
        );
        assert!(matches!(
            split_source_name("photo").unwrap_err(),
            ChunkError::MissingExtension(_)
        ));
        assert!(matches!(
            split_source_name(".png").unwrap_err(),
            ChunkError::MissingExtension(_)
        ));
    }

    #[test]
    fn source_filename_round_trips_through_chunk_name() {
        let name = parse_chunk_filename("photo-0+0.png").unwrap();
        assert_eq!(source_filename(&name.base, &name.ext), "photo.png");
    }
}
