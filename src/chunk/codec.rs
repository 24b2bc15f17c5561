//! 编解码边界: 对 image crate 的薄封装
//!
//! 解码后统一转换成 RGBA8, 后面的切分和拼接只处理一种像素格式

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, ImageFormat, Rgb, RgbImage, RgbaImage};

use super::error::{ChunkError, Result};

// 解码图片并转换成 RGBA8 (只转换一次, 避免每个 chunk 重复转换)
pub fn decode_rgba(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| ChunkError::Codec {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgba8())
}

/// 把 RGBA8 图像编码到目标路径, 格式由扩展名决定
/// # Arguments
/// * `raster` - RGBA8 图像数据
/// * `path` - 输出路径
/// * `quality` - 编码质量, 只对 jpeg 生效, 其余格式忽略
pub fn encode_rgba(raster: &RgbaImage, path: &Path, quality: u8) -> Result<()> {
    let codec_err = |e: image::ImageError| ChunkError::Codec {
        path: path.to_path_buf(),
        source: e,
    };

    let format = ImageFormat::from_path(path).map_err(codec_err)?;
    match format {
        // jpeg 不支持 alpha 通道, 先压平成 RGB8 再按指定质量编码
        ImageFormat::Jpeg => {
            let (width, height) = raster.dimensions();
            let rgb: RgbImage = RgbImage::from_fn(width, height, |x, y| {
                let p = raster.get_pixel(x, y);
                Rgb([p[0], p[1], p[2]])
            });

            let file = fs::File::create(path)?;
            let mut writer = BufWriter::new(file);
            JpegEncoder::new_with_quality(&mut writer, quality)
                .encode(rgb.as_raw(), width, height, ColorType::Rgb8)
                .map_err(codec_err)?;
        }
        _ => raster.save(path).map_err(codec_err)?,
    }

    Ok(())
}
