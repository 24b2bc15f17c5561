use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use images_chunk::chunk::config::{DEFAULT_CHUNK_HEIGHT, DEFAULT_CHUNK_WIDTH, DEFAULT_QUALITY};
use images_chunk::{merge, scan_grid, split, Result, SplitOptions};

/// 把大图切分成固定尺寸的 chunk 文件, 或把 chunk 目录拼回完整图片
#[derive(Parser, Debug)]
#[command(name = "images-chunk")]
#[command(about = "把大图切分成固定尺寸的 chunk 文件, 或把 chunk 目录拼回完整图片")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 切分图片
    Split {
        /// 原图路径
        image_path: PathBuf,
        /// chunk 输出目录 (必须已存在)
        output_dir: PathBuf,
        /// 单个 chunk 的宽度
        #[arg(long, value_name = "N", default_value_t = DEFAULT_CHUNK_WIDTH)]
        chunk_width: u32,
        /// 单个 chunk 的高度
        #[arg(long, value_name = "N", default_value_t = DEFAULT_CHUNK_HEIGHT)]
        chunk_height: u32,
        /// 编码质量, 只对 jpeg 生效
        #[arg(long, value_name = "Q", default_value_t = DEFAULT_QUALITY)]
        quality: u8,
    },
    /// 把 chunk 目录拼回完整图片
    Merge {
        /// chunk 目录
        input_dir: PathBuf,
        /// 输出图片路径
        output_path: PathBuf,
    },
    /// 查看 chunk 目录的网格信息 (JSON 输出)
    Info {
        /// chunk 目录
        input_dir: PathBuf,
    },
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Split {
            image_path,
            output_dir,
            chunk_width,
            chunk_height,
            quality,
        } => {
            split(
                &image_path,
                &output_dir,
                SplitOptions {
                    chunk_width,
                    chunk_height,
                    quality,
                },
            )?;
        }
        Commands::Merge {
            input_dir,
            output_path,
        } => {
            merge(&input_dir, &output_path)?;
        }
        Commands::Info { input_dir } => {
            let layout = scan_grid(&input_dir)?;
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("错误: {e}");
        process::exit(1);
    }
}
