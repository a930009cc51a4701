//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `run`: 完整 StoG 流程（JSON 配置或命令行参数）
//! - `transform`: 单条曲线在任意两种函数形式之间转换
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: run, transform

pub mod run;
pub mod transform;

use clap::{Parser, Subcommand};

/// StoG - 全散射 S(Q) ↔ g(r) 变换工具
#[derive(Parser)]
#[command(name = "stog")]
#[command(version)]
#[command(about = "Total-scattering S(Q) to pair distribution function transforms", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Merge reciprocal-space datasets and transform them to real space
    Run(run::RunArgs),

    /// Convert a single curve between function kinds (S(Q), F(Q), FK(Q), DCS(Q), g(r), G(r), GK(r))
    Transform(transform::TransformArgs),
}
