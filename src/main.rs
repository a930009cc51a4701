//! # StoG - 全散射 S(Q) ↔ g(r) 变换工具
//!
//! 将多组倒空间散射数据合并并变换到实空间，可选 Fourier 滤波和 Lorch 窗。
//!
//! ## 子命令
//! - `run` - 完整 StoG 流程
//! - `transform` - 单条曲线的函数形式转换
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     └── stog 库 (models/, transform/, parsers/, stog/)
//!   └── utils/      (终端输出与进度条)
//! ```

mod cli;
mod commands;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
