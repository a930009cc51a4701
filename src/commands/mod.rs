//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。库层错误在此处由 `anyhow` 附加上下文。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `stog/`, `transform/`, `utils/`
//! - 子模块: run, transform

pub mod run;
pub mod transform;

use crate::cli::Commands;

/// 执行命令
pub fn run(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Run(args) => run::execute(args),
        Commands::Transform(args) => transform::execute(args),
    }
}

/// 设置全局 rayon 线程池大小（0 = CPU 核数）
pub(crate) fn configure_threads(jobs: usize) {
    let num_threads = if jobs == 0 { num_cpus::get() } else { jobs };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok();
}
