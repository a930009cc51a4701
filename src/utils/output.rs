//! # 终端输出
//!
//! 命令行的阶段状态行。`*_line` 函数只负责格式化，`print_*` 负责写到终端。
//!
//! ```text
//! [*]    Merged S(Q): 491 points
//! [ON]   Fourier filter: r <= 1.5
//! [OFF]  Lorch window
//! [OUT]  out/argon.gr
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 与 `main.rs` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};
use std::path::Path;

/// 状态标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    On,
    Off,
    Out,
    Done,
    Error,
}

impl Status {
    fn tag(self) -> ColoredString {
        match self {
            Status::Info => "[*]".blue().bold(),
            Status::On => "[ON]".green().bold(),
            Status::Off => "[OFF]".dimmed(),
            Status::Out => "[OUT]".cyan().bold(),
            Status::Done => "[DONE]".green().bold(),
            Status::Error => "[ERR]".red().bold(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 格式化
// ─────────────────────────────────────────────────────────────

/// 标记左对齐到 6 列
pub fn status_line(status: Status, msg: &str) -> String {
    let tag = status.tag();
    let pad = 6usize.saturating_sub(tag.chars().count());
    format!("{}{} {}", tag, " ".repeat(pad), msg)
}

/// 可选阶段：启用时附带细节，未启用时只给名称
pub fn stage_line(name: &str, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => status_line(Status::On, &format!("{}: {}", name, detail)),
        None => status_line(Status::Off, name),
    }
}

/// 数值诊断，六位小数
pub fn metric_line(label: &str, value: f64) -> String {
    status_line(Status::Info, &format!("{}: {:.6}", label, value))
}

/// `from -> to`
pub fn conversion_line(from: &Path, to: &Path) -> String {
    status_line(
        Status::Out,
        &format!(
            "{} {} {}",
            from.display().to_string().dimmed(),
            "->".cyan(),
            to.display()
        ),
    )
}

// ─────────────────────────────────────────────────────────────
// 打印
// ─────────────────────────────────────────────────────────────

pub fn print_info(msg: &str) {
    println!("{}", status_line(Status::Info, msg));
}

pub fn print_error(msg: &str) {
    eprintln!("{}", status_line(Status::Error, msg));
}

pub fn print_stage(name: &str, detail: Option<&str>) {
    println!("{}", stage_line(name, detail));
}

pub fn print_metric(label: &str, value: f64) {
    println!("{}", metric_line(label, value));
}

/// 逐个列出写出的文件，最后给出汇总
pub fn print_written<P: AsRef<Path>>(paths: &[P], dir: &Path) {
    for path in paths {
        println!("{}", status_line(Status::Out, &path.as_ref().display().to_string()));
    }
    println!(
        "{}",
        status_line(
            Status::Done,
            &format!("{} file(s) written to '{}'", paths.len(), dir.display())
        )
    );
}

pub fn print_conversion(from: &Path, to: &Path) {
    println!("{}", conversion_line(from, to));
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}
