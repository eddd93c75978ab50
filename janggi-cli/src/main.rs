//! 韩国将棋命令行

mod config;
mod render;
mod session;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use janggi_rules::Game;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::CliConfig;

/// 从文件或标准输入读取走法，逐步执行并打印棋盘
#[derive(Parser, Debug)]
#[command(name = "janggi", version)]
struct Args {
    /// 走法文件，每行 `<起点> <终点>`；省略时读取标准输入
    input: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// 起始局面布局字符串，覆盖配置
    #[arg(short, long, value_name = "LAYOUT")]
    position: Option<String>,

    /// 不打印棋盘
    #[arg(long)]
    no_board: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = CliConfig::load(args.config.as_deref())?;

    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(config.log_directive.parse()?))
        .init();

    let mut game = match args.position.as_deref().or(config.start_position.as_deref()) {
        Some(layout) => Game::from_fen(layout).context("Invalid start position")?,
        None => Game::new(),
    };
    let show_board = config.show_board && !args.no_board;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            session::run(&mut game, BufReader::new(file), &mut out, show_board)?
        }
        None => session::run(&mut game, io::stdin().lock(), &mut out, show_board)?,
    };

    info!(
        "{} moves accepted, {} rejected, state {:?}",
        summary.accepted,
        summary.rejected,
        game.state()
    );
    Ok(())
}
