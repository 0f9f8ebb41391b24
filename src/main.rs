//! Xiangqi engine CLI
//!
//! 命令行界面，用于调试引擎和作为纯文本界面
//!
//! 支持三种模式：
//! 1. show：打印布局
//! 2. play：交互式对弈，每行一个记谱或命令
//! 3. server：长驻进程，通过 stdin/stdout 以 JSON 行通信

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use xiangqi_engine::{
    EngineConfig, GameState, KingRule, LayoutBook, LayoutFile, MoveStatus, Snapshot,
};

#[derive(Parser)]
#[command(name = "xiangqi-engine")]
#[command(about = "Xiangqi rules engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 打印开局布局
    Show {
        #[command(flatten)]
        game: GameArgs,
    },

    /// 交互式对弈
    Play {
        #[command(flatten)]
        game: GameArgs,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server {
        #[command(flatten)]
        game: GameArgs,
    },
}

#[derive(Args)]
struct GameArgs {
    /// 布局名称
    #[arg(long, default_value = "standard")]
    layout: String,

    /// JSON 布局文件，不指定时使用内置布局
    #[arg(long)]
    layouts: Option<PathBuf>,

    /// 使用旧版将的走法判断
    #[arg(long)]
    legacy_king: bool,
}

impl GameArgs {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            king_rule: if self.legacy_king {
                KingRule::Legacy
            } else {
                KingRule::Strict
            },
            layout: self.layout.clone(),
        }
    }

    fn new_game(&self) -> GameState {
        let config = self.config();
        match &self.layouts {
            Some(path) => GameState::from_source(&LayoutFile::new(path), &config),
            None => GameState::from_source(LayoutBook::builtin(), &config),
        }
    }
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    notation: String,
}

#[derive(Serialize, Deserialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<i8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<Snapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    board: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServerResponse {
    fn success_status(status: i8, game: &GameState) -> Self {
        Self {
            ok: true,
            status: Some(status),
            state: Some(game.snapshot()),
            ..Default::default()
        }
    }

    fn success_state(game: &GameState) -> Self {
        Self {
            ok: true,
            state: Some(game.snapshot()),
            ..Default::default()
        }
    }

    fn success_board(game: &GameState) -> Self {
        Self {
            ok: true,
            board: Some(game.to_string()),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Show { game } => {
            print!("{}", game.new_game());
            Ok(())
        }
        Commands::Play { game } => run_play(game.new_game()),
        Commands::Server { game } => run_server(game.new_game()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// 交互模式主循环
fn run_play(mut game: GameState) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("{}", game);
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_ascii_lowercase().as_str() {
            "quit" | "exit" => break,
            "undo" => {
                if !game.recall_move() {
                    println!("Nothing to undo");
                }
            }
            "resign" => game.resign(),
            "draw" => game.draw(),
            _ => {
                let status = game.make_move(input);
                match status {
                    MoveStatus::Rejected => println!("Move not accepted: {}", input),
                    MoveStatus::Ok => {}
                    other => println!("{}", other),
                }
            }
        }

        print!("{}", game);
        stdout.flush()?;
    }

    Ok(())
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server(mut game: GameState) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        // 解析请求
        let request: ServerRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = ServerResponse::error(&format!("Invalid JSON: {}", e));
                respond(&mut stdout, &response)?;
                continue;
            }
        };

        // 处理命令
        let response = match request.cmd.as_str() {
            "move" => {
                let status = game.make_move(&request.notation);
                ServerResponse::success_status(status.code(), &game)
            }
            "undo" => {
                let recalled = game.recall_move();
                ServerResponse::success_status(if recalled { 1 } else { 0 }, &game)
            }
            "resign" => {
                game.resign();
                ServerResponse::success_state(&game)
            }
            "draw" => {
                game.draw();
                ServerResponse::success_state(&game)
            }
            "state" => ServerResponse::success_state(&game),
            "board" => ServerResponse::success_board(&game),
            "quit" => break,
            _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
        };

        respond(&mut stdout, &response)?;
    }

    Ok(())
}

/// 写出一行 JSON 响应
fn respond(out: &mut impl Write, response: &ServerResponse) -> io::Result<()> {
    serde_json::to_writer(&mut *out, response)?;
    writeln!(out)?;
    out.flush()
}
