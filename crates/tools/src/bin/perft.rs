//! perft: 指定した深さまでの合法手の数を数える
//!
//! `--verify` を付けると、全ての節点で差分更新版の生成結果を総当たりの生成結果と突き合わせ、
//! 利きテーブルとハッシュの再計算照合も行う。

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info};
use shogiban_core::movegen::reference;
use shogiban_core::{Board, GenType, Move, PositionRecord, RuleConfig};

#[derive(Parser, Debug)]
#[command(name = "perft")]
#[command(about = "合法手生成の perft / 総当たり生成との突き合わせ")]
struct Cli {
    /// 探索する深さ
    #[arg(short, long, default_value_t = 3)]
    depth: u32,

    /// 初手ごとの内訳を表示する
    #[arg(long, default_value_t = false)]
    divide: bool,

    /// 全ての節点で総当たりの生成結果と照合する
    #[arg(long, default_value_t = false)]
    verify: bool,

    /// 開始局面（PositionRecord の JSON、省略時は平手）
    #[arg(long)]
    record: Option<PathBuf>,

    /// ルール設定（TOML）
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_board(cli: &Cli) -> Result<Board> {
    let record = match &cli.record {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<PositionRecord>(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => PositionRecord::hirate(),
    };
    let config = match &cli.config {
        Some(path) => RuleConfig::load(path)?,
        None => RuleConfig::default(),
    };
    Ok(Board::from_record_with_config(&record, config)?)
}

fn sorted(mut moves: Vec<Move>) -> Vec<Move> {
    moves.sort_by_key(|m| m.raw());
    moves
}

/// 総当たりと照合しながら数える
fn verified_perft(board: &mut Board, depth: u32) -> Result<u64> {
    board.verify().with_context(|| format!("inconsistent board at ply {}", board.ply()))?;
    let moves = board.legal_moves(GenType::AllWithUnpromotions);
    let generated = sorted(moves.iter().copied().collect());
    let expected = sorted(reference::legal_moves(board));
    if generated != expected {
        let missing: Vec<_> = expected.iter().filter(|m| !generated.contains(m)).collect();
        let extra: Vec<_> = generated.iter().filter(|m| !expected.contains(m)).collect();
        bail!(
            "move generation mismatch at ply {}: missing {:?}, extra {:?}\n{:?}",
            board.ply(),
            missing,
            extra,
            board
        );
    }
    if depth <= 1 {
        return Ok(moves.len() as u64);
    }
    let mut nodes = 0;
    for mv in moves {
        board.do_move(mv);
        nodes += verified_perft(board, depth - 1)?;
        board.undo_move(mv);
    }
    Ok(nodes)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    if cli.depth == 0 {
        bail!("--depth must be >= 1");
    }
    let mut board = load_board(&cli)?;
    debug!("start position:\n{board:?}");

    let start = Instant::now();
    let nodes = if cli.verify {
        verified_perft(&mut board, cli.depth)?
    } else if cli.divide {
        let mut total = 0;
        for (mv, n) in board.perft_divide(cli.depth) {
            println!("{mv}: {n}");
            total += n;
        }
        total
    } else {
        board.perft(cli.depth)
    };
    let elapsed = start.elapsed();

    let nps = nodes as f64 / elapsed.as_secs_f64().max(1e-9);
    println!("depth {} nodes {}", cli.depth, nodes);
    info!("elapsed {:.3}s ({:.0} nodes/s)", elapsed.as_secs_f64(), nps);
    Ok(())
}
