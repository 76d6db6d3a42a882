//! 自动对局演示
//!
//! Usage:
//!   tw-autoplay --games 10 --seed 42 [--config config.json]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tw_mahjong::{AutoCallback, GameConfig, GameEngine};

#[derive(Parser, Debug)]
#[command(name = "tw-autoplay", about = "台湾十六张麻将自动对局")]
struct Args {
    /// 对局数
    #[arg(long, default_value = "1")]
    games: u32,

    /// 随机种子，第 n 局使用 seed + n
    #[arg(long)]
    seed: Option<u64>,

    /// JSON 格式的 GameConfig
    #[arg(long)]
    config: Option<PathBuf>,

    /// 打印每局结束时的手牌
    #[arg(long)]
    show_hands: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config in {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let base = load_config(args.config.as_ref())?;

    let mut wins = 0u32;
    for game in 0..args.games {
        let seed = args.seed.or(base.seed).map(|s| s.wrapping_add(u64::from(game)));
        let config = GameConfig { seed, ..base.clone() };
        let mut engine = GameEngine::new(config).context("failed to start game")?;
        let mut callback = AutoCallback::new(base.policy, seed.unwrap_or(u64::from(game)));
        let result = engine
            .run(&mut callback)
            .with_context(|| format!("game {} aborted", game))?;

        match (engine.state.winner, result) {
            (Some(winner), Some(result)) => {
                wins += 1;
                println!(
                    "第 {} 局：玩家 {} 和牌，{} 台：{}",
                    game + 1,
                    winner,
                    result.fans,
                    result.pattern()
                );
            }
            _ => println!("第 {} 局：流局", game + 1),
        }
        if args.show_hands {
            for player in &engine.state.players {
                let hand: Vec<String> = player.hand.to_sorted_vec().iter().map(|t| t.to_string()).collect();
                println!("  玩家 {}：{}  副露 {:?}", player.id, hand.join(" "), player.melds);
            }
        }
    }
    println!("共 {} 局，和牌 {} 局，流局 {} 局", args.games, wins, args.games - wins);
    Ok(())
}
