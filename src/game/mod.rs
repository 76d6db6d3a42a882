/// 游戏逻辑模块
///
/// 包含副露、吃碰杠、听牌、计台、游戏状态和回合流程

pub mod action;
pub mod action_callback;
pub mod chow;
pub mod config;
pub mod constants;
pub mod game_engine;
pub mod kong;
pub mod meld;
pub mod player;
pub mod pong;
pub mod ready;
pub mod scoring;
pub mod state;
