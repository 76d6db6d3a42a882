/// 游戏常量定义

/// 玩家数量
pub const NUM_PLAYERS: u8 = 4;

/// 开局每人手牌数
pub const HAND_SIZE: usize = 16;

/// 和牌需要的面子数（五组面子 + 一对将）
pub const MELDS_TO_WIN: u8 = 5;

/// 每种牌的数量
pub const COPIES_PER_TILE: u8 = 4;

/// 电脑玩家默认响应概率
pub const DEFAULT_KONG_PROBABILITY: f64 = 0.7;
pub const DEFAULT_PONG_PROBABILITY: f64 = 0.6;
pub const DEFAULT_CHOW_PROBABILITY: f64 = 0.5;

/// 单局最大步数（防止驱动循环失控）
pub const MAX_STEPS: u32 = 1000;
