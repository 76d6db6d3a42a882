use crate::tile::Tile;

/// 对一张牌的响应（别人打出的牌、被加杠的牌或自己摸到的牌）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Claim {
    /// 胡
    Win,
    /// 明杠
    Kong,
    /// 碰
    Pong,
    /// 吃：组成的顺子（必须包含被吃的牌）
    Chow([Tile; 3]),
    /// 过
    Pass,
}

impl Claim {
    /// 优先级：胡 > 杠 > 碰 > 吃 > 过
    pub fn priority(&self) -> u8 {
        match self {
            Claim::Win => 4,
            Claim::Kong => 3,
            Claim::Pong => 2,
            Claim::Chow(_) => 1,
            Claim::Pass => 0,
        }
    }
}

/// 交互玩家的决策
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Action {
    /// 打出排序后手牌中的第 `index` 张
    Discard { index: usize },
    /// 加杠
    AddKong { tile: Tile },
    /// 暗杠
    ConcealedKong { tile: Tile },
    /// 响应（含自摸胡 / 抢杠胡 / 过）
    Claim(Claim),
}
