use crate::game::meld::Meld;
use crate::game::ready::ReadyChecker;
use crate::tile::{Hand, Tile, Wind};

/// 玩家状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// 玩家 ID（座位号 0-3，按此顺序轮转）
    pub id: u8,
    /// 暗手
    pub hand: Hand,
    /// 副露牌组（按形成顺序）
    pub melds: Vec<Meld>,
    /// 自己的弃牌（被吃碰杠胡的牌会被取回）
    pub discards: Vec<Tile>,
    /// 是否为庄家
    pub is_dealer: bool,
    /// 是否由外部决策（人类玩家）
    pub is_interactive: bool,
}

impl Player {
    /// 创建新玩家
    pub fn new(id: u8) -> Self {
        Self {
            id,
            hand: Hand::new(),
            melds: Vec::new(),
            discards: Vec::new(),
            is_dealer: false,
            is_interactive: false,
        }
    }

    /// 座位风（庄家为东）
    pub fn seat_wind(&self, dealer: u8) -> Wind {
        Wind::for_seat(self.id, dealer)
    }

    /// 是否门清（没有任何副露，暗杠也不算）
    pub fn is_concealed(&self) -> bool {
        self.melds.is_empty()
    }

    /// 所有可以听的牌
    pub fn ready_tiles(&self) -> Vec<Tile> {
        ReadyChecker::winning_tiles(&self.hand.to_sorted_vec(), self.melds.len()).into_vec()
    }

    /// 手牌 + 副露的总张数（杠按 3 张计）
    ///
    /// 非当前出牌者应为 16，出牌前为 17。
    pub fn effective_tile_count(&self) -> usize {
        self.hand.total_count() + self.melds.len() * 3
    }
}
