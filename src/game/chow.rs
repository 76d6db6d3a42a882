use crate::game::meld::Meld;
use crate::game::player::Player;
use crate::tile::Tile;
use smallvec::SmallVec;

/// 吃牌时被吃的牌在顺子中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ChowPosition {
    /// 吃的牌在最高位：[r-2, r-1, r]
    High,
    /// 吃的牌在中间：[r-1, r, r+1]
    Middle,
    /// 吃的牌在最低位：[r, r+1, r+2]
    Low,
}

/// 一种吃法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ChowOption {
    /// 组成的顺子（升序）
    pub tiles: [Tile; 3],
    /// 被吃的牌
    pub target: Tile,
    pub position: ChowPosition,
}

impl ChowOption {
    /// 需要从手中拿出的两张牌
    pub fn needed(&self) -> SmallVec<[Tile; 2]> {
        self.tiles.iter().copied().filter(|&t| t != self.target).collect()
    }
}

/// 吃牌操作器
pub struct ChowHandler;

impl ChowHandler {
    /// 列出所有吃法（0-3 种）
    ///
    /// 字牌不能吃。三种位置分别对照原手牌检查，按 High、Middle、Low 顺序返回。
    ///
    /// # 参数
    ///
    /// - `player`: 上家打牌后的下家
    /// - `tile`: 上家打出的牌
    pub fn chow_options(player: &Player, tile: &Tile) -> SmallVec<[ChowOption; 3]> {
        let mut options = SmallVec::new();
        if tile.is_honor() {
            return options;
        }
        let shapes = [
            (ChowPosition::High, [-2i8, -1]),
            (ChowPosition::Middle, [-1, 1]),
            (ChowPosition::Low, [1, 2]),
        ];
        for (position, offsets) in shapes {
            let (Some(a), Some(b)) = (tile.offset(offsets[0]), tile.offset(offsets[1])) else {
                continue;
            };
            if !player.hand.has_tile(a) || !player.hand.has_tile(b) {
                continue;
            }
            let mut tiles = [a, b, *tile];
            tiles.sort();
            options.push(ChowOption {
                tiles,
                target: *tile,
                position,
            });
        }
        options
    }

    /// 是否至少有一种吃法
    pub fn can_chow(player: &Player, tile: &Tile) -> bool {
        !Self::chow_options(player, tile).is_empty()
    }

    /// 执行吃牌
    ///
    /// # 参数
    ///
    /// - `player`: 玩家（可变引用）
    /// - `tiles`: 组成顺子的三张牌（必须恰好三张且含 `target`）
    /// - `target`: 上家打出的牌
    ///
    /// # 返回
    ///
    /// 是否成功吃牌；牌数不对、不成顺子或手中缺牌时失败且不改变玩家状态
    pub fn chow(player: &mut Player, tiles: &[Tile], target: Tile) -> bool {
        let [a, b, c] = match *tiles {
            [a, b, c] => [a, b, c],
            _ => return false,
        };
        let Some(meld) = Meld::run(a, b, c) else {
            return false;
        };
        let Some(target_pos) = tiles.iter().position(|&t| t == target) else {
            return false;
        };
        let needed: SmallVec<[Tile; 2]> = tiles
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != target_pos)
            .map(|(_, &t)| t)
            .collect();
        if !player.hand.remove_tiles(&needed) {
            return false;
        }
        player.melds.push(meld);
        true
    }
}
