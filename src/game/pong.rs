use crate::tile::Tile;
use crate::game::player::Player;
use crate::game::meld::Meld;

/// 碰牌操作器
pub struct PongHandler;

impl PongHandler {
    /// 检查是否可以碰牌
    ///
    /// 手牌中至少有两张与打出的牌相同即可碰，任何座位都可以碰。
    ///
    /// # 参数
    ///
    /// - `player`: 玩家
    /// - `tile`: 别人打出的牌
    pub fn can_pong(player: &Player, tile: &Tile) -> bool {
        player.hand.tile_count(*tile) >= 2
    }

    /// 执行碰牌：移除两张，加入明刻
    ///
    /// # 返回
    ///
    /// 是否成功碰牌；失败时玩家状态不变
    pub fn pong(player: &mut Player, tile: Tile) -> bool {
        if !PongHandler::can_pong(player, &tile) {
            return false;
        }
        if !player.hand.remove_tiles(&[tile, tile]) {
            return false;
        }
        player.melds.push(Meld::Triplet { tile });
        true
    }
}
