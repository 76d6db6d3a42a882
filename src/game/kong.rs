use crate::game::meld::Meld;
use crate::game::player::Player;
use crate::tile::win_check::is_win;
use crate::tile::Tile;
use smallvec::SmallVec;

/// 杠类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum KongType {
    /// 明杠（别人打出的牌，手中有三张）
    Direct,
    /// 加杠（已碰的刻子摸到第四张）
    Added,
    /// 暗杠（手牌中有四张相同的牌）
    Concealed,
}

/// 杠操作器
pub struct KongHandler;

impl KongHandler {
    /// 检查是否可以加杠
    ///
    /// 加杠条件：
    /// 1. 玩家有这张牌的明刻（`Meld::Triplet`）
    /// 2. 暗手中恰好有一张这张牌
    ///
    /// # 返回
    ///
    /// 如果可以加杠，返回 Some(KongType::Added)，否则返回 None
    pub fn can_add_kong(player: &Player, tile: &Tile) -> Option<KongType> {
        let has_triplet = player
            .melds
            .iter()
            .any(|meld| matches!(meld, Meld::Triplet { tile: t } if t == tile));
        if has_triplet && player.hand.tile_count(*tile) == 1 {
            Some(KongType::Added)
        } else {
            None
        }
    }

    /// 所有可以加杠的牌（按副露顺序）
    pub fn add_kong_candidates(player: &Player) -> SmallVec<[Tile; 4]> {
        player
            .melds
            .iter()
            .filter_map(|meld| match meld {
                Meld::Triplet { tile } => Some(*tile),
                _ => None,
            })
            .filter(|tile| Self::can_add_kong(player, tile).is_some())
            .collect()
    }

    /// 检查是否可以明杠别人打出的牌（手中至少三张）
    pub fn can_direct_kong(player: &Player, tile: &Tile) -> Option<KongType> {
        if player.hand.tile_count(*tile) >= 3 {
            Some(KongType::Direct)
        } else {
            None
        }
    }

    /// 检查是否可以暗杠（手中恰好四张）
    pub fn can_concealed_kong(player: &Player, tile: &Tile) -> Option<KongType> {
        if player.hand.tile_count(*tile) == 4 {
            Some(KongType::Concealed)
        } else {
            None
        }
    }

    /// 所有可以暗杠的牌（规范顺序）
    pub fn concealed_kong_candidates(player: &Player) -> SmallVec<[Tile; 4]> {
        player
            .hand
            .distinct_tiles()
            .into_iter()
            .filter(|tile| player.hand.tile_count(*tile) == 4)
            .collect()
    }

    /// 执行加杠：从暗手移除一张，原有的明刻原地升级为明杠
    ///
    /// # 返回
    ///
    /// 是否成功加杠；失败时玩家状态不变
    pub fn add_kong(player: &mut Player, tile: Tile) -> bool {
        if KongHandler::can_add_kong(player, &tile).is_none() {
            return false;
        }
        let Some(index) = player
            .melds
            .iter()
            .position(|meld| matches!(meld, Meld::Triplet { tile: t } if *t == tile))
        else {
            return false;
        };
        if !player.hand.remove_tile(tile) {
            return false;
        }
        player.melds[index].upgrade_to_quad(tile)
    }

    /// 执行明杠：移除三张，加入明杠
    pub fn direct_kong(player: &mut Player, tile: Tile) -> bool {
        if KongHandler::can_direct_kong(player, &tile).is_none() {
            return false;
        }
        if !player.hand.remove_tiles(&[tile; 3]) {
            return false;
        }
        player.melds.push(Meld::Quad { tile, is_concealed: false });
        true
    }

    /// 执行暗杠：移除四张，加入暗杠
    pub fn concealed_kong(player: &mut Player, tile: Tile) -> bool {
        if KongHandler::can_concealed_kong(player, &tile).is_none() {
            return false;
        }
        if !player.hand.remove_tiles(&[tile; 4]) {
            return false;
        }
        player.melds.push(Meld::Quad { tile, is_concealed: true });
        true
    }

    /// 检查是否可以抢杠胡：加上被加杠的牌后能和牌
    ///
    /// # 参数
    ///
    /// - `player`: 要抢杠的玩家（不是加杠者）
    /// - `tile`: 被加杠的牌
    pub fn can_rob_kong(player: &Player, tile: &Tile) -> bool {
        let mut full = player.hand.to_sorted_vec();
        full.push(*tile);
        is_win(&full, player.melds.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::tile::parse_tiles;

    fn player_with(hand: &str) -> Player {
        let mut player = Player::new(0);
        for tile in parse_tiles(hand).unwrap() {
            player.hand.add_tile(tile);
        }
        player
    }

    #[test]
    fn test_add_kong() {
        let mut player = player_with("1m 5p");
        player.melds.push(Meld::Triplet { tile: Tile::Wan(1) });
        player.melds.push(Meld::Triplet { tile: Tile::Wan(2) });

        assert!(KongHandler::can_add_kong(&player, &Tile::Wan(1)).is_some());
        assert!(KongHandler::can_add_kong(&player, &Tile::Wan(2)).is_none());
        assert_eq!(KongHandler::add_kong_candidates(&player).as_slice(), &[Tile::Wan(1)]);

        assert!(KongHandler::add_kong(&mut player, Tile::Wan(1)));
        assert_eq!(player.melds[0], Meld::Quad { tile: Tile::Wan(1), is_concealed: false });
        assert_eq!(player.melds.len(), 2);
        assert_eq!(player.hand.tile_count(Tile::Wan(1)), 0);
    }

    #[test]
    fn test_direct_and_concealed_kong() {
        let mut player = player_with("7s 7s 7s E E E E");
        assert!(KongHandler::can_direct_kong(&player, &Tile::Tiao(7)).is_some());
        assert!(KongHandler::can_concealed_kong(&player, &Tile::Tiao(7)).is_none());

        let east = Tile::Wind(crate::tile::Wind::East);
        assert_eq!(KongHandler::concealed_kong_candidates(&player).as_slice(), &[east]);

        assert!(KongHandler::direct_kong(&mut player, Tile::Tiao(7)));
        assert!(KongHandler::concealed_kong(&mut player, east));
        assert_eq!(
            player.melds,
            vec![
                Meld::Quad { tile: Tile::Tiao(7), is_concealed: false },
                Meld::Quad { tile: east, is_concealed: true },
            ]
        );
        assert!(player.hand.is_empty());
    }

    #[test]
    fn test_failed_kong_does_not_mutate() {
        let mut player = player_with("3p 3p");
        let before = player.clone();
        assert!(!KongHandler::direct_kong(&mut player, Tile::Tong(3)));
        assert!(!KongHandler::concealed_kong(&mut player, Tile::Tong(3)));
        assert!(!KongHandler::add_kong(&mut player, Tile::Tong(3)));
        assert_eq!(player, before);
    }

    #[test]
    fn test_can_rob_kong() {
        // 4 组副露 + 4p 5p 5p 5p：胡 3p/6p/4p
        let mut player = player_with("4p 5p 5p 5p");
        for rank in 1..=4 {
            player.melds.push(Meld::Triplet { tile: Tile::Tiao(rank) });
        }
        assert!(KongHandler::can_rob_kong(&player, &Tile::Tong(6)));
        assert!(!KongHandler::can_rob_kong(&player, &Tile::Tong(9)));
    }
}
