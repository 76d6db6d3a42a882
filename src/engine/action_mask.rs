use crate::game::action::Claim;
use crate::game::chow::{ChowHandler, ChowOption};
use crate::game::kong::KongHandler;
use crate::game::player::Player;
use crate::game::pong::PongHandler;
use crate::game::scoring::WinContext;
use crate::tile::win_check::{check_win, WinResult, WinType};
use crate::tile::Tile;
use smallvec::SmallVec;

/// 动作掩码
///
/// 一位玩家面对一张牌时所有合法的响应。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMask {
    /// 能胡时的和牌结果
    pub win: Option<WinResult>,
    /// 能否明杠
    pub can_kong: bool,
    /// 能否碰
    pub can_pong: bool,
    /// 所有吃法
    pub chows: SmallVec<[ChowOption; 3]>,
}

impl ActionMask {
    /// 创建空的动作掩码（只能过）
    pub fn new() -> Self {
        Self {
            win: None,
            can_kong: false,
            can_pong: false,
            chows: SmallVec::new(),
        }
    }

    /// 生成对别人打出的牌的动作掩码
    ///
    /// # 参数
    ///
    /// - `player`: 响应的玩家
    /// - `tile`: 打出的牌
    /// - `is_next_seat`: 是否为出牌者的下家（下家可以吃，不能明杠）
    /// - `ctx`: 该玩家的计台上下文
    pub fn for_discard(player: &Player, tile: Tile, is_next_seat: bool, ctx: &WinContext) -> Self {
        let result = check_win(&player.hand, &player.melds, tile, WinType::Claimed, ctx);
        Self {
            win: result.is_win.then_some(result),
            can_kong: !is_next_seat && KongHandler::can_direct_kong(player, &tile).is_some(),
            can_pong: PongHandler::can_pong(player, &tile),
            chows: if is_next_seat {
                ChowHandler::chow_options(player, &tile)
            } else {
                SmallVec::new()
            },
        }
    }

    /// 生成抢杠的动作掩码（只能胡或过）
    pub fn for_rob_kong(player: &Player, tile: Tile, ctx: &WinContext) -> Self {
        let ctx = WinContext {
            is_rob_kong: true,
            ..*ctx
        };
        let mut mask = Self::new();
        if KongHandler::can_rob_kong(player, &tile) {
            let result = check_win(&player.hand, &player.melds, tile, WinType::Claimed, &ctx);
            mask.win = result.is_win.then_some(result);
        }
        mask
    }

    /// 是否除了过以外没有任何选择
    pub fn is_empty(&self) -> bool {
        self.win.is_none() && !self.can_kong && !self.can_pong && self.chows.is_empty()
    }

    /// 可选响应中的最高优先级（只能过时为 0）
    pub fn highest_priority(&self) -> u8 {
        self.claims().first().map_or(0, Claim::priority)
    }

    /// 该响应是否合法（过总是合法）
    pub fn allows(&self, claim: &Claim) -> bool {
        match claim {
            Claim::Win => self.win.is_some(),
            Claim::Kong => self.can_kong,
            Claim::Pong => self.can_pong,
            Claim::Chow(tiles) => self.chows.iter().any(|option| option.tiles == *tiles),
            Claim::Pass => true,
        }
    }

    /// 按优先级列出所有合法响应（最后是过）
    pub fn claims(&self) -> Vec<Claim> {
        let mut claims = Vec::new();
        if self.win.is_some() {
            claims.push(Claim::Win);
        }
        if self.can_kong {
            claims.push(Claim::Kong);
        }
        if self.can_pong {
            claims.push(Claim::Pong);
        }
        claims.extend(self.chows.iter().map(|option| Claim::Chow(option.tiles)));
        claims.push(Claim::Pass);
        claims
    }

    /// 转换为布尔数组：[胡, 杠, 碰, 吃, 过]
    pub fn to_bool_array(&self) -> [bool; 5] {
        [
            self.win.is_some(),
            self.can_kong,
            self.can_pong,
            !self.chows.is_empty(),
            true,
        ]
    }
}

impl Default for ActionMask {
    fn default() -> Self {
        Self::new()
    }
}
