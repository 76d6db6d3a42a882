use crate::engine::action_mask::ActionMask;
use crate::game::player::Player;
use crate::tile::win_check::WinResult;
use crate::tile::{Tile, Wind};
use smallvec::SmallVec;

/// 回合阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    /// 当前玩家摸牌
    Draw,
    /// 当前玩家出牌（或加杠/暗杠）
    Discard,
    /// 其他玩家响应打出的牌
    Response,
    /// 本局结束（有人和牌或流局）
    End,
}

/// 弃牌记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscardRecord {
    /// 弃牌玩家 ID
    pub player_id: u8,
    /// 弃的牌
    pub tile: Tile,
    /// 弃牌回合数
    pub turn: u32,
    /// 被哪位玩家吃碰杠胡（None 表示无人要）
    pub claimed_by: Option<u8>,
}

/// 等待交互玩家做出的决策
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionKind {
    /// 摸到的牌可以和：`Claim::Win` 或 `Claim::Pass`
    SelfDrawWin { tile: Tile, result: WinResult },
    /// 轮到出牌：打牌，或加杠 / 暗杠
    Discard {
        add_kongs: SmallVec<[Tile; 4]>,
        concealed_kongs: SmallVec<[Tile; 4]>,
    },
    /// 对别人打出的牌做出响应
    Response { tile: Tile, discarder: u8, options: ActionMask },
    /// 别人加杠的牌可以抢：`Claim::Win` 或 `Claim::Pass`
    RobKong { tile: Tile, from: u8, result: WinResult },
}

/// 挂起的决策令牌
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDecision {
    /// 需要决策的座位
    pub seat: u8,
    pub kind: DecisionKind,
}

/// 游戏状态
#[derive(Debug, Clone)]
pub struct GameState {
    /// 玩家（4 个玩家）
    pub players: [Player; 4],
    /// 当前玩家 ID
    pub current_player: u8,
    /// 当前阶段
    pub phase: Phase,
    /// 庄家座位
    pub dealer: u8,
    /// 圈风
    pub round_wind: Wind,
    /// 当前回合数
    pub turn: u32,
    /// 当前玩家刚摸到的牌
    pub drawn_tile: Option<Tile>,
    /// 最近一张等待响应的弃牌
    pub last_discard: Option<DiscardRecord>,
    /// 弃牌历史记录（所有玩家，按顺序）
    pub discard_history: Vec<DiscardRecord>,
    /// 和牌玩家（流局为 None）
    pub winner: Option<u8>,
    /// 和牌结果
    pub win_result: Option<WinResult>,
    /// 挂起的交互决策
    pub pending: Option<PendingDecision>,
}

impl GameState {
    /// 创建新的游戏状态（尚未发牌）
    pub fn new(dealer: u8, round_wind: Wind, interactive: [bool; 4]) -> Self {
        let players = [0u8, 1, 2, 3].map(|id| {
            let mut player = Player::new(id);
            player.is_dealer = id == dealer;
            player.is_interactive = interactive[id as usize];
            player
        });
        Self {
            players,
            current_player: dealer,
            phase: Phase::Draw,
            dealer,
            round_wind,
            turn: 0,
            drawn_tile: None,
            last_discard: None,
            discard_history: Vec::new(),
            winner: None,
            win_result: None,
            pending: None,
        }
    }

    /// 获取玩家（可变引用）
    pub fn player_mut(&mut self, player_id: u8) -> &mut Player {
        &mut self.players[player_id as usize]
    }

    /// 获取玩家（不可变引用）
    pub fn player_ref(&self, player_id: u8) -> &Player {
        &self.players[player_id as usize]
    }

    /// 检查游戏是否结束
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::End
    }

    /// 是否流局（结束且无人和牌）
    pub fn is_exhaustive_draw(&self) -> bool {
        self.phase == Phase::End && self.winner.is_none()
    }

    /// 取回被吃碰杠胡的弃牌：从弃牌者的弃牌中移除，并在弃牌记录中标记
    pub fn retract_last_discard(&mut self, claimed_by: u8) {
        let Some(record) = self.last_discard.take() else {
            return;
        };
        let discards = &mut self.players[record.player_id as usize].discards;
        if let Some(pos) = discards.iter().rposition(|&t| t == record.tile) {
            discards.remove(pos);
        }
        if let Some(entry) = self
            .discard_history
            .iter_mut()
            .rev()
            .find(|r| r.player_id == record.player_id && r.tile == record.tile && r.claimed_by.is_none())
        {
            entry.claimed_by = Some(claimed_by);
        }
    }

    /// 验证状态一致性
    ///
    /// 检查：
    /// 1. 每种牌在手牌、副露、弃牌中合计不超过 4 张
    /// 2. 非当前出牌者的有效张数为 16
    pub fn validate(&self) -> Result<(), String> {
        let mut counts = [0u8; Tile::KINDS];
        for player in &self.players {
            for tile in player.hand.to_sorted_vec() {
                counts[tile.to_index()] += 1;
            }
            for meld in &player.melds {
                for tile in meld.tiles() {
                    counts[tile.to_index()] += 1;
                }
            }
            for tile in &player.discards {
                counts[tile.to_index()] += 1;
            }
        }
        if let Some(idx) = counts.iter().position(|&c| c > 4) {
            return Err(format!("牌 {:?} 超过 4 张", Tile::from_index(idx)));
        }
        if self.phase == Phase::Draw || self.phase == Phase::Response {
            for player in &self.players {
                if player.effective_tile_count() != 16 {
                    return Err(format!(
                        "玩家 {} 有效张数为 {}",
                        player.id,
                        player.effective_tile_count()
                    ));
                }
            }
        }
        Ok(())
    }
}
