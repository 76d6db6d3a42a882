use crate::game::meld::Meld;
use crate::tile::hand::count_tiles;
use crate::tile::win_check::{can_complete_counts, melds_needed};
use crate::tile::Tile;
use smallvec::SmallVec;
use std::fmt;

/// 听牌类型
///
/// 除 `TwoSided` 外都算“独听”，计 1 台。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum WaitKind {
    /// 多面听（两种及以上的牌可以和）
    TwoSided,
    /// 全求：手上只剩一张，单钓
    FullClaim,
    /// 中洞（嵌张）：x 与 x+2 听 x+1
    InsideGap,
    /// 紧听（低端边张）：1-2 听 3
    EdgeLow,
    /// 骑壁（高端边张）：8-9 听 7
    EdgeHigh,
    /// 单吊
    PairWait,
}

impl WaitKind {
    /// 是否为独听
    pub fn is_single(&self) -> bool {
        !matches!(self, WaitKind::TwoSided)
    }

    pub fn name(&self) -> &'static str {
        match self {
            WaitKind::TwoSided => "多面聽",
            WaitKind::FullClaim => "全求",
            WaitKind::InsideGap => "中洞",
            WaitKind::EdgeLow => "緊聽",
            WaitKind::EdgeHigh => "騎壁",
            WaitKind::PairWait => "單吊",
        }
    }
}

impl fmt::Display for WaitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 听牌判定器
pub struct ReadyChecker;

impl ReadyChecker {
    /// 列出能让手牌和牌的所有牌种（规范顺序）
    ///
    /// 34 种牌全部尝试，不考虑该牌是否还有剩余。
    ///
    /// # 参数
    ///
    /// - `pre_win`: 暗手（不含和牌张）
    /// - `melds_count`: 已有副露数
    pub fn winning_tiles(pre_win: &[Tile], melds_count: usize) -> SmallVec<[Tile; 8]> {
        let needed = melds_needed(melds_count);
        let mut counts = count_tiles(pre_win);
        let mut result = SmallVec::new();
        for tile in Tile::all() {
            let idx = tile.to_index();
            counts[idx] += 1;
            if can_complete_counts(&counts, needed, false) {
                result.push(tile);
            }
            counts[idx] -= 1;
        }
        result
    }

    /// 是否听牌
    pub fn is_ready(pre_win: &[Tile], melds: &[Meld]) -> bool {
        !Self::winning_tiles(pre_win, melds.len()).is_empty()
    }

    /// 判定和牌时的听牌类型
    ///
    /// # 参数
    ///
    /// - `pre_win`: 和牌前的暗手（不含 `winning_tile`）
    /// - `melds`: 已有副露
    /// - `winning_tile`: 和的那张牌
    ///
    /// # 返回
    ///
    /// 听两种以上为 `TwoSided`；否则依次判断全求、中洞、紧听、骑壁，剩下的都是单吊。
    pub fn classify_wait(pre_win: &[Tile], melds: &[Meld], winning_tile: Tile) -> WaitKind {
        if Self::winning_tiles(pre_win, melds.len()).len() > 1 {
            return WaitKind::TwoSided;
        }

        if pre_win.len() == 1 && melds.len() >= 4 {
            return WaitKind::FullClaim;
        }

        if let Some(rank) = winning_tile.rank() {
            let held = |offset: i8| {
                winning_tile
                    .offset(offset)
                    .map_or(false, |t| pre_win.contains(&t))
            };
            if held(-1) && held(1) {
                return WaitKind::InsideGap;
            }
            if rank == 3 && held(-2) && held(-1) {
                return WaitKind::EdgeLow;
            }
            if rank == 7 && held(1) && held(2) {
                return WaitKind::EdgeHigh;
            }
        }

        WaitKind::PairWait
    }
}
