use super::hand::{count_tiles, Hand, TileCounts};
use super::Tile;
use crate::game::constants::MELDS_TO_WIN;
use crate::game::meld::Meld;
use crate::game::scoring::{Fan, FanCalculator, WinContext};
use std::collections::HashMap;

/// 胡牌类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum WinType {
    /// 自摸
    SelfDrawn,
    /// 胡别人打出的牌（含抢杠）
    Claimed,
}

/// 胡牌判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinResult {
    /// 是否胡牌
    pub is_win: bool,
    /// 胡牌类型（未胡为 None）
    pub win_type: Option<WinType>,
    /// 总台数（胡牌时至少 1 台）
    pub fans: u32,
    /// 按计算顺序排列的台数明细
    pub details: Vec<Fan>,
}

impl WinResult {
    /// 未胡牌
    pub fn not_win() -> Self {
        Self {
            is_win: false,
            win_type: None,
            fans: 0,
            details: Vec::new(),
        }
    }

    /// 明细标签，例如 `清一色 8台`
    pub fn labels(&self) -> Vec<String> {
        self.details.iter().map(|fan| fan.to_string()).collect()
    }

    /// 牌型描述：标签以 ` + ` 连接
    pub fn pattern(&self) -> String {
        self.labels().join(" + ")
    }
}

/// 已有 `melds_count` 组副露时，还需要从手牌中组成的面子数
pub fn melds_needed(melds_count: usize) -> u8 {
    (MELDS_TO_WIN as usize).saturating_sub(melds_count) as u8
}

/// 判定一组牌能否恰好拆成 `melds_needed` 组面子（刻子或顺子）加一对将
///
/// `pair_used` 为 true 时表示将已确定，只需拆出面子。
///
/// # 算法
///
/// 总是从最小的一种牌入手，依次尝试：作将、作刻子、作顺子起点。
/// 三个分支都会尝试，任一成功即返回。
pub fn can_complete(tiles: &[Tile], melds_needed: u8, pair_used: bool) -> bool {
    let mut counts = count_tiles(tiles);
    search(&mut counts, tiles.len(), melds_needed, pair_used, true)
}

/// 计数数组版本的 [`can_complete`]
pub fn can_complete_counts(counts: &TileCounts, melds_needed: u8, pair_used: bool) -> bool {
    let mut counts = *counts;
    let remaining = counts.iter().map(|&c| c as usize).sum();
    search(&mut counts, remaining, melds_needed, pair_used, true)
}

/// 只允许刻子的拆牌（碰碰胡判定）
pub fn can_complete_triplets_only(tiles: &[Tile], melds_needed: u8, pair_used: bool) -> bool {
    let mut counts = count_tiles(tiles);
    search(&mut counts, tiles.len(), melds_needed, pair_used, false)
}

fn search(
    counts: &mut TileCounts,
    remaining: usize,
    melds_needed: u8,
    pair_used: bool,
    allow_runs: bool,
) -> bool {
    if remaining == 0 {
        return melds_needed == 0 && pair_used;
    }
    let first = match counts.iter().position(|&c| c > 0) {
        Some(i) => i,
        None => return false,
    };
    if remaining == 2 && melds_needed == 0 && !pair_used {
        return counts[first] == 2;
    }
    let floor = melds_needed as usize * 3 + if pair_used { 0 } else { 2 };
    if remaining < floor {
        return false;
    }

    // 作将
    if !pair_used && counts[first] >= 2 {
        counts[first] -= 2;
        let ok = search(counts, remaining - 2, melds_needed, true, allow_runs);
        counts[first] += 2;
        if ok {
            return true;
        }
    }

    if melds_needed == 0 {
        return false;
    }

    // 刻子
    if counts[first] >= 3 {
        counts[first] -= 3;
        let ok = search(counts, remaining - 3, melds_needed - 1, pair_used, allow_runs);
        counts[first] += 3;
        if ok {
            return true;
        }
    }

    // 顺子：只有数牌，且起点不超过 7
    if allow_runs && first < 27 && first % 9 <= 6 && counts[first + 1] > 0 && counts[first + 2] > 0 {
        counts[first] -= 1;
        counts[first + 1] -= 1;
        counts[first + 2] -= 1;
        let ok = search(counts, remaining - 3, melds_needed - 1, pair_used, allow_runs);
        counts[first] += 1;
        counts[first + 1] += 1;
        counts[first + 2] += 1;
        if ok {
            return true;
        }
    }

    false
}

/// 手牌（已含和牌张）在 `melds_count` 组副露下是否和牌
#[inline]
pub fn is_win(tiles: &[Tile], melds_count: usize) -> bool {
    can_complete(tiles, melds_needed(melds_count), false)
}

/// 判定并计台（不使用缓存）
///
/// `hand` 为和牌前的暗手，`winning_tile` 为摸到或要胡的那张牌。
pub fn check_win(
    hand: &Hand,
    melds: &[Meld],
    winning_tile: Tile,
    win_type: WinType,
    ctx: &WinContext,
) -> WinResult {
    let mut full = hand.to_sorted_vec();
    full.push(winning_tile);
    if !is_win(&full, melds.len()) {
        return WinResult::not_win();
    }
    score_win(&full, melds, winning_tile, win_type, ctx)
}

fn score_win(full: &[Tile], melds: &[Meld], winning_tile: Tile, win_type: WinType, ctx: &WinContext) -> WinResult {
    let (fans, details) = FanCalculator::score(full, melds, win_type, winning_tile, ctx);
    WinResult {
        is_win: true,
        win_type: Some(win_type),
        fans,
        details,
    }
}

/// 胡牌判定器
///
/// 在 [`can_complete`] 之上加一层结果缓存，键为（计数数组、所需面子数、是否已有将）。
#[derive(Debug, Clone)]
pub struct WinChecker {
    result_cache: HashMap<(TileCounts, u8, bool), bool>,
    /// 最大缓存大小（超过后清空缓存）
    max_cache_size: usize,
}

impl WinChecker {
    /// 创建新的胡牌判定器
    pub fn new() -> Self {
        Self::with_cache_size(4096)
    }

    /// 创建新的胡牌判定器（自定义缓存大小）
    pub fn with_cache_size(max_cache_size: usize) -> Self {
        Self {
            result_cache: HashMap::new(),
            max_cache_size,
        }
    }

    /// 带缓存的 [`can_complete`]
    pub fn can_complete(&mut self, tiles: &[Tile], melds_needed: u8, pair_used: bool) -> bool {
        let key = (count_tiles(tiles), melds_needed, pair_used);
        if let Some(&cached) = self.result_cache.get(&key) {
            return cached;
        }
        let result = can_complete_counts(&key.0, melds_needed, pair_used);
        if self.result_cache.len() >= self.max_cache_size {
            self.result_cache.clear();
        }
        self.result_cache.insert(key, result);
        result
    }

    /// 判定并计台
    ///
    /// # 参数
    ///
    /// - `hand`: 和牌前的暗手（不含 `winning_tile`）
    /// - `melds`: 已有副露（含暗杠）
    /// - `winning_tile`: 摸到或别人打出的牌
    /// - `win_type`: 自摸或胡别人
    /// - `ctx`: 计台上下文
    pub fn check_win(
        &mut self,
        hand: &Hand,
        melds: &[Meld],
        winning_tile: Tile,
        win_type: WinType,
        ctx: &WinContext,
    ) -> WinResult {
        let mut full = hand.to_sorted_vec();
        full.push(winning_tile);
        if !self.can_complete(&full, melds_needed(melds.len()), false) {
            return WinResult::not_win();
        }
        score_win(&full, melds, winning_tile, win_type, ctx)
    }

    /// 当前缓存条目数
    pub fn cache_len(&self) -> usize {
        self.result_cache.len()
    }
}

impl Default for WinChecker {
    fn default() -> Self {
        Self::new()
    }
}
