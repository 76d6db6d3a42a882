use crate::game::meld::{Meld, MeldKind};
use crate::game::ready::{ReadyChecker, WaitKind};
use crate::tile::hand::count_tiles;
use crate::tile::win_check::{can_complete_triplets_only, melds_needed, WinType};
use crate::tile::{Dragon, Tile, Wind};
use smallvec::SmallVec;
use std::fmt;

/// 计台上下文
///
/// 缺省值：非庄家，门风、圈风均为东，其余标志为 false。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WinContext {
    /// 是否为庄家
    pub is_dealer: bool,
    /// 门风
    pub seat_wind: Wind,
    /// 圈风
    pub round_wind: Wind,
    /// 是否为牌墙最后一张
    pub is_last_tile: bool,
    /// 是否为杠后补牌
    pub is_kong_draw: bool,
    /// 是否为抢杠
    pub is_rob_kong: bool,
}

/// 台数项目
///
/// `Display` 输出即明细标签，例如 `清一色 8台`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Fan {
    /// 大四喜：东南西北四组刻子
    BigFourWinds,
    /// 大三元：中发白三组刻子
    BigThreeDragons,
    /// 小四喜：三组风刻 + 第四种风作将
    SmallFourWinds,
    /// 小三元：两组箭刻 + 第三种箭牌作将
    SmallThreeDragons,
    /// 圈风刻
    RoundWind(Wind),
    /// 门风刻
    SeatWind(Wind),
    /// 箭牌刻
    DragonTriplet(Dragon),
    /// 清一色
    FullFlush,
    /// 混一色
    HalfFlush,
    /// 五暗刻
    FiveConcealedTriplets,
    /// 四暗刻
    FourConcealedTriplets,
    /// 三暗刻
    ThreeConcealedTriplets,
    /// 碰碰胡
    AllTriplets,
    /// 不求（门清自摸）
    ConcealedSelfDraw,
    /// 门清
    Concealed,
    /// 自摸
    SelfDraw,
    /// 独听
    SingleWait(WaitKind),
    /// 平胡
    CommonHand,
    /// 海底捞月
    LastTileDraw,
    /// 河底捞鱼
    LastTileClaim,
    /// 杠上开花
    KongDraw,
    /// 抢杠
    RobKong,
    /// 庄家
    Dealer,
    /// 没有任何台数时的保底 1 台
    Base,
}

impl Fan {
    /// 台数
    pub fn value(&self) -> u32 {
        match self {
            Fan::BigFourWinds => 16,
            Fan::BigThreeDragons | Fan::SmallFourWinds | Fan::FullFlush | Fan::FiveConcealedTriplets => 8,
            Fan::FourConcealedTriplets => 5,
            Fan::SmallThreeDragons | Fan::HalfFlush | Fan::AllTriplets => 4,
            Fan::ConcealedSelfDraw => 3,
            Fan::ThreeConcealedTriplets | Fan::CommonHand => 2,
            Fan::RoundWind(_)
            | Fan::SeatWind(_)
            | Fan::DragonTriplet(_)
            | Fan::Concealed
            | Fan::SelfDraw
            | Fan::SingleWait(_)
            | Fan::LastTileDraw
            | Fan::LastTileClaim
            | Fan::KongDraw
            | Fan::RobKong
            | Fan::Dealer
            | Fan::Base => 1,
        }
    }
}

impl fmt::Display for Fan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Fan::RoundWind(w) => return write!(f, "圈風({}) 1台", w.code()),
            Fan::SeatWind(w) => return write!(f, "門風({}) 1台", w.code()),
            Fan::DragonTriplet(d) => return write!(f, "{}（箭牌）1台", d.name()),
            Fan::SingleWait(kind) => return write!(f, "獨聽（{}）1台", kind.name()),
            Fan::Base => return f.write_str("平胡（基本）1台"),
            Fan::BigFourWinds => "大四喜",
            Fan::BigThreeDragons => "大三元",
            Fan::SmallFourWinds => "小四喜",
            Fan::SmallThreeDragons => "小三元",
            Fan::FullFlush => "清一色",
            Fan::HalfFlush => "混一色",
            Fan::FiveConcealedTriplets => "五暗刻",
            Fan::FourConcealedTriplets => "四暗刻",
            Fan::ThreeConcealedTriplets => "三暗刻",
            Fan::AllTriplets => "碰碰胡",
            Fan::ConcealedSelfDraw => "不求",
            Fan::Concealed => "門清",
            Fan::SelfDraw => "自摸",
            Fan::CommonHand => "平胡",
            Fan::LastTileDraw => "海底撈月",
            Fan::LastTileClaim => "河底撈魚",
            Fan::KongDraw => "槓上開花",
            Fan::RobKong => "搶槓",
            Fan::Dealer => "莊家",
        };
        write!(f, "{} {}台", name, self.value())
    }
}

/// 台数计算器
pub struct FanCalculator;

impl FanCalculator {
    /// 计算和牌的台数
    ///
    /// # 参数
    ///
    /// - `full_hand`: 和牌后的暗手（含和牌张）
    /// - `melds`: 副露（含暗杠）
    /// - `win_type`: 自摸或胡别人
    /// - `winning_tile`: 和的那张牌
    /// - `ctx`: 计台上下文
    ///
    /// # 返回
    ///
    /// `(总台数, 明细)`。明细按计算顺序排列，总台数至少为 1。
    /// 结果与 `full_hand` 中牌的排列顺序无关。
    pub fn score(
        full_hand: &[Tile],
        melds: &[Meld],
        win_type: WinType,
        winning_tile: Tile,
        ctx: &WinContext,
    ) -> (u32, Vec<Fan>) {
        let counts = count_tiles(full_hand);
        let all_tiles: Vec<Tile> = full_hand
            .iter()
            .copied()
            .chain(melds.iter().flat_map(|m| m.tiles()))
            .collect();

        // 暗手中 3 张以上的牌按规范顺序
        let hand_triplets: SmallVec<[Tile; 6]> =
            Tile::all().filter(|t| counts[t.to_index()] >= 3).collect();
        // 所有刻子/杠的牌：先副露（按副露顺序），再暗手
        let set_tiles: SmallVec<[Tile; 8]> = melds
            .iter()
            .filter_map(Meld::set_tile)
            .chain(hand_triplets.iter().copied())
            .collect();

        let mut details = Vec::new();

        Self::honor_fans(&set_tiles, &counts, ctx, &mut details);
        Self::suit_fans(&all_tiles, &mut details);

        let concealed_quads = melds
            .iter()
            .filter(|m| m.kind() == MeldKind::Quad && m.is_concealed())
            .count();
        match hand_triplets.len() + concealed_quads {
            n if n >= 5 => details.push(Fan::FiveConcealedTriplets),
            4 => details.push(Fan::FourConcealedTriplets),
            3 => details.push(Fan::ThreeConcealedTriplets),
            _ => {}
        }

        let has_run = melds.iter().any(|m| m.kind() == MeldKind::Run);
        if !has_run && can_complete_triplets_only(full_hand, melds_needed(melds.len()), false) {
            details.push(Fan::AllTriplets);
        }

        // 任何副露（含暗杠）都不算门清
        let is_concealed = melds.is_empty();
        let self_drawn = win_type == WinType::SelfDrawn;
        if is_concealed && self_drawn {
            details.push(Fan::ConcealedSelfDraw);
        } else {
            if is_concealed {
                details.push(Fan::Concealed);
            }
            if self_drawn {
                details.push(Fan::SelfDraw);
            }
        }

        let mut pre_win = full_hand.to_vec();
        if let Some(pos) = pre_win.iter().position(|&t| t == winning_tile) {
            pre_win.remove(pos);
        }
        let wait = ReadyChecker::classify_wait(&pre_win, melds, winning_tile);
        if wait.is_single() {
            details.push(Fan::SingleWait(wait));
        }

        if !self_drawn
            && melds.is_empty()
            && wait == WaitKind::TwoSided
            && !all_tiles.iter().any(Tile::is_honor)
            && hand_triplets.is_empty()
        {
            details.push(Fan::CommonHand);
        }

        if ctx.is_last_tile {
            details.push(if self_drawn {
                Fan::LastTileDraw
            } else {
                Fan::LastTileClaim
            });
        }
        if ctx.is_kong_draw {
            details.push(Fan::KongDraw);
        }
        if ctx.is_rob_kong {
            details.push(Fan::RobKong);
        }
        if ctx.is_dealer {
            details.push(Fan::Dealer);
        }

        if details.is_empty() {
            details.push(Fan::Base);
        }
        let total = details.iter().map(Fan::value).sum();
        (total, details)
    }

    /// 字牌刻子：大四喜 > 大三元 > 小四喜 > 小三元 > 单项风/箭刻，互斥
    fn honor_fans(set_tiles: &[Tile], counts: &[u8], ctx: &WinContext, details: &mut Vec<Fan>) {
        let has_set = |t: Tile| set_tiles.contains(&t);
        let missing_wind = Wind::all().into_iter().find(|&w| !has_set(Tile::Wind(w)));
        let missing_dragon = Dragon::all().into_iter().find(|&d| !has_set(Tile::Dragon(d)));
        let wind_sets = Wind::all().into_iter().filter(|&w| has_set(Tile::Wind(w))).count();
        let dragon_sets = Dragon::all().into_iter().filter(|&d| has_set(Tile::Dragon(d))).count();
        let pair_of = |t: Tile| counts[t.to_index()] >= 2;

        if wind_sets == 4 {
            details.push(Fan::BigFourWinds);
        } else if dragon_sets == 3 {
            details.push(Fan::BigThreeDragons);
        } else if wind_sets == 3 && missing_wind.map_or(false, |w| pair_of(Tile::Wind(w))) {
            details.push(Fan::SmallFourWinds);
            Self::wind_fans(set_tiles, ctx, details);
        } else if dragon_sets == 2 && missing_dragon.map_or(false, |d| pair_of(Tile::Dragon(d))) {
            details.push(Fan::SmallThreeDragons);
            Self::wind_fans(set_tiles, ctx, details);
        } else {
            Self::wind_fans(set_tiles, ctx, details);
            for tile in set_tiles {
                if let Tile::Dragon(d) = tile {
                    details.push(Fan::DragonTriplet(*d));
                }
            }
        }
    }

    fn wind_fans(set_tiles: &[Tile], ctx: &WinContext, details: &mut Vec<Fan>) {
        for tile in set_tiles {
            if let Tile::Wind(w) = *tile {
                if w == ctx.round_wind {
                    details.push(Fan::RoundWind(w));
                }
                if w == ctx.seat_wind {
                    details.push(Fan::SeatWind(w));
                }
            }
        }
    }

    /// 清一色 > 混一色
    fn suit_fans(all_tiles: &[Tile], details: &mut Vec<Fan>) {
        let mut suits: SmallVec<[crate::tile::Suit; 3]> = SmallVec::new();
        for suit in all_tiles.iter().filter_map(Tile::suit) {
            if !suits.contains(&suit) {
                suits.push(suit);
            }
        }
        let has_honor = all_tiles.iter().any(Tile::is_honor);
        if suits.len() == 1 {
            details.push(if has_honor { Fan::HalfFlush } else { Fan::FullFlush });
        }
    }
}
