use crate::tile::Tile;
use smallvec::SmallVec;

/// 牌组种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MeldKind {
    /// 刻子（碰）
    Triplet,
    /// 顺子（吃）
    Run,
    /// 杠
    Quad,
}

/// 副露牌组（碰 / 吃 / 杠）
///
/// 碰和吃总是明牌；杠只有从手中四张直接开出时才是暗杠。
/// 唯一允许的变化是碰升级为明杠（加杠）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Meld {
    /// 碰（刻子）
    Triplet { tile: Tile },
    /// 吃（顺子），按升序保存
    Run { tiles: [Tile; 3] },
    /// 杠（明杠/暗杠）
    Quad { tile: Tile, is_concealed: bool },
}

impl Meld {
    /// 用三张牌组成顺子，不构成同花色连续三张时返回 None
    pub fn run(a: Tile, b: Tile, c: Tile) -> Option<Self> {
        if !a.can_form_sequence(&b, &c) {
            return None;
        }
        let mut tiles = [a, b, c];
        tiles.sort();
        Some(Meld::Run { tiles })
    }

    /// 牌组种类
    pub fn kind(&self) -> MeldKind {
        match self {
            Meld::Triplet { .. } => MeldKind::Triplet,
            Meld::Run { .. } => MeldKind::Run,
            Meld::Quad { .. } => MeldKind::Quad,
        }
    }

    /// 是否为暗牌（仅暗杠）
    pub fn is_concealed(&self) -> bool {
        matches!(self, Meld::Quad { is_concealed: true, .. })
    }

    /// 刻子或杠的牌（顺子返回 None）
    pub fn set_tile(&self) -> Option<Tile> {
        match self {
            Meld::Triplet { tile } | Meld::Quad { tile, .. } => Some(*tile),
            Meld::Run { .. } => None,
        }
    }

    /// 展开为具体的牌（刻子/顺子 3 张，杠 4 张）
    pub fn tiles(&self) -> SmallVec<[Tile; 4]> {
        match self {
            Meld::Triplet { tile } => SmallVec::from_slice(&[*tile; 3]),
            Meld::Run { tiles } => SmallVec::from_slice(tiles),
            Meld::Quad { tile, .. } => SmallVec::from_slice(&[*tile; 4]),
        }
    }

    /// 碰升级为明杠（原地修改），非碰或牌不符时返回 false
    pub fn upgrade_to_quad(&mut self, tile: Tile) -> bool {
        match *self {
            Meld::Triplet { tile: t } if t == tile => {
                *self = Meld::Quad {
                    tile,
                    is_concealed: false,
                };
                true
            }
            _ => false,
        }
    }
}
