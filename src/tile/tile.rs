use std::fmt;
use std::str::FromStr;

/// 麻将牌类型
///
/// 台湾十六张麻将使用 136 张牌：万、筒、条各 36 张，风牌 16 张，箭牌 12 张。
/// 共 34 种牌，每种 4 张（不含花牌）。
///
/// 派生的 `Ord` 即规范顺序：万 1-9、筒 1-9、条 1-9、东南西北、白发中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Tile {
    /// 万子（1-9）
    Wan(u8),
    /// 筒子（1-9）
    Tong(u8),
    /// 条子（1-9）
    Tiao(u8),
    /// 风牌
    Wind(Wind),
    /// 箭牌
    Dragon(Dragon),
}

impl Tile {
    /// 总牌数：136 张
    pub const TOTAL_COUNT: usize = 136;

    /// 牌的种类数：34 种
    pub const KINDS: usize = 34;

    /// 每种花色的数字范围：1-9
    pub const MIN_RANK: u8 = 1;
    pub const MAX_RANK: u8 = 9;

    /// 创建一张数牌，验证输入有效性
    pub fn new(suit: Suit, rank: u8) -> Option<Self> {
        if !(Self::MIN_RANK..=Self::MAX_RANK).contains(&rank) {
            return None;
        }
        Some(match suit {
            Suit::Wan => Tile::Wan(rank),
            Suit::Tong => Tile::Tong(rank),
            Suit::Tiao => Tile::Tiao(rank),
        })
    }

    /// 获取花色（字牌没有花色）
    pub fn suit(&self) -> Option<Suit> {
        match self {
            Tile::Wan(_) => Some(Suit::Wan),
            Tile::Tong(_) => Some(Suit::Tong),
            Tile::Tiao(_) => Some(Suit::Tiao),
            Tile::Wind(_) | Tile::Dragon(_) => None,
        }
    }

    /// 获取数字（1-9），字牌返回 None
    pub fn rank(&self) -> Option<u8> {
        match self {
            Tile::Wan(r) | Tile::Tong(r) | Tile::Tiao(r) => Some(*r),
            Tile::Wind(_) | Tile::Dragon(_) => None,
        }
    }

    /// 是否为字牌（风牌或箭牌）
    pub fn is_honor(&self) -> bool {
        matches!(self, Tile::Wind(_) | Tile::Dragon(_))
    }

    /// 是否为数牌
    pub fn is_numeral(&self) -> bool {
        !self.is_honor()
    }

    /// 数牌的数字是否在 1-9 之内（字牌总是有效）
    ///
    /// 枚举变体可以直接构造，外部输入应经过 [`Tile::new`] 或 `FromStr`。
    pub fn is_valid(&self) -> bool {
        match self.rank() {
            Some(rank) => (Self::MIN_RANK..=Self::MAX_RANK).contains(&rank),
            None => true,
        }
    }

    /// 同花色中相差 `offset` 的数牌，越界或字牌返回 None
    pub fn offset(&self, offset: i8) -> Option<Tile> {
        let suit = self.suit()?;
        let rank = self.rank()? as i8 + offset;
        if rank < Self::MIN_RANK as i8 || rank > Self::MAX_RANK as i8 {
            return None;
        }
        Tile::new(suit, rank as u8)
    }

    /// 转换为规范索引（0-33）
    ///
    /// - 万子：0-8
    /// - 筒子：9-17
    /// - 条子：18-26
    /// - 风牌：27-30（东南西北）
    /// - 箭牌：31-33（白发中）
    ///
    /// 只对有效的牌调用（见 [`Tile::is_valid`]）。
    pub fn to_index(&self) -> usize {
        debug_assert!(self.is_valid(), "无效的牌 {:?}", self);
        match self {
            Tile::Wan(r) => (*r - 1) as usize,
            Tile::Tong(r) => 9 + (*r - 1) as usize,
            Tile::Tiao(r) => 18 + (*r - 1) as usize,
            Tile::Wind(w) => 27 + *w as usize,
            Tile::Dragon(d) => 31 + *d as usize,
        }
    }

    /// 从规范索引创建牌
    pub fn from_index(index: usize) -> Option<Self> {
        let tile = match index {
            0..=8 => Tile::Wan(index as u8 + 1),
            9..=17 => Tile::Tong(index as u8 - 8),
            18..=26 => Tile::Tiao(index as u8 - 17),
            27..=30 => Tile::Wind(Wind::all()[index - 27]),
            31..=33 => Tile::Dragon(Dragon::all()[index - 31]),
            _ => return None,
        };
        Some(tile)
    }

    /// 按规范顺序列出全部 34 种牌
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..Self::KINDS).filter_map(Tile::from_index)
    }

    /// 检查是否可以组成顺子（同花色连续三张）
    pub fn can_form_sequence(&self, other1: &Tile, other2: &Tile) -> bool {
        let suit = match self.suit() {
            Some(s) => s,
            None => return false,
        };
        if other1.suit() != Some(suit) || other2.suit() != Some(suit) {
            return false;
        }
        let mut ranks = [self.rank(), other1.rank(), other2.rank()];
        ranks.sort();
        match ranks {
            [Some(a), Some(b), Some(c)] => a + 1 == b && b + 1 == c,
            _ => false,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Wan(r) => write!(f, "{}m", r),
            Tile::Tong(r) => write!(f, "{}p", r),
            Tile::Tiao(r) => write!(f, "{}s", r),
            Tile::Wind(w) => write!(f, "{}", w.code()),
            Tile::Dragon(d) => write!(f, "{}", d.code()),
        }
    }
}

/// 牌面文本解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileParseError(pub String);

impl fmt::Display for TileParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "无法识别的牌: {:?}", self.0)
    }
}

impl std::error::Error for TileParseError {}

impl FromStr for Tile {
    type Err = TileParseError;

    /// 文本编码（区分大小写）：
    /// - 数牌：数字 + 花色字母，`m` 万、`p` 筒、`s` 条（例如 `5m`）
    /// - 风牌：`E` `S` `W` `N`
    /// - 箭牌：`B` 白、`F` 发、`Z` 中
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TileParseError(s.to_string());
        match *s.as_bytes() {
            [b'E'] => Ok(Tile::Wind(Wind::East)),
            [b'S'] => Ok(Tile::Wind(Wind::South)),
            [b'W'] => Ok(Tile::Wind(Wind::West)),
            [b'N'] => Ok(Tile::Wind(Wind::North)),
            [b'B'] => Ok(Tile::Dragon(Dragon::White)),
            [b'F'] => Ok(Tile::Dragon(Dragon::Green)),
            [b'Z'] => Ok(Tile::Dragon(Dragon::Red)),
            [digit @ b'1'..=b'9', suit] => {
                let suit = match suit {
                    b'm' => Suit::Wan,
                    b'p' => Suit::Tong,
                    b's' => Suit::Tiao,
                    _ => return Err(err()),
                };
                Tile::new(suit, digit - b'0').ok_or_else(err)
            }
            _ => Err(err()),
        }
    }
}

/// 解析以空白分隔的牌列表，例如 `"1m 1m 2p E Z"`
pub fn parse_tiles(s: &str) -> Result<Vec<Tile>, TileParseError> {
    s.split_whitespace().map(str::parse).collect()
}

/// 花色枚举（仅数牌）
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Suit {
    Wan = 0,
    Tong = 1,
    Tiao = 2,
}

impl Suit {
    /// 所有花色
    pub fn all() -> [Suit; 3] {
        [Suit::Wan, Suit::Tong, Suit::Tiao]
    }
}

/// 风牌（同时用作圈风、门风）
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Wind {
    East = 0,
    South = 1,
    West = 2,
    North = 3,
}

impl Wind {
    pub fn all() -> [Wind; 4] {
        [Wind::East, Wind::South, Wind::West, Wind::North]
    }

    /// 文本编码字母
    pub fn code(&self) -> char {
        match self {
            Wind::East => 'E',
            Wind::South => 'S',
            Wind::West => 'W',
            Wind::North => 'N',
        }
    }

    /// 中文名
    pub fn name(&self) -> &'static str {
        match self {
            Wind::East => "東",
            Wind::South => "南",
            Wind::West => "西",
            Wind::North => "北",
        }
    }

    /// 相对庄家的座位风：庄家为东，依次南西北
    pub fn for_seat(seat: u8, dealer: u8) -> Wind {
        let offset = (seat + 4 - dealer % 4) % 4;
        Wind::all()[offset as usize]
    }
}

impl Default for Wind {
    fn default() -> Self {
        Wind::East
    }
}

/// 箭牌
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Dragon {
    White = 0,
    Green = 1,
    Red = 2,
}

impl Dragon {
    pub fn all() -> [Dragon; 3] {
        [Dragon::White, Dragon::Green, Dragon::Red]
    }

    pub fn code(&self) -> char {
        match self {
            Dragon::White => 'B',
            Dragon::Green => 'F',
            Dragon::Red => 'Z',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dragon::White => "白",
            Dragon::Green => "發",
            Dragon::Red => "中",
        }
    }
}
