/// 牌相关模块
///
/// 包含牌（Tile）、牌墙（Wall）、手牌（Hand）和胡牌判定

pub mod tile;
pub mod wall;
pub mod hand;
pub mod win_check;

// 重新导出常用类型
pub use hand::{count_tiles, Hand, TileCounts};
pub use tile::{parse_tiles, Dragon, Suit, Tile, TileParseError, Wind};
pub use wall::{TileSource, Wall};
pub use win_check::{can_complete, check_win, is_win, WinChecker, WinResult, WinType};
