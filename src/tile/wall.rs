use super::tile::Tile;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

/// 牌源：状态机只通过这三个操作使用牌墙
pub trait TileSource {
    /// 摸一张牌，牌墙已空返回 None
    fn draw(&mut self) -> Option<Tile>;

    /// 剩余牌数
    fn remaining(&self) -> usize;

    /// 从尚未摸出的牌中取走一张指定的牌（只用于固定手牌的开局）
    fn remove(&mut self, tile: Tile) -> bool;
}

/// 牌墙（Wall）
///
/// 存储全部 136 张牌，从前往后摸牌。
#[derive(Debug, Clone)]
pub struct Wall {
    tiles: Vec<Tile>,
    /// 已摸出的牌数
    drawn_count: usize,
}

impl Wall {
    /// 创建一副完整的牌墙（136 张，未洗牌）
    pub fn new() -> Self {
        let mut tiles = Vec::with_capacity(Tile::TOTAL_COUNT);
        for tile in Tile::all() {
            for _ in 0..4 {
                tiles.push(tile);
            }
        }
        Self {
            tiles,
            drawn_count: 0,
        }
    }

    /// 按给定顺序创建牌墙，第一张先被摸出
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self {
            tiles,
            drawn_count: 0,
        }
    }

    /// 洗牌（线程随机数）
    pub fn shuffle(&mut self) {
        let mut rng = thread_rng();
        self.tiles[self.drawn_count..].shuffle(&mut rng);
    }

    /// 按种子洗牌，同一种子得到同一顺序
    pub fn shuffle_with_seed(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.tiles[self.drawn_count..].shuffle(&mut rng);
    }

    /// 查询剩余牌数
    pub fn remaining_count(&self) -> usize {
        self.tiles.len().saturating_sub(self.drawn_count)
    }

    /// 检查牌墙是否为空
    pub fn is_empty(&self) -> bool {
        self.remaining_count() == 0
    }

    /// 获取已摸出的牌数
    pub fn drawn_count(&self) -> usize {
        self.drawn_count
    }

    /// 获取牌墙总张数（含已摸出）
    pub fn total_count(&self) -> usize {
        self.tiles.len()
    }
}

impl TileSource for Wall {
    fn draw(&mut self) -> Option<Tile> {
        let tile = *self.tiles.get(self.drawn_count)?;
        self.drawn_count += 1;
        Some(tile)
    }

    fn remaining(&self) -> usize {
        self.remaining_count()
    }

    /// 取走最先会被摸到的那一张
    fn remove(&mut self, tile: Tile) -> bool {
        match self.tiles[self.drawn_count..].iter().position(|&t| t == tile) {
            Some(pos) => {
                self.tiles.remove(self.drawn_count + pos);
                true
            }
            None => false,
        }
    }
}

impl Default for Wall {
    fn default() -> Self {
        Self::new()
    }
}
