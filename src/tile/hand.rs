use crate::game::constants::COPIES_PER_TILE;
use super::tile::Tile;
use std::collections::HashMap;
use smallvec::SmallVec;

/// 按规范索引计数的牌（长度 34），供和牌判定等热路径使用
pub type TileCounts = [u8; Tile::KINDS];

/// 统计一组牌的计数数组
pub fn count_tiles(tiles: &[Tile]) -> TileCounts {
    let mut counts = [0u8; Tile::KINDS];
    for tile in tiles {
        counts[tile.to_index()] += 1;
    }
    counts
}

/// 手牌（Hand）
///
/// 使用 HashMap 存储每张牌的数量，支持 O(1) 的添加、移除和查询操作。
/// 每种牌最多 4 张。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    /// 牌的数量映射：Tile -> 数量（1-4）
    tiles: HashMap<Tile, u8>,
    /// 总牌数
    total_count: usize,
}

impl Hand {
    /// 创建空手牌
    pub fn new() -> Self {
        Self {
            tiles: HashMap::new(),
            total_count: 0,
        }
    }

    /// 从牌列表创建手牌
    ///
    /// 超过 4 张的同种牌和无效的牌会被忽略
    pub fn from_tiles(tiles: &[Tile]) -> Self {
        let mut hand = Self::new();
        for &tile in tiles {
            let added = hand.add_tile(tile);
            debug_assert!(added, "手牌中 {:?} 无效或超过 4 张", tile);
        }
        hand
    }

    /// 添加一张牌
    ///
    /// # 返回
    ///
    /// - `true`：成功添加
    /// - `false`：该牌已有 4 张，或者是无效的牌
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        if !tile.is_valid() {
            return false;
        }
        let count = self.tiles.entry(tile).or_insert(0);
        if *count >= COPIES_PER_TILE {
            return false;
        }
        *count += 1;
        self.total_count += 1;
        true
    }

    /// 移除一张牌
    ///
    /// # 返回
    ///
    /// - `true`：成功移除
    /// - `false`：手牌中没有该牌
    pub fn remove_tile(&mut self, tile: Tile) -> bool {
        match self.tiles.get_mut(&tile) {
            Some(count) if *count > 0 => {
                *count -= 1;
                self.total_count -= 1;
                if *count == 0 {
                    self.tiles.remove(&tile);
                }
                true
            }
            _ => false,
        }
    }

    /// 原子地移除多张牌：全部存在才移除，否则手牌保持不变
    ///
    /// 列表中重复的牌按出现次数计算。
    pub fn remove_tiles(&mut self, tiles: &[Tile]) -> bool {
        let mut needed: SmallVec<[(Tile, u8); 4]> = SmallVec::new();
        for &tile in tiles {
            match needed.iter_mut().find(|(t, _)| *t == tile) {
                Some((_, n)) => *n += 1,
                None => needed.push((tile, 1)),
            }
        }
        if needed.iter().any(|&(tile, n)| self.tile_count(tile) < n) {
            return false;
        }
        for &tile in tiles {
            self.remove_tile(tile);
        }
        true
    }

    /// 检查是否有某张牌
    pub fn has_tile(&self, tile: Tile) -> bool {
        self.tile_count(tile) > 0
    }

    /// 查询某张牌的数量
    pub fn tile_count(&self, tile: Tile) -> u8 {
        self.tiles.get(&tile).copied().unwrap_or(0)
    }

    /// 获取总牌数
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// 转换为按规范顺序排序的牌向量
    ///
    /// 打牌时的“第几张”即指该向量的下标。
    pub fn to_sorted_vec(&self) -> Vec<Tile> {
        let mut result = Vec::with_capacity(self.total_count);
        for tile in Tile::all() {
            for _ in 0..self.tile_count(tile) {
                result.push(tile);
            }
        }
        result
    }

    /// 计数数组形式
    pub fn counts(&self) -> TileCounts {
        let mut counts = [0u8; Tile::KINDS];
        for (tile, &n) in &self.tiles {
            counts[tile.to_index()] = n;
        }
        counts
    }

    /// 检查手牌是否为空
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// 清空手牌
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.total_count = 0;
    }

    /// 获取所有不同的牌类型（规范顺序）
    pub fn distinct_tiles(&self) -> SmallVec<[Tile; 16]> {
        let mut result: SmallVec<[Tile; 16]> = self.tiles.keys().copied().collect();
        result.sort();
        result
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}
