use crate::game::constants::{
    DEFAULT_CHOW_PROBABILITY, DEFAULT_KONG_PROBABILITY, DEFAULT_PONG_PROBABILITY, NUM_PLAYERS,
};
use crate::game::game_engine::GameError;
use crate::tile::Wind;

/// 电脑玩家对别人打出的牌的响应概率（能胡一定胡）
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ResponsePolicy {
    pub kong: f64,
    pub pong: f64,
    pub chow: f64,
}

impl Default for ResponsePolicy {
    fn default() -> Self {
        Self {
            kong: DEFAULT_KONG_PROBABILITY,
            pong: DEFAULT_PONG_PROBABILITY,
            chow: DEFAULT_CHOW_PROBABILITY,
        }
    }
}

/// 单局配置
///
/// 所有字段都有缺省值，可以从 JSON 等格式部分覆盖。
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// 随机种子（洗牌、定庄和电脑决策），None 表示使用系统随机数
    pub seed: Option<u64>,
    /// 庄家座位，None 表示随机
    pub dealer: Option<u8>,
    /// 圈风
    pub round_wind: Wind,
    /// 各座位是否为交互玩家
    pub interactive: [bool; 4],
    /// 电脑玩家响应概率
    pub policy: ResponsePolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            dealer: None,
            round_wind: Wind::East,
            interactive: [true, false, false, false],
            policy: ResponsePolicy::default(),
        }
    }
}

impl GameConfig {
    /// 四家都由电脑决策
    pub fn all_automated(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            interactive: [false; 4],
            ..Self::default()
        }
    }

    /// 检查配置是否有效
    pub fn validate(&self) -> Result<(), GameError> {
        if let Some(dealer) = self.dealer {
            if dealer >= NUM_PLAYERS {
                return Err(GameError::InvalidPlayer);
            }
        }
        let probabilities = [self.policy.kong, self.policy.pong, self.policy.chow];
        if probabilities.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return Err(GameError::InvalidConfig);
        }
        Ok(())
    }
}
