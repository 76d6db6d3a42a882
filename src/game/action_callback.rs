use crate::engine::action_mask::ActionMask;
use crate::game::action::{Action, Claim};
use crate::game::config::ResponsePolicy;
use crate::game::state::{DecisionKind, GameState, PendingDecision};
use crate::tile::Hand;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// 电脑玩家的决策规则
///
/// - 能胡一定胡（自摸、点和、抢杠）
/// - 明杠、碰、吃按 [`ResponsePolicy`] 的概率接受，吃法随机
/// - 出牌选估值最低的牌，同值随机
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoPolicy {
    pub policy: ResponsePolicy,
}

impl AutoPolicy {
    pub fn new(policy: ResponsePolicy) -> Self {
        Self { policy }
    }

    /// 对一张牌做出响应
    pub fn respond<R: Rng>(&self, mask: &ActionMask, rng: &mut R) -> Claim {
        if mask.win.is_some() {
            return Claim::Win;
        }
        if mask.can_kong && rng.gen_bool(self.policy.kong) {
            return Claim::Kong;
        }
        if mask.can_pong && rng.gen_bool(self.policy.pong) {
            return Claim::Pong;
        }
        if !mask.chows.is_empty() && rng.gen_bool(self.policy.chow) {
            if let Some(option) = mask.chows.choose(rng) {
                return Claim::Chow(option.tiles);
            }
        }
        Claim::Pass
    }

    /// 选择要打出的牌，返回排序后手牌中的序号
    ///
    /// 估值：字牌 -10，每张同样的牌 +5，左右相邻的数牌各 +3。
    pub fn choose_discard<R: Rng>(&self, hand: &Hand, rng: &mut R) -> usize {
        let tiles = hand.to_sorted_vec();
        let values: Vec<i32> = tiles
            .iter()
            .map(|tile| {
                let mut value = 0;
                if tile.is_honor() {
                    value -= 10;
                }
                value += 5 * i32::from(hand.tile_count(*tile));
                for neighbour in [tile.offset(-1), tile.offset(1)].into_iter().flatten() {
                    if hand.has_tile(neighbour) {
                        value += 3;
                    }
                }
                value
            })
            .collect();

        let Some(&lowest) = values.iter().min() else {
            return 0;
        };
        let candidates: Vec<usize> = (0..tiles.len()).filter(|&i| values[i] == lowest).collect();
        candidates.choose(rng).copied().unwrap_or(0)
    }
}

impl Default for AutoPolicy {
    fn default() -> Self {
        Self::new(ResponsePolicy::default())
    }
}

/// 动作回调 trait
///
/// 定义动作回调的标准接口
pub trait ActionCallback {
    /// 根据游戏状态返回玩家动作
    ///
    /// # 参数
    ///
    /// - `state`: 当前游戏状态
    /// - `pending`: 需要做出的决策
    ///
    /// # 返回
    ///
    /// 玩家选择的动作
    fn get_action(&mut self, state: &GameState, pending: &PendingDecision) -> Action;
}

/// 函数式动作回调适配器
///
/// 将函数转换为 ActionCallback trait
pub struct FnActionCallback<F> {
    callback: F,
}

impl<F> FnActionCallback<F>
where
    F: FnMut(&GameState, &PendingDecision) -> Action,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ActionCallback for FnActionCallback<F>
where
    F: FnMut(&GameState, &PendingDecision) -> Action,
{
    fn get_action(&mut self, state: &GameState, pending: &PendingDecision) -> Action {
        (self.callback)(state, pending)
    }
}

/// 用电脑规则替交互玩家做决策
pub struct AutoCallback {
    policy: AutoPolicy,
    rng: StdRng,
}

impl AutoCallback {
    pub fn new(policy: ResponsePolicy, seed: u64) -> Self {
        Self {
            policy: AutoPolicy::new(policy),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ActionCallback for AutoCallback {
    fn get_action(&mut self, state: &GameState, pending: &PendingDecision) -> Action {
        match &pending.kind {
            DecisionKind::SelfDrawWin { .. } | DecisionKind::RobKong { .. } => Action::Claim(Claim::Win),
            DecisionKind::Discard { .. } => {
                let hand = &state.player_ref(pending.seat).hand;
                Action::Discard {
                    index: self.policy.choose_discard(hand, &mut self.rng),
                }
            }
            DecisionKind::Response { options, .. } => {
                Action::Claim(self.policy.respond(options, &mut self.rng))
            }
        }
    }
}
