/// 动作合法性模块
///
/// 计算每位玩家面对一张牌时可以做出的响应

pub mod action_mask;

pub use action_mask::ActionMask;
