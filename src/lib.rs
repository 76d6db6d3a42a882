/// 台湾十六张麻将规则引擎
///
/// 胡牌判定、听牌分类、计台、吃碰杠合法性与回合流程

pub mod tile;
pub mod game;
pub mod engine;

// 重新导出常用类型
pub use tile::{Tile, Suit, Wind, Dragon, Wall, Hand, TileSource, parse_tiles};
pub use tile::win_check::{can_complete, is_win, WinChecker, WinResult, WinType};
pub use game::meld::{Meld, MeldKind};
pub use game::scoring::{Fan, FanCalculator, WinContext};
pub use game::ready::{ReadyChecker, WaitKind};
pub use game::state::{DecisionKind, GameState, PendingDecision, Phase, DiscardRecord};
pub use game::action::{Action, Claim};
pub use game::player::Player;
pub use game::config::{GameConfig, ResponsePolicy};
pub use game::kong::{KongHandler, KongType};
pub use game::pong::PongHandler;
pub use game::chow::{ChowHandler, ChowOption, ChowPosition};
pub use engine::action_mask::ActionMask;
pub use game::game_engine::{GameEngine, GameError, Progress};
pub use game::action_callback::{ActionCallback, AutoCallback, AutoPolicy, FnActionCallback};

// Python 绑定模块
#[cfg(feature = "python")]
pub mod python;
