use crate::engine::action_mask::ActionMask;
use crate::game::action::{Action, Claim};
use crate::game::action_callback::{ActionCallback, AutoPolicy};
use crate::game::chow::ChowHandler;
use crate::game::config::GameConfig;
use crate::game::constants::{HAND_SIZE, MAX_STEPS, NUM_PLAYERS};
use crate::game::kong::KongHandler;
use crate::game::pong::PongHandler;
use crate::game::scoring::WinContext;
use crate::game::state::{DecisionKind, DiscardRecord, GameState, PendingDecision, Phase};
use crate::tile::win_check::{WinChecker, WinResult, WinType};
use crate::tile::{Tile, TileSource, Wall, Wind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use std::fmt;

/// 游戏引擎错误
///
/// 返回错误时状态不会被修改。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// 无效的玩家 ID
    InvalidPlayer,
    /// 无效的动作（不满足吃碰杠条件）
    InvalidAction,
    /// 当前阶段不允许该操作
    WrongPhase,
    /// 不是该玩家的回合
    NotYourTurn,
    /// 没有等待中的决策
    NoPendingDecision,
    /// 出牌序号越界
    InvalidTileIndex,
    /// 该响应不在可选范围内
    IllegalClaim,
    /// 游戏已结束
    GameOver,
    /// 配置无效
    InvalidConfig,
    /// 超过最大步数仍未结束
    StepLimit,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            GameError::InvalidPlayer => "无效的玩家 ID",
            GameError::InvalidAction => "无效的动作",
            GameError::WrongPhase => "当前阶段不允许该操作",
            GameError::NotYourTurn => "不是该玩家的回合",
            GameError::NoPendingDecision => "没有等待中的决策",
            GameError::InvalidTileIndex => "出牌序号越界",
            GameError::IllegalClaim => "该响应不可用",
            GameError::GameOver => "游戏已结束",
            GameError::InvalidConfig => "配置无效",
            GameError::StepLimit => "超过最大步数",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for GameError {}

/// [`GameEngine::advance`] 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// 等待交互玩家决策
    Pending(PendingDecision),
    /// 本局结束
    Ended,
}

/// 一轮响应（弃牌或加杠）的收集进度
#[derive(Debug, Clone, Copy)]
struct ClaimWindow {
    /// 出牌 / 加杠的玩家
    from: u8,
    tile: Tile,
    /// 下一个要询问的座位相对 `from` 的偏移
    next_offset: u8,
    /// 目前优先级最高的响应
    best: Option<(u8, Claim)>,
}

impl ClaimWindow {
    fn new(from: u8, tile: Tile) -> Self {
        Self {
            from,
            tile,
            next_offset: 1,
            best: None,
        }
    }

    fn next_seat(&mut self) -> Option<u8> {
        if self.next_offset >= NUM_PLAYERS {
            return None;
        }
        let seat = (self.from + self.next_offset) % NUM_PLAYERS;
        self.next_offset += 1;
        Some(seat)
    }

    fn held_priority(&self) -> u8 {
        self.best.map_or(0, |(_, claim)| claim.priority())
    }

    fn holds_win(&self) -> bool {
        matches!(self.best, Some((_, Claim::Win)))
    }

    /// 只有严格更高的优先级才会替换，同级取先询问到的座位
    fn offer(&mut self, seat: u8, claim: Claim) {
        if claim.priority() > self.held_priority() {
            self.best = Some((seat, claim));
        }
    }
}

/// 游戏引擎
///
/// 负责管理摸牌、出牌、响应和加杠抢杠的流程。
/// 电脑玩家同步决策，交互玩家通过 [`PendingDecision`] 挂起，
/// 调用方用 [`GameEngine::decide`] 恢复。
#[derive(Debug, Clone)]
pub struct GameEngine<W: TileSource = Wall> {
    /// 游戏状态
    pub state: GameState,
    /// 牌墙
    pub wall: W,
    config: GameConfig,
    policy: AutoPolicy,
    rng: StdRng,
    checker: WinChecker,
    /// 弃牌后的响应收集
    response: Option<ClaimWindow>,
    /// 加杠后的抢杠窗口
    rob_window: Option<ClaimWindow>,
    /// 当前玩家手里的牌是否为杠后补牌
    replacement_draw: bool,
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl GameEngine<Wall> {
    /// 开一局新牌：洗牌、定庄、每人发 16 张
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);
        let mut wall = Wall::new();
        wall.shuffle_with_seed(rng.gen());
        let dealer = config
            .dealer
            .unwrap_or_else(|| rng.gen_range(0..NUM_PLAYERS));

        let mut engine = Self::assemble(config, wall, rng, dealer);
        engine.deal()?;
        log::debug!("新的一局，庄家 {}，圈风 {}", dealer, engine.state.round_wind.name());
        Ok(engine)
    }
}

impl<W: TileSource> GameEngine<W> {
    fn assemble(config: GameConfig, wall: W, rng: StdRng, dealer: u8) -> Self {
        Self {
            state: GameState::new(dealer, config.round_wind, config.interactive),
            wall,
            policy: AutoPolicy::new(config.policy),
            config,
            rng,
            checker: WinChecker::new(),
            response: None,
            rob_window: None,
            replacement_draw: false,
        }
    }

    /// 使用给定的牌墙和手牌开局（用于固定牌局）
    ///
    /// # 参数
    ///
    /// - `config`: 配置（`dealer` 缺省为 0）
    /// - `wall`: 牌墙，取走手牌后按其顺序摸牌
    /// - `hands`: 每个座位的初始手牌，每张都必须能从牌墙中取走
    ///
    /// # 返回
    ///
    /// 牌墙中缺少某张手牌，或单人某种牌超过 4 张时返回 `GameError::InvalidConfig`
    pub fn with_wall(config: GameConfig, wall: W, hands: [Vec<Tile>; 4]) -> Result<Self, GameError> {
        config.validate()?;
        let rng = seeded_rng(config.seed);
        let dealer = config.dealer.unwrap_or(0);
        let mut engine = Self::assemble(config, wall, rng, dealer);
        for (seat, tiles) in hands.iter().enumerate() {
            for &tile in tiles {
                if !engine.wall.remove(tile) {
                    log::warn!("固定手牌 {} 不在牌墙中", tile);
                    return Err(GameError::InvalidConfig);
                }
                if !engine.state.players[seat].hand.add_tile(tile) {
                    return Err(GameError::InvalidConfig);
                }
            }
        }
        log::debug!("固定牌局，牌墙剩余 {} 张", engine.wall.remaining());
        Ok(engine)
    }

    /// 发牌：从庄家开始轮流，每人 16 张
    fn deal(&mut self) -> Result<(), GameError> {
        for _ in 0..HAND_SIZE {
            for offset in 0..NUM_PLAYERS {
                let seat = (self.state.dealer + offset) % NUM_PLAYERS;
                let tile = self.wall.draw().ok_or(GameError::GameOver)?;
                self.state.players[seat as usize].hand.add_tile(tile);
            }
        }
        Ok(())
    }

    /// 本局配置
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// 等待中的决策
    pub fn pending(&self) -> Option<&PendingDecision> {
        self.state.pending.as_ref()
    }

    /// 和牌结果（未结束或流局为 None）
    pub fn current_result(&self) -> Option<&WinResult> {
        self.state.win_result.as_ref()
    }

    /// 某座位的计台上下文
    pub fn context_for(&self, seat: u8) -> WinContext {
        WinContext {
            is_dealer: seat == self.state.dealer,
            seat_wind: Wind::for_seat(seat, self.state.dealer),
            round_wind: self.state.round_wind,
            is_last_tile: self.wall.remaining() == 0,
            ..WinContext::default()
        }
    }

    /// 某座位对一张弃牌的所有合法响应
    ///
    /// # 参数
    ///
    /// - `seat`: 响应的座位
    /// - `tile`: 打出的牌
    /// - `is_next_seat`: 是否为出牌者的下家
    pub fn legal_claims(&self, seat: u8, tile: Tile, is_next_seat: bool) -> Result<ActionMask, GameError> {
        self.check_seat(seat)?;
        let ctx = self.context_for(seat);
        Ok(ActionMask::for_discard(
            self.state.player_ref(seat),
            tile,
            is_next_seat,
            &ctx,
        ))
    }

    fn check_seat(&self, seat: u8) -> Result<(), GameError> {
        if seat >= NUM_PLAYERS {
            return Err(GameError::InvalidPlayer);
        }
        if self.state.is_game_over() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    /// 出牌窗口：当前玩家在 Discard 阶段，且没有其他决策挂起
    fn ensure_turn(&self, seat: u8) -> Result<(), GameError> {
        self.check_seat(seat)?;
        if self.state.phase != Phase::Discard || self.rob_window.is_some() {
            return Err(GameError::WrongPhase);
        }
        if self.state.current_player != seat {
            return Err(GameError::NotYourTurn);
        }
        match &self.state.pending {
            None => Ok(()),
            Some(PendingDecision {
                kind: DecisionKind::Discard { .. },
                ..
            }) => Ok(()),
            Some(_) => Err(GameError::WrongPhase),
        }
    }

    /// 摸牌
    ///
    /// 牌墙已空时直接流局。摸到的牌先做自摸判定：
    /// 电脑玩家能和就和，交互玩家得到 `SelfDrawWin` 决策。
    pub fn apply_draw(&mut self, seat: u8) -> Result<(), GameError> {
        self.check_seat(seat)?;
        if self.state.phase != Phase::Draw || self.state.pending.is_some() {
            return Err(GameError::WrongPhase);
        }
        if self.state.current_player != seat {
            return Err(GameError::NotYourTurn);
        }
        self.draw_tile(seat, false)
    }

    fn draw_tile(&mut self, seat: u8, is_kong_draw: bool) -> Result<(), GameError> {
        let Some(tile) = self.wall.draw() else {
            self.end_in_draw();
            return Ok(());
        };
        self.state.turn += 1;
        self.state.current_player = seat;
        self.replacement_draw = is_kong_draw;

        let ctx = WinContext {
            is_kong_draw,
            ..self.context_for(seat)
        };
        let player = &self.state.players[seat as usize];
        let result = self
            .checker
            .check_win(&player.hand, &player.melds, tile, WinType::SelfDrawn, &ctx);

        self.state.players[seat as usize].hand.add_tile(tile);
        self.state.drawn_tile = Some(tile);
        self.state.phase = Phase::Discard;
        log::debug!("玩家 {} 摸到 {}（剩余 {} 张）", seat, tile, self.wall.remaining());

        if result.is_win {
            if self.state.player_ref(seat).is_interactive {
                self.state.pending = Some(PendingDecision {
                    seat,
                    kind: DecisionKind::SelfDrawWin { tile, result },
                });
            } else {
                self.finish_win(seat, result);
            }
            return Ok(());
        }
        self.offer_turn(seat);
        Ok(())
    }

    /// 交互玩家进入出牌窗口时列出可以加杠、暗杠的牌
    ///
    /// 只有摸牌后才能开杠；吃碰后的出牌窗口只能打牌。
    fn offer_turn(&mut self, seat: u8) {
        let player = self.state.player_ref(seat);
        if !player.is_interactive {
            return;
        }
        let kind = if self.state.drawn_tile.is_some() {
            DecisionKind::Discard {
                add_kongs: KongHandler::add_kong_candidates(player),
                concealed_kongs: KongHandler::concealed_kong_candidates(player),
            }
        } else {
            DecisionKind::Discard {
                add_kongs: SmallVec::new(),
                concealed_kongs: SmallVec::new(),
            }
        };
        self.state.pending = Some(PendingDecision { seat, kind });
    }

    /// 出牌：打出排序后手牌中的第 `tile_index` 张，并收集其他玩家的响应
    pub fn apply_discard(&mut self, seat: u8, tile_index: usize) -> Result<(), GameError> {
        self.ensure_turn(seat)?;
        let tiles = self.state.player_ref(seat).hand.to_sorted_vec();
        let tile = *tiles.get(tile_index).ok_or(GameError::InvalidTileIndex)?;

        let player = self.state.player_mut(seat);
        player.hand.remove_tile(tile);
        player.discards.push(tile);
        let record = DiscardRecord {
            player_id: seat,
            tile,
            turn: self.state.turn,
            claimed_by: None,
        };
        self.state.discard_history.push(record);
        self.state.last_discard = Some(record);
        self.state.drawn_tile = None;
        self.state.pending = None;
        self.state.phase = Phase::Response;
        log::debug!("玩家 {} 打出 {}", seat, tile);

        self.response = Some(ClaimWindow::new(seat, tile));
        self.scan_responses()
    }

    /// 从上次停下的座位继续收集响应
    ///
    /// 交互玩家只要有可选的响应就挂起（即使不可能胜过已有的响应）；
    /// 已经有人能胡时不再询问后面的座位。
    fn scan_responses(&mut self) -> Result<(), GameError> {
        let Some(mut window) = self.response.take() else {
            return Err(GameError::WrongPhase);
        };
        while !window.holds_win() {
            let Some(seat) = window.next_seat() else {
                break;
            };
            let is_next_seat = seat == (window.from + 1) % NUM_PLAYERS;
            let mask = self.legal_claims(seat, window.tile, is_next_seat)?;
            if mask.is_empty() {
                continue;
            }
            if self.state.player_ref(seat).is_interactive {
                log::debug!("等待玩家 {} 响应 {}", seat, window.tile);
                self.state.pending = Some(PendingDecision {
                    seat,
                    kind: DecisionKind::Response {
                        tile: window.tile,
                        discarder: window.from,
                        options: mask,
                    },
                });
                self.response = Some(window);
                return Ok(());
            }
            if mask.highest_priority() <= window.held_priority() {
                continue;
            }
            let claim = self.policy.respond(&mask, &mut self.rng);
            window.offer(seat, claim);
        }
        self.resolve_responses(window)
    }

    /// 执行优先级最高的响应；无人响应则轮到下家摸牌
    fn resolve_responses(&mut self, window: ClaimWindow) -> Result<(), GameError> {
        let tile = window.tile;
        let Some((seat, claim)) = window.best else {
            self.state.last_discard = None;
            self.state.current_player = (window.from + 1) % NUM_PLAYERS;
            self.state.phase = Phase::Draw;
            return Ok(());
        };
        log::debug!("玩家 {} 响应 {}：{:?}", seat, tile, claim);

        if claim == Claim::Win {
            let ctx = self.context_for(seat);
            let player = &self.state.players[seat as usize];
            let result = self
                .checker
                .check_win(&player.hand, &player.melds, tile, WinType::Claimed, &ctx);
            if !result.is_win {
                return Err(GameError::IllegalClaim);
            }
            self.state.retract_last_discard(seat);
            self.state.player_mut(seat).hand.add_tile(tile);
            self.finish_win(seat, result);
            return Ok(());
        }

        let player = &mut self.state.players[seat as usize];
        let applied = match claim {
            Claim::Kong => KongHandler::direct_kong(player, tile),
            Claim::Pong => PongHandler::pong(player, tile),
            Claim::Chow(tiles) => ChowHandler::chow(player, &tiles, tile),
            Claim::Win | Claim::Pass => false,
        };
        if !applied {
            return Err(GameError::IllegalClaim);
        }
        self.state.retract_last_discard(seat);
        self.state.current_player = seat;
        self.state.phase = Phase::Discard;
        self.replacement_draw = false;

        if claim == Claim::Kong {
            self.draw_tile(seat, true)
        } else {
            self.offer_turn(seat);
            Ok(())
        }
    }

    /// 回答挂起的决策：自摸胡 / 响应弃牌 / 抢杠，或过
    pub fn apply_claim(&mut self, seat: u8, claim: Claim) -> Result<(), GameError> {
        self.check_seat(seat)?;
        let pending = self
            .state
            .pending
            .clone()
            .ok_or(GameError::NoPendingDecision)?;
        if pending.seat != seat {
            return Err(GameError::NotYourTurn);
        }

        match (pending.kind, claim) {
            (DecisionKind::SelfDrawWin { result, .. }, Claim::Win) => {
                self.state.pending = None;
                self.finish_win(seat, result);
                Ok(())
            }
            (DecisionKind::SelfDrawWin { .. }, Claim::Pass) => {
                self.state.pending = None;
                self.offer_turn(seat);
                Ok(())
            }
            (DecisionKind::Response { options, .. }, claim) if options.allows(&claim) => {
                let Some(window) = self.response.as_mut() else {
                    return Err(GameError::WrongPhase);
                };
                window.offer(seat, claim);
                self.state.pending = None;
                self.scan_responses()
            }
            (DecisionKind::RobKong { result, .. }, Claim::Win) => {
                let window = self.rob_window.take().ok_or(GameError::WrongPhase)?;
                self.state.pending = None;
                self.rob_kong(window, seat, result);
                Ok(())
            }
            (DecisionKind::RobKong { .. }, Claim::Pass) => {
                self.state.pending = None;
                self.scan_rob_window()
            }
            (DecisionKind::Discard { .. }, _) => Err(GameError::WrongPhase),
            _ => Err(GameError::IllegalClaim),
        }
    }

    /// 加杠（只能在摸牌后）
    ///
    /// 先让其他玩家依次决定是否抢杠，无人抢杠才把刻子升级为杠并补牌。
    pub fn apply_quad_upgrade(&mut self, seat: u8, tile: Tile) -> Result<(), GameError> {
        self.ensure_turn(seat)?;
        if self.state.drawn_tile.is_none()
            || KongHandler::can_add_kong(self.state.player_ref(seat), &tile).is_none()
        {
            return Err(GameError::InvalidAction);
        }
        self.state.pending = None;
        self.state.drawn_tile = None;
        log::debug!("玩家 {} 加杠 {}", seat, tile);

        self.rob_window = Some(ClaimWindow::new(seat, tile));
        self.scan_rob_window()
    }

    fn scan_rob_window(&mut self) -> Result<(), GameError> {
        let Some(mut window) = self.rob_window.take() else {
            return Err(GameError::WrongPhase);
        };
        while let Some(seat) = window.next_seat() {
            // 抢杠不算河底
            let ctx = WinContext {
                is_last_tile: false,
                ..self.context_for(seat)
            };
            let mask = ActionMask::for_rob_kong(self.state.player_ref(seat), window.tile, &ctx);
            let Some(result) = mask.win else {
                continue;
            };
            if self.state.player_ref(seat).is_interactive {
                self.state.pending = Some(PendingDecision {
                    seat,
                    kind: DecisionKind::RobKong {
                        tile: window.tile,
                        from: window.from,
                        result,
                    },
                });
                self.rob_window = Some(window);
                return Ok(());
            }
            self.rob_kong(window, seat, result);
            return Ok(());
        }

        let upgrader = window.from;
        if !KongHandler::add_kong(self.state.player_mut(upgrader), window.tile) {
            return Err(GameError::InvalidAction);
        }
        self.draw_tile(upgrader, true)
    }

    /// 抢杠成功：加杠取消，那张牌从加杠者手中移到抢杠者手中
    fn rob_kong(&mut self, window: ClaimWindow, robber: u8, result: WinResult) {
        log::debug!("玩家 {} 抢玩家 {} 的杠 {}", robber, window.from, window.tile);
        self.state.player_mut(window.from).hand.remove_tile(window.tile);
        self.state.player_mut(robber).hand.add_tile(window.tile);
        self.finish_win(robber, result);
    }

    /// 暗杠并补牌（只能在摸牌后，不开放抢杠）
    pub fn apply_concealed_quad(&mut self, seat: u8, tile: Tile) -> Result<(), GameError> {
        self.ensure_turn(seat)?;
        if self.state.drawn_tile.is_none()
            || !KongHandler::concealed_kong(self.state.player_mut(seat), tile)
        {
            return Err(GameError::InvalidAction);
        }
        self.state.pending = None;
        self.state.drawn_tile = None;
        log::debug!("玩家 {} 暗杠 {}", seat, tile);
        self.draw_tile(seat, true)
    }

    /// 执行交互玩家的决策
    pub fn decide(&mut self, seat: u8, action: Action) -> Result<(), GameError> {
        let outcome = match action {
            Action::Discard { index } => self.apply_discard(seat, index),
            Action::AddKong { tile } => self.apply_quad_upgrade(seat, tile),
            Action::ConcealedKong { tile } => self.apply_concealed_quad(seat, tile),
            Action::Claim(claim) => self.apply_claim(seat, claim),
        };
        if let Err(err) = outcome {
            log::warn!("拒绝玩家 {} 的决策 {:?}：{}", seat, action, err);
        }
        outcome
    }

    /// 电脑玩家的出牌窗口：正常摸牌后能杠就杠，否则按估值出牌
    fn play_automated_turn(&mut self, seat: u8) -> Result<(), GameError> {
        let player = self.state.player_ref(seat);
        if player.is_interactive {
            self.offer_turn(seat);
            return Ok(());
        }
        if !self.replacement_draw && self.state.drawn_tile.is_some() {
            if let Some(&tile) = KongHandler::add_kong_candidates(player).first() {
                return self.apply_quad_upgrade(seat, tile);
            }
            if let Some(&tile) = KongHandler::concealed_kong_candidates(player).first() {
                return self.apply_concealed_quad(seat, tile);
            }
        }
        let index = self.policy.choose_discard(&player.hand, &mut self.rng);
        self.apply_discard(seat, index)
    }

    fn step(&mut self) -> Result<(), GameError> {
        let seat = self.state.current_player;
        match self.state.phase {
            Phase::Draw => self.apply_draw(seat),
            Phase::Discard if self.rob_window.is_some() => self.scan_rob_window(),
            Phase::Discard => self.play_automated_turn(seat),
            Phase::Response => self.scan_responses(),
            Phase::End => Ok(()),
        }
    }

    /// 推进电脑玩家的动作，直到需要交互决策或本局结束
    pub fn advance(&mut self) -> Result<Progress, GameError> {
        for _ in 0..MAX_STEPS {
            if let Some(pending) = &self.state.pending {
                return Ok(Progress::Pending(pending.clone()));
            }
            if self.state.is_game_over() {
                return Ok(Progress::Ended);
            }
            self.step()?;
        }
        log::warn!("超过 {} 步仍未结束", MAX_STEPS);
        Err(GameError::StepLimit)
    }

    /// 运行一局完整的游戏
    ///
    /// # 参数
    ///
    /// - `callback`: 为交互玩家做决策
    ///
    /// # 返回
    ///
    /// 和牌结果，流局为 None
    pub fn run<C: ActionCallback>(&mut self, callback: &mut C) -> Result<Option<WinResult>, GameError> {
        loop {
            match self.advance()? {
                Progress::Pending(pending) => {
                    let action = callback.get_action(&self.state, &pending);
                    self.decide(pending.seat, action)?;
                }
                Progress::Ended => return Ok(self.state.win_result.clone()),
            }
        }
    }

    fn finish_win(&mut self, seat: u8, result: WinResult) {
        log::info!("玩家 {} 和牌：{}（{} 台）", seat, result.pattern(), result.fans);
        self.state.winner = Some(seat);
        self.state.win_result = Some(result);
        self.close();
    }

    fn end_in_draw(&mut self) {
        log::info!("牌墙已空，流局");
        self.state.winner = None;
        self.close();
    }

    fn close(&mut self) {
        self.state.phase = Phase::End;
        self.state.pending = None;
        self.state.drawn_tile = None;
        self.response = None;
        self.rob_window = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::ResponsePolicy;
    use crate::tile::tile::parse_tiles;

    fn tiles(s: &str) -> Vec<Tile> {
        parse_tiles(s).unwrap()
    }

    /// 固定牌局：牌墙先放四家手牌，再放依次摸到的牌
    fn fixed(interactive: [bool; 4], hands: [&str; 4], draws: &str) -> GameEngine {
        let hands = hands.map(tiles);
        let mut layout: Vec<Tile> = hands.iter().flatten().copied().collect();
        layout.extend(tiles(draws));
        GameEngine::with_wall(config(interactive), Wall::from_tiles(layout), hands).unwrap()
    }

    fn config(interactive: [bool; 4]) -> GameConfig {
        GameConfig {
            seed: Some(7),
            dealer: Some(0),
            interactive,
            policy: ResponsePolicy {
                kong: 1.0,
                pong: 1.0,
                chow: 1.0,
            },
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_new_deals_sixteen_each() {
        let engine = GameEngine::new(GameConfig::all_automated(3)).unwrap();
        for player in &engine.state.players {
            assert_eq!(player.hand.total_count(), HAND_SIZE);
        }
        assert_eq!(engine.wall.remaining(), 136 - 64);
        assert_eq!(engine.state.phase, Phase::Draw);
        assert_eq!(engine.state.current_player, engine.state.dealer);
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = GameEngine::new(GameConfig::all_automated(11)).unwrap();
        let b = GameEngine::new(GameConfig::all_automated(11)).unwrap();
        assert_eq!(a.state.dealer, b.state.dealer);
        assert_eq!(a.state.players[0].hand, b.state.players[0].hand);
    }

    #[test]
    fn test_empty_wall_is_drawn_game() {
        let mut engine = fixed([false; 4], ["1m 2m", "", "", ""], "");
        assert_eq!(engine.wall.remaining(), 0);
        assert_eq!(engine.advance().unwrap(), Progress::Ended);
        assert!(engine.state.is_exhaustive_draw());
        assert!(engine.current_result().is_none());
    }

    #[test]
    fn test_with_wall_takes_hands_from_full_wall() {
        let hands = [tiles("1m 1m 1m 1m"), tiles("E S"), Vec::new(), tiles("Z")];
        let engine = GameEngine::with_wall(config([false; 4]), Wall::new(), hands).unwrap();
        assert_eq!(engine.wall.remaining(), Tile::TOTAL_COUNT - 7);
        assert_eq!(engine.state.players[0].hand.tile_count(Tile::Wan(1)), 4);

        // 第五张 1m 已经不在牌墙中
        let hands = [tiles("1m 1m 1m 1m"), tiles("1m"), Vec::new(), Vec::new()];
        let result = GameEngine::with_wall(config([false; 4]), Wall::new(), hands);
        assert!(matches!(result, Err(GameError::InvalidConfig)));
    }

    #[test]
    fn test_with_wall_rejects_missing_tile() {
        let hands = [tiles("1m 2m"), Vec::new(), Vec::new(), Vec::new()];
        let result = GameEngine::with_wall(config([false; 4]), Wall::from_tiles(tiles("1m 9p")), hands);
        assert!(matches!(result, Err(GameError::InvalidConfig)));
    }

    #[test]
    fn test_wrong_seat_rejected_without_mutation() {
        let mut engine = fixed([false; 4], ["1m 2m", "", "", ""], "9p");
        assert_eq!(engine.apply_draw(1), Err(GameError::NotYourTurn));
        assert_eq!(engine.apply_draw(9), Err(GameError::InvalidPlayer));
        assert_eq!(engine.apply_discard(0, 0), Err(GameError::WrongPhase));
        assert_eq!(engine.wall.remaining(), 1);
        assert_eq!(engine.apply_claim(0, Claim::Pass), Err(GameError::NoPendingDecision));
    }

    #[test]
    fn test_automated_self_draw_win() {
        let mut engine = fixed(
            [false; 4],
            ["1m 1m 1m 2m 2m 2m 3m 3m 3m 4m 4m 4m 5m 5m 5m 9m", "", "", ""],
            "9m 7p",
        );
        assert_eq!(engine.advance().unwrap(), Progress::Ended);
        assert_eq!(engine.state.winner, Some(0));
        let result = engine.current_result().unwrap();
        assert_eq!(result.win_type, Some(WinType::SelfDrawn));
        assert!(result.fans > 4);
    }

    #[test]
    fn test_interactive_discard_index() {
        let mut engine = fixed([true, false, false, false], ["1m 2m 3m", "", "", ""], "E 5s 6s 7s");

        let Progress::Pending(pending) = engine.advance().unwrap() else {
            panic!("应等待出牌");
        };
        assert_eq!(pending.seat, 0);
        assert!(matches!(pending.kind, DecisionKind::Discard { .. }));
        assert_eq!(engine.state.drawn_tile, Some(Tile::Wind(Wind::East)));

        assert_eq!(engine.apply_discard(0, 4), Err(GameError::InvalidTileIndex));
        engine.apply_discard(0, 3).unwrap();
        assert_eq!(engine.state.players[0].discards, vec![Tile::Wind(Wind::East)]);
        assert_eq!(engine.state.phase, Phase::Draw);
        assert_eq!(engine.state.current_player, 1);
        assert!(engine.state.last_discard.is_none());
    }
}
