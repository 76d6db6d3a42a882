use tw_mahjong::game::action::{Action, Claim};
use tw_mahjong::game::action_callback::FnActionCallback;
use tw_mahjong::game::config::{GameConfig, ResponsePolicy};
use tw_mahjong::game::game_engine::{GameEngine, GameError, Progress};
use tw_mahjong::game::meld::Meld;
use tw_mahjong::game::scoring::Fan;
use tw_mahjong::game::state::{DecisionKind, GameState, PendingDecision, Phase};
use tw_mahjong::tile::win_check::WinType;
use tw_mahjong::tile::{parse_tiles, Tile, TileSource, Wall};

const PONG_HAND: &str = "7s 7s 1s 1s 1s 4p 4p 4p 9p 9p 9p S S W W N";
const WIN_HAND: &str = "1m 2m 3m 4m 5m 6m 7m 8m 9m 1p 2p 3p E E 8s 9s";
const DEALER_HAND: &str = "2m 2m 3m 3m 4p 5p 6p 7p 8p 1s 2s 3s 4s 5s 6s B";

fn tiles(s: &str) -> Vec<Tile> {
    parse_tiles(s).unwrap()
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

/// 固定牌局：牌墙先放四家手牌（开局时取走），再放依次摸到的牌
fn engine(interactive: [bool; 4], hands: [&str; 4], draws: &str) -> GameEngine {
    let hands = hands.map(tiles);
    let mut layout: Vec<Tile> = hands.iter().flatten().copied().collect();
    layout.extend(tiles(draws));
    GameEngine::with_wall(config(interactive), Wall::from_tiles(layout), hands).unwrap()
}

fn index_of(engine: &GameEngine, seat: u8, tile: Tile) -> usize {
    engine.state.players[seat as usize]
        .hand
        .to_sorted_vec()
        .iter()
        .position(|&t| t == tile)
        .unwrap()
}

/// 座位 0 摸牌后打出 `tile`
fn draw_and_discard(engine: &mut GameEngine, tile: Tile) {
    let Progress::Pending(pending) = engine.advance().unwrap() else {
        panic!("应等待座位 0 出牌");
    };
    assert_eq!(pending.seat, 0);
    assert!(matches!(pending.kind, DecisionKind::Discard { .. }));
    let index = index_of(engine, 0, tile);
    engine.decide(0, Action::Discard { index }).unwrap();
}

/// 测试胡优先于碰（碰在前）
#[test]
fn test_win_beats_earlier_pong() {
    let mut engine = engine(
        [true, false, false, false],
        [DEALER_HAND, PONG_HAND, WIN_HAND, ""],
        "7s 1m",
    );
    assert!(engine.legal_claims(1, Tile::Tiao(7), true).unwrap().can_pong);
    assert!(engine.legal_claims(2, Tile::Tiao(7), false).unwrap().win.is_some());

    draw_and_discard(&mut engine, Tile::Tiao(7));

    assert!(engine.state.is_game_over());
    assert_eq!(engine.state.winner, Some(2));
    assert_eq!(engine.current_result().unwrap().win_type, Some(WinType::Claimed));
    assert!(engine.state.players[1].melds.is_empty());
    assert!(engine.state.players[0].discards.is_empty());
    assert_eq!(engine.state.discard_history[0].claimed_by, Some(2));
}

/// 测试胡优先于碰（碰在后）
#[test]
fn test_win_beats_later_pong() {
    let mut engine = engine(
        [true, false, false, false],
        [DEALER_HAND, WIN_HAND, PONG_HAND, ""],
        "7s 1m",
    );
    draw_and_discard(&mut engine, Tile::Tiao(7));
    assert_eq!(engine.state.winner, Some(1));
    assert!(engine.state.players[2].melds.is_empty());
}

/// 测试两家同时能胡时取先轮到的座位
#[test]
fn test_win_tie_goes_to_first_seat() {
    let mut engine = engine(
        [true, false, false, false],
        [DEALER_HAND, "", WIN_HAND, WIN_HAND],
        "7s 1m",
    );
    draw_and_discard(&mut engine, Tile::Tiao(7));
    assert_eq!(engine.state.winner, Some(2));
}

/// 测试交互玩家挂起后，后面的胡仍然优先
#[test]
fn test_interactive_response_suspends_scan() {
    let mut engine = engine(
        [true, true, false, false],
        [DEALER_HAND, PONG_HAND, WIN_HAND, ""],
        "7s 1m",
    );
    draw_and_discard(&mut engine, Tile::Tiao(7));

    let Progress::Pending(pending) = engine.advance().unwrap() else {
        panic!("应等待座位 1 响应");
    };
    assert_eq!(pending.seat, 1);
    let DecisionKind::Response { tile, discarder, options } = pending.kind else {
        panic!("应为响应决策");
    };
    assert_eq!((tile, discarder), (Tile::Tiao(7), 0));
    assert!(options.can_pong);
    assert!(!options.can_kong);
    assert_eq!(engine.state.phase, Phase::Response);

    // 没有提供的选项被拒绝，状态不变
    assert_eq!(engine.apply_claim(1, Claim::Kong), Err(GameError::IllegalClaim));
    assert_eq!(engine.pending().map(|p| p.seat), Some(1));

    engine.apply_claim(1, Claim::Pong).unwrap();
    assert_eq!(engine.state.winner, Some(2));
    assert!(engine.state.players[1].melds.is_empty());
}

/// 测试交互玩家放弃胡后继续向后询问，且不再回头
#[test]
fn test_pass_continues_forward() {
    let mut engine = engine(
        [true, true, false, false],
        [DEALER_HAND, WIN_HAND, PONG_HAND, ""],
        "7s 1m",
    );
    draw_and_discard(&mut engine, Tile::Tiao(7));

    let Progress::Pending(pending) = engine.advance().unwrap() else {
        panic!("应等待座位 1 响应");
    };
    assert_eq!(pending.seat, 1);
    engine.apply_claim(1, Claim::Pass).unwrap();

    assert!(!engine.state.is_game_over());
    assert_eq!(engine.state.players[2].melds, vec![Meld::Triplet { tile: Tile::Tiao(7) }]);
    assert_eq!(engine.state.current_player, 2);
    assert_eq!(engine.state.phase, Phase::Discard);
    assert!(engine.state.last_discard.is_none());
    assert!(engine.state.players[0].discards.is_empty());
}

/// 测试明杠后补牌
#[test]
fn test_direct_kong_draws_replacement() {
    let mut engine = engine(
        [true, false, false, false],
        ["1m 1m", "", "7s 7s 7s 1p", ""],
        "7s 2p 3p",
    );
    draw_and_discard(&mut engine, Tile::Tiao(7));

    assert_eq!(
        engine.state.players[2].melds,
        vec![Meld::Quad { tile: Tile::Tiao(7), is_concealed: false }]
    );
    assert_eq!(engine.state.current_player, 2);
    assert_eq!(engine.state.phase, Phase::Discard);
    assert_eq!(engine.state.drawn_tile, Some(Tile::Tong(2)));
    assert_eq!(engine.wall.remaining(), 1);
    assert_eq!(engine.state.discard_history[0].claimed_by, Some(2));
}

/// 测试下家吃牌
#[test]
fn test_next_seat_chows() {
    let mut engine = engine(
        [true, false, false, false],
        ["9s 9s", "1m 2m 9p", "", ""],
        "3m 5p",
    );
    draw_and_discard(&mut engine, Tile::Wan(3));

    let run = Meld::run(Tile::Wan(1), Tile::Wan(2), Tile::Wan(3)).unwrap();
    assert_eq!(engine.state.players[1].melds, vec![run]);
    assert_eq!(engine.state.players[1].hand.to_sorted_vec(), vec![Tile::Tong(9)]);
    assert_eq!(engine.state.current_player, 1);
    assert_eq!(engine.state.phase, Phase::Discard);
}

/// 测试加杠被抢
#[test]
fn test_rob_kong() {
    let mut engine = engine(
        [true, false, false, false],
        ["2m 2m 4s 5s 6s 7s 8s 9s W W N N F", "", "1m 2m 3m 4m 5m 6m 7m 8m 9m 4p 5p 6p E E 1p 2p", ""],
        "3p 9p",
    );
    engine.state.players[0].melds.push(Meld::Triplet { tile: Tile::Tong(3) });

    let Progress::Pending(pending) = engine.advance().unwrap() else {
        panic!("应等待座位 0 出牌");
    };
    let DecisionKind::Discard { add_kongs, concealed_kongs } = pending.kind else {
        panic!("应为出牌决策");
    };
    assert_eq!(add_kongs.as_slice(), &[Tile::Tong(3)]);
    assert!(concealed_kongs.is_empty());

    engine.decide(0, Action::AddKong { tile: Tile::Tong(3) }).unwrap();

    assert_eq!(engine.state.winner, Some(2));
    let result = engine.current_result().unwrap();
    assert!(result.details.contains(&Fan::RobKong));
    assert_eq!(result.win_type, Some(WinType::Claimed));
    assert_eq!(engine.state.players[0].melds, vec![Meld::Triplet { tile: Tile::Tong(3) }]);
    assert_eq!(engine.state.players[0].hand.tile_count(Tile::Tong(3)), 0);
    assert_eq!(engine.state.players[2].hand.tile_count(Tile::Tong(3)), 1);
    // 抢杠时还没有补牌
    assert_eq!(engine.wall.remaining(), 1);
}

/// 测试无人抢杠时加杠并补牌
#[test]
fn test_add_kong_without_robber() {
    let mut engine = engine(
        [true, false, false, false],
        ["2m 2m 4s 5s 6s 7s 8s 9s W W N N F", "", "", ""],
        "3p 9p",
    );
    engine.state.players[0].melds.push(Meld::Triplet { tile: Tile::Tong(3) });
    engine.advance().unwrap();
    engine.decide(0, Action::AddKong { tile: Tile::Tong(3) }).unwrap();

    assert_eq!(
        engine.state.players[0].melds,
        vec![Meld::Quad { tile: Tile::Tong(3), is_concealed: false }]
    );
    assert_eq!(engine.state.drawn_tile, Some(Tile::Tong(9)));
    assert_eq!(engine.state.players[0].hand.total_count(), 14);
    assert!(matches!(
        engine.pending().map(|p| &p.kind),
        Some(DecisionKind::Discard { .. })
    ));
}

/// 测试交互玩家放弃抢杠
#[test]
fn test_interactive_rob_window_pass() {
    let mut engine = engine(
        [true, false, true, false],
        ["2m 2m 4s 5s 6s 7s 8s 9s W W N N F", "", "1m 2m 3m 4m 5m 6m 7m 8m 9m 4p 5p 6p E E 1p 2p", ""],
        "3p 9p",
    );
    engine.state.players[0].melds.push(Meld::Triplet { tile: Tile::Tong(3) });
    engine.advance().unwrap();
    engine.decide(0, Action::AddKong { tile: Tile::Tong(3) }).unwrap();

    let Progress::Pending(pending) = engine.advance().unwrap() else {
        panic!("应等待座位 2 决定是否抢杠");
    };
    assert_eq!(pending.seat, 2);
    assert!(matches!(pending.kind, DecisionKind::RobKong { from: 0, .. }));
    // 抢杠窗口内不能出牌
    assert_eq!(engine.apply_discard(0, 0), Err(GameError::WrongPhase));

    engine.apply_claim(2, Claim::Pass).unwrap();
    assert!(!engine.state.is_game_over());
    assert_eq!(
        engine.state.players[0].melds,
        vec![Meld::Quad { tile: Tile::Tong(3), is_concealed: false }]
    );
    assert_eq!(engine.pending().map(|p| p.seat), Some(0));
}

/// 测试最后一张牌加杠被抢只算抢杠，不算河底
#[test]
fn test_rob_kong_on_last_tile() {
    let mut engine = engine(
        [true, false, false, false],
        ["2m 2m 4s 5s 6s 7s 8s 9s W W N N F", "", "1m 2m 3m 4m 5m 6m 7m 8m 9m 4p 5p 6p E E 1p 2p", ""],
        "3p",
    );
    engine.state.players[0].melds.push(Meld::Triplet { tile: Tile::Tong(3) });
    engine.advance().unwrap();
    assert_eq!(engine.wall.remaining(), 0);
    engine.decide(0, Action::AddKong { tile: Tile::Tong(3) }).unwrap();

    assert_eq!(engine.state.winner, Some(2));
    let result = engine.current_result().unwrap();
    assert!(result.details.contains(&Fan::RobKong));
    assert!(!result.details.contains(&Fan::LastTileClaim));
    assert!(!result.details.contains(&Fan::LastTileDraw));
}

/// 测试碰牌后的出牌窗口不能加杠或暗杠
#[test]
fn test_no_kong_after_pong() {
    let mut engine = engine(
        [true, true, false, false],
        ["1m 1m", "3p 7s 7s 9s 9m 9m 9m 9m 1p", "", ""],
        "7s",
    );
    engine.state.players[1].melds.push(Meld::Triplet { tile: Tile::Tong(3) });
    draw_and_discard(&mut engine, Tile::Tiao(7));

    let Progress::Pending(pending) = engine.advance().unwrap() else {
        panic!("应等待座位 1 响应");
    };
    assert_eq!(pending.seat, 1);
    engine.apply_claim(1, Claim::Pong).unwrap();

    let Some(PendingDecision { seat: 1, kind: DecisionKind::Discard { add_kongs, concealed_kongs } }) =
        engine.pending().cloned()
    else {
        panic!("应等待座位 1 出牌");
    };
    assert!(add_kongs.is_empty());
    assert!(concealed_kongs.is_empty());

    assert_eq!(
        engine.decide(1, Action::AddKong { tile: Tile::Tong(3) }),
        Err(GameError::InvalidAction)
    );
    assert_eq!(
        engine.decide(1, Action::ConcealedKong { tile: Tile::Wan(9) }),
        Err(GameError::InvalidAction)
    );
    assert_eq!(engine.state.players[1].melds.len(), 2);
    assert_eq!(engine.state.players[1].hand.tile_count(Tile::Wan(9)), 4);

    let index = index_of(&engine, 1, Tile::Tong(1));
    engine.decide(1, Action::Discard { index }).unwrap();
    assert_eq!(engine.state.players[1].discards, vec![Tile::Tong(1)]);
}

/// 测试交互玩家有可选响应时总会挂起，即使赢不过已有的响应
#[test]
fn test_interactive_seat_asked_when_outranked() {
    // 故意放入第五张 7s，让座位 2 的碰排在座位 1 的碰之后
    let mut engine = engine(
        [true, false, true, false],
        ["1m 1m", PONG_HAND, "7s 7s 2p", ""],
        "7s 1m",
    );
    draw_and_discard(&mut engine, Tile::Tiao(7));

    let Progress::Pending(pending) = engine.advance().unwrap() else {
        panic!("应等待座位 2 响应");
    };
    assert_eq!(pending.seat, 2);
    let DecisionKind::Response { options, .. } = pending.kind else {
        panic!("应为响应决策");
    };
    assert!(options.can_pong);
    assert!(engine.state.players[1].melds.is_empty());

    // 同优先级不能抢过先出现的座位
    engine.apply_claim(2, Claim::Pong).unwrap();
    assert_eq!(engine.state.players[1].melds, vec![Meld::Triplet { tile: Tile::Tiao(7) }]);
    assert!(engine.state.players[2].melds.is_empty());
    assert_eq!(engine.state.current_player, 1);
}

/// 测试暗杠后杠上开花
#[test]
fn test_kong_replacement_win() {
    let mut engine = engine(
        [false; 4],
        ["E E E E 1m 2m 3m 4m 5m 6m 7m 8m 9m 1p 2p 3p", "", "", ""],
        "5s 5s 9s",
    );
    assert_eq!(engine.advance().unwrap(), Progress::Ended);

    assert_eq!(engine.state.winner, Some(0));
    let result = engine.current_result().unwrap();
    assert_eq!(result.win_type, Some(WinType::SelfDrawn));
    assert!(result.details.contains(&Fan::KongDraw));
    assert!(result.details.contains(&Fan::SelfDraw));
    assert!(!result.details.contains(&Fan::ConcealedSelfDraw));
    assert!(result.details.contains(&Fan::Dealer));
    assert_eq!(result.fans, 6);
    assert!(engine.state.players[0].melds[0].is_concealed());
}

/// 测试交互玩家放弃自摸后才能出牌
#[test]
fn test_declined_self_draw() {
    let hand = "1m 1m 1m 2m 2m 2m 3m 3m 3m 4m 4m 4m 5m 5m 5m 9m";

    let mut accept = engine([true, false, false, false], [hand, "", "", ""], "9m 7p");
    let Progress::Pending(pending) = accept.advance().unwrap() else {
        panic!("应等待自摸决策");
    };
    assert!(matches!(pending.kind, DecisionKind::SelfDrawWin { tile: Tile::Wan(9), .. }));
    assert_eq!(accept.apply_discard(0, 0), Err(GameError::WrongPhase));
    accept.apply_claim(0, Claim::Win).unwrap();
    assert_eq!(accept.state.winner, Some(0));
    assert_eq!(accept.current_result().unwrap().fans, 25);

    let mut decline = engine([true, false, false, false], [hand, "", "", ""], "9m 7p");
    decline.advance().unwrap();
    decline.apply_claim(0, Claim::Pass).unwrap();
    assert!(!decline.state.is_game_over());
    assert_eq!(decline.state.players[0].hand.tile_count(Tile::Wan(9)), 2);
    assert!(matches!(
        decline.pending().map(|p| &p.kind),
        Some(DecisionKind::Discard { .. })
    ));
    assert_eq!(decline.apply_claim(0, Claim::Win), Err(GameError::WrongPhase));
}

/// 测试牌墙摸完流局
#[test]
fn test_wall_exhaustion() {
    let mut engine = engine([false; 4], ["1m 9p", "2m 8p", "3m 7p", "4m 6p"], "E S W N");
    assert_eq!(engine.advance().unwrap(), Progress::Ended);
    assert!(engine.state.is_exhaustive_draw());
    assert_eq!(engine.wall.remaining(), 0);
    assert_eq!(engine.state.discard_history.len(), 4);
    assert_eq!(engine.apply_draw(0), Err(GameError::GameOver));
}

/// 测试电脑对局都能结束
#[test]
fn test_automated_games_terminate() {
    for seed in 0..20 {
        let mut engine = GameEngine::new(GameConfig::all_automated(seed)).unwrap();
        assert_eq!(engine.advance().unwrap(), Progress::Ended);
        assert!(engine.state.validate().is_ok());
        match engine.state.winner {
            Some(_) => assert!(engine.current_result().unwrap().fans >= 1),
            None => assert_eq!(engine.wall.remaining(), 0),
        }
    }
}

/// 测试用回调驱动整局
#[test]
fn test_run_with_callback() {
    let mut engine = GameEngine::new(GameConfig {
        seed: Some(5),
        ..GameConfig::default()
    })
    .unwrap();
    let mut decisions = 0;
    let mut callback = FnActionCallback::new(|_state: &GameState, pending: &PendingDecision| {
        decisions += 1;
        match pending.kind {
            DecisionKind::Discard { .. } => Action::Discard { index: 0 },
            DecisionKind::Response { .. } => Action::Claim(Claim::Pass),
            DecisionKind::SelfDrawWin { .. } | DecisionKind::RobKong { .. } => Action::Claim(Claim::Win),
        }
    });
    engine.run(&mut callback).unwrap();
    assert!(engine.state.is_game_over());
    assert!(decisions > 0);
}
