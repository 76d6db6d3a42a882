use crate::game::action::{Action, Claim};
use crate::game::config::GameConfig;
use crate::game::game_engine::{GameEngine, GameError, Progress};
use crate::game::state::{DecisionKind, PendingDecision};
use crate::tile::win_check::WinResult;
use crate::tile::{parse_tiles, Tile};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

fn engine_err(err: GameError) -> PyErr {
    PyErr::new::<PyRuntimeError, _>(format!("Action failed: {}", err))
}

pub(crate) fn parse_tile(text: &str) -> PyResult<Tile> {
    text.parse::<Tile>()
        .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))
}

fn tile_names(tiles: impl IntoIterator<Item = Tile>) -> Vec<String> {
    tiles.into_iter().map(|t| t.to_string()).collect()
}

fn result_dict<'py>(py: Python<'py>, result: &WinResult) -> PyResult<&'py PyDict> {
    let dict = PyDict::new(py);
    dict.set_item("fans", result.fans)?;
    dict.set_item("pattern", result.pattern())?;
    dict.set_item("labels", result.labels())?;
    dict.set_item("self_drawn", result.win_type == Some(crate::tile::WinType::SelfDrawn))?;
    Ok(dict)
}

fn pending_dict<'py>(py: Python<'py>, pending: &PendingDecision) -> PyResult<&'py PyDict> {
    let dict = PyDict::new(py);
    dict.set_item("seat", pending.seat)?;
    match &pending.kind {
        DecisionKind::SelfDrawWin { tile, result } => {
            dict.set_item("type", "self_draw_win")?;
            dict.set_item("tile", tile.to_string())?;
            dict.set_item("result", result_dict(py, result)?)?;
        }
        DecisionKind::Discard {
            add_kongs,
            concealed_kongs,
        } => {
            dict.set_item("type", "discard")?;
            dict.set_item("add_kongs", tile_names(add_kongs.iter().copied()))?;
            dict.set_item("concealed_kongs", tile_names(concealed_kongs.iter().copied()))?;
        }
        DecisionKind::Response {
            tile,
            discarder,
            options,
        } => {
            dict.set_item("type", "response")?;
            dict.set_item("tile", tile.to_string())?;
            dict.set_item("discarder", *discarder)?;
            let claims: Vec<String> = options.claims().iter().map(claim_name).collect();
            dict.set_item("claims", claims)?;
        }
        DecisionKind::RobKong { tile, from, result } => {
            dict.set_item("type", "rob_kong")?;
            dict.set_item("tile", tile.to_string())?;
            dict.set_item("from", *from)?;
            dict.set_item("result", result_dict(py, result)?)?;
        }
    }
    Ok(dict)
}

fn claim_name(claim: &Claim) -> String {
    match claim {
        Claim::Win => "win".to_string(),
        Claim::Kong => "kong".to_string(),
        Claim::Pong => "pong".to_string(),
        Claim::Chow(tiles) => format!("chow:{}", tile_names(*tiles).join(",")),
        Claim::Pass => "pass".to_string(),
    }
}

/// Python 绑定的游戏引擎
#[pyclass]
pub struct PyGameEngine {
    inner: GameEngine,
}

#[pymethods]
impl PyGameEngine {
    /// 开一局新牌
    ///
    /// # 参数
    ///
    /// - `seed`: 随机种子（可选）
    /// - `dealer`: 庄家座位（可选）
    /// - `interactive`: 各座位是否由 Python 决策，缺省只有座位 0
    #[new]
    #[pyo3(signature = (seed=None, dealer=None, interactive=None))]
    pub fn new(seed: Option<u64>, dealer: Option<u8>, interactive: Option<[bool; 4]>) -> PyResult<Self> {
        let mut config = GameConfig {
            seed,
            dealer,
            ..GameConfig::default()
        };
        if let Some(interactive) = interactive {
            config.interactive = interactive;
        }
        let inner = GameEngine::new(config).map_err(engine_err)?;
        Ok(Self { inner })
    }

    /// 推进到下一个交互决策；本局结束时返回 None
    pub fn advance(&mut self, py: Python) -> PyResult<Option<PyObject>> {
        match self.inner.advance().map_err(engine_err)? {
            Progress::Pending(pending) => Ok(Some(pending_dict(py, &pending)?.into())),
            Progress::Ended => Ok(None),
        }
    }

    /// 打出排序后手牌中的第 `index` 张
    pub fn discard(&mut self, seat: u8, index: usize) -> PyResult<()> {
        self.inner
            .decide(seat, Action::Discard { index })
            .map_err(engine_err)
    }

    /// 加杠
    pub fn add_kong(&mut self, seat: u8, tile: &str) -> PyResult<()> {
        let tile = parse_tile(tile)?;
        self.inner
            .decide(seat, Action::AddKong { tile })
            .map_err(engine_err)
    }

    /// 暗杠
    pub fn concealed_kong(&mut self, seat: u8, tile: &str) -> PyResult<()> {
        let tile = parse_tile(tile)?;
        self.inner
            .decide(seat, Action::ConcealedKong { tile })
            .map_err(engine_err)
    }

    /// 响应：`"win"`、`"kong"`、`"pong"`、`"pass"`，或 `"chow"` 加上顺子三张牌
    #[pyo3(signature = (seat, kind, tiles=None))]
    pub fn claim(&mut self, seat: u8, kind: &str, tiles: Option<&str>) -> PyResult<()> {
        let claim = match kind {
            "win" => Claim::Win,
            "kong" => Claim::Kong,
            "pong" => Claim::Pong,
            "pass" => Claim::Pass,
            "chow" => {
                let text = tiles.ok_or_else(|| {
                    PyErr::new::<PyValueError, _>("tiles required for chow")
                })?;
                let run: [Tile; 3] = parse_tiles(text)
                    .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?
                    .try_into()
                    .map_err(|_| PyErr::new::<PyValueError, _>("chow needs exactly 3 tiles"))?;
                Claim::Chow(run)
            }
            _ => {
                return Err(PyErr::new::<PyValueError, _>(format!(
                    "Unknown claim: {}",
                    kind
                )))
            }
        };
        self.inner
            .decide(seat, Action::Claim(claim))
            .map_err(engine_err)
    }

    /// 某座位对一张弃牌的合法响应
    pub fn legal_claims(&self, seat: u8, tile: &str, is_next_seat: bool) -> PyResult<Vec<String>> {
        let tile = parse_tile(tile)?;
        let mask = self
            .inner
            .legal_claims(seat, tile, is_next_seat)
            .map_err(engine_err)?;
        Ok(mask.claims().iter().map(claim_name).collect())
    }

    /// 某座位排序后的手牌
    pub fn hand(&self, seat: u8) -> PyResult<Vec<String>> {
        let player = self
            .inner
            .state
            .players
            .get(seat as usize)
            .ok_or_else(|| PyErr::new::<PyValueError, _>("Invalid player ID"))?;
        Ok(tile_names(player.hand.to_sorted_vec()))
    }

    /// 和牌结果（未结束或流局为 None）
    pub fn result(&self, py: Python) -> PyResult<Option<PyObject>> {
        match self.inner.current_result() {
            Some(result) => Ok(Some(result_dict(py, result)?.into())),
            None => Ok(None),
        }
    }

    /// 和牌座位
    #[getter]
    fn winner(&self) -> Option<u8> {
        self.inner.state.winner
    }

    /// 当前玩家
    #[getter]
    fn current_player(&self) -> u8 {
        self.inner.state.current_player
    }

    /// 获取剩余牌数
    pub fn remaining_tiles(&self) -> usize {
        self.inner.wall.remaining_count()
    }

    /// 检查游戏是否结束
    pub fn is_game_over(&self) -> bool {
        self.inner.state.is_game_over()
    }

    fn __repr__(&self) -> String {
        format!(
            "PyGameEngine(turn={}, current_player={}, phase={:?})",
            self.inner.state.turn, self.inner.state.current_player, self.inner.state.phase
        )
    }
}

impl PyGameEngine {
    pub(crate) fn inner(&self) -> &GameEngine {
        &self.inner
    }
}
