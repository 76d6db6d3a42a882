use crate::python::game_engine::{parse_tile, PyGameEngine};
use numpy::PyArray1;
use pyo3::prelude::*;

/// 将某座位的暗手转换为 34 维计数向量
///
/// 下标顺序：1-9 萬、1-9 筒、1-9 索、東南西北、白發中
#[pyfunction]
pub fn hand_counts(engine: &PyGameEngine, seat: u8, py: Python) -> PyResult<Py<PyArray1<u8>>> {
    let player = engine
        .inner()
        .state
        .players
        .get(seat as usize)
        .ok_or_else(|| PyErr::new::<pyo3::exceptions::PyValueError, _>("Invalid player ID"))?;
    let counts = player.hand.counts();
    Ok(PyArray1::from_slice(py, &counts).into())
}

/// 将某座位对一张弃牌的响应转换为布尔数组：[胡, 杠, 碰, 吃, 过]
#[pyfunction]
pub fn claim_mask(
    engine: &PyGameEngine,
    seat: u8,
    tile: &str,
    is_next_seat: bool,
    py: Python,
) -> PyResult<Py<PyArray1<bool>>> {
    let tile = parse_tile(tile)?;
    let mask = engine
        .inner()
        .legal_claims(seat, tile, is_next_seat)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))?;
    Ok(PyArray1::from_slice(py, &mask.to_bool_array()).into())
}
