//! Python 绑定模块
//!
//! 提供 PyO3 接口，将规则引擎暴露给 Python

#![allow(non_local_definitions)]

pub mod game_engine;
pub mod tensor;

use pyo3::prelude::*;

/// Python 模块初始化
#[pymodule]
fn tw_mahjong(_py: Python, m: &PyModule) -> PyResult<()> {
    use game_engine::PyGameEngine;

    m.add_class::<PyGameEngine>()?;
    m.add_function(pyo3::wrap_pyfunction!(tensor::hand_counts, m)?)?;
    m.add_function(pyo3::wrap_pyfunction!(tensor::claim_mask, m)?)?;
    Ok(())
}
