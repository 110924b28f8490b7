//! 网格坐标生成.
//!
//! 给定维度布局、体数据范围、窗口大小与网格步长, 确定性地枚举覆盖整卷的
//! 采样坐标集. 核心保证: 即使步长不能整除范围, 每个滑窗维也总会包含一个
//! 恰好抵达边界的步进点, 因此整卷的每个体素都落在至少一个窗口内.

mod coords;

pub use coords::{Coordinate, CoordinateSet};

use crate::SpatialLayout;
use itertools::Itertools;

/// 网格坐标生成错误.
///
/// 两种变体都代表配置与数据的结构性不匹配, 重试不会改变结果,
/// 调用者应当修正 patch/网格配置后整体重跑.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// 体数据的维度个数低于布局要求.
    ExtentTooShort {
        /// 体数据实际的维度个数.
        have: usize,
        /// 布局要求的最少维度个数.
        want: usize,
    },

    /// 某个滑窗维上窗口大小超过了体数据范围.
    WindowExceedsExtent {
        /// 出问题的维度下标.
        dim: usize,
        /// 该维度的体数据范围.
        extent: usize,
        /// 配置的窗口大小.
        window: usize,
    },
}

/// 枚举 `[start, end)` 上窗口大小为 `window`、步长为 `step` 的全部步进点.
///
/// 从 `start` 开始, 每次前进 `step`, 收下所有满足 `point + window <= end`
/// 的点; 随后无条件补上 `max(end - window, 0)`. 返回值升序且互不重复.
///
/// 补上的最后一点保证返回集中总存在一个窗口恰好抵达 `end` 边界的步进点
/// (范围小于窗口时退化为 0), 即使 `step` 不能整除 `end - start - window`.
///
/// `step` 为 0 表示禁用采样, 直接返回空集.
pub fn enumerate_step_points(start: usize, end: usize, window: usize, step: usize) -> Vec<usize> {
    if step == 0 {
        return Vec::new();
    }

    let mut points = Vec::new();
    let mut at = start;
    while at + window <= end {
        points.push(at);
        at += step;
    }

    // 已收下的点都不超过 end - window, 因此补点后仍然升序.
    let last = end.saturating_sub(window);
    if points.last() != Some(&last) {
        points.push(last);
    }
    points
}

/// 生成覆盖一卷体数据的全部网格采样坐标.
///
/// `extent` 为体数据各维大小 (长度不低于 `layout.coordinate_dims()`,
/// 多余的尾部维度如模态维不参与坐标生成); `window` 对每个滑窗维一致;
/// `grid` 为相邻步进点的间隔.
///
/// 返回值:
///
/// 1. `grid` 为 0 时返回 `Ok(None)`, 表示本次调用禁用采样, 不是错误;
/// 2. 范围与窗口不匹配时返回 `Err`, 见 [`GridError`];
/// 3. 其余情况返回完整坐标集, 其大小等于各维步进点个数之积.
pub fn grid_coordinates(
    layout: SpatialLayout,
    extent: &[usize],
    window: usize,
    grid: usize,
) -> Result<Option<CoordinateSet>, GridError> {
    if grid == 0 {
        return Ok(None);
    }

    let dims = layout.coordinate_dims();
    if extent.len() < dims {
        return Err(GridError::ExtentTooShort {
            have: extent.len(),
            want: dims,
        });
    }
    for dim in 0..layout.windowed() {
        if extent[dim] < window {
            return Err(GridError::WindowExceedsExtent {
                dim,
                extent: extent[dim],
                window,
            });
        }
    }

    // 滑窗维按 (window, grid) 步进; 辅助维以单位窗、单位步长逐索引枚举.
    let windowed = (0..layout.windowed()).map(|dim| enumerate_step_points(0, extent[dim], window, grid));
    let auxiliary = layout
        .has_auxiliary()
        .then(|| enumerate_step_points(0, extent[layout.windowed()], 1, 1));
    let steps: Vec<Vec<usize>> = windowed.chain(auxiliary).collect();

    let coords: Vec<Coordinate> = steps
        .iter()
        .map(|points| points.iter().copied())
        .multi_cartesian_product()
        .map(|starts| Coordinate::from_starts(layout, window, &starts))
        .collect();

    Ok(Some(CoordinateSet::new(layout, coords)))
}
