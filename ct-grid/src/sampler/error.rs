//! 采样运行时错误.

use crate::data::{ReshapeError, VolumePart};
use crate::dataset::SourceError;
use crate::grid::GridError;

/// 网格采样运行时错误.
///
/// 每种变体都是结构性的配置/数据不匹配, 重试会得到完全相同的结果,
/// 因此采样器在首个错误处整体中止, 不做任何跳过或重试. 变体中携带
/// 出错的卷标识, 以便用户修正 patch/网格配置.
#[derive(Debug)]
pub enum SampleError {
    /// 坐标生成失败: 窗口与体数据范围不匹配.
    Grid {
        /// 出错的卷标识.
        volume_id: u32,
        /// 底层坐标生成错误.
        error: GridError,
    },

    /// 某组成部分的维度无法与 patch 定义匹配.
    Reshape {
        /// 出错的卷标识.
        volume_id: u32,
        /// 出错的组成部分.
        part: VolumePart,
        /// 底层整形错误.
        error: ReshapeError,
    },

    /// 整形后扫描数据为 5 维 (时间序列), 未实现.
    TimeSeries {
        /// 出错的卷标识.
        volume_id: u32,
        /// 整形后的维度个数.
        ndim: usize,
    },

    /// 体数据源错误.
    Source(SourceError),
}
