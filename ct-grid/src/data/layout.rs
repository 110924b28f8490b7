/// 采样维度布局: 若干个完整滑窗采样的空间维, 加上至多一个逐索引采样的辅助维.
///
/// 该结构取代了 "以小数表示空间秩" 的惯用技巧 (如用 2.5 表示
/// "2 个滑窗维 + 1 个辅助维"), 使两种情况在类型上显式区分.
///
/// 列布局约定见 [`crate::grid::Coordinate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpatialLayout {
    windowed: usize,
    auxiliary: bool,
}

impl SpatialLayout {
    /// 纯滑窗布局: `windowed` 个维度全部参与滑窗采样.
    ///
    /// `windowed` 必须非 0, 否则程序 panic.
    pub fn pure(windowed: usize) -> Self {
        assert_ne!(windowed, 0);
        Self {
            windowed,
            auxiliary: false,
        }
    }

    /// 混合布局: `windowed` 个滑窗维, 外加一个以单位窗、单位步长逐索引采样的辅助维.
    ///
    /// `windowed` 必须非 0, 否则程序 panic.
    pub fn with_auxiliary(windowed: usize) -> Self {
        assert_ne!(windowed, 0);
        Self {
            windowed,
            auxiliary: true,
        }
    }

    /// 滑窗维个数.
    #[inline]
    pub const fn windowed(&self) -> usize {
        self.windowed
    }

    /// 是否带辅助维.
    #[inline]
    pub const fn has_auxiliary(&self) -> bool {
        self.auxiliary
    }

    /// 参与坐标生成的维度总数 (滑窗维 + 辅助维).
    #[inline]
    pub const fn coordinate_dims(&self) -> usize {
        self.windowed + self.auxiliary as usize
    }

    /// 单个坐标的列数: 每个滑窗维占 (start, end) 两列, 辅助维占一列.
    #[inline]
    pub const fn coordinate_len(&self) -> usize {
        2 * self.windowed + self.auxiliary as usize
    }
}
