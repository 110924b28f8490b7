use crate::SpatialLayout;
use std::ops::Index;

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::prelude::*;
    }
}

/// 单个网格采样坐标. 生成后不可变.
///
/// 列布局 (设滑窗维个数为 `w`, 坐标维总数为 `d`):
///
/// ```text
/// [start_0, .., start_{w-1}, aux?, end_0, .., end_{w-1}]
/// ```
///
/// 其中第 `i` 列为第 `i` 个滑窗维的窗口起点, 第 `i + d` 列为对应的终点
/// (`end_i = start_i + window`); 若布局带辅助维, 其裸索引占第 `w` 列.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    layout: SpatialLayout,
    cols: Box<[usize]>,
}

impl Coordinate {
    /// 从各维起点构造坐标. `starts` 的长度必须等于 `layout.coordinate_dims()`.
    pub(crate) fn from_starts(layout: SpatialLayout, window: usize, starts: &[usize]) -> Self {
        debug_assert_eq!(starts.len(), layout.coordinate_dims());

        let dims = layout.coordinate_dims();
        let mut cols = vec![0; layout.coordinate_len()];
        for (i, &start) in starts.iter().take(layout.windowed()).enumerate() {
            cols[i] = start;
            cols[i + dims] = start + window;
        }
        if layout.has_auxiliary() {
            cols[layout.windowed()] = starts[layout.windowed()];
        }

        Self {
            layout,
            cols: cols.into_boxed_slice(),
        }
    }

    /// 该坐标的维度布局.
    #[inline]
    pub fn layout(&self) -> SpatialLayout {
        self.layout
    }

    /// 第 `dim` 个滑窗维的窗口起点.
    ///
    /// `dim` 必须小于滑窗维个数, 否则程序 panic.
    #[inline]
    pub fn start(&self, dim: usize) -> usize {
        assert!(dim < self.layout.windowed());
        self.cols[dim]
    }

    /// 第 `dim` 个滑窗维的窗口终点 (不含).
    ///
    /// `dim` 必须小于滑窗维个数, 否则程序 panic.
    #[inline]
    pub fn end(&self, dim: usize) -> usize {
        assert!(dim < self.layout.windowed());
        self.cols[dim + self.layout.coordinate_dims()]
    }

    /// 辅助维的裸索引. 布局不带辅助维时返回 `None`.
    #[inline]
    pub fn auxiliary(&self) -> Option<usize> {
        self.layout
            .has_auxiliary()
            .then(|| self.cols[self.layout.windowed()])
    }

    /// 窗口大小. 对所有滑窗维一致.
    #[inline]
    pub fn window(&self) -> usize {
        self.end(0) - self.start(0)
    }

    /// 按列布局展开的裸整数序列.
    #[inline]
    pub fn columns(&self) -> &[usize] {
        &self.cols
    }
}

/// 一卷体数据的有序采样坐标集.
///
/// 坐标按各维步进点的叉积序排列 (第一维变化最慢), 互不重复,
/// 且对相同输入的生成结果完全可复现.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordinateSet {
    layout: SpatialLayout,
    coords: Vec<Coordinate>,
}

impl CoordinateSet {
    pub(crate) fn new(layout: SpatialLayout, coords: Vec<Coordinate>) -> Self {
        Self { layout, coords }
    }

    /// 坐标集的维度布局.
    #[inline]
    pub fn layout(&self) -> SpatialLayout {
        self.layout
    }

    /// 坐标个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// 坐标集是否为空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// 获取第 `index` 个坐标. 越界时返回 `None`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Coordinate> {
        self.coords.get(index)
    }

    /// 按生成序迭代坐标.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.coords.iter()
    }
}

impl Index<usize> for CoordinateSet {
    type Output = Coordinate;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.coords[index]
    }
}

impl<'a> IntoIterator for &'a CoordinateSet {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.coords.iter()
    }
}

/// 并发操作部分
#[cfg(feature = "rayon")]
impl CoordinateSet {
    /// 借助 `rayon`, 获取坐标集的并行迭代器. 可用于下游并行抽取窗口数据.
    pub fn par_iter(&self) -> rayon::slice::Iter<'_, Coordinate> {
        self.coords.par_iter()
    }
}
