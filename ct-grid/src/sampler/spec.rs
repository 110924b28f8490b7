use crate::data::{GridPatch, SpatialLayout};

/// 采样静态配置错误. 在构造 [`GridSpec`] 时即被检出, 早于任何 I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecError {
    /// 窗口大小为 0.
    ZeroWindow,

    /// 批大小为 0.
    ZeroBatch,
}

/// 网格采样配置: 维度布局、窗口大小、网格步长、批大小,
/// 以及各组成部分的可选模态 (通道) 轴.
///
/// 网格步长为 0 是合法配置, 表示 "禁用采样" —— 采样器会逐卷跳过而不报错.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    layout: SpatialLayout,
    window: usize,
    grid: usize,
    batch: usize,
    scan_channels: Option<usize>,
    label_channels: Option<usize>,
    weight_channels: Option<usize>,
}

impl GridSpec {
    /// 创建采样配置. 窗口大小与批大小必须非 0, 否则返回 [`SpecError`].
    pub fn new(
        layout: SpatialLayout,
        window: usize,
        grid: usize,
        batch: usize,
    ) -> Result<Self, SpecError> {
        if window == 0 {
            return Err(SpecError::ZeroWindow);
        }
        if batch == 0 {
            return Err(SpecError::ZeroBatch);
        }
        Ok(Self {
            layout,
            window,
            grid,
            batch,
            scan_channels: None,
            label_channels: None,
            weight_channels: None,
        })
    }

    /// 声明扫描数据带 `channels` 个模态的尾轴. `channels` 必须非 0.
    pub fn with_scan_channels(mut self, channels: usize) -> Self {
        assert_ne!(channels, 0);
        self.scan_channels = Some(channels);
        self
    }

    /// 声明标注数据带 `channels` 个模态的尾轴. `channels` 必须非 0.
    pub fn with_label_channels(mut self, channels: usize) -> Self {
        assert_ne!(channels, 0);
        self.label_channels = Some(channels);
        self
    }

    /// 声明权重图带 `channels` 个模态的尾轴. `channels` 必须非 0.
    pub fn with_weight_channels(mut self, channels: usize) -> Self {
        assert_ne!(channels, 0);
        self.weight_channels = Some(channels);
        self
    }

    /// 维度布局.
    #[inline]
    pub fn layout(&self) -> SpatialLayout {
        self.layout
    }

    /// 窗口大小.
    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    /// 网格步长.
    #[inline]
    pub fn grid(&self) -> usize {
        self.grid
    }

    /// 批大小.
    #[inline]
    pub fn batch(&self) -> usize {
        self.batch
    }

    /// 整形后扫描数据应有的维度个数.
    #[inline]
    pub fn scan_ndim(&self) -> usize {
        self.layout.coordinate_dims() + usize::from(self.scan_channels.is_some())
    }

    /// 整形后标注数据应有的维度个数.
    #[inline]
    pub fn label_ndim(&self) -> usize {
        self.layout.coordinate_dims() + usize::from(self.label_channels.is_some())
    }

    /// 整形后权重图应有的维度个数.
    #[inline]
    pub fn weight_ndim(&self) -> usize {
        self.layout.coordinate_dims() + usize::from(self.weight_channels.is_some())
    }

    /// 扫描 patch 缓冲的形状: 每个滑窗维一个 `window`, 模态轴原样保留.
    /// 辅助维收缩为单个索引, 不占轴.
    pub fn patch_scan_shape(&self) -> Vec<usize> {
        let mut shape = vec![self.window; self.layout.windowed()];
        if let Some(channels) = self.scan_channels {
            shape.push(channels);
        }
        shape
    }

    /// 创建与本配置形状一致的空 [`GridPatch`].
    pub fn patch(&self) -> GridPatch {
        GridPatch::new(&self.patch_scan_shape())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_rejects_zero_window() {
        let layout = SpatialLayout::pure(3);
        assert_eq!(
            GridSpec::new(layout, 0, 2, 4).unwrap_err(),
            SpecError::ZeroWindow
        );
    }

    #[test]
    fn test_spec_rejects_zero_batch() {
        let layout = SpatialLayout::pure(3);
        assert_eq!(
            GridSpec::new(layout, 8, 2, 0).unwrap_err(),
            SpecError::ZeroBatch
        );
    }

    #[test]
    fn test_spec_zero_grid_allowed() {
        // 步长 0 = 禁用采样, 不是配置错误.
        let layout = SpatialLayout::pure(3);
        assert!(GridSpec::new(layout, 8, 0, 4).is_ok());
    }

    #[test]
    fn test_spec_ndim_and_patch_shape() {
        let layout = SpatialLayout::with_auxiliary(2);
        let spec = GridSpec::new(layout, 16, 8, 4).unwrap().with_scan_channels(3);
        assert_eq!(spec.scan_ndim(), 4); // 2 滑窗 + 1 辅助 + 1 模态.
        assert_eq!(spec.label_ndim(), 3);
        assert_eq!(spec.patch_scan_shape(), vec![16, 16, 3]);
    }
}
