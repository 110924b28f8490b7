use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn, Slice};

use super::Volume;
use crate::grid::Coordinate;

/// patch 接收器. 网格采样器每产出一个样本, 就对其调用一次
/// [`set_data`](PatchSink::set_data).
///
/// 接收器实例在相邻两次写入之间会被整体覆盖 (copy-on-emit 协议):
/// 消费者若要跨样本保留内容, 必须在请求下一个样本前自行复制.
pub trait PatchSink {
    /// 写入一次采样: 卷标识、采样坐标、以及坐标在 `volume` 中所指的窗口数据.
    fn set_data(&mut self, volume_id: u32, coord: &Coordinate, volume: &Volume);
}

/// 取出 `coord` 在 `data` 中所指的窗口视图.
///
/// 滑窗维裁剪到 `[start, end)`, 辅助维收缩到单个索引 (该轴消失),
/// 其余尾轴 (如模态维) 原样保留.
fn window_view<'a, T>(data: ArrayViewD<'a, T>, coord: &Coordinate) -> ArrayViewD<'a, T> {
    let mut view = data;
    for dim in 0..coord.layout().windowed() {
        view.slice_axis_inplace(
            Axis(dim),
            Slice::from(coord.start(dim) as isize..coord.end(dim) as isize),
        );
    }
    match coord.auxiliary() {
        Some(index) => view.index_axis_move(Axis(coord.layout().windowed()), index),
        None => view,
    }
}

/// 标准 patch 实现: 预分配缓冲, 每次写入时从体数据复制窗口内容.
///
/// 扫描缓冲在创建时分配且形状固定; 标注与权重缓冲按首次出现的数据惰性
/// 分配. 写入方的扫描窗口形状必须与缓冲一致, 否则程序 panic
/// (这代表 patch 定义与数据的不一致, 属于配置错误).
#[derive(Debug, Clone)]
pub struct GridPatch {
    volume_id: Option<u32>,
    coord: Option<Coordinate>,
    scan: ArrayD<f32>,
    label: Option<ArrayD<u8>>,
    weight: Option<ArrayD<f32>>,
    has_label: bool,
    has_weight: bool,
}

impl GridPatch {
    /// 按给定的扫描缓冲形状创建空 patch.
    ///
    /// 通常应通过 [`GridSpec::patch`](crate::sampler::GridSpec::patch)
    /// 创建, 以保证形状与采样配置一致.
    pub fn new(scan_shape: &[usize]) -> Self {
        Self {
            volume_id: None,
            coord: None,
            scan: ArrayD::zeros(IxDyn(scan_shape)),
            label: None,
            weight: None,
            has_label: false,
            has_weight: false,
        }
    }

    /// 最近一次写入的卷标识. 尚未写入时为 `None`.
    #[inline]
    pub fn volume_id(&self) -> Option<u32> {
        self.volume_id
    }

    /// 最近一次写入的采样坐标. 尚未写入时为 `None`.
    #[inline]
    pub fn coordinate(&self) -> Option<&Coordinate> {
        self.coord.as_ref()
    }

    /// 扫描窗口数据.
    #[inline]
    pub fn scan(&self) -> ArrayViewD<'_, f32> {
        self.scan.view()
    }

    /// 标注窗口数据. 最近一卷不带标注时为 `None`.
    #[inline]
    pub fn label(&self) -> Option<ArrayViewD<'_, u8>> {
        self.has_label.then(|| self.label.as_ref().unwrap().view())
    }

    /// 权重图窗口数据. 最近一卷不带权重图时为 `None`.
    #[inline]
    pub fn weight(&self) -> Option<ArrayViewD<'_, f32>> {
        self.has_weight
            .then(|| self.weight.as_ref().unwrap().view())
    }
}

impl PatchSink for GridPatch {
    fn set_data(&mut self, volume_id: u32, coord: &Coordinate, volume: &Volume) {
        self.volume_id = Some(volume_id);
        self.coord = Some(coord.clone());

        self.scan.assign(&window_view(volume.scan(), coord));

        match volume.label() {
            Some(data) => {
                let view = window_view(data, coord);
                if let Some(buf) = self.label.as_mut() {
                    if buf.shape() == view.shape() {
                        buf.assign(&view);
                    } else {
                        *buf = view.to_owned();
                    }
                } else {
                    self.label = Some(view.to_owned());
                }
                self.has_label = true;
            }
            None => self.has_label = false,
        }

        match volume.weight() {
            Some(data) => {
                let view = window_view(data, coord);
                if let Some(buf) = self.weight.as_mut() {
                    if buf.shape() == view.shape() {
                        buf.assign(&view);
                    } else {
                        *buf = view.to_owned();
                    }
                } else {
                    self.weight = Some(view.to_owned());
                }
                self.has_weight = true;
            }
            None => self.has_weight = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::gray::LITS_TUMOR;
    use crate::grid::grid_coordinates;
    use crate::SpatialLayout;
    use ndarray::Array;

    fn filled(shape: &[usize]) -> ArrayD<f32> {
        let size: usize = shape.iter().product();
        // 该操作不会生成 `Err`, 可直接 unwrap.
        ArrayD::from_shape_vec(IxDyn(shape), (0..size).map(|v| v as f32).collect()).unwrap()
    }

    #[test]
    fn test_window_view_pure() {
        let layout = SpatialLayout::pure(2);
        let volume = Volume::new(0, filled(&[4, 4]));
        let set = grid_coordinates(layout, volume.extent(), 2, 2).unwrap().unwrap();

        // 取 (2, 2) 起点的窗口: 行 2..4, 列 2..4.
        let coord = set.iter().find(|c| c.start(0) == 2 && c.start(1) == 2).unwrap();
        let view = window_view(volume.scan(), coord);
        assert_eq!(view.shape(), &[2, 2]);
        assert_eq!(view[[0, 0]], 10.0);
        assert_eq!(view[[1, 1]], 15.0);
    }

    #[test]
    fn test_window_view_auxiliary_collapses_axis() {
        let layout = SpatialLayout::with_auxiliary(2);
        let volume = Volume::new(0, filled(&[4, 4, 3]));
        let set = grid_coordinates(layout, volume.extent(), 2, 2).unwrap().unwrap();

        let coord = set.iter().find(|c| c.auxiliary() == Some(2)).unwrap();
        let view = window_view(volume.scan(), coord);
        // 辅助维被收缩掉, 只剩两个滑窗维.
        assert_eq!(view.shape(), &[2, 2]);
    }

    #[test]
    fn test_patch_overwrite_between_emissions() {
        let layout = SpatialLayout::pure(1);
        let volume = Volume::new(3, filled(&[6]));
        let set = grid_coordinates(layout, volume.extent(), 2, 2).unwrap().unwrap();

        let mut patch = GridPatch::new(&[2]);
        patch.set_data(3, &set[0], &volume);
        assert_eq!(patch.volume_id(), Some(3));
        assert_eq!(patch.scan()[[0]], 0.0);

        patch.set_data(3, &set[1], &volume);
        assert_eq!(patch.coordinate().unwrap().start(0), 2);
        assert_eq!(patch.scan()[[0]], 2.0);
    }

    #[test]
    fn test_patch_label_presence_tracks_volume() {
        let layout = SpatialLayout::pure(1);
        let with_label = Volume::new(0, filled(&[4]))
            .with_label(Array::from_elem(IxDyn(&[4]), LITS_TUMOR));
        let without = Volume::new(1, filled(&[4]));
        let set = grid_coordinates(layout, &[4], 2, 2).unwrap().unwrap();

        let mut patch = GridPatch::new(&[2]);
        patch.set_data(0, &set[0], &with_label);
        assert_eq!(patch.label().unwrap()[[0]], LITS_TUMOR);
        assert!(patch.weight().is_none());

        patch.set_data(1, &set[0], &without);
        assert!(patch.label().is_none());
    }
}
