use std::mem;

use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};

mod layout;
mod patch;

pub use layout::SpatialLayout;
pub use patch::{GridPatch, PatchSink};

/// 体数据的组成部分.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumePart {
    /// CT 扫描 (HU 值).
    Scan,

    /// 真值标注 / 分割结果.
    Label,

    /// 体素权重图.
    Weight,
}

/// 维度整形错误: 为压低维度个数而必须丢弃的尾轴长度不为 1.
///
/// 该错误代表数据与 patch 定义的结构性不匹配, 不可恢复.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReshapeError {
    /// 无法被压缩的轴下标.
    pub axis: usize,

    /// 该轴的实际长度 (大于 1).
    pub len: usize,

    /// 目标维度个数.
    pub want: usize,
}

/// 将一份体数据的维度个数整形到 `want`, 以匹配 patch 定义.
///
/// 维度过多时逐个丢弃长度为 1 的尾轴, 过少时逐个追加长度为 1 的尾轴.
/// 需要丢弃的尾轴长度不为 1 时返回 [`ReshapeError`].
pub fn match_component_rank<T>(mut data: ArrayD<T>, want: usize) -> Result<ArrayD<T>, ReshapeError> {
    while data.ndim() > want {
        let axis = data.ndim() - 1;
        let len = data.len_of(Axis(axis));
        if len != 1 {
            return Err(ReshapeError { axis, len, want });
        }
        data = data.index_axis_move(Axis(axis), 0);
    }
    while data.ndim() < want {
        let axis = data.ndim();
        data = data.insert_axis(Axis(axis));
    }
    Ok(data)
}

/// 一卷体数据: CT 扫描, 可选的标注与权重图, 以及卷标识.
///
/// 采样器在拉取时会为其盖上配置的维度布局, 并原位整形各组成部分的维度.
/// 扫描数据始终存在; 标注与权重图随数据集而定.
///
/// # 注意
///
/// 各组成部分的数据一致性 (形状、对应关系) 由构造方保证, 否则程序在
/// 采样时 panic.
#[derive(Debug, Clone)]
pub struct Volume {
    id: u32,
    layout: Option<SpatialLayout>,
    scan: ArrayD<f32>,
    label: Option<ArrayD<u8>>,
    weight: Option<ArrayD<f32>>,
}

impl Volume {
    /// 从卷标识和扫描数据创建体数据.
    pub fn new(id: u32, scan: ArrayD<f32>) -> Self {
        Self {
            id,
            layout: None,
            scan,
            label: None,
            weight: None,
        }
    }

    /// 附加标注数据.
    pub fn with_label(mut self, label: ArrayD<u8>) -> Self {
        self.label = Some(label);
        self
    }

    /// 附加权重图.
    pub fn with_weight(mut self, weight: ArrayD<f32>) -> Self {
        self.weight = Some(weight);
        self
    }

    /// 卷标识.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// 已声明的维度布局. 未经采样器盖章时为 `None`.
    #[inline]
    pub fn layout(&self) -> Option<SpatialLayout> {
        self.layout
    }

    /// 声明维度布局. 采样器拉取体数据后会以自身配置覆盖该值.
    #[inline]
    pub fn set_layout(&mut self, layout: SpatialLayout) {
        self.layout = Some(layout);
    }

    /// 扫描数据的一份不可变 shallow copy.
    #[inline]
    pub fn scan(&self) -> ArrayViewD<'_, f32> {
        self.scan.view()
    }

    /// 标注数据的一份不可变 shallow copy.
    #[inline]
    pub fn label(&self) -> Option<ArrayViewD<'_, u8>> {
        self.label.as_ref().map(|l| l.view())
    }

    /// 权重图的一份不可变 shallow copy.
    #[inline]
    pub fn weight(&self) -> Option<ArrayViewD<'_, f32>> {
        self.weight.as_ref().map(|w| w.view())
    }

    /// 体数据各维大小 (以扫描数据为准).
    #[inline]
    pub fn extent(&self) -> &[usize] {
        self.scan.shape()
    }

    /// 原位整形 `part` 的维度个数到 `want`. 缺失的可选部分按无事发生处理.
    ///
    /// 整形失败时对应部分会留下占位数据, 但此时错误已判定为不可恢复,
    /// 该卷不会再被使用.
    pub fn reconcile(&mut self, part: VolumePart, want: usize) -> Result<(), ReshapeError> {
        match part {
            VolumePart::Scan => {
                let data = mem::replace(&mut self.scan, ArrayD::zeros(IxDyn(&[0])));
                self.scan = match_component_rank(data, want)?;
            }
            VolumePart::Label => {
                if let Some(data) = self.label.take() {
                    self.label = Some(match_component_rank(data, want)?);
                }
            }
            VolumePart::Weight => {
                if let Some(data) = self.weight.take() {
                    self.weight = Some(match_component_rank(data, want)?);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    fn filled(shape: &[usize]) -> ArrayD<f32> {
        let size: usize = shape.iter().product();
        // 该操作不会生成 `Err`, 可直接 unwrap.
        ArrayD::from_shape_vec(IxDyn(shape), (0..size).map(|v| v as f32).collect()).unwrap()
    }

    #[test]
    fn test_match_rank_squeeze_trailing() {
        let data = filled(&[4, 5, 1, 1]);
        let out = match_component_rank(data, 2).unwrap();
        assert_eq!(out.shape(), &[4, 5]);
    }

    #[test]
    fn test_match_rank_append_trailing() {
        let data = filled(&[4, 5]);
        let out = match_component_rank(data, 4).unwrap();
        assert_eq!(out.shape(), &[4, 5, 1, 1]);
    }

    #[test]
    fn test_match_rank_identity() {
        let data = filled(&[4, 5, 6]);
        let out = match_component_rank(data, 3).unwrap();
        assert_eq!(out.shape(), &[4, 5, 6]);
    }

    #[test]
    fn test_match_rank_rejects_wide_axis() {
        let data = filled(&[4, 5, 3]);
        assert_eq!(
            match_component_rank(data, 2),
            Err(ReshapeError {
                axis: 2,
                len: 3,
                want: 2
            })
        );
    }

    #[test]
    fn test_match_rank_preserves_order() {
        let data = filled(&[2, 3, 1]);
        let out = match_component_rank(data, 2).unwrap();
        assert_eq!(out[[1, 2]], 5.0);
    }

    #[test]
    fn test_volume_reconcile_in_place() {
        use crate::consts::gray::LITS_LIVER;

        let mut volume = Volume::new(7, filled(&[4, 4, 1]))
            .with_label(Array::from_elem(IxDyn(&[4, 4]), LITS_LIVER));
        volume.reconcile(VolumePart::Scan, 2).unwrap();
        volume.reconcile(VolumePart::Label, 2).unwrap();
        volume.reconcile(VolumePart::Weight, 2).unwrap(); // 缺失部分: 无事发生.
        assert_eq!(volume.extent(), &[4, 4]);
        assert_eq!(volume.label().unwrap().shape(), &[4, 4]);
        assert!(volume.weight().is_none());
    }
}
