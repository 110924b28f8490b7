//! 网格采样器: 驱动体数据源, 按坐标集逐个填充 patch 的惰性序列.
//!
//! 每拉取一卷体数据, 采样器整形其各组成部分的维度、生成覆盖整卷的坐标集,
//! 并将坐标总数补齐到批大小的整数倍 (循环复用靠前的坐标); 随后逐坐标把
//! 窗口数据写入 patch 接收器. 整个序列有限且单遍: 体数据源的游标只前进,
//! 耗尽后需要新的源才能再次遍历.

mod error;
mod spec;

pub use error::SampleError;
pub use spec::{GridSpec, SpecError};

use crate::data::{GridPatch, PatchSink, Volume, VolumePart};
use crate::dataset::VolumeSource;
use crate::grid::{grid_coordinates, CoordinateSet};

/// 正在被采样的一卷的状态.
#[derive(Debug)]
struct ActiveVolume {
    volume: Volume,
    locations: CoordinateSet,
    emitted: usize,
    total: usize,
}

/// 网格采样器. 单线程、拉动式: 消费者每请求一次, 才产出一个样本.
///
/// 两套消费接口:
///
/// 1. [`advance`](Self::advance) + [`current`](Self::current):
///   `current` 返回接收器的 **活引用**, 内容会被下一次 `advance` 覆盖;
/// 2. `Iterator` (要求接收器 `Clone`): 每个元素是接收器当次内容的独立
///   副本 (copy-on-emit), 可跨样本保留.
///
/// 任何错误都会使采样器定格: 错误本身产出一次, 之后序列即告结束.
#[derive(Debug)]
pub struct GridSampler<S, P = GridPatch> {
    spec: GridSpec,
    source: S,
    sink: P,
    active: Option<ActiveVolume>,
    finished: bool,
}

impl<S: VolumeSource> GridSampler<S> {
    /// 以与 `spec` 形状一致的 [`GridPatch`] 接收器创建采样器.
    pub fn new(spec: GridSpec, source: S) -> Self {
        let sink = spec.patch();
        Self::with_sink(spec, source, sink)
    }
}

impl<S: VolumeSource, P: PatchSink> GridSampler<S, P> {
    /// 以调用者提供的接收器创建采样器.
    pub fn with_sink(spec: GridSpec, source: S, sink: P) -> Self {
        Self {
            spec,
            source,
            sink,
            active: None,
            finished: false,
        }
    }

    /// 采样配置.
    #[inline]
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// 序列是否已结束 (源耗尽或出错定格).
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 当前接收器内容的活引用.
    ///
    /// 该引用指向被采样器原位覆盖的缓冲: 下一次 [`advance`](Self::advance)
    /// 之后内容即失效. 需要保留时应显式复制.
    #[inline]
    pub fn current(&self) -> &P {
        &self.sink
    }

    /// 产出下一个样本到接收器.
    ///
    /// 成功写入返回 `Ok(true)`; 源耗尽 (正常终止) 返回 `Ok(false)`;
    /// 出错返回 `Err` 并使采样器定格, 此后恒返回 `Ok(false)`.
    pub fn advance(&mut self) -> Result<bool, SampleError> {
        if self.finished {
            return Ok(false);
        }
        loop {
            if let Some(active) = self.active.as_mut() {
                if active.emitted < active.total {
                    let n = active.locations.len();
                    let coord = &active.locations[active.emitted % n];
                    self.sink.set_data(active.volume.id(), coord, &active.volume);
                    active.emitted += 1;
                    return Ok(true);
                }
                // 本卷产出完毕, 回到源上拉下一卷.
                self.active = None;
            }

            if !self.source.has_next() {
                self.finished = true;
                return Ok(false);
            }
            if let Err(e) = self.load_next_volume() {
                self.finished = true;
                return Err(e);
            }
        }
    }

    /// 收回体数据源. 其游标只为实际拉取过的卷前进过,
    /// 提前停止消费时可从下一卷继续.
    pub fn into_source(self) -> S {
        self.source
    }

    /// 从源上拉取一卷, 整形、生成坐标并计算补齐后的产出总数.
    ///
    /// 步长为 0 (禁用采样) 时本卷不产出任何样本, `self.active` 保持空,
    /// 调用方的循环会继续拉下一卷.
    fn load_next_volume(&mut self) -> Result<(), SampleError> {
        let mut volume = self.source.next_volume().map_err(SampleError::Source)?;
        let id = volume.id();

        volume.set_layout(self.spec.layout());
        for (part, want) in [
            (VolumePart::Scan, self.spec.scan_ndim()),
            (VolumePart::Label, self.spec.label_ndim()),
            (VolumePart::Weight, self.spec.weight_ndim()),
        ] {
            volume.reconcile(part, want).map_err(|error| SampleError::Reshape {
                volume_id: id,
                part,
                error,
            })?;
        }

        // 时间序列数据: 明确不支持, 中止而非静默跳过.
        let ndim = volume.scan().ndim();
        if ndim == 5 {
            return Err(SampleError::TimeSeries { volume_id: id, ndim });
        }

        let locations = match grid_coordinates(
            self.spec.layout(),
            volume.extent(),
            self.spec.window(),
            self.spec.grid(),
        )
        .map_err(|error| SampleError::Grid {
            volume_id: id,
            error,
        })? {
            Some(locations) => locations,
            None => {
                log::debug!("卷 {id}: 网格步长为 0, 采样被禁用");
                return Ok(());
            }
        };

        let n = locations.len();
        let batch = self.spec.batch();
        let remainder = n % batch;
        let extra = if remainder != 0 { batch - remainder } else { 0 };
        let total = n + extra;
        if extra > 0 {
            log::info!("卷 {id}: 生成 {n} 个坐标, 补齐到 {total} 以对齐批大小 {batch}");
        } else {
            log::info!("卷 {id}: 生成 {n} 个坐标");
        }

        self.active = Some(ActiveVolume {
            volume,
            locations,
            emitted: 0,
            total,
        });
        Ok(())
    }
}

impl<S: VolumeSource, P: PatchSink + Clone> Iterator for GridSampler<S, P> {
    type Item = Result<P, SampleError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(true) => Some(Ok(self.sink.clone())),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
