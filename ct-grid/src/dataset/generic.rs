//! 通用 CT 体数据加载器.
//!
//! 提供迭代器风格的数据集获取模式, 同时实现 [`VolumeSource`],
//! 可直接喂给网格采样器.

use std::path::{Path, PathBuf};

use ndarray::ArrayD;
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};

use super::{SourceError, VolumeSource};
use crate::data::Volume;

/// 文件名构造器. 接受数据集索引数, 获得文件名.
pub type FilenameBuilder = fn(u32) -> String;

/// 从指定索引、路径、文件名构造器来创建通用的体数据加载器.
///
/// 加载器只带扫描数据; 标注与权重图可通过
/// [`with_labels`](VolumeLoader::with_labels) /
/// [`with_weights`](VolumeLoader::with_weights) 继续附加.
///
/// # 注意
///
/// 1. `scan_path` 必须是目录, 否则程序 panic.
/// 2. `data` 的所有取值 `value` 必须在 `scan_path` 下有形如
///   `scan_builder(value)` 的 nifti 文件, 否则加载器在迭代时会返回
///   `Result::Error`.
pub fn volume_loader<I: IntoIterator<Item = u32>, P: AsRef<Path>>(
    data: I,
    scan_path: P,
    scan_builder: FilenameBuilder,
) -> VolumeLoader {
    let scan_path = scan_path.as_ref().to_owned();
    assert!(scan_path.is_dir());

    let mut data: Vec<u32> = data.into_iter().collect();
    data.reverse();

    VolumeLoader {
        scan_path,
        scan_builder,
        label: None,
        weight: None,
        data_rev: data,
    }
}

/// 体数据加载器, 在内部自动转换文件名.
#[derive(Debug)]
pub struct VolumeLoader {
    scan_path: PathBuf,
    scan_builder: FilenameBuilder,
    label: Option<(PathBuf, FilenameBuilder)>,
    weight: Option<(PathBuf, FilenameBuilder)>,
    data_rev: Vec<u32>,
}

impl VolumeLoader {
    /// 附加标注目录与文件名构造器.
    ///
    /// `path` 必须是目录, 否则程序 panic.
    pub fn with_labels<P: AsRef<Path>>(mut self, path: P, builder: FilenameBuilder) -> Self {
        let path = path.as_ref().to_owned();
        assert!(path.is_dir());
        self.label = Some((path, builder));
        self
    }

    /// 附加权重图目录与文件名构造器.
    ///
    /// `path` 必须是目录, 否则程序 panic.
    pub fn with_weights<P: AsRef<Path>>(mut self, path: P, builder: FilenameBuilder) -> Self {
        let path = path.as_ref().to_owned();
        assert!(path.is_dir());
        self.weight = Some((path, builder));
        self
    }

    fn load(&mut self, idx: u32) -> Result<Volume, SourceError> {
        self.scan_path.push((self.scan_builder)(idx));
        let scan = read_f32(self.scan_path.as_path());
        self.scan_path.pop();

        let mut volume = Volume::new(idx, scan?);

        if let Some((path, builder)) = self.label.as_mut() {
            path.push(builder(idx));
            let label = read_u8(path.as_path());
            path.pop();
            volume = volume.with_label(label?);
        }
        if let Some((path, builder)) = self.weight.as_mut() {
            path.push(builder(idx));
            let weight = read_f32(path.as_path());
            path.pop();
            volume = volume.with_weight(weight?);
        }
        Ok(volume)
    }
}

fn read_f32(path: &Path) -> Result<ArrayD<f32>, SourceError> {
    let obj = ReaderOptions::new()
        .read_file(path)
        .map_err(SourceError::Nifti)?;
    obj.into_volume()
        .into_ndarray::<f32>()
        .map_err(SourceError::Nifti)
}

fn read_u8(path: &Path) -> Result<ArrayD<u8>, SourceError> {
    let obj = ReaderOptions::new()
        .read_file(path)
        .map_err(SourceError::Nifti)?;
    obj.into_volume()
        .into_ndarray::<u8>()
        .map_err(SourceError::Nifti)
}

impl Iterator for VolumeLoader {
    type Item = (u32, Result<Volume, SourceError>);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.data_rev.pop()?;
        Some((idx, self.load(idx)))
    }
}

impl ExactSizeIterator for VolumeLoader {
    #[inline]
    fn len(&self) -> usize {
        self.data_rev.len()
    }
}

impl VolumeSource for VolumeLoader {
    #[inline]
    fn has_next(&self) -> bool {
        !self.data_rev.is_empty()
    }

    fn next_volume(&mut self) -> Result<Volume, SourceError> {
        let idx = self.data_rev.pop().ok_or(SourceError::Exhausted)?;
        self.load(idx)
    }
}
