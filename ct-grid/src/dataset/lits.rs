//! LiTS 数据集的体数据源.
//!
//! 训练集文件形如 `volume-{i}.nii` / `segmentation-{i}.nii`,
//! 测试集文件形如 `test-volume-{i}.nii`.

use std::path::Path;

use super::generic::{volume_loader, VolumeLoader};
use crate::consts::{LITS_TESTING_SET_LEN, LITS_TRAINING_SET_LEN};

fn volume_name(idx: u32) -> String {
    format!("volume-{idx}.nii")
}

fn segmentation_name(idx: u32) -> String {
    format!("segmentation-{idx}.nii")
}

fn test_volume_name(idx: u32) -> String {
    format!("test-volume-{idx}.nii")
}

/// 从指定索引和路径创建 LiTS 训练集 (扫描 + 标注) 的体数据源.
///
/// # 注意
///
/// 1. `scan_path` 和 `label_path` 必须是目录, 否则程序 panic.
/// 2. `data` 的所有取值 `value` 必须在 `scan_path` 下有
///   `volume-{value}.nii`、在 `label_path` 下有
///   `segmentation-{value}.nii`, 否则加载时返回 `Result::Error`.
pub fn train_source<I, P>(data: I, scan_path: P, label_path: P) -> VolumeLoader
where
    I: IntoIterator<Item = u32>,
    P: AsRef<Path>,
{
    volume_loader(data, scan_path, volume_name).with_labels(label_path, segmentation_name)
}

/// 从指定路径创建覆盖整个 LiTS **训练集** 的体数据源.
pub fn full_train_source<P: AsRef<Path>>(scan_path: P, label_path: P) -> VolumeLoader {
    train_source(0..LITS_TRAINING_SET_LEN, scan_path, label_path)
}

/// 从指定索引和路径创建 LiTS 测试集 (仅扫描) 的体数据源.
///
/// # 注意
///
/// 1. `path` 必须是目录, 否则程序 panic.
/// 2. `data` 的所有取值 `value` 必须在 `path` 下有形如
///   `test-volume-{value}.nii` 的文件, 否则加载时返回 `Result::Error`.
pub fn infer_source<I, P>(data: I, path: P) -> VolumeLoader
where
    I: IntoIterator<Item = u32>,
    P: AsRef<Path>,
{
    volume_loader(data, path, test_volume_name)
}

/// 从指定路径创建覆盖整个 LiTS **测试集** 的体数据源.
pub fn full_infer_source<P: AsRef<Path>>(path: P) -> VolumeLoader {
    infer_source(0..LITS_TESTING_SET_LEN, path)
}
