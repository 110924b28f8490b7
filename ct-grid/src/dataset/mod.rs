//! 数据集操作: 体数据源及其文件/内存实现, 以及数据集划分.

use std::path::{Path, PathBuf};

use crate::data::Volume;

pub mod generic;
pub mod lits;
pub mod partition;

pub use generic::{volume_loader, FilenameBuilder, VolumeLoader};

/// 体数据源错误.
#[derive(Debug)]
pub enum SourceError {
    /// nifti 文件读取错误.
    Nifti(nifti::NiftiError),

    /// 其他底层 I/O 错误.
    Io(std::io::Error),

    /// 在 `has_next()` 为假时调用了 `next_volume()`.
    Exhausted,
}

/// 体数据源: 单遍、有状态、顺序供给体数据.
///
/// 源由调用者显式构造并交给采样器持有, 不存在任何环境全局状态,
/// 因此多个采样器可以安全地各自驱动独立的源.
///
/// # 注意
///
/// 源的游标在每次 [`next_volume`](Self::next_volume) 时前进且不可回退;
/// 同一个源不可被两个消费者并发驱动.
pub trait VolumeSource {
    /// 是否还有未供给的体数据. 该查询没有副作用.
    fn has_next(&self) -> bool;

    /// 取出下一卷体数据并前移游标.
    ///
    /// 在 [`has_next`](Self::has_next) 为假时调用返回
    /// [`SourceError::Exhausted`].
    fn next_volume(&mut self) -> Result<Volume, SourceError>;
}

/// 获取 `{用户主目录}/dataset` 目录.
pub fn home_dataset_dir() -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    Some(ans)
}

/// 获取 `{用户主目录}/dataset` 目录下给定继续项组成的全路径.
pub fn home_dataset_dir_with<P: AsRef<Path>, I: IntoIterator<Item = P>>(it: I) -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    ans.extend(it);
    Some(ans)
}

/// 从内存常驻的体数据列表创建预加载源. 供给顺序与列表顺序一致.
///
/// 主要用于测试与合成数据实验.
pub fn preloaded_source<I: IntoIterator<Item = Volume>>(volumes: I) -> PreloadedSource {
    let mut data: Vec<Volume> = volumes.into_iter().collect();
    data.reverse();

    PreloadedSource { data_rev: data }
}

/// 预加载体数据源.
#[derive(Debug, Clone)]
pub struct PreloadedSource {
    data_rev: Vec<Volume>,
}

impl VolumeSource for PreloadedSource {
    #[inline]
    fn has_next(&self) -> bool {
        !self.data_rev.is_empty()
    }

    fn next_volume(&mut self) -> Result<Volume, SourceError> {
        self.data_rev.pop().ok_or(SourceError::Exhausted)
    }
}
