#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 为 3D CT 扫描等体数据提供确定性的滑窗网格采样, 面向全卷推理场景.
//!
//! 给定一卷 (可带标注与权重图的) 体数据、窗口大小与网格步长, 本 crate
//! 枚举覆盖整卷的采样坐标集, 并以惰性序列逐坐标把窗口数据填入 patch;
//! 坐标总数会补齐到批大小的整数倍 (循环复用靠前的坐标), 以便下游按
//! 固定批推理.
//!
//! # 注意
//!
//! 1. 文件数据集部分目前主要适配 LiTS 组织模式
//!   (但其它数据按 LiTS 模式组织后也可以工作), 合成数据可走预加载源.
//! 2. 在非期望情况下, 程序会直接 panic, 而不会导致内存错误. As what Rust promises.
//!
//! # 开发计划
//!
//! ### 滑窗步进点枚举与强制边界覆盖 ✅
//!
//! 即使步长不能整除范围, 每维也总包含一个恰好抵达边界的步进点.
//!
//! 实现位于 `ct-grid/src/grid`.
//!
//! ### 混合维度布局 (滑窗维 + 逐索引辅助维) ✅
//!
//! 以显式结构取代 "小数空间秩" 的惯用技巧.
//!
//! 实现位于 `ct-grid/src/data/layout.rs`.
//!
//! ### 坐标集叉积枚举与可复现顺序 ✅
//!
//! 实现位于 `ct-grid/src/grid`.
//!
//! ### 体数据维度整形 ✅
//!
//! 将各组成部分的维度个数与 patch 定义对齐.
//!
//! 实现位于 `ct-grid/src/data`.
//!
//! ### 惰性网格采样器与批补齐 ✅
//!
//! 实现位于 `ct-grid/src/sampler`.
//!
//! ### 体数据源 (文件 / 内存) ✅
//!
//! 实现位于 `ct-grid/src/dataset`.
//!
//! ### 数据集划分 ✅
//!
//! 实现位于 `ct-grid/src/dataset/partition.rs`.
//!
//! ### 完善代码文档 ✅
//!
//! 给每个 public API 提供文档, 并视情况给 private API 提供文档.

/// 体数据与 patch 基础数据结构.
mod data;

pub use data::{
    match_component_rank, GridPatch, PatchSink, ReshapeError, SpatialLayout, Volume, VolumePart,
};

pub mod consts;

pub mod dataset;

pub use dataset::{SourceError, VolumeSource};

pub mod grid;

pub use grid::{Coordinate, CoordinateSet, GridError};

pub mod sampler;

pub use sampler::{GridSampler, GridSpec, SampleError, SpecError};

pub mod prelude;
