//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::consts::gray::{LITS_BACKGROUND, LITS_LIVER, LITS_TUMOR};
pub use crate::consts::{LITS_TESTING_SET_LEN, LITS_TRAINING_SET_LEN};

pub use crate::data::{GridPatch, PatchSink, SpatialLayout, Volume, VolumePart};

pub use crate::grid::{grid_coordinates, Coordinate, CoordinateSet, GridError};

pub use crate::sampler::{GridSampler, GridSpec, SampleError, SpecError};

pub use crate::dataset::{home_dataset_dir_with, preloaded_source, SourceError, VolumeSource};
pub use crate::dataset::{self, lits};
