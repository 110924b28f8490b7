//! 通用常量.

/// 单通道颜色.
pub mod gray {
    /// 原 LiTS 数据集中, 背景的像素值.
    pub const LITS_BACKGROUND: u8 = 0;

    /// 原 LiTS 数据集中, 肝脏的像素值.
    pub const LITS_LIVER: u8 = 1;

    /// 原 LiTS 数据集中, 肿瘤的像素值.
    pub const LITS_TUMOR: u8 = 2;
}

/// LiTS 训练集大小.
pub const LITS_TRAINING_SET_LEN: u32 = 131;

/// LiTS 测试集大小.
pub const LITS_TESTING_SET_LEN: u32 = 70;
