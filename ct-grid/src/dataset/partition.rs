//! 数据集划分: 将受试者 id 确定性地分配到 train/valid/infer 三个阶段.
//!
//! 划分先用给定种子打乱 id 列表, 再按规则切分, 因此相同输入与种子的
//! 划分结果完全可复现. 网格采样器不依赖本模块, 它只是上游构造体数据源
//! 时的簿记工具.

use either::Either;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// 数据集阶段.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// 训练集.
    Train,

    /// 验证集.
    Valid,

    /// 推理集.
    Infer,
}

/// 基于比例的划分规则.
#[derive(Debug, Clone, Copy)]
struct ByRatio {
    train: f64,
    valid: f64,
}

/// 基于个数的划分规则.
#[derive(Debug, Clone, Copy)]
struct ByCount {
    train: usize,
    valid: usize,
}

/// 划分参数: 划分规则 + 打乱种子.
#[derive(Debug, Clone, Copy)]
pub struct PartitionSpec {
    manner: Either<ByRatio, ByCount>,
    seed: u64,
}

impl PartitionSpec {
    /// 按比例划分. 三个比例均须落在 `[0, 1]` 且和为 1 (容差 1e-6),
    /// 否则程序 panic. 取整的零头全部划入推理集.
    pub fn with_ratios(train: f64, valid: f64, infer: f64, seed: u64) -> Self {
        for ratio in [train, valid, infer] {
            assert!((0.0..=1.0).contains(&ratio));
        }
        assert!((train + valid + infer - 1.0).abs() < 1e-6);

        Self {
            manner: Either::Left(ByRatio { train, valid }),
            seed,
        }
    }

    /// 按个数划分: 训练集与验证集取精确个数, 其余全部划入推理集.
    ///
    /// 个数之和超过 id 总数时, 程序在 [`partition`](Self::partition) 时 panic.
    pub fn with_counts(train: usize, valid: usize, seed: u64) -> Self {
        Self {
            manner: Either::Right(ByCount { train, valid }),
            seed,
        }
    }

    /// 执行划分.
    pub fn partition<I: IntoIterator<Item = u32>>(&self, ids: I) -> Partition {
        let mut ids: Vec<u32> = ids.into_iter().collect();
        let mut rng = rand::rngs::StdRng::seed_from_u64(self.seed);
        ids.shuffle(&mut rng);

        let n = ids.len();
        let (n_train, n_valid) = match self.manner {
            Either::Left(ByRatio { train, valid }) => {
                let n_train = ((n as f64) * train).round() as usize;
                let n_valid = (((n as f64) * valid).round() as usize).min(n - n_train);
                (n_train, n_valid)
            }
            Either::Right(ByCount { train, valid }) => {
                assert!(train + valid <= n, "划分个数之和超过 id 总数");
                (train, valid)
            }
        };

        let infer = ids.split_off(n_train + n_valid);
        let valid = ids.split_off(n_train);
        Partition {
            train: ids,
            valid,
            infer,
        }
    }
}

/// 一次划分的结果.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    train: Vec<u32>,
    valid: Vec<u32>,
    infer: Vec<u32>,
}

impl Partition {
    /// 给定阶段的受试者 id 列表.
    #[inline]
    pub fn phase(&self, phase: Phase) -> &[u32] {
        match phase {
            Phase::Train => &self.train,
            Phase::Valid => &self.valid,
            Phase::Infer => &self.infer,
        }
    }

    /// 查找 `id` 被划入的阶段. 未参与划分时返回 `None`.
    pub fn lookup(&self, id: u32) -> Option<Phase> {
        for phase in [Phase::Train, Phase::Valid, Phase::Infer] {
            if self.phase(phase).contains(&id) {
                return Some(phase);
            }
        }
        None
    }

    /// 参与划分的 id 总数.
    #[inline]
    pub fn len(&self) -> usize {
        self.train.len() + self.valid.len() + self.infer.len()
    }

    /// 划分是否为空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_partition_by_ratio_counts() {
        let part = PartitionSpec::with_ratios(0.6, 0.2, 0.2, 7).partition(0..10);
        assert_eq!(part.phase(Phase::Train).len(), 6);
        assert_eq!(part.phase(Phase::Valid).len(), 2);
        assert_eq!(part.phase(Phase::Infer).len(), 2);
    }

    #[test]
    fn test_partition_disjoint_and_complete() {
        let part = PartitionSpec::with_ratios(0.5, 0.3, 0.2, 42).partition(0..20);
        let mut seen = BTreeSet::new();
        for phase in [Phase::Train, Phase::Valid, Phase::Infer] {
            for &id in part.phase(phase) {
                assert!(seen.insert(id), "id {id} 出现在多个阶段");
            }
        }
        assert_eq!(seen, (0..20).collect());
    }

    #[test]
    fn test_partition_deterministic() {
        let a = PartitionSpec::with_ratios(0.6, 0.2, 0.2, 9).partition(0..30);
        let b = PartitionSpec::with_ratios(0.6, 0.2, 0.2, 9).partition(0..30);
        assert_eq!(a, b);
    }

    #[test]
    fn test_partition_by_counts() {
        let part = PartitionSpec::with_counts(3, 2, 1).partition(0..7);
        assert_eq!(part.phase(Phase::Train).len(), 3);
        assert_eq!(part.phase(Phase::Valid).len(), 2);
        assert_eq!(part.phase(Phase::Infer).len(), 2);
        assert_eq!(part.len(), 7);
    }

    #[test]
    fn test_partition_all_train() {
        let part = PartitionSpec::with_ratios(1.0, 0.0, 0.0, 0).partition(0..5);
        assert_eq!(part.phase(Phase::Train).len(), 5);
        assert!(part.phase(Phase::Infer).is_empty());
    }

    #[test]
    fn test_partition_lookup() {
        let part = PartitionSpec::with_counts(2, 2, 3).partition(0..6);
        for id in 0..6 {
            assert!(part.lookup(id).is_some());
        }
        assert_eq!(part.lookup(100), None);
    }

    #[test]
    #[should_panic]
    fn test_partition_bad_ratios() {
        let _ = PartitionSpec::with_ratios(0.8, 0.8, 0.1, 0);
    }
}
