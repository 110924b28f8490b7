//! 程序运行函数.

use std::env;
use std::path::PathBuf;

use ct_grid::prelude::*;

const SEP: &str = "--------------------------------------------------------";

/// 简单分隔线.
#[inline]
fn sep() {
    println!("{SEP}");
}

/// 获取 LiTS 测试集扫描基本路径.
///
/// 1. 若环境变量 `$LITS_TEST_DIR` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/dataset/test`.
fn infer_dir_from_env_or_home() -> PathBuf {
    if let Ok(d) = env::var("LITS_TEST_DIR") {
        PathBuf::from(d)
    } else {
        home_dataset_dir_with(["test"]).unwrap()
    }
}

/// 从环境变量读取一个正整数参数, 解析失败时回退到默认值.
fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// 实际运行.
pub fn run() {
    let dir = infer_dir_from_env_or_home();
    assert!(dir.is_dir(), "数据集目录不存在: {}", dir.display());

    let window = env_usize("GRID_WINDOW", 64);
    let grid = env_usize("GRID_STEP", 32);
    let batch = env_usize("GRID_BATCH", 8);
    println!("window = {window}, step = {grid}, batch = {batch}");
    sep();

    let spec = GridSpec::new(SpatialLayout::pure(3), window, grid, batch).expect("非法采样配置");
    let source = lits::full_infer_source(&dir);
    let mut sampler = GridSampler::new(spec, source);

    // (卷标识, 该卷产出的样本数). 源按索引序供给, 顺序遍历即可.
    let mut per_volume: Vec<(u32, usize)> = Vec::new();
    loop {
        match sampler.advance() {
            Ok(true) => {
                let id = sampler.current().volume_id().unwrap();
                match per_volume.last_mut() {
                    Some((last, count)) if *last == id => *count += 1,
                    _ => per_volume.push((id, 1)),
                }
            }
            Ok(false) => break,
            Err(e) => {
                log::error!("采样中止: {e:?}");
                std::process::exit(1);
            }
        }
    }

    let mut total = 0usize;
    for (id, count) in &per_volume {
        println!("test-volume-{id}: {count} patches");
        total += count;
    }
    sep();
    println!(
        "{} volumes, {total} patches (batch size {batch})",
        per_volume.len()
    );
    assert_eq!(total % batch, 0);
}
