//! 对 LiTS 测试集执行一次全量网格采样, 报告每卷的坐标与补齐统计.

mod runner;

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    runner::run();
}
