use sigboard_app::dashboard::refresh;
use sigboard_app::logging::init_logging;
use sigboard_app::settings::{CONFIG_PATH_ENV, Settings};
use sigboard_app::source::FileSource;
use std::path::PathBuf;
use tracing::info;

/// # Summary
/// 应用启动入口，纯粹的装配层。
/// 负责加载配置、实例化数据源并把刷新结果以 JSON 写到 stdout。
///
/// # Logic
/// 1. 加载分层配置。
/// 2. 初始化全局日志。
/// 3. 实例化本地文件数据源。
/// 4. 执行一次看板刷新并输出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载配置
    let config_file = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let settings = Settings::load(config_file.as_deref())?;

    // 2. 初始化日志，guard 必须存活到进程结束
    let _guard = init_logging(&settings.app.log)?;
    info!("Sigboard starting, data dir: {}", settings.app.data.data_dir);

    // 3. 实例化数据源
    let source = FileSource::new(&settings.app.data.data_dir);

    // 4. 刷新并输出
    let report = refresh(&source, &settings).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!("Sigboard finished.");
    Ok(())
}
