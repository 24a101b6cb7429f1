// 日誌工具

pub fn init_logger(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    // RUST_LOG 已設置時以環境變量為準
    if let Some(level) = fallback_level(debug, std::env::var_os("RUST_LOG").is_some()) {
        builder.filter_level(level);
    }

    // 重複初始化（如測試中）時忽略錯誤
    let _ = builder.try_init();
}

fn fallback_level(debug: bool, rust_log_set: bool) -> Option<log::LevelFilter> {
    if rust_log_set {
        None
    } else if debug {
        Some(log::LevelFilter::Debug)
    } else {
        Some(log::LevelFilter::Error)
    }
}
