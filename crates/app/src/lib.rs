//! # `sigboard-app` - 看板装配层
//!
//! 读取配置、初始化日志、挂接本地文件数据源，并驱动状态容器与图表管线。

pub mod dashboard;
pub mod logging;
pub mod settings;
pub mod source;
