//! # `sigboard-core` - 领域模型与端口
//!
//! 买入信号看板的共享基础：K 线、指标、对齐记录、买入信号等实体，
//! 各领域错误枚举，全局配置，以及外部数据源的 `DashboardSource` 端口。

pub mod common;
pub mod config;

pub mod market {
    pub mod entity;
    pub mod error;
}

pub mod screening {
    pub mod entity;
}

pub mod source {
    pub mod error;
    pub mod port;

    #[cfg(feature = "test-utils")]
    pub mod memory;
}
