//! # `sigboard-screen` - 买入信号列表
//!
//! - `projector`: 按板块过滤并按排序键降序投影
//! - `store`: 看板状态容器，通过显式动作完成状态迁移

pub mod projector;
pub mod store;
