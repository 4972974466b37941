//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 数据到请求对象的转换（经由纯数据的 `ProjectDraft`）

use leptos::prelude::*;
use scholars_shared::{CreateProjectRequest, Timestamp, parse_requirements};

/// 表单的纯数据快照，不依赖任何 signal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    /// 每行一条要求
    pub requirements: String,
    /// `<input type="date">` 的值，可能为空
    pub deadline: String,
}

impl ProjectDraft {
    /// 转换为 API 请求
    ///
    /// 要求按行拆分并丢弃空行；截止日期为空时提交 null。
    pub fn into_request(self) -> Result<CreateProjectRequest, String> {
        let deadline = match self.deadline.trim() {
            "" => None,
            raw => Some(Timestamp::parse(raw).ok_or_else(|| format!("Invalid deadline: {raw}"))?),
        };

        Ok(CreateProjectRequest {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            requirements: parse_requirements(&self.requirements),
            deadline,
        })
    }
}

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
    pub requirements: RwSignal<String>,
    pub deadline: RwSignal<String>,
}

impl FormState {
    /// 创建新的表单状态，所有字段为空
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            requirements: RwSignal::new(String::new()),
            deadline: RwSignal::new(String::new()),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.title.set(String::new());
        self.description.set(String::new());
        self.requirements.set(String::new());
        self.deadline.set(String::new());
    }

    pub fn draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.get_untracked(),
            description: self.description.get_untracked(),
            requirements: self.requirements.get_untracked(),
            deadline: self.deadline.get_untracked(),
        }
    }

    /// 将表单状态转换为 API 请求对象
    pub fn to_request(&self) -> Result<CreateProjectRequest, String> {
        self.draft().into_request()
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
