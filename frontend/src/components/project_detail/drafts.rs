//! 详情页各表单的纯数据快照与校验

use scholars_shared::{Message, NewMilestone, NewProgressReport, NewResource, Timestamp};

/// 自己发的消息显示为 "You"
pub fn sender_label(message: &Message, user_id: &str) -> &'static str {
    if !user_id.is_empty() && message.sender_id == user_id {
        "You"
    } else {
        "Team Member"
    }
}

/// 空白消息不发送
pub fn message_content(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// 逗号分隔的标签
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_optional_date(raw: &str, field: &str) -> Result<Option<Timestamp>, String> {
    match raw.trim() {
        "" => Ok(None),
        value => Timestamp::parse(value)
            .map(Some)
            .ok_or_else(|| format!("Invalid {field}: {value}")),
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilestoneDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
}

impl MilestoneDraft {
    pub fn into_new(self) -> Result<NewMilestone, String> {
        let title = non_empty(&self.title).ok_or("Milestone title is required")?;
        Ok(NewMilestone {
            title,
            description: self.description.trim().to_string(),
            due_date: parse_optional_date(&self.due_date, "due date")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDraft {
    pub content: String,
    /// 选择框的值，空串表示不关联里程碑
    pub milestone_id: String,
}

impl ReportDraft {
    pub fn into_new(self) -> Result<NewProgressReport, String> {
        let content = non_empty(&self.content).ok_or("Report content is required")?;
        Ok(NewProgressReport {
            content,
            milestone_id: non_empty(&self.milestone_id),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceDraft {
    pub title: String,
    pub description: String,
    pub url: String,
    pub tags: String,
}

impl ResourceDraft {
    /// 分享到指定项目
    pub fn into_new(self, project_id: &str) -> Result<NewResource, String> {
        let title = non_empty(&self.title).ok_or("Resource title is required")?;
        Ok(NewResource {
            title,
            description: self.description.trim().to_string(),
            url: non_empty(&self.url),
            tags: parse_tags(&self.tags),
            project_id: Some(project_id.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(sender: &str) -> Message {
        Message {
            id: "m1".to_string(),
            sender_id: sender.to_string(),
            content: "hi".to_string(),
            timestamp: None,
            project_id: "p1".to_string(),
        }
    }

    #[test]
    fn own_messages_read_you() {
        assert_eq!(sender_label(&message("u1"), "u1"), "You");
        assert_eq!(sender_label(&message("u2"), "u1"), "Team Member");
        // 未登录时不把空 sender 当作自己
        assert_eq!(sender_label(&message(""), ""), "Team Member");
    }

    #[test]
    fn blank_messages_are_skipped() {
        assert_eq!(message_content("   \n"), None);
        assert_eq!(message_content("  hello "), Some("hello".to_string()));
    }

    #[test]
    fn tags_split_on_commas() {
        assert_eq!(parse_tags("rust, wasm,,  ui "), vec!["rust", "wasm", "ui"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn milestone_requires_title_and_valid_date() {
        let draft = MilestoneDraft {
            title: "  Prototype ".to_string(),
            description: "first cut".to_string(),
            due_date: "2024-06-30".to_string(),
        };
        let new = draft.into_new().unwrap();
        assert_eq!(new.title, "Prototype");
        assert_eq!(new.due_date.unwrap().to_rfc3339(), "2024-06-30T00:00:00.000Z");

        assert!(MilestoneDraft::default().into_new().is_err());

        let bad_date = MilestoneDraft {
            title: "T".to_string(),
            due_date: "someday".to_string(),
            ..Default::default()
        };
        assert_eq!(bad_date.into_new(), Err("Invalid due date: someday".to_string()));
    }

    #[test]
    fn report_milestone_is_optional() {
        let new = ReportDraft {
            content: "Week 1 done".to_string(),
            milestone_id: String::new(),
        }
        .into_new()
        .unwrap();
        assert_eq!(new.milestone_id, None);

        let linked = ReportDraft {
            content: "Week 2".to_string(),
            milestone_id: "ms1".to_string(),
        }
        .into_new()
        .unwrap();
        assert_eq!(linked.milestone_id.as_deref(), Some("ms1"));

        assert!(ReportDraft::default().into_new().is_err());
    }

    #[test]
    fn resource_is_shared_to_project() {
        let new = ResourceDraft {
            title: "Style guide".to_string(),
            description: String::new(),
            url: " ".to_string(),
            tags: "design, docs".to_string(),
        }
        .into_new("p1")
        .unwrap();
        assert_eq!(new.project_id.as_deref(), Some("p1"));
        assert_eq!(new.url, None);
        assert_eq!(new.tags, vec!["design", "docs"]);
    }
}
