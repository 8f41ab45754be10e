use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

/// User-facing strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Text {
    CopySuccess,
    CopyFailure,
    Failure,
    NoData,
    Delete,
    Reactions,
    PickEmoji,
    MessageNotFound,
    WriteMessageAt,
    Loading,
}

impl Locale {
    pub fn text(self, key: Text) -> &'static str {
        match (self, key) {
            (Locale::Ko, Text::CopySuccess) => "URL이 클립보드에 복사되었습니다.",
            (Locale::En, Text::CopySuccess) => "URL copied to clipboard.",
            (Locale::Ko, Text::CopyFailure) => "URL 복사 실패",
            (Locale::En, Text::CopyFailure) => "Failed to copy URL",
            (_, Text::Failure) => "something went wrong",
            (_, Text::NoData) => "no data",
            (Locale::Ko, Text::Delete) => "삭제하기",
            (Locale::En, Text::Delete) => "Delete",
            (Locale::Ko, Text::Reactions) => "반응",
            (Locale::En, Text::Reactions) => "Reactions",
            (Locale::Ko, Text::PickEmoji) => "이모지 추가",
            (Locale::En, Text::PickEmoji) => "Add emoji",
            (Locale::Ko, Text::MessageNotFound) => "메시지를 찾을 수 없습니다",
            (Locale::En, Text::MessageNotFound) => "Message not found",
            (Locale::Ko, Text::WriteMessageAt) => "메시지 작성:",
            (Locale::En, Text::WriteMessageAt) => "Write a message at",
            (Locale::Ko, Text::Loading) => "불러오는 중...",
            (Locale::En, Text::Loading) => "Loading...",
        }
    }

    pub fn writer_count(self, count: u64) -> String {
        match self {
            Locale::Ko => format!("{}명이 작성했어요!", count),
            Locale::En => format!("{} people wrote a message!", count),
        }
    }
}
