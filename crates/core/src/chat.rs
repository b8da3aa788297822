//! Scripted character chat replies.
//!
//! Every user message sent to a webtoon's chat receives an immediate reply
//! attributed to one of the webtoon's characters. Replies are canned: the
//! user message is classified into a category by keyword matching and a
//! random line is drawn from that category's pool. No external generation
//! service is involved.

use rand::seq::IndexedRandom;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// `sender_type` value for messages written by a visitor.
pub const SENDER_TYPE_USER: &str = "user";

/// `sender_type` value for scripted character replies.
pub const SENDER_TYPE_CHARACTER: &str = "character";

/// `sender_token` recorded on scripted replies. Never a real session token,
/// so replies are owned by no one.
pub const SYSTEM_SENDER_TOKEN: &str = "ai_system";

/// Character role that speaks for the webtoon when several characters exist.
pub const PROTAGONIST_ROLE: &str = "주인공";

/// Display name used for replies when the webtoon has no characters.
pub const FALLBACK_SENDER_NAME: &str = "주인공";

const GREETING_KEYWORDS: &[&str] = &["안녕", "하이", "hello", "hi"];
const STORY_KEYWORDS: &[&str] = &["이야기", "스토리", "줄거리", "story"];
const QUESTION_KEYWORDS: &[&str] = &["왜", "어떻게", "무엇", "누가"];

const GREETING_REPLIES: &[&str] = &[
    "안녕하세요! 저는 이 웹툰의 주인공입니다. 궁금한 점이 있으면 물어보세요!",
    "반가워요! 오늘은 어떤 이야기를 나누고 싶으신가요?",
    "안녕하세요! 제 이야기를 읽어주셔서 감사합니다.",
];

const STORY_REPLIES: &[&str] = &[
    "이 장면에서 제가 느낀 감정은 정말 복잡했어요. 더 자세히 이야기해드릴게요.",
    "작가님이 이 부분을 그리실 때 특별히 신경 쓰신 부분이에요.",
    "이 에피소드는 제 인생의 전환점이었죠. 많은 고민 끝에 내린 결정이었어요.",
];

const QUESTION_REPLIES: &[&str] = &[
    "흥미로운 질문이네요! 제 생각을 말씀드리자면...",
    "그 부분은 다음 에피소드에서 더 자세히 다뤄질 예정이에요!",
    "좋은 관찰이세요! 사실 그 장면에는 숨겨진 의미가 있어요.",
];

const GENERAL_REPLIES: &[&str] = &[
    "더 자세히 알고 싶으시다면 다음 에피소드를 기대해주세요!",
    "저도 그 장면을 연기하면서 많은 생각이 들었어요.",
    "독자님의 해석이 정말 흥미롭네요! 저도 비슷한 생각을 했어요.",
];

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Reply category a user message falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyCategory {
    Greeting,
    Story,
    Question,
    General,
}

/// Classify a user message by keyword matching, case-insensitive.
///
/// Categories are checked in order: greeting, story, question (a literal `?`
/// anywhere counts), then general as the fallback.
pub fn classify(message: &str) -> ReplyCategory {
    let lower = message.to_lowercase();
    if GREETING_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return ReplyCategory::Greeting;
    }
    if STORY_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return ReplyCategory::Story;
    }
    if message.contains('?') || QUESTION_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return ReplyCategory::Question;
    }
    ReplyCategory::General
}

/// The reply pool for a category.
pub fn replies_for(category: ReplyCategory) -> &'static [&'static str] {
    match category {
        ReplyCategory::Greeting => GREETING_REPLIES,
        ReplyCategory::Story => STORY_REPLIES,
        ReplyCategory::Question => QUESTION_REPLIES,
        ReplyCategory::General => GENERAL_REPLIES,
    }
}

/// Pick a scripted reply for a user message.
pub fn generate_reply(message: &str) -> &'static str {
    let pool = replies_for(classify(message));
    let mut rng = rand::rng();
    pool.choose(&mut rng).copied().unwrap_or(GENERAL_REPLIES[0])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
