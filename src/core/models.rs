use chrono::{DateTime, Utc};
use serde::Serialize;

/* ----- MEDIA (shared by posts/ and media/) ----- */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

/// One photo or video attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItem {
    pub id: String,
    pub kind: MediaKind,
    /// Image URI for photos, playable URL for videos.
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub thumbnail: Option<String>,
    /// 1-based position of this item among the media of its post within one fetch.
    /// Stable file naming for a download layer.
    pub index: u32,
}

/* ----- POSTS (timeline and group feeds) ----- */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub post_id: String,
    /// Opaque graph id of the story node.
    pub id: Option<String>,
    pub feedback_id: Option<String>,
    pub text: Option<String>,
    pub permalink: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub reaction_count: Option<u64>,
    pub media: Vec<MediaItem>,
    /// Album size reported upstream; may exceed `media.len()` since feeds inline only a few items.
    pub media_total: Option<u32>,
    pub is_video: bool,
}

impl Post {
    /// Albums larger than this are only partially inlined in feed responses.
    pub const INLINE_MEDIA_LIMIT: u32 = 5;

    /// Whether the remaining album items must be fetched through the photo-viewer chain.
    #[must_use]
    pub fn needs_media_walk(&self) -> bool {
        self.media_total.is_some_and(|n| n > Self::INLINE_MEDIA_LIMIT)
    }
}

/// Identity of the ultimate parent story behind the first post of a feed,
/// and the first media node the photo-viewer chain starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentPostInfo {
    pub story_id: String,
    pub first_media_id: Option<String>,
}

/* ----- COMMENTS ----- */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub comment_id: String,
    pub author: Option<String>,
    pub author_id: Option<String>,
    pub text: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub reaction_count: Option<u64>,
    /// Needed, with `expansion_token`, to fetch this comment's replies.
    pub feedback_id: Option<String>,
    pub expansion_token: Option<String>,
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub reply_id: String,
    pub author: Option<String>,
    pub author_id: Option<String>,
    pub text: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub reaction_count: Option<u64>,
}

/* ----- NORMALIZED RECORD ----- */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Post,
    Comment,
    Reply,
    Media,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Post(Post),
    Comment(Comment),
    Reply(Reply),
    Media(MediaItem),
}

impl Record {
    /// The required identity field of the underlying entity.
    #[must_use]
    pub fn identity(&self) -> &str {
        match self {
            Self::Post(p) => &p.post_id,
            Self::Comment(c) => &c.comment_id,
            Self::Reply(r) => &r.reply_id,
            Self::Media(m) => &m.id,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Post(_) => EntityKind::Post,
            Self::Comment(_) => EntityKind::Comment,
            Self::Reply(_) => EntityKind::Reply,
            Self::Media(_) => EntityKind::Media,
        }
    }
}
