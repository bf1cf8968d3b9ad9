use std::time::Duration;

use fbfeed_rs::{FbClient, PostsBuilder, RetryConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    fbfeed_rs::init_tracing().map_err(|e| e.to_string())?;

    let profile_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "100064860875397".to_string());

    // 1. A client with a short timeout and slower pacing between pages.
    let client = FbClient::builder()
        .timeout(Duration::from_secs(15))
        .page_delay(Duration::from_secs(2))
        .build()?;

    // 2. Six posts, skipping reels and videos.
    let feed = PostsBuilder::timeline(&client, &profile_id)
        .target(6)
        .skip_video(true)
        .retry_policy(Some(RetryConfig {
            max_attempts: 5,
            ..RetryConfig::default()
        }))
        .fetch()
        .await?;

    println!("--- {} posts from {profile_id} ({:?}) ---", feed.posts.len(), feed.outcome);
    for post in &feed.posts {
        println!(
            "{} | {} | reactions: {} | media: {}{}",
            post.post_id,
            post.created_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            post.reaction_count.unwrap_or_default(),
            post.media.len(),
            if post.needs_media_walk() { " (album truncated)" } else { "" }
        );
        if let Some(text) = &post.text {
            println!("    {}", text.chars().take(100).collect::<String>());
        }
    }

    if let Some(parent) = &feed.parent {
        println!("\nparent story: {} (first media {:?})", parent.story_id, parent.first_media_id);
    }
    if let Some(cursor) = &feed.cursor {
        println!("resume cursor: {cursor}");
    }
    Ok(())
}
