use fbfeed_rs::{CancellationToken, CommentsBuilder, FbClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    fbfeed_rs::init_tracing().map_err(|e| e.to_string())?;

    let Some(post_id) = std::env::args().nth(1) else {
        eprintln!("usage: 02_comments_and_replies <post_id>");
        return Ok(());
    };

    let client = FbClient::default();

    // Ctrl-C stops the fetch between pages and keeps what was collected.
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let thread = CommentsBuilder::for_post(&client, &post_id)
        .target(50)
        .cancel_token(cancel)
        .fetch()
        .await?;

    println!(
        "--- {} comments, {} entities total ({:?}) ---",
        thread.comments.len(),
        thread.total(),
        thread.outcome
    );
    for c in &thread.comments {
        println!(
            "[{}] {}: {}",
            c.comment_id,
            c.author.as_deref().unwrap_or("?"),
            c.text.as_deref().unwrap_or_default()
        );
        for r in &c.replies {
            println!(
                "    [{}] {}: {}",
                r.reply_id,
                r.author.as_deref().unwrap_or("?"),
                r.text.as_deref().unwrap_or_default()
            );
        }
    }
    if thread.failed_reply_fetches > 0 {
        println!("{} comments are missing their replies", thread.failed_reply_fetches);
    }
    Ok(())
}
