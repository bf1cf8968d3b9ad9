use std::time::Duration;

use fbfeed_rs::{BatchBuilder, FbClient, FeedSource, UnitOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    fbfeed_rs::init_tracing().map_err(|e| e.to_string())?;

    let Some(group_id) = std::env::args().nth(1) else {
        eprintln!("usage: 03_group_batch <group_id>");
        return Ok(());
    };

    let client = FbClient::builder()
        .unit_delay(Duration::from_secs(3))
        .build()?;

    let units = BatchBuilder::new(&client, FeedSource::Group(group_id))
        .posts(5)
        .comments_per_post(20)
        .walk_albums(true)
        .run()
        .await?;

    for unit in &units {
        let status = match &unit.outcome {
            UnitOutcome::Complete => "ok".to_string(),
            UnitOutcome::Partial(why) => format!("partial: {why}"),
            UnitOutcome::Failed(why) => format!("failed: {why}"),
        };
        println!(
            "{} | media {} | comments {} | {status}",
            unit.post.post_id,
            unit.post.media.len(),
            unit.comments.len()
        );
    }

    println!("\n{}", serde_json::to_string_pretty(&units)?);
    Ok(())
}
