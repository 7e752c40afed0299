use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use futures::future::join_all;

use course_feed::config::{COURSES_ENDPOINT, FeedConfig};
use course_feed::core::course_loader::CourseLoader;
use course_feed::core::course_screen::CourseScreen;
use course_feed::core::image_loader::ImageLoader;
use course_feed::http::fetcher::HttpFetcher;

/// Fetch the course feed and print it as a list
#[derive(Parser, Debug)]
#[command(name = "course_feed", version, about)]
struct Args {
    /// Course list endpoint
    #[arg(long, default_value = COURSES_ENDPOINT)]
    endpoint: String,

    /// Also download every row's image and print its size
    #[arg(long)]
    images: bool,

    /// Overall request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = FeedConfig::default()
        .with_endpoint(args.endpoint)
        .with_timeout(args.timeout_secs.map(Duration::from_secs));

    let fetcher = Arc::new(HttpFetcher::new(&config).context("failed to build http client")?);
    let loader = Arc::new(CourseLoader::new(Arc::clone(&fetcher), config.endpoint.clone()));
    let mut screen = CourseScreen::new(loader);

    screen.on_appear().await;

    if !args.images {
        print!("{}", screen.render());
        return Ok(());
    }

    let images: Vec<_> = screen
        .rows()
        .into_iter()
        .map(|row| ImageLoader::new(Arc::clone(&fetcher), row.image_url))
        .collect();
    join_all(images.iter().map(|image| image.load())).await;

    let thumbnails: Vec<_> = images.iter().map(|image| image.data()).collect();
    print!("{}", screen.render_with_thumbnails(&thumbnails));

    Ok(())
}
