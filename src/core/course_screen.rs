use std::fmt::Write;
use std::sync::Arc;

use tokio::sync::watch;

use crate::core::course_loader::CourseLoader;
use crate::core::image_loader::Thumbnail;
use crate::http::fetcher::Fetcher;
use crate::model::course::CourseList;

pub const SCREEN_TITLE: &str = "Courses";

/// One rendered row. Rows are keyed by position, so equal names stay separate rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseRow {
    pub index: usize,
    pub title: String,
    pub image_url: String,
}

/// Read-only view over a loader's published list.
///
/// The first call to [`CourseScreen::on_appear`] triggers a load; later
/// appearances do nothing.
pub struct CourseScreen<F: Fetcher> {
    loader: Arc<CourseLoader<F>>,
    courses: watch::Receiver<CourseList>,
    appeared: bool,
}

impl<F: Fetcher> CourseScreen<F> {
    pub fn new(loader: Arc<CourseLoader<F>>) -> Self {
        let courses = loader.subscribe();
        CourseScreen {
            loader,
            courses,
            appeared: false,
        }
    }

    pub async fn on_appear(&mut self) {
        if self.appeared {
            return;
        }
        self.appeared = true;
        self.loader.load_all().await;
    }

    pub fn has_appeared(&self) -> bool {
        self.appeared
    }

    /// Waits for the next publish. Returns `false` once the loader is gone.
    pub async fn changed(&mut self) -> bool {
        self.courses.changed().await.is_ok()
    }

    pub fn rows(&self) -> Vec<CourseRow> {
        self.courses
            .borrow()
            .iter()
            .enumerate()
            .map(|(index, course)| CourseRow {
                index,
                title: course.name.clone(),
                image_url: course.image_url.clone(),
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", SCREEN_TITLE);
        for row in self.rows() {
            let _ = writeln!(out, "{:>3}. {}", row.index + 1, row.title);
            let _ = writeln!(out, "     {}", row.image_url);
        }
        out
    }

    /// Like [`CourseScreen::render`], with each row's image size in place of its url.
    /// Rows without a matching thumbnail show as not loaded.
    pub fn render_with_thumbnails(&self, thumbnails: &[Thumbnail]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", SCREEN_TITLE);
        for row in self.rows() {
            let _ = writeln!(out, "{:>3}. {}", row.index + 1, row.title);
            match thumbnails.get(row.index) {
                Some(image) if !image.is_empty() => {
                    let _ = writeln!(out, "     [{} bytes]", image.len());
                }
                _ => {
                    let _ = writeln!(out, "     [image not loaded]");
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::loader::LoaderError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use url::Url;

    struct FixedFetcher {
        body: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Fetcher for FixedFetcher {
        async fn get_bytes(&self, _url: Url) -> Result<Vec<u8>, LoaderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.as_bytes().to_vec())
        }
    }

    fn screen(body: &'static str) -> (CourseScreen<FixedFetcher>, Arc<FixedFetcher>) {
        let fetcher = Arc::new(FixedFetcher {
            body,
            calls: AtomicUsize::new(0),
        });
        let loader = Arc::new(CourseLoader::new(
            Arc::clone(&fetcher),
            "https://courses.test/courses",
        ));
        (CourseScreen::new(loader), fetcher)
    }

    #[tokio::test]
    async fn loads_only_on_first_appearance() {
        let (mut screen, fetcher) = screen(r#"[{"name":"Swift","imageUrl":"https://x/1.png"}]"#);
        assert!(screen.rows().is_empty());

        screen.on_appear().await;
        screen.on_appear().await;

        assert!(screen.has_appeared());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(screen.rows().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_names_stay_distinct_rows() {
        let (mut screen, _) = screen(
            r#"[{"name":"Swift","imageUrl":"https://x/1.png"},{"name":"Swift","imageUrl":"https://x/2.png"}]"#,
        );
        screen.on_appear().await;

        let rows = screen.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, rows[1].title);
        assert_ne!(rows[0], rows[1]);
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].image_url, "https://x/2.png");
    }

    #[tokio::test]
    async fn render_lists_title_and_rows() {
        let (mut screen, _) = screen(
            r#"[{"name":"Swift","imageUrl":"https://x/1.png"},{"name":"Combine","imageUrl":"https://x/2.png"}]"#,
        );
        assert_eq!(screen.render(), "Courses\n");

        screen.on_appear().await;
        let text = screen.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Courses");
        assert_eq!(lines[1], "  1. Swift");
        assert_eq!(lines[2], "     https://x/1.png");
        assert_eq!(lines[3], "  2. Combine");
    }

    #[tokio::test]
    async fn changed_resolves_after_publish() {
        let (mut screen, _) = screen("[]");
        let loader = Arc::clone(&screen.loader);

        let waiter = tokio::spawn(async move {
            let changed = screen.changed().await;
            (changed, screen.rows().len())
        });
        loader.load_all().await;

        assert_eq!(waiter.await.unwrap(), (true, 0));
    }

    #[tokio::test]
    async fn thumbnails_render_once_per_row() {
        let (mut screen, _) = screen(
            r#"[{"name":"Swift","imageUrl":"https://x/1.png"},{"name":"Combine","imageUrl":"https://x/2.png"}]"#,
        );
        screen.on_appear().await;

        let text = screen.render_with_thumbnails(&[vec![1, 2, 3], Vec::new()]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Courses",
                "  1. Swift",
                "     [3 bytes]",
                "  2. Combine",
                "     [image not loaded]",
            ]
        );
    }
}
