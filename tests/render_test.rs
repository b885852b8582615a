mod common;

use common::png_bytes;
use sheet_gallery::cache::ImageCache;
use sheet_gallery::fetch::{FetchSettings, ImageFetcher};
use sheet_gallery::layout::{row_selection, sequential};
use sheet_gallery::render::{CellOutcome, render_pass};
use sheet_gallery::table::Table;
use sheet_gallery::thumbnail::THUMBNAIL_SIZE;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn table_of(links: Vec<String>) -> Table {
    Table::new(
        vec!["link".to_string()],
        links.into_iter().map(|l| vec![l]).collect(),
    )
    .unwrap()
}

async fn serve_png(server: &MockServer, at: &str, width: u32, height: u32) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(png_bytes(width, height), "image/png"),
        )
        .mount(server)
        .await;
}

fn fetcher() -> ImageFetcher {
    ImageFetcher::new(&FetchSettings::default()).expect("client builds")
}

#[tokio::test]
async fn fetcher_decodes_png() {
    let server = MockServer::start().await;
    serve_png(&server, "/a.png", 64, 32).await;

    let image = fetcher()
        .fetch_image(&format!("{}/a.png", server.uri()))
        .await
        .expect("decodes");

    assert_eq!((image.width(), image.height()), (64, 32));
}

#[tokio::test]
async fn fetcher_reports_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/gone.png", server.uri());
    let err = fetcher().fetch_image(&url).await.unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with(&format!("Error loading image from {}", url)));
    assert!(message.contains("404"));
}

#[tokio::test]
async fn five_rows_render_five_captioned_images() {
    let server = MockServer::start().await;
    let mut links = Vec::new();
    for i in 1..=5 {
        let at = format!("/u{}.png", i);
        serve_png(&server, &at, 300, 300).await;
        links.push(format!("{}{}", server.uri(), at));
    }
    let table = table_of(links);
    let mut cache = ImageCache::new();

    let plan = sequential(table.len());
    let grid = render_pass(&table, &plan, &fetcher(), &mut cache, THUMBNAIL_SIZE).await;

    assert_eq!(grid.image_count(), 5);
    let captions: Vec<&str> = grid.columns[0].iter().map(|c| c.caption.as_str()).collect();
    assert_eq!(captions, vec!["Image 1", "Image 2", "Image 3", "Image 4", "Image 5"]);
    assert!(grid.columns[1..].iter().all(Vec::is_empty));
    assert_eq!(
        grid.columns[0][0].outcome,
        CellOutcome::Image { width: 150, height: 150 }
    );
}

#[tokio::test]
async fn non_image_payload_fails_only_its_cell() {
    let server = MockServer::start().await;
    serve_png(&server, "/good.png", 20, 20).await;
    Mock::given(method("GET"))
        .and(path("/page.html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>nope</html>", "text/html"))
        .mount(&server)
        .await;

    let bad = format!("{}/page.html", server.uri());
    let table = table_of(vec![
        format!("{}/good.png", server.uri()),
        bad.clone(),
        format!("{}/good.png", server.uri()),
    ]);
    let mut cache = ImageCache::new();

    let plan = sequential(table.len());
    let grid = render_pass(&table, &plan, &fetcher(), &mut cache, THUMBNAIL_SIZE).await;

    assert_eq!(grid.image_count(), 2);
    let errors = grid.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with(&format!("Error loading image from {}", bad)));
    assert!(!grid.columns[0][1].is_image());
    assert!(grid.columns[0][2].is_image());
}

#[tokio::test]
async fn repeated_urls_are_fetched_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/same.png"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(png_bytes(8, 8), "image/png"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/same.png", server.uri());
    let table = table_of(vec![url.clone(); 4]);
    let mut cache = ImageCache::new();
    let fetcher = fetcher();

    let plan = sequential(table.len());
    render_pass(&table, &plan, &fetcher, &mut cache, THUMBNAIL_SIZE).await;
    let again = render_pass(&table, &plan, &fetcher, &mut cache, THUMBNAIL_SIZE).await;

    assert_eq!(again.image_count(), 4);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.hits(), 7);
    assert!(cache.get(&url).unwrap().is_ok());
}

#[tokio::test]
async fn failures_are_cached_too() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let table = table_of(vec![format!("{}/broken", server.uri())]);
    let mut cache = ImageCache::new();
    let fetcher = fetcher();
    let plan = sequential(1);

    let first = render_pass(&table, &plan, &fetcher, &mut cache, THUMBNAIL_SIZE).await;
    let second = render_pass(&table, &plan, &fetcher, &mut cache, THUMBNAIL_SIZE).await;

    assert_eq!(first.errors(), second.errors());
    assert_eq!(second.errors().len(), 1);
}

#[tokio::test]
async fn row_selection_renders_banded_rows() {
    let server = MockServer::start().await;
    serve_png(&server, "/img.png", 10, 10).await;

    let links: Vec<String> = (0..20)
        .map(|i| format!("{}/img.png?row={}", server.uri(), i))
        .collect();
    let table = table_of(links);
    let mut cache = ImageCache::new();

    let plan = row_selection(table.len(), &[1, 4]);
    let grid = render_pass(&table, &plan, &fetcher(), &mut cache, THUMBNAIL_SIZE).await;

    assert_eq!(grid.image_count(), 18);
    let column_three: Vec<&str> = grid.columns[3].iter().map(|c| c.caption.as_str()).collect();
    assert_eq!(column_three, vec!["Image 8", "Image 11"]);
    assert!(grid.columns[9].iter().all(|c| c.index < 20));
}
