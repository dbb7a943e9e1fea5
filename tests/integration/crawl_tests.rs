//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! full crawls of both listing sources end-to-end.

use paper_trail::config::{
    load_config, ArxivConfig, CrawlerConfig, OutputConfig, OutputMode, ScirateConfig,
    UserAgentConfig,
};
use paper_trail::crawler::{ArxivCrawler, ScirateCrawler, Source};
use paper_trail::output::{sink_for, MemorySink};
use paper_trail::url::ListingVariant;
use paper_trail::{CalendarDate, CrawlError, CrawlPhase, DayBucket};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn crawler_config(delay_ms: u64) -> CrawlerConfig {
    CrawlerConfig {
        delay_ms,
        max_item_workers: 2,
        request_timeout_secs: 5,
    }
}

fn user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    }
}

/// One `<dt>`/`<dd>` pair as the catch-up listing renders it
fn listing_entry(id: &str, marker: &str, title: &str, authors: &[&str]) -> String {
    let authors: Vec<String> = authors
        .iter()
        .map(|a| format!("<a href=\"/find/{}\">{}</a>", a.replace(' ', "+"), a))
        .collect();
    format!(
        "<dt><span class=\"list-identifier\"><a href=\"/abs/{id}\" title=\"Abstract\">arXiv:{id}</a> {marker}</span></dt>\n\
<dd><div class=\"meta\">\n<div class=\"list-title mathjax\">\n<span class=\"descriptor\">Title:</span> {title}\n</div>\n\
<div class=\"list-authors\">\n<span class=\"descriptor\">Authors:</span>\n{authors}\n</div>\n</div></dd>\n",
        id = id,
        marker = marker,
        title = title,
        authors = authors.join(", \n")
    )
}

fn listing_day(date: &str, entries: &[String]) -> String {
    format!(
        "<h2><a name=\"{}\">{}</a></h2>\n<dl>\n{}</dl>\n",
        date,
        date,
        entries.concat()
    )
}

fn listing_page(days: &[String], next: Option<&str>) -> String {
    let pagination = next
        .map(|href| format!("<ul><li><a href=\"{}\">next 25</a></li></ul>", href.replace('&', "&amp;")))
        .unwrap_or_default();
    format!("<html><body>\n{}{}\n</body></html>", days.concat(), pagination)
}

fn abstract_page(text: &str, latest: &str) -> String {
    format!(
        "<html><body><blockquote class=\"abstract\">{}</blockquote>\n\
<div class=\"submission-history\">\nFrom: Someone\n<b>[v1]</b> {}<br/>\n</div></body></html>",
        text, latest
    )
}

fn ranking_page(papers: &[(&str, &str, u32)], next_date: Option<&str>) -> String {
    let next = next_date
        .map(|date| {
            format!(
                "<td class=\"btn-default half top right\"><a href=\"?date={}&amp;range=1\">next</a></td>",
                date
            )
        })
        .unwrap_or_default();
    let items: String = papers
        .iter()
        .map(|(title, authors, scites)| {
            format!(
                "<li class=\"paper tex2jax\"><button class=\"btn btn-default count\">{}</button>\
<div class=\"title\">{}</div><div class=\"authors\">{}</div></li>\n",
                scites, title, authors
            )
        })
        .collect();
    format!(
        "<html><body><table><tr>{}</tr></table><ul>\n{}</ul></body></html>",
        next, items
    )
}

async fn serve(server: &MockServer, page_path: &str, query: (&str, &str), body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .and(query_param(query.0, query.1))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

fn arxiv_config(base_url: &str) -> ArxivConfig {
    ArxivConfig {
        start: CalendarDate::new(2018, 3, 1),
        end: CalendarDate::new(2018, 3, 2),
        archive: "quant-ph".to_string(),
        variant: ListingVariant::Without,
        include_extended_fields: false,
        parallel_item_fetch: false,
        base_url: base_url.to_string(),
    }
}

fn scirate_config(base_url: &str, start: u32, end: u32) -> ScirateConfig {
    ScirateConfig {
        start: CalendarDate::new(2018, 4, start),
        end: CalendarDate::new(2018, 4, end),
        archive: "quant-ph".to_string(),
        base_url: base_url.to_string(),
    }
}

fn titles(bucket: &DayBucket) -> Vec<&str> {
    bucket.papers.iter().map(|p| p.title.as_str()).collect()
}

#[tokio::test]
async fn test_arxiv_crawl_over_http() {
    let server = MockServer::start().await;

    let first = listing_page(
        &[listing_day(
            "day_2018_03_01",
            &[
                listing_entry("1709.01111", "(replaced)", "Revised", &["Old Author"]),
                listing_entry("1803.00001", "", "Quantum widgets", &["Alice Smith", "Bob Jones"]),
                listing_entry("1803.00002", "", "Entangled gizmos", &["Carol White"]),
            ],
        )],
        Some("/catchup?skip=25&show=25"),
    );
    let second = listing_page(
        &[
            listing_day(
                "day_2018_03_01",
                &[listing_entry("1803.00003", "", "Late arrival", &["Dan Brown"])],
            ),
            listing_day(
                "day_2018_03_02",
                &[
                    listing_entry("1803.00101", "(cross-list from cond-mat)", "Borrowed", &["Eve"]),
                    listing_entry("1803.00102", "", "Friday paper", &["Frank Green"]),
                ],
            ),
            listing_day(
                "day_2018_03_05",
                &[listing_entry("1803.00201", "", "Next week", &["Grace Hall"])],
            ),
        ],
        Some("/catchup?skip=50&show=25"),
    );

    serve(&server, "/catchup", ("sday", "01"), first).await;
    serve(&server, "/catchup", ("skip", "25"), second).await;
    Mock::given(method("GET"))
        .and(path("/catchup"))
        .and(query_param("skip", "50"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut crawler = ArxivCrawler::with_http(
        arxiv_config(&server.uri()),
        &crawler_config(100),
        &user_agent(),
    )
    .expect("Failed to build crawler");
    let result = crawler
        .run(Box::new(MemorySink::new()))
        .await
        .expect("Crawl failed");

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].date.as_str(), "day_2018_03_01");
    assert_eq!(
        titles(&result[0]),
        vec!["Quantum widgets", "Entangled gizmos", "Late arrival"]
    );
    assert_eq!(result[0].papers[0].authors, vec!["Alice Smith", "Bob Jones"]);
    assert_eq!(result[0].papers[0].position, 1);
    assert_eq!(result[1].date.as_str(), "day_2018_03_02");
    assert_eq!(titles(&result[1]), vec!["Friday paper"]);
    assert_eq!(result[1].papers[0].position, 1);
    assert_eq!(crawler.phase(), CrawlPhase::Done);
}

#[tokio::test]
async fn test_arxiv_extended_fields_over_http() {
    let server = MockServer::start().await;

    let listing = listing_page(
        &[listing_day(
            "day_2018_03_01",
            &[
                listing_entry("1803.00001", "", "First", &["Alice Smith"]),
                listing_entry("1803.00002", "", "Second", &["Bob Jones"]),
            ],
        )],
        None,
    );
    serve(&server, "/catchup", ("sday", "01"), listing).await;

    for (id, stamp) in [
        ("1803.00001", "Thu, 1 Mar 2018 18:00:01 UTC (120kb)"),
        ("1803.00002", "Thu, 1 Mar 2018 19:30:00 UTC (2kb)"),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/abs/{}", id)))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(abstract_page("An\nabstract.", stamp)),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut config = arxiv_config(&server.uri());
    config.include_extended_fields = true;
    config.parallel_item_fetch = true;

    let mut crawler = ArxivCrawler::with_http(config, &crawler_config(100), &user_agent())
        .expect("Failed to build crawler");
    let result = crawler
        .run(Box::new(MemorySink::new()))
        .await
        .expect("Crawl failed");

    let papers = &result[0].papers;
    let first = papers[0].details.as_ref().expect("details missing");
    assert_eq!(first.abstract_text, "Anabstract.");
    assert_eq!(first.num_versions, 1);
    assert_eq!(first.submit_weekday, "Thu");
    assert_eq!(first.submit_time, "18:00:01");
    assert_eq!(first.size, "120kb");
    assert_eq!(first.paper_link, format!("{}/abs/1803.00001", server.uri()));

    let second = papers[1].details.as_ref().expect("details missing");
    assert_eq!(second.size, "2kb");
    assert_eq!(crawler.stats().detail_fetches, 2);
}

#[tokio::test]
async fn test_arxiv_server_error_aborts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut crawler = ArxivCrawler::with_http(
        arxiv_config(&server.uri()),
        &crawler_config(100),
        &user_agent(),
    )
    .expect("Failed to build crawler");
    let err = crawler
        .run(Box::new(MemorySink::new()))
        .await
        .expect_err("Crawl should fail");

    assert!(matches!(err, CrawlError::Status { status: 503, .. }));
    assert_eq!(crawler.phase(), CrawlPhase::Failed);
}

#[tokio::test]
async fn test_scirate_crawl_over_http() {
    let server = MockServer::start().await;
    let page = "/arxiv/quant-ph";

    serve(
        &server,
        page,
        ("date", "2018-04-11"),
        ranking_page(
            &[("Top result", "A. One, B. Two", 31), ("Second", "C. Three", 4)],
            Some("2018-04-12"),
        ),
    )
    .await;
    serve(
        &server,
        page,
        ("date", "2018-04-12"),
        ranking_page(&[], Some("2018-04-13")),
    )
    .await;
    serve(
        &server,
        page,
        ("date", "2018-04-13"),
        ranking_page(&[("Friday best", "D. Four", 12)], Some("2018-04-16")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(page))
        .and(query_param("date", "2018-04-16"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut crawler = ScirateCrawler::with_http(
        scirate_config(&server.uri(), 11, 13),
        &crawler_config(100),
        &user_agent(),
    )
    .expect("Failed to build crawler");
    let result = crawler
        .run(Box::new(MemorySink::new()))
        .await
        .expect("Crawl failed");

    let dates: Vec<&str> = result.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, vec!["day_2018_04_11", "day_2018_04_13"]);
    assert_eq!(result[0].papers[0].authors, vec!["A. One", "B. Two"]);
    assert_eq!(result[0].papers[0].scite_count, Some(31));
    assert_eq!(result[0].papers[1].position, 1);
    assert_eq!(titles(&result[1]), vec!["Friday best"]);
    assert_eq!(crawler.stats().pages_fetched, 3);
}

#[tokio::test]
async fn test_requests_are_paced() {
    let server = MockServer::start().await;
    let page = "/arxiv/quant-ph";

    for (date, next) in [
        ("2018-04-11", "2018-04-12"),
        ("2018-04-12", "2018-04-13"),
        ("2018-04-13", "2018-04-16"),
    ] {
        serve(
            &server,
            page,
            ("date", date),
            ranking_page(&[("Paper", "Someone", 1)], Some(next)),
        )
        .await;
    }

    let mut crawler = ScirateCrawler::with_http(
        scirate_config(&server.uri(), 11, 13),
        &crawler_config(150),
        &user_agent(),
    )
    .expect("Failed to build crawler");

    let started = Instant::now();
    crawler
        .run(Box::new(MemorySink::new()))
        .await
        .expect("Crawl failed");

    // Three requests need two full gaps
    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_stream_mode_from_config_file() {
    let server = MockServer::start().await;
    let page = "/arxiv/quant-ph";
    serve(
        &server,
        page,
        ("date", "2018-04-11"),
        ranking_page(&[("Wednesday", "A. One", 2)], Some("2018-04-12")),
    )
    .await;
    serve(
        &server,
        page,
        ("date", "2018-04-12"),
        ranking_page(&[("Thursday", "B. Two", 3)], Some("2018-04-13")),
    )
    .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let out_dir = dir.path().join("days");
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[crawler]
delay-ms = 100

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"
contact-url = "https://example.com/contact"
contact-email = "test@example.com"

[output]
mode = "stream"
directory = "{}"

[scirate]
start = {{ year = 2018, month = 4, day = 11 }}
end = {{ year = 2018, month = 4, day = 12 }}
archive = "quant-ph"
base-url = "{}"
"#,
            out_dir.display(),
            server.uri()
        ),
    )
    .expect("Failed to write config");

    let config = load_config(&config_path).expect("Failed to load config");
    assert_eq!(config.output.mode, OutputMode::Stream);
    let scirate = config.scirate.clone().expect("scirate section missing");

    let mut crawler = ScirateCrawler::with_http(scirate, &config.crawler, &config.user_agent)
        .expect("Failed to build crawler");
    let sink = sink_for(&config.output, Source::Scirate).expect("Failed to build sink");
    let result = crawler.run(sink).await.expect("Crawl failed");

    assert!(result.is_empty());

    let written = std::fs::read_to_string(out_dir.join("day_2018_04_12_scirate.json"))
        .expect("day file missing");
    let bucket: DayBucket = serde_json::from_str(&written).expect("day file is not JSON");
    assert_eq!(bucket.date.as_str(), "day_2018_04_12");
    assert_eq!(titles(&bucket), vec!["Thursday"]);
    assert!(out_dir.join("day_2018_04_11_scirate.json").exists());
}

#[test]
fn test_accumulate_output_without_directory_is_valid() {
    let output = OutputConfig {
        mode: OutputMode::Accumulate,
        directory: None,
    };
    assert!(sink_for(&output, Source::Arxiv).is_ok());
}
