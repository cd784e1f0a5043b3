//! RSS 2.0 rendering.
//!
//! One `<channel>` with the feed metadata and one `<item>` per record. Item
//! links and GUIDs are always the configured site URL. The item body is an
//! HTML fragment, escaped into `<description>`:
//!
//! - failure records get a red error block with the diagnostic text and the
//!   attempted URL
//! - ok records get the lead image (also attached as an `<enclosure>`), an
//!   author line, a date line and the description

use crate::models::{Channel, FeedDocument, FeedEntries, Record};
use crate::synth::{FAILURE_TITLE_PREFIX, SYSTEM_ERROR_AUTHOR};
use chrono::{DateTime, FixedOffset, Utc};
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::error::Error;
use std::io::Write;
use tracing::instrument;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
const RSS_DOCS: &str = "http://www.rssboard.org/rss-specification";

/// Serialize `doc` into RSS 2.0 XML.
#[instrument(level = "debug", skip_all)]
pub fn render_rss(doc: &FeedDocument) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:atom", ATOM_NS));
    rss.push_attribute(("xmlns:dc", DC_NS));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_channel_meta(&mut writer, &doc.channel)?;

    match &doc.entries {
        FeedEntries::Records(records) => {
            for record in records {
                write_item(&mut writer, record)?;
            }
        }
        FeedEntries::NoSitesConfigured(notice) => write_notice_item(&mut writer, &doc.channel, notice)?,
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(out)
}

fn write_text_element<W: Write>(w: &mut Writer<W>, name: &str, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_channel_meta<W: Write>(w: &mut Writer<W>, channel: &Channel) -> Result<(), Box<dyn Error + Send + Sync>> {
    write_text_element(w, "title", &channel.title)?;
    write_text_element(w, "link", &channel.link)?;
    write_text_element(w, "description", &channel.description)?;

    let mut self_link = BytesStart::new("atom:link");
    self_link.push_attribute(("href", channel.self_link.as_str()));
    self_link.push_attribute(("rel", "self"));
    self_link.push_attribute(("type", super::RSS_CONTENT_TYPE));
    w.write_event(Event::Empty(self_link))?;

    write_text_element(w, "docs", RSS_DOCS)?;
    write_text_element(
        w,
        "generator",
        concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")),
    )?;
    write_text_element(w, "language", &channel.language)?;
    write_text_element(w, "managingEditor", &channel.managing_editor)?;
    write_text_element(w, "lastBuildDate", &channel.last_build_date.to_rfc2822())?;
    Ok(())
}

fn write_item<W: Write>(w: &mut Writer<W>, record: &Record) -> Result<(), Box<dyn Error + Send + Sync>> {
    let failed = record.status.is_failure();

    w.write_event(Event::Start(BytesStart::new("item")))?;
    write_text_element(w, "title", &item_title(record))?;
    write_text_element(w, "link", &record.url)?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "true"));
    w.write_event(Event::Start(guid))?;
    w.write_event(Event::Text(BytesText::new(&record.url)))?;
    w.write_event(Event::End(BytesEnd::new("guid")))?;

    write_text_element(w, "pubDate", &record.pub_date.to_rfc2822())?;

    let (author, body) = if failed {
        (SYSTEM_ERROR_AUTHOR, failure_body(record))
    } else {
        (record.author.as_str(), success_body(record))
    };
    write_text_element(w, "dc:creator", author)?;
    write_text_element(w, "description", &body)?;

    if let (false, Some(image)) = (failed, record.image_url.as_deref()) {
        let mut enclosure = BytesStart::new("enclosure");
        enclosure.push_attribute(("url", image));
        enclosure.push_attribute(("length", "0"));
        enclosure.push_attribute(("type", "image/jpeg"));
        w.write_event(Event::Empty(enclosure))?;
    }

    w.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn write_notice_item<W: Write>(w: &mut Writer<W>, channel: &Channel, notice: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    w.write_event(Event::Start(BytesStart::new("item")))?;
    write_text_element(w, "title", "No sites configured")?;
    write_text_element(w, "link", &channel.link)?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "false"));
    w.write_event(Event::Start(guid))?;
    w.write_event(Event::Text(BytesText::new("no-sites-configured")))?;
    w.write_event(Event::End(BytesEnd::new("guid")))?;

    write_text_element(w, "pubDate", &channel.last_build_date.to_rfc2822())?;
    write_text_element(w, "description", &format!("<p>{}</p>", escape(notice)))?;
    w.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn item_title(record: &Record) -> String {
    if record.status.is_failure() {
        record.title.replacen(FAILURE_TITLE_PREFIX, "Scraping Failed", 1)
    } else {
        record.title.clone()
    }
}

fn failure_body(record: &Record) -> String {
    let url = escape(&record.url);
    format!(
        concat!(
            r#"<div style="color: #CC0000; border: 1px solid #CC0000; padding: 10px; background-color: #FFEEFF; border-radius: 4px;">"#,
            r#"<h3 style="margin-top: 0; font-weight: bold;">❌ SCRAPING FAILED - INCOMPATIBLE SITE ❌</h3>"#,
            "<p><strong>Status:</strong> This link is not working with the current RSS scraping engine.</p>",
            r#"<p><strong>Attempted URL:</strong> <a href="{url}">{url}</a></p>"#,
            r#"<hr style="border-top: 1px solid #CC0000;">"#,
            "<p><strong>Error Details:</strong> {detail}</p>",
            "</div>"
        ),
        url = url,
        detail = escape(&record.description),
    )
}

fn success_body(record: &Record) -> String {
    let mut body = String::new();
    if let Some(image) = &record.image_url {
        body.push_str(&format!(
            r#"<p><img src="{}" alt="{}" style="max-width: 100%; height: auto; border-radius: 8px;"></p>"#,
            escape(image),
            escape(&record.title)
        ));
    }
    body.push_str(&format!("<p><strong>Source:</strong> {}</p>", escape(&record.author)));
    body.push_str(&format!("<p><strong>Date:</strong> {}</p>", display_date(&record.pub_date)));
    body.push_str("<hr>");
    body.push_str(&format!("<p>{}</p>", escape(&record.description)));
    body
}

/// `YYYY-MM-DD HH:MM:SS` followed by `UTC` or the numeric offset.
fn display_date(date: &DateTime<FixedOffset>) -> String {
    const FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";
    if date.offset().local_minus_utc() == 0 {
        date.with_timezone(&Utc).format(FORMAT).to_string()
    } else {
        date.format(FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::fetcher::FetchError;
    use crate::models::RecordStatus;
    use crate::synth::{SiteFailure, from_failure};

    fn ok_record(image: Option<&str>) -> Record {
        Record {
            title: "Hello & Welcome".to_string(),
            url: "https://example.com/articles/x".to_string(),
            author: "Jane".to_string(),
            description: "A <b>bold</b> claim".to_string(),
            image_url: image.map(str::to_string),
            pub_date: DateTime::parse_from_rfc3339("2025-05-06T14:30:00+00:00").unwrap(),
            source_name: "Jane".to_string(),
            status: RecordStatus::Ok,
        }
    }

    fn render(entries: FeedEntries) -> String {
        let doc = FeedDocument {
            channel: FeedConfig::default().channel(Utc::now()),
            entries,
        };
        String::from_utf8(render_rss(&doc).unwrap()).unwrap()
    }

    #[test]
    fn test_channel_metadata() {
        let xml = render(FeedEntries::Records(vec![]));

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<rss version=\"2.0\""));
        assert!(xml.contains("<title>Pure XML Site Aggregator Feed</title>"));
        assert!(xml.contains("<link>http://127.0.0.1:5000</link>"));
        assert!(xml.contains(
            "<atom:link href=\"http://127.0.0.1:5000/feed.xml\" rel=\"self\" type=\"application/rss+xml\"/>"
        ));
        assert!(xml.contains("<language>en</language>"));
        assert!(xml.contains("<lastBuildDate>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn test_ok_item_with_image() {
        let xml = render(FeedEntries::Records(vec![ok_record(Some("https://example.com/img.png"))]));

        assert!(xml.contains("<title>Hello &amp; Welcome</title>"));
        assert!(xml.contains("<link>https://example.com/articles/x</link>"));
        assert!(xml.contains("<guid isPermaLink=\"true\">https://example.com/articles/x</guid>"));
        assert!(xml.contains("May 2025 14:30:00 +0000</pubDate>"));
        assert!(xml.contains("<dc:creator>Jane</dc:creator>"));
        assert!(xml.contains(
            "<enclosure url=\"https://example.com/img.png\" length=\"0\" type=\"image/jpeg\"/>"
        ));
        // The HTML body is escaped once as markup and the description text twice.
        assert!(xml.contains("&lt;strong&gt;Source:&lt;/strong&gt; Jane"));
        assert!(xml.contains("2025-05-06 14:30:00 UTC"));
        assert!(xml.contains("A &amp;lt;b&amp;gt;bold&amp;lt;/b&amp;gt; claim"));
        assert!(xml.contains("&lt;img src="));
    }

    #[test]
    fn test_display_date_names_utc_and_keeps_offsets() {
        let utc = DateTime::parse_from_rfc3339("2025-05-06T14:30:00Z").unwrap();
        let cest = DateTime::parse_from_rfc3339("2025-05-06T14:30:00+02:00").unwrap();
        assert_eq!(display_date(&utc), "2025-05-06 14:30:00 UTC");
        assert_eq!(display_date(&cest), "2025-05-06 14:30:00 +02:00");
    }

    #[test]
    fn test_ok_item_without_image_has_no_enclosure() {
        let xml = render(FeedEntries::Records(vec![ok_record(None)]));
        assert!(!xml.contains("<enclosure"));
        assert!(!xml.contains("&lt;img"));
    }

    #[test]
    fn test_failure_item() {
        let failure = SiteFailure::Fetch(FetchError::HttpStatus(403));
        let record = from_failure("https://blocked.example/", &failure, Utc::now().fixed_offset());
        let xml = render(FeedEntries::Records(vec![record]));

        assert!(xml.contains("<title>Scraping Failed Fetching Failed for: https://blocked.example/</title>"));
        assert!(xml.contains("<link>https://blocked.example/</link>"));
        assert!(xml.contains("<dc:creator>System Error</dc:creator>"));
        assert!(xml.contains("SCRAPING FAILED - INCOMPATIBLE SITE"));
        assert!(xml.contains("HTTP error: status 403"));
        assert!(xml.contains("Attempted URL:"));
        // Placeholder images are for the JSON view only.
        assert!(!xml.contains("<enclosure"));
    }

    #[test]
    fn test_items_follow_record_order() {
        let mut first = ok_record(None);
        first.title = "First".to_string();
        first.url = "https://a.example/".to_string();
        let mut second = ok_record(None);
        second.title = "Second".to_string();
        second.url = "https://b.example/".to_string();

        let xml = render(FeedEntries::Records(vec![first, second]));
        let a = xml.find("<title>First</title>").unwrap();
        let b = xml.find("<title>Second</title>").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_no_sites_configured_notice() {
        let xml = render(FeedEntries::NoSitesConfigured("No sites configured in sites.txt".to_string()));

        assert_eq!(xml.matches("<item>").count(), 1);
        assert!(xml.contains("<title>No sites configured</title>"));
        assert!(xml.contains("<guid isPermaLink=\"false\">no-sites-configured</guid>"));
        assert!(xml.contains("No sites configured in sites.txt"));
    }
}
