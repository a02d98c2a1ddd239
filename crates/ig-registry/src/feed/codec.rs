//! XML reading and writing for package feeds
//!
//! Reading builds a small element tree first and then maps it onto the feed
//! types. Elements are matched by their qualified name (`dc:creator`,
//! `fhir:version`, `atom:link`), which is how this tool and the registry
//! tooling write them. Unknown elements are ignored.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::date::{format_feed_date, now, parse_feed_date, FeedDate};
use super::{
    AtomLink, Channel, Feed, FeedItem, Guid, DEFAULT_KIND, DEFAULT_LANGUAGE, DEFAULT_TTL,
    NS_ATOM, NS_CONTENT, NS_DC, NS_FHIR, RSS_VERSION,
};
use crate::error::{RegistryError, Result};

// ═══════════════════════════════════════════════════════════════════════
// Element tree
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
struct Node {
    name: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<Node>,
}

impl Node {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let mut attrs = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(RegistryError::xml)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(RegistryError::xml)?;
            attrs.push((key, value.into_owned()));
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attrs,
            ..Default::default()
        })
    }

    fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn text_of(&self, name: &str) -> Option<String> {
        self.child(name).map(|c| c.text.clone())
    }

    fn required_text(&self, name: &str) -> Result<String> {
        self.text_of(name).ok_or_else(|| {
            RegistryError::Xml(format!("<{}> is missing <{}>", self.name, name))
        })
    }

    fn date_of(&self, name: &str) -> Result<FeedDate> {
        match self.child(name).map(|c| c.text.trim()) {
            Some(text) if !text.is_empty() => parse_feed_date(text),
            _ => Ok(now()),
        }
    }
}

fn parse_tree(xml: &str) -> Result<Node> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    loop {
        let node = match reader.read_event().map_err(RegistryError::xml)? {
            Event::Start(start) => {
                stack.push(Node::open(&start)?);
                continue;
            }
            Event::Empty(start) => Node::open(&start)?,
            Event::End(_) => stack
                .pop()
                .ok_or_else(|| RegistryError::Xml("unbalanced closing tag".to_string()))?,
            Event::Text(text) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&text.unescape().map_err(RegistryError::xml)?);
                }
                continue;
            }
            Event::CData(data) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
                continue;
            }
            Event::Eof => {
                return Err(RegistryError::Xml("unexpected end of document".to_string()))
            }
            _ => continue,
        };

        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => return Ok(node),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Reading
// ═══════════════════════════════════════════════════════════════════════

fn read_item(node: &Node) -> Result<FeedItem> {
    let guid_node = node
        .child("guid")
        .ok_or_else(|| RegistryError::Xml("<item> is missing <guid>".to_string()))?;
    let is_perma_link = guid_node
        .attr("isPermaLink")
        .map_or(true, |v| v.trim() != "false");

    Ok(FeedItem {
        title: node.required_text("title")?,
        description: node.text_of("description").unwrap_or_default(),
        link: node.required_text("link")?,
        guid: Guid {
            url: guid_node.text.clone(),
            is_perma_link,
        },
        creator: node.text_of("dc:creator").unwrap_or_default(),
        fhir_version: node.text_of("fhir:version").unwrap_or_default(),
        kind: node
            .text_of("fhir:kind")
            .unwrap_or_else(|| DEFAULT_KIND.to_string()),
        publication_date: node.date_of("pubDate")?,
        details: node.text_of("fhir:details"),
    })
}

fn read_channel(node: &Node) -> Result<Channel> {
    let atom_link = match node.child("atom:link") {
        Some(link) => AtomLink {
            href: link.attr("href").unwrap_or_default().to_string(),
            rel: link.attr("rel").unwrap_or("self").to_string(),
            link_type: link
                .attr("type")
                .unwrap_or("application/rss+xml")
                .to_string(),
        },
        None => AtomLink::self_link(""),
    };

    let ttl = match node.text_of("ttl") {
        Some(text) => text
            .trim()
            .parse()
            .map_err(|_| RegistryError::Xml(format!("invalid <ttl> `{}`", text)))?,
        None => DEFAULT_TTL,
    };

    Ok(Channel {
        title: node.text_of("title").unwrap_or_default(),
        description: node.text_of("description").unwrap_or_default(),
        link: node.text_of("link").unwrap_or_default(),
        generator: node.text_of("generator").unwrap_or_default(),
        last_build_date: node.date_of("lastBuildDate")?,
        atom_link,
        publication_date: node.date_of("pubDate")?,
        language: node
            .text_of("language")
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        ttl,
        items: node.children("item").map(read_item).collect::<Result<_>>()?,
    })
}

impl Feed {
    /// Parse a feed document.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root = parse_tree(xml)?;
        if root.name != "rss" {
            return Err(RegistryError::Xml(format!(
                "expected <rss> root, found <{}>",
                root.name
            )));
        }
        let channel = root
            .child("channel")
            .ok_or_else(|| RegistryError::Xml("<rss> is missing <channel>".to_string()))?;

        Ok(Self {
            version: root.attr("version").unwrap_or(RSS_VERSION).to_string(),
            channel: read_channel(channel)?,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Writing
// ═══════════════════════════════════════════════════════════════════════

type XmlWriter = Writer<Vec<u8>>;

fn write(writer: &mut XmlWriter, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(RegistryError::xml)
}

fn write_text(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write_item(writer: &mut XmlWriter, item: &FeedItem) -> Result<()> {
    write(writer, Event::Start(BytesStart::new("item")))?;
    write_text(writer, "title", &item.title)?;
    write_text(writer, "description", &item.description)?;
    write_text(writer, "link", &item.link)?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute((
        "isPermaLink",
        if item.guid.is_perma_link { "true" } else { "false" },
    ));
    write(writer, Event::Start(guid))?;
    write(writer, Event::Text(BytesText::new(&item.guid.url)))?;
    write(writer, Event::End(BytesEnd::new("guid")))?;

    write_text(writer, "dc:creator", &item.creator)?;
    write_text(writer, "fhir:version", &item.fhir_version)?;
    write_text(writer, "fhir:kind", &item.kind)?;
    write_text(writer, "pubDate", &format_feed_date(&item.publication_date))?;
    if let Some(details) = &item.details {
        write_text(writer, "fhir:details", details)?;
    }
    write(writer, Event::End(BytesEnd::new("item")))
}

fn write_channel(writer: &mut XmlWriter, channel: &Channel) -> Result<()> {
    write(writer, Event::Start(BytesStart::new("channel")))?;
    write_text(writer, "title", &channel.title)?;
    write_text(writer, "description", &channel.description)?;
    write_text(writer, "link", &channel.link)?;
    write_text(writer, "generator", &channel.generator)?;
    write_text(
        writer,
        "lastBuildDate",
        &format_feed_date(&channel.last_build_date),
    )?;

    let mut link = BytesStart::new("atom:link");
    link.push_attribute(("href", channel.atom_link.href.as_str()));
    link.push_attribute(("rel", channel.atom_link.rel.as_str()));
    link.push_attribute(("type", channel.atom_link.link_type.as_str()));
    write(writer, Event::Empty(link))?;

    write_text(writer, "pubDate", &format_feed_date(&channel.publication_date))?;
    write_text(writer, "language", &channel.language)?;
    write_text(writer, "ttl", &channel.ttl.to_string())?;
    for item in &channel.items {
        write_item(writer, item)?;
    }
    write(writer, Event::End(BytesEnd::new("channel")))
}

impl Feed {
    /// Serialize the feed as a pretty-printed UTF-8 document.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        write(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("xmlns:atom", NS_ATOM));
        rss.push_attribute(("xmlns:content", NS_CONTENT));
        rss.push_attribute(("xmlns:dc", NS_DC));
        rss.push_attribute(("xmlns:fhir", NS_FHIR));
        rss.push_attribute(("version", self.version.as_str()));
        write(&mut writer, Event::Start(rss))?;
        write_channel(&mut writer, &self.channel)?;
        write(&mut writer, Event::End(BytesEnd::new("rss")))?;

        let mut xml = String::from_utf8(writer.into_inner()).map_err(RegistryError::xml)?;
        xml.push('\n');
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss xmlns:atom="http://www.w3.org/2005/Atom" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:fhir="http://hl7.org/fhir/feed" version="2.0">
  <channel>
    <title>Packages</title>
    <description>All packages</description>
    <link>http://example.org</link>
    <generator>hand</generator>
    <lastBuildDate>Tue, 05 Mar 2024 14:03:27 +0100</lastBuildDate>
    <atom:link href="http://example.org/package-feed.xml" rel="self" type="application/rss+xml"/>
    <pubDate>Tue, 05 Mar 2024 14:03:27 +0100</pubDate>
    <language>de</language>
    <ttl>60</ttl>
    <item>
      <title>Guide version 1.0.0</title>
      <description><![CDATA[First <b>release</b>]]></description>
      <link>http://example.org/1.0.0/package.tgz</link>
      <guid isPermaLink="false">http://example.org/1.0.0/package.tgz</guid>
      <dc:creator>HL7 &amp; friends</dc:creator>
      <fhir:version>4.0.1</fhir:version>
      <pubDate>Tue, 05 Mar 2024 14:03:27 +0100</pubDate>
      <unknown>ignored</unknown>
    </item>
  </channel>
</rss>
"#;

    #[test]
    fn test_read_minimal_feed() {
        let feed = Feed::from_xml(MINIMAL).unwrap();
        assert_eq!(feed.version, "2.0");
        assert_eq!(feed.channel.language, "de");
        assert_eq!(feed.channel.ttl, 60);
        assert_eq!(
            feed.channel.atom_link.href,
            "http://example.org/package-feed.xml"
        );

        let item = &feed.channel.items[0];
        assert_eq!(item.description, "First <b>release</b>");
        assert_eq!(item.creator, "HL7 & friends");
        assert!(!item.guid.is_perma_link);
        assert_eq!(item.kind, DEFAULT_KIND);
        assert_eq!(item.details, None);
    }

    #[test]
    fn test_write_escapes_and_declares_namespaces() {
        let mut feed = Feed::from_xml(MINIMAL).unwrap();
        feed.channel.items[0].details = Some("a < b".to_string());
        let xml = feed.to_xml().unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("xmlns:content=\"http://purl.org/rss/1.0/modules/content/\""));
        assert!(xml.contains("<dc:creator>HL7 &amp; friends</dc:creator>"));
        assert!(xml.contains("<guid isPermaLink=\"false\">"));
        assert!(xml.contains("<fhir:kind>IG</fhir:kind>"));
        assert!(xml.contains("<fhir:details>a &lt; b</fhir:details>"));
        assert!(xml.contains("<pubDate>Tue, 05 Mar 2024 14:03:27 +0100</pubDate>"));
    }

    #[test]
    fn test_written_feed_reads_back() {
        let feed = Feed::from_xml(MINIMAL).unwrap();
        let again = Feed::from_xml(&feed.to_xml().unwrap()).unwrap();
        assert_eq!(again, feed);
    }

    #[test]
    fn test_missing_channel_is_malformed() {
        let err = Feed::from_xml("<rss version=\"2.0\"></rss>").unwrap_err();
        assert!(matches!(err, RegistryError::Xml(_)));
    }

    #[test]
    fn test_item_without_guid_is_malformed() {
        let xml = "<rss><channel><item><title>t</title><link>l</link></item></channel></rss>";
        let err = Feed::from_xml(xml).unwrap_err();
        assert!(err.to_string().contains("guid"));
    }

    #[test]
    fn test_wrong_root_is_malformed() {
        let err = Feed::from_xml("<feed/>").unwrap_err();
        assert!(err.to_string().contains("<rss>"));
    }
}
